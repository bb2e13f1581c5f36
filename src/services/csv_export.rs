use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
};

/// Number of answer slots in the spreadsheet template. Questions with fewer
/// answers get blank slots; answers past the sixth are dropped.
const ANSWER_SLOTS: usize = 6;

const HEADER: [&str; 17] = [
    "Question",
    "Question Type",
    "Answer Option 1",
    "Explanation 1",
    "Answer Option 2",
    "Explanation 2",
    "Answer Option 3",
    "Explanation 3",
    "Answer Option 4",
    "Explanation 4",
    "Answer Option 5",
    "Explanation 5",
    "Answer Option 6",
    "Explanation 6",
    "Correct Answers",
    "Overall Explanation",
    "Domain",
];

/// Serializes questions into the Udemy practice-test CSV template.
///
/// One row per question, 17 columns per row. Answer slots are positional:
/// slot i holds the i-th answer's text and explanation regardless of question
/// type. The `Correct Answers` column holds the 1-based slot indices of the
/// correct answers joined by commas, and stays empty when none are marked
/// correct. Quoting follows RFC 4180 via the csv writer, so free-form question
/// text containing commas, quotes, or newlines survives a round trip.
pub fn to_udemy_csv(questions: &[Question]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::InternalError(format!("CSV write failed: {}", e)))?;

    for question in questions {
        let mut row: Vec<String> = Vec::with_capacity(HEADER.len());
        row.push(question.question.clone());
        row.push(question.question_type.as_str().to_string());

        let mut correct_indices: Vec<String> = Vec::new();
        for slot in 0..ANSWER_SLOTS {
            match question.answers.get(slot) {
                Some(answer) => {
                    row.push(answer.text.clone());
                    row.push(answer.explanation.clone());
                    if answer.is_correct {
                        // Udemy expects 1-based indices
                        correct_indices.push((slot + 1).to_string());
                    }
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }

        row.push(correct_indices.join(","));
        row.push(question.overall_explanation.clone());
        row.push(question.domain.clone());

        writer
            .write_record(&row)
            .map_err(|e| AppError::InternalError(format!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::InternalError(format!("CSV output was not valid UTF-8: {}", e)))
}

/// Derives a safe download filename from the working title: keeps
/// alphanumerics, spaces, hyphens, and underscores, turns spaces into
/// underscores, and appends the fixed suffix.
pub fn csv_filename(working_title: &str) -> String {
    let safe_title: String = working_title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();

    format!("{}_practice_test.csv", safe_title.trim().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{AnswerOption, QuestionType};

    fn answer(text: &str, is_correct: bool) -> AnswerOption {
        AnswerOption {
            text: text.to_string(),
            explanation: format!("Explanation for {}", text),
            is_correct,
        }
    }

    fn question_with_answers(answers: Vec<AnswerOption>) -> Question {
        Question {
            question: "Which clause filters rows?".to_string(),
            question_type: QuestionType::MultipleChoice,
            answers,
            overall_explanation: "WHERE filters before aggregation".to_string(),
            domain: "Development".to_string(),
        }
    }

    fn parse(csv_text: &str) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv_text.as_bytes());
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_every_row_has_17_columns() {
        let questions = vec![
            question_with_answers(vec![answer("A", true), answer("B", false)]),
            question_with_answers(vec![
                answer("A", false),
                answer("B", true),
                answer("C", false),
                answer("D", false),
                answer("E", false),
                answer("F", false),
            ]),
        ];

        let rows = parse(&to_udemy_csv(&questions).unwrap());
        assert_eq!(rows.len(), 3); // header + 2 questions
        for row in &rows {
            assert_eq!(row.len(), 17);
        }
    }

    #[test]
    fn test_header_matches_template() {
        let rows = parse(&to_udemy_csv(&[]).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Question");
        assert_eq!(rows[0][14], "Correct Answers");
        assert_eq!(rows[0][16], "Domain");
    }

    #[test]
    fn test_unused_answer_slots_are_blank() {
        let questions = vec![question_with_answers(vec![
            answer("A", true),
            answer("B", false),
            answer("C", false),
        ])];

        let rows = parse(&to_udemy_csv(&questions).unwrap());
        let row = &rows[1];

        // Slots 4-6 occupy columns 9-14 (0-based 8..14)
        for col in 8..14 {
            assert_eq!(row[col], "", "column {} should be empty", col);
        }
    }

    #[test]
    fn test_correct_answer_index_is_one_based() {
        let questions = vec![question_with_answers(vec![
            answer("A", false),
            answer("B", true),
            answer("C", false),
            answer("D", false),
        ])];

        let rows = parse(&to_udemy_csv(&questions).unwrap());
        assert_eq!(rows[1][14], "2");
    }

    #[test]
    fn test_multiple_correct_indices_joined_without_spaces() {
        let questions = vec![Question {
            question_type: QuestionType::MultiSelect,
            ..question_with_answers(vec![
                answer("A", true),
                answer("B", false),
                answer("C", true),
                answer("D", false),
            ])
        }];

        let rows = parse(&to_udemy_csv(&questions).unwrap());
        assert_eq!(rows[1][14], "1,3");
        assert_eq!(rows[1][1], "multi-select");
    }

    #[test]
    fn test_no_correct_answers_yields_empty_column() {
        let questions = vec![question_with_answers(vec![
            answer("A", false),
            answer("B", false),
        ])];

        let rows = parse(&to_udemy_csv(&questions).unwrap());
        assert_eq!(rows[1][14], "");
    }

    #[test]
    fn test_answers_past_slot_six_are_dropped() {
        let questions = vec![question_with_answers(vec![
            answer("A", false),
            answer("B", false),
            answer("C", false),
            answer("D", false),
            answer("E", false),
            answer("F", false),
            answer("G", true),
        ])];

        let rows = parse(&to_udemy_csv(&questions).unwrap());
        assert_eq!(rows[1].len(), 17);
        // The seventh answer never reaches a slot, so its correct flag is lost
        assert_eq!(rows[1][14], "");
    }

    #[test]
    fn test_escaping_round_trips_commas_and_quotes() {
        let tricky = "He said \"WHERE, not HAVING\", remember?\nSecond line";
        let mut question = question_with_answers(vec![answer("A", true), answer("B", false)]);
        question.question = tricky.to_string();

        let rows = parse(&to_udemy_csv(&[question]).unwrap());
        assert_eq!(rows[1][0], tricky);
    }

    #[test]
    fn test_csv_filename_sanitization() {
        assert_eq!(csv_filename("SQL Basics"), "SQL_Basics_practice_test.csv");
        // Stripped characters do not collapse surrounding spaces
        assert_eq!(
            csv_filename("C# & .NET: Intro!"),
            "C__NET_Intro_practice_test.csv"
        );
        assert_eq!(
            csv_filename("under_score-kept"),
            "under_score-kept_practice_test.csv"
        );
    }
}
