use crate::models::domain::{AnswerOption, Question, QuestionType};

pub mod fixtures {
    use super::*;

    /// A minimal valid multiple-choice question
    pub fn test_question(text: &str) -> Question {
        Question {
            question: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            answers: vec![
                AnswerOption {
                    text: "Right".to_string(),
                    explanation: "This one is correct".to_string(),
                    is_correct: true,
                },
                AnswerOption {
                    text: "Wrong".to_string(),
                    explanation: "This one is not".to_string(),
                    is_correct: false,
                },
            ],
            overall_explanation: String::new(),
            domain: String::new(),
        }
    }

    /// A multi-select question with the given correct answer positions (1-based)
    pub fn test_multi_select(correct_positions: &[usize]) -> Question {
        let answers = (1..=4)
            .map(|i| AnswerOption {
                text: format!("Option {}", i),
                explanation: format!("Explanation {}", i),
                is_correct: correct_positions.contains(&i),
            })
            .collect();

        Question {
            question: "Select all that apply".to_string(),
            question_type: QuestionType::MultiSelect,
            answers,
            overall_explanation: "More than one answer is correct".to_string(),
            domain: "General".to_string(),
        }
    }

    pub fn test_questions(count: usize) -> Vec<Question> {
        (1..=count)
            .map(|i| test_question(&format!("Question {}", i)))
            .collect()
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_questions_are_valid() {
        let question = test_question("What is 2 + 2?");
        assert!(question.answers.iter().any(|a| a.is_correct));

        let multi = test_multi_select(&[1, 3]);
        assert_eq!(multi.answers.iter().filter(|a| a.is_correct).count(), 2);
    }
}
