use serde::{Deserialize, Serialize};

/// A generated practice-test question as returned by the AI provider.
///
/// Instances are request-scoped: parsed from the provider's JSON response,
/// validated, serialized to CSV, and discarded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question: String,
    pub question_type: QuestionType,
    pub answers: Vec<AnswerOption>,
    #[serde(default)]
    pub overall_explanation: String,
    #[serde(default)]
    pub domain: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOption {
    pub text: String,
    pub explanation: String, // why this option is correct or incorrect
    pub is_correct: bool,
}

/// Wire-level question type used in the provider JSON and the CSV export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuestionType {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "multi-select")]
    MultiSelect,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::MultiSelect => "multi-select",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_round_trip_serialization() {
        let variants = [QuestionType::MultipleChoice, QuestionType::MultiSelect];

        for variant in variants {
            let json = serde_json::to_string(&variant).expect("variant should serialize");
            let parsed: QuestionType =
                serde_json::from_str(&json).expect("variant should deserialize");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn question_type_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuestionType::MultipleChoice).unwrap(),
            "\"multiple-choice\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionType::MultiSelect).unwrap(),
            "\"multi-select\""
        );
    }

    #[test]
    fn question_type_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<QuestionType>("\"essay\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn question_parses_provider_json_with_missing_optional_fields() {
        let json = r#"{
            "question": "Is SQL a declarative language?",
            "question_type": "multiple-choice",
            "answers": [
                {"text": "TRUE", "explanation": "SQL describes what, not how", "is_correct": true},
                {"text": "FALSE", "explanation": "Incorrect", "is_correct": false}
            ]
        }"#;

        let question: Question = serde_json::from_str(json).expect("question should parse");
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert_eq!(question.answers.len(), 2);
        assert!(question.overall_explanation.is_empty());
        assert!(question.domain.is_empty());
    }
}
