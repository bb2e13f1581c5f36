use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const LEARNING_OBJECTIVE_MAX_LENGTH: usize = 160;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateTestRequest {
    #[validate(length(min = 1, max = 100))]
    pub working_title: String,

    #[validate(length(min = 1))]
    pub practice_test_title: String,

    pub category: String,

    #[validate(
        length(min = 4, max = 10),
        custom(function = "validate_objective_lengths")
    )]
    pub learning_objectives: Vec<String>,

    pub requirements: String,

    pub target_audience: String,

    pub difficulty_level: String,

    #[validate(range(min = 1, max = 250))]
    pub num_questions: u32,

    /// User-facing format tags; unrecognized tags are ignored downstream.
    pub question_formats: Vec<String>,

    pub explanation_style: String,
}

fn validate_objective_lengths(objectives: &Vec<String>) -> Result<(), ValidationError> {
    for objective in objectives {
        if objective.chars().count() > LEARNING_OBJECTIVE_MAX_LENGTH {
            return Err(ValidationError::new("objective_too_long")
                .with_message("Each learning objective must be max 160 characters".into()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutParams {
    #[serde(default = "default_checkout_tier")]
    pub tier: String,
}

fn default_checkout_tier() -> String {
    "pro".to_string()
}
