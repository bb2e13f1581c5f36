use serde::{Deserialize, Serialize};

/// Subscription tier, mirrored from the billing provider into the user record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Business,
}

impl Tier {
    pub fn monthly_question_limit(&self) -> i64 {
        match self {
            Tier::Free => 20,
            Tier::Pro => 2_500,
            Tier::Business => 7_500,
        }
    }

    pub fn max_questions_per_test(&self) -> u32 {
        match self {
            Tier::Free => 20,
            Tier::Pro => 250,
            Tier::Business => 250,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
            Tier::Business => "business",
        }
    }

    /// Parses a paid tier selected at checkout time. `free` is not purchasable.
    pub fn parse_paid(value: &str) -> Option<Tier> {
        match value.trim().to_lowercase().as_str() {
            "pro" => Some(Tier::Pro),
            "business" => Some(Tier::Business),
            _ => None,
        }
    }
}
