pub mod question;
pub mod tier;
pub mod user;

pub use question::{AnswerOption, Question, QuestionType};
pub use tier::Tier;
pub use user::User;
