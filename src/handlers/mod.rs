pub mod auth_handler;
pub mod billing_handler;
pub mod generator_handler;
pub mod health_handler;

pub use auth_handler::{get_usage, login, register};
pub use billing_handler::{create_checkout_session, create_customer_portal, stripe_webhook};
pub use generator_handler::generate_test;
pub use health_handler::{health_check, health_check_live, health_check_ready};
