pub mod billing_service;
pub mod csv_export;
pub mod distribution;
pub mod generator_service;
pub mod identity_service;
pub mod user_service;

pub use billing_service::BillingService;
pub use generator_service::GeneratorService;
pub use identity_service::IdentityService;
pub use user_service::UserService;
