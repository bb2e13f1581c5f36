pub mod user_repository;

pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use user_repository::MockUserRepository;
