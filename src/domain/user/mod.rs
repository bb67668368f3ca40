//! User domain
//!
//! This module provides domain types and traits for user management,
//! including the user entity, validation, the repository trait and the service contract.

mod entity;
mod repository;
mod service;
mod validation;

pub use entity::{NewUser, User};
pub use repository::UserRepository;
pub use service::UserService;
pub use validation::{
    normalize_email, normalize_phone_number, validate_email, validate_password,
    validate_phone_number, validate_username, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
