//! Authentication infrastructure module
//!
//! This module provides opaque auth token generation for logged-in users.

mod token;

pub use token::AuthTokenGenerator;
