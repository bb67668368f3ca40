//! Infrastructure layer - Storage backends, hashing, tokens and logging

pub mod auth;
pub mod logging;
pub mod storage;
pub mod user;
