//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CorsConfig, HashingConfig, LogFormat, LoggingConfig, ServerConfig, StorageBackend,
    StorageConfig, UsersConfig,
};
