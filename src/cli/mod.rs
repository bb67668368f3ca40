//! CLI module for the user registry
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `migrate`: apply (or revert) the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// User registry - user accounts, password checks and auth tokens over HTTP
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
}

/// Load `.env`, configuration and logging shared by every subcommand
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_addr() {
        let cli = Cli::try_parse_from(["user-registry", "serve", "--addr", "127.0.0.1:9000"]).unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.addr.unwrap().to_string(), "127.0.0.1:9000");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["user-registry", "migrate", "--revert"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate(args) if args.revert));
    }

    #[test]
    fn test_invalid_addr_rejected() {
        assert!(Cli::try_parse_from(["user-registry", "serve", "--addr", "nope"]).is_err());
    }
}
