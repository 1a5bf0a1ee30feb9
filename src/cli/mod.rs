//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Custodian using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Custodian - collection backup and reminder tool
#[derive(Parser, Debug)]
#[command(name = "custodian")]
#[command(version, about, long_about = None)]
#[command(author = "Custodian Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "custodian.toml", env = "CUSTODIAN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CUSTODIAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all configured collections to CSV backup files
    Export(commands::export::ExportArgs),

    /// Scan for overdue pending forms and e-mail reminders
    Remind(commands::remind::RemindArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["custodian", "export"]);
        assert_eq!(cli.config, "custodian.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_remind() {
        let cli = Cli::parse_from(["custodian", "remind"]);
        assert!(matches!(cli.command, Commands::Remind(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["custodian", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["custodian", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["custodian", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["custodian", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
