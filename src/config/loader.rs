//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CustodianConfig;
use super::secret::secret_string;
use crate::domain::errors::CustodianError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CustodianConfig
/// 4. Applies environment variable overrides (CUSTODIAN_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use custodian::config::loader::load_config;
///
/// let config = load_config("custodian.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CustodianConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(CustodianError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        CustodianError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: CustodianConfig = toml::from_str(&contents)
        .map_err(|e| CustodianError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        CustodianError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        // Process non-comment lines for env var substitution
        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CustodianError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CUSTODIAN_* prefix
///
/// Environment variables follow the pattern: CUSTODIAN_<SECTION>_<KEY>
/// For example: CUSTODIAN_STORE_ENDPOINT, CUSTODIAN_BACKUP_OUTPUT_DIR
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
fn apply_env_overrides(config: &mut CustodianConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CUSTODIAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Store overrides
    if let Ok(val) = std::env::var("CUSTODIAN_STORE_ENDPOINT") {
        config.store.endpoint = val;
    }
    if let Ok(val) = std::env::var("CUSTODIAN_STORE_PROJECT_ID") {
        config.store.project_id = val;
    }
    if let Ok(val) = std::env::var("CUSTODIAN_STORE_API_KEY") {
        config.store.api_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("CUSTODIAN_STORE_DATABASE_ID") {
        config.store.database_id = val;
    }
    if let Ok(val) = std::env::var("CUSTODIAN_STORE_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.store.timeout_seconds = seconds;
        }
    }

    // Backup overrides
    if let Ok(val) = std::env::var("CUSTODIAN_BACKUP_OUTPUT_DIR") {
        config.backup.output_dir = val;
    }
    if let Ok(val) = std::env::var("CUSTODIAN_BACKUP_MAX_PAGES") {
        if let Ok(pages) = val.parse() {
            config.backup.max_pages = pages;
        }
    }

    // Reminder overrides (only if the section is configured)
    if let Some(ref mut reminder) = config.reminder {
        if let Ok(val) = std::env::var("CUSTODIAN_REMINDER_FORM_BASE_URL") {
            reminder.form_base_url = val;
        }
    }

    // E-mail overrides (only if the section is configured)
    if let Some(ref mut email) = config.email {
        if let Ok(val) = std::env::var("CUSTODIAN_EMAIL_ENDPOINT") {
            email.endpoint = val;
        }
        if let Ok(val) = std::env::var("CUSTODIAN_EMAIL_API_KEY") {
            email.api_key = secret_string(val);
        }
        if let Ok(val) = std::env::var("CUSTODIAN_EMAIL_FROM_ADDRESS") {
            email.from_address = val;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CUSTODIAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CUSTODIAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
