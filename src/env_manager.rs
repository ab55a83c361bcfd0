use log::{info, warn};
use secrecy::SecretString;
use std::env;

/// Checked in order; `API_KEY` is kept for older deployments
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

// Optional; controls the env_logger filter
pub const LOG_LEVEL_VAR: &str = "TERMIN_LOG_LEVEL";

/// Load variables from a `.env` file if there is one
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => info!("No .env file found or error loading it: {}", e),
    }
}

/// The generative-language API key, if configured
pub fn api_key() -> Option<SecretString> {
    API_KEY_VARS.iter().find_map(|var| match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value.trim().to_string())),
        _ => None,
    })
}

/// Warn once at startup when smart parsing cannot work
pub fn check_env_vars() -> bool {
    let present = api_key().is_some();
    if !present {
        warn!(
            "{} environment variable not set. Smart parse calls will fail.",
            API_KEY_VARS.join(" / ")
        );
    }
    present
}
