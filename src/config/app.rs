use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DeskError;
use crate::state::request_store::DEFAULT_STORAGE_KEY;
use crate::validation::{validate_email, MAX_REQUEST_CHARS, MIN_REQUEST_CHARS};

/// Desk configuration, loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Storage slot holding the JSON array of requests
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory used by file-backed storage
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Typing this address into the email field reveals the admin view.
    /// A UI convenience only, not access control.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default = "default_max_request_chars")]
    pub max_request_chars: usize,

    /// Cosmetic pause the form may show before confirming a submit.
    /// The core never waits on it.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// trace, debug, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_storage_dir() -> String {
    "state".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_max_request_chars() -> usize {
    MAX_REQUEST_CHARS
}

fn default_submit_delay_ms() -> u64 {
    800
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage_dir: default_storage_dir(),
            admin_email: default_admin_email(),
            max_request_chars: default_max_request_chars(),
            submit_delay_ms: default_submit_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, or use defaults if it does not exist
    pub fn load(path: &str) -> crate::error::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: AppConfig =
                    serde_json::from_str(&content).map_err(|e| DeskError::ConfigParse {
                        path: path.to_string(),
                        source: e,
                    })?;
                config.validate()?;
                info!("Loaded config from {}", path);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(DeskError::ConfigLoad {
                path: path.to_string(),
                source: e,
            }),
        }
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(DeskError::ConfigValidation {
                message: "storage_key must not be empty".to_string(),
            });
        }

        if !validate_email(&self.admin_email) {
            return Err(DeskError::ConfigValidation {
                message: format!("admin_email '{}' is not a valid email", self.admin_email),
            });
        }

        if !(MIN_REQUEST_CHARS..=MAX_REQUEST_CHARS).contains(&self.max_request_chars) {
            return Err(DeskError::ConfigValidation {
                message: format!(
                    "max_request_chars must be between {} and {}, got {}",
                    MIN_REQUEST_CHARS, MAX_REQUEST_CHARS, self.max_request_chars
                ),
            });
        }

        Ok(())
    }
}
