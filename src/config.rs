//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Environment variable holding the status service base URL.
pub const ENV_URL: &str = "ONBOARDING_NOTIFY_URL";
/// Environment variable holding the user the notifications are sent as.
pub const ENV_USER: &str = "ONBOARDING_NOTIFY_USER";
/// Environment variable holding the credential for the status service.
pub const ENV_CREDENTIAL: &str = "ONBOARDING_NOTIFY_CREDENTIAL";
/// Optional request timeout override, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "ONBOARDING_NOTIFY_TIMEOUT_SECS";

/// Connection settings for the step-result service.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Base URL of the status service, e.g. `http://localhost:8080/ccds`.
    pub target_url: String,
    /// User id sent with every notification and used for basic auth.
    pub user_id: String,
    /// Password or token for the status service.
    pub credential: SecretString,
    /// Upper bound on a single request.
    pub request_timeout: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            target_url: "http://localhost:8080/ccds".to_string(),
            user_id: String::new(),
            credential: SecretString::from(""),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl NotifierConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required =
            |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let target_url = required(ENV_URL)?;
        let user_id = required(ENV_USER)?;
        let credential = SecretString::from(required(ENV_CREDENTIAL)?);

        let request_timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS.to_string(),
                    message: format!("expected whole seconds, got {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_TIMEOUT_SECS.to_string(),
                        message: "timeout must be at least one second".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Self::default().request_timeout,
        };

        Ok(Self {
            target_url,
            user_id,
            credential,
            request_timeout,
        })
    }
}
