//! Application configuration loaded from environment variables.
//!
//! - `ORDERTAB_API_BASE_URL`: order service root, also the prefix for
//!   image paths (default `http://localhost:3000`)
//! - `ORDERTAB_EMAIL` / `ORDERTAB_PASSWORD`: customer login, both or neither
//! - `ORDERTAB_CA_CERT`: PEM file of a CA to trust instead of the bundled roots
//! - `ORDERTAB_LOG_FILE`: where tracing output goes (default `ordertab.log`)
//! - `ORDERTAB_REQUEST_TIMEOUT_SECS`: HTTP timeout (default 10)
//! - `ORDERTAB_REMEMBER_LOGIN`: `1`, `true` or `yes` stores the login in the keychain

use std::path::PathBuf;
use std::time::Duration;

use zeroize::Zeroizing;

/// Default order service endpoint.
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Default log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "ordertab.log";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub login: Option<LoginConfig>,
    pub remember_login: bool,
    pub log_file: PathBuf,
}

/// Order service connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub ca_cert: Option<PathBuf>,
    pub timeout: Duration,
}

/// Customer credentials used to open a session at startup.
pub struct LoginConfig {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Loads the application configuration from environment variables.
///
/// Credentials are optional (the orders screen then asks the user to log
/// in) but when one of email/password is set both must be present.
///
/// # Errors
///
/// Returns [`OrdertabError::Config`](crate::OrdertabError::Config) if only
/// one credential variable is set or the timeout is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("ORDERTAB_API_BASE_URL")
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let email = non_empty_var("ORDERTAB_EMAIL");
    let password = non_empty_var("ORDERTAB_PASSWORD");

    let login = match (email, password) {
        (Some(email), Some(password)) => Some(LoginConfig {
            email,
            password: Zeroizing::new(password),
        }),
        (Some(_), None) => {
            return Err(crate::OrdertabError::Config(
                "ORDERTAB_EMAIL is set but ORDERTAB_PASSWORD is missing".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(crate::OrdertabError::Config(
                "ORDERTAB_PASSWORD is set but ORDERTAB_EMAIL is missing".to_string(),
            ));
        }
        (None, None) => None,
    };

    let timeout = match non_empty_var("ORDERTAB_REQUEST_TIMEOUT_SECS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(crate::OrdertabError::Config(format!(
                    "ORDERTAB_REQUEST_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                )));
            }
        },
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            ca_cert: non_empty_var("ORDERTAB_CA_CERT").map(PathBuf::from),
            timeout,
        },
        login,
        remember_login: non_empty_var("ORDERTAB_REMEMBER_LOGIN")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        log_file: non_empty_var("ORDERTAB_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "ORDERTAB_API_BASE_URL",
        "ORDERTAB_EMAIL",
        "ORDERTAB_PASSWORD",
        "ORDERTAB_CA_CERT",
        "ORDERTAB_LOG_FILE",
        "ORDERTAB_REQUEST_TIMEOUT_SECS",
        "ORDERTAB_REMEMBER_LOGIN",
    ];

    /// Helper that sets env vars (clearing the others), runs `f`, then
    /// restores the originals.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> =
            VARS.iter().map(|k| (*k, std::env::var(k).ok())).collect();

        for k in VARS {
            // SAFETY: env mutation is serialized by ENV_LOCK.
            unsafe { std::env::remove_var(k) };
        }
        for (k, v) in vars {
            // SAFETY: env mutation is serialized by ENV_LOCK.
            unsafe { std::env::set_var(k, v) };
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
            assert!(config.api.ca_cert.is_none());
            assert_eq!(config.api.timeout, Duration::from_secs(10));
            assert!(config.login.is_none());
            assert!(!config.remember_login);
            assert_eq!(config.log_file, PathBuf::from("ordertab.log"));
        });
    }

    #[test]
    fn loads_login_from_env() {
        with_env(
            &[
                ("ORDERTAB_EMAIL", "customer1@customer.com"),
                ("ORDERTAB_PASSWORD", "secret"),
            ],
            || {
                let login = fetch_config().unwrap().login.unwrap();
                assert_eq!(login.email, "customer1@customer.com");
                assert_eq!(login.password.as_str(), "secret");
                assert!(!format!("{login:?}").contains("secret"));
            },
        );
    }

    #[test]
    fn custom_base_url_and_timeout() {
        with_env(
            &[
                ("ORDERTAB_API_BASE_URL", "https://api.example.com"),
                ("ORDERTAB_REQUEST_TIMEOUT_SECS", "3"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.api.base_url, "https://api.example.com");
                assert_eq!(config.api.timeout, Duration::from_secs(3));
            },
        );
    }

    #[test]
    fn remember_login_flag() {
        with_env(&[("ORDERTAB_REMEMBER_LOGIN", "TRUE")], || {
            assert!(fetch_config().unwrap().remember_login);
        });
        with_env(&[("ORDERTAB_REMEMBER_LOGIN", "0")], || {
            assert!(!fetch_config().unwrap().remember_login);
        });
    }

    #[test]
    fn rejects_email_without_password() {
        with_env(&[("ORDERTAB_EMAIL", "a@b.c")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("ORDERTAB_PASSWORD is missing"));
        });
    }

    #[test]
    fn rejects_password_without_email() {
        with_env(&[("ORDERTAB_PASSWORD", "secret")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("ORDERTAB_EMAIL is missing"));
        });
    }

    #[test]
    fn rejects_zero_timeout() {
        with_env(&[("ORDERTAB_REQUEST_TIMEOUT_SECS", "0")], || {
            assert!(fetch_config().is_err());
        });
        with_env(&[("ORDERTAB_REQUEST_TIMEOUT_SECS", "soon")], || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("ORDERTAB_API_BASE_URL", ""),
                ("ORDERTAB_EMAIL", ""),
                ("ORDERTAB_PASSWORD", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
                assert!(config.login.is_none());
            },
        );
    }
}
