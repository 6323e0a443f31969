//! Secure credential storage via the system keychain.
//!
//! At startup, [`populate_env_from_keychain`] copies stored customer
//! credentials into environment variables so the config flow picks them
//! up transparently. [`save`] stores them after a successful login when
//! `ORDERTAB_REMEMBER_LOGIN` is set.

use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "ordertab";

/// Known credential keys managed by this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKey {
    Email,
    Password,
}

impl CredentialKey {
    /// Returns the keychain entry identifier.
    pub fn keyring_id(self) -> &'static str {
        match self {
            Self::Email => "customer_email",
            Self::Password => "customer_password",
        }
    }

    /// Returns the environment variable name for this credential.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Email => "ORDERTAB_EMAIL",
            Self::Password => "ORDERTAB_PASSWORD",
        }
    }

    /// All credential keys.
    pub const ALL: [CredentialKey; 2] = [Self::Email, Self::Password];
}

/// Loads a credential from the keychain, returning `None` if not set.
pub fn load(key: CredentialKey) -> Option<Zeroizing<String>> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id()).ok()?;
    match entry.get_password() {
        Ok(password) => Some(Zeroizing::new(password)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(key = key.keyring_id(), error = %e, "failed to read keychain entry");
            None
        }
    }
}

/// Saves a credential to the keychain.
///
/// # Errors
///
/// Returns [`OrdertabError::Config`](crate::OrdertabError::Config) if the
/// keychain is unavailable.
pub fn save(key: CredentialKey, value: &str) -> crate::Result<()> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id())
        .map_err(|e| crate::OrdertabError::Config(format!("keyring entry error: {e}")))?;
    entry
        .set_password(value)
        .map_err(|e| crate::OrdertabError::Config(format!("failed to save to keychain: {e}")))
}

/// Populates environment variables from the keychain for any
/// credentials not already set in the environment.
///
/// Call this at startup before [`crate::config::fetch_config`].
pub fn populate_env_from_keychain() {
    for key in CredentialKey::ALL {
        if std::env::var(key.env_var()).is_err()
            && let Some(value) = load(key)
        {
            debug!(key = key.env_var(), "loaded credential from keychain");
            // SAFETY: single-threaded at this point (before tokio runtime starts tasks)
            unsafe {
                std::env::set_var(key.env_var(), value.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_match_config() {
        assert_eq!(CredentialKey::Email.env_var(), "ORDERTAB_EMAIL");
        assert_eq!(CredentialKey::Password.env_var(), "ORDERTAB_PASSWORD");
        assert_ne!(
            CredentialKey::Email.keyring_id(),
            CredentialKey::Password.keyring_id()
        );
    }
}
