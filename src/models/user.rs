//! Customer account as returned by the login endpoint.

use serde::{Deserialize, Serialize};

/// A logged-in customer.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub user_type: Option<String>,
    /// Bearer token, only present in the login response.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl User {
    /// Returns "first last" or just the first name.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("user_type", &self.user_type)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
