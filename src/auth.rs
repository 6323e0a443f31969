//! Customer session handling.
//!
//! A [`Session`] is the logged-in user plus the bearer token returned by
//! `POST users/login`. It is passed explicitly to every endpoint that
//! needs it instead of living in global state.

use serde::Serialize;
use tracing::info;
use zeroize::Zeroizing;

use crate::Result;
use crate::api::ApiClient;
use crate::models::User;

/// An authenticated customer.
#[derive(Clone)]
pub struct Session {
    user: User,
    token: Zeroizing<String>,
}

impl Session {
    /// Wraps a user and its bearer token.
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: Zeroizing::new(token.into()),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Logs a customer in and returns the session.
///
/// # Errors
///
/// Returns a [`OrdertabError`](crate::OrdertabError) if the request fails,
/// the credentials are rejected, or the response carries no token.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<Session> {
    let mut user: User = client
        .post("users/login", &LoginRequest { email, password }, None)
        .await?;

    let token = user.token.take().ok_or_else(|| {
        crate::OrdertabError::MalformedResponse("missing token in login response".into())
    })?;

    info!(user_id = user.id, "logged in");
    Ok(Session::new(user, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        serde_json::from_str(
            r#"{"id": 3, "firstName": "Ana", "lastName": "López", "email": "customer1@customer.com", "userType": "customer", "token": "abc123"}"#,
        )
        .unwrap()
    }

    #[test]
    fn debug_output_hides_token() {
        let mut u = user();
        let token = u.token.take().unwrap();
        let session = Session::new(u, token);

        let rendered = format!("{session:?}");
        assert!(!rendered.contains("abc123"));
        assert_eq!(session.token(), "abc123");
        assert_eq!(session.user().display_name(), "Ana López");
    }

    #[test]
    fn login_body_shape() {
        let body = serde_json::to_value(LoginRequest {
            email: "a@b.c",
            password: "pw",
        })
        .unwrap();
        assert_eq!(body["email"], "a@b.c");
        assert_eq!(body["password"], "pw");
    }
}
