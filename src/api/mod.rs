//! Thin REST wrapper around the order service.
//!
//! [`ApiClient`] knows how to reach the service and how to turn a non-2xx
//! answer into an [`OrdertabError`]. The resource modules build paths and
//! payloads on top of it:
//! - [`orders`] - list, detail, create, update and delete orders
//! - [`restaurants`] - restaurant detail with its catalog

pub mod orders;
pub mod restaurants;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::config::ApiConfig;
use crate::tls::build_tls_config;
use crate::{OrdertabError, Result};

/// HTTP client bound to one order service base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the API section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom CA cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(path) = &config.ca_cert {
            builder = builder.use_preconfigured_tls(build_tls_config(path)?);
        }
        let http = builder
            .build()
            .map_err(|e| OrdertabError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash, also used for image paths.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "sending request");
        let builder = self.http.request(method, url);
        match session {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        }
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, session: Option<&Session>) -> Result<T> {
        let response = self.request(Method::GET, path, session).send().await?;
        decode(response).await
    }

    /// `POST path` with a JSON body and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, session)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// `PUT path` with a JSON body and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn put<B, T>(&self, path: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PUT, path, session)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// `DELETE path`, ignoring any body on success.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn destroy(&self, path: &str, session: Option<&Session>) -> Result<()> {
        let response = self.request(Method::DELETE, path, session).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_body(status, &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(error_from_body(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

#[derive(serde::Deserialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

#[derive(serde::Deserialize)]
struct FieldError {
    msg: String,
    #[serde(default)]
    param: Option<String>,
}

/// Maps an unsuccessful response to an error.
///
/// A 422 with an `errors` array becomes [`OrdertabError::Validation`];
/// anything else becomes [`OrdertabError::Api`] carrying the raw body.
pub fn error_from_body(status: StatusCode, body: &str) -> OrdertabError {
    if status == StatusCode::UNPROCESSABLE_ENTITY
        && let Ok(parsed) = serde_json::from_str::<ValidationBody>(body)
    {
        let messages = parsed
            .errors
            .into_iter()
            .map(|e| match e.param {
                Some(param) => format!("{param}: {}", e.msg),
                None => e.msg,
            })
            .collect();
        return OrdertabError::Validation(messages);
    }

    warn!(status = status.as_u16(), "order service rejected request");
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.trim().to_string()
    };
    OrdertabError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_becomes_field_messages() {
        let body = r#"{"errors":[{"msg":"Invalid value","param":"address"},{"msg":"Products missing"}]}"#;
        let err = error_from_body(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            err.validation_messages(),
            &["address: Invalid value".to_string(), "Products missing".to_string()]
        );
    }

    #[test]
    fn other_status_keeps_raw_body() {
        let err = error_from_body(StatusCode::CONFLICT, "Order already started");
        match err {
            OrdertabError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Order already started");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_body_uses_reason_phrase() {
        let err = error_from_body(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "order service returned 404: Not Found");
    }

    #[test]
    fn unparseable_422_is_api_error() {
        let err = error_from_body(StatusCode::UNPROCESSABLE_ENTITY, "nope");
        assert!(matches!(err, OrdertabError::Api { status: 422, .. }));
    }

    #[test]
    fn client_trims_base_url() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            ca_cert: None,
            timeout: std::time::Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
