//! Request dispatcher for the booking API. Every call goes through [`ApiClient::send`],
//! which attaches JSON and optional token headers, parses the body as JSON whatever the
//! status, and normalizes failures into an [`ErrorEnvelope`]. The dispatcher only reads
//! the stored token; it never writes session state.

mod config;
mod errors;

pub use config::{normalize_base_url, ApiConfig, DEFAULT_API_BASE_URL};
pub use errors::{
    ErrorEnvelope, FailureKind, DEFAULT_FAILURE_MESSAGE, NETWORK_ERROR_MESSAGE,
    PARSE_ERROR_MESSAGE,
};

pub use reqwest::Method;

use crate::storage::{SharedStore, AUTH_TOKEN_KEY};
use anyhow::Result;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

/// Creates an account and returns `{token, user, redirect_url}`.
pub const SIGNUP_ENDPOINT: &str = "/api/auth/signup";
/// Exchanges credentials for `{token, user, redirect_url}`.
pub const LOGIN_ENDPOINT: &str = "/api/auth/login/";
/// Revokes the current token; requires auth.
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout/";
/// Returns the signed-in user; requires auth.
pub const CURRENT_USER_ENDPOINT: &str = "/api/auth/me/";

/// One outbound call: consumed by [`ApiClient::send`] and not retained.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            auth: false,
        }
    }

    /// Encodes `body` as the JSON payload.
    /// # Errors
    /// Returns a serialization envelope if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ErrorEnvelope> {
        let value = serde_json::to_value(body).map_err(|err| {
            ErrorEnvelope::serialization(format!("Failed to encode request: {err}"))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn authenticated(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    store: SharedStore,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, store: SharedStore) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sends a request and returns the parsed body on 2xx.
    /// # Errors
    /// Returns an [`ErrorEnvelope`] for non-2xx statuses, transport failures and
    /// bodies that are not JSON.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ErrorEnvelope> {
        let url = self.config.url(&request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if request.auth {
            match self.store.get(AUTH_TOKEN_KEY).filter(|token| !token.is_empty()) {
                Some(token) => builder = builder.header(AUTHORIZATION, format!("Token {token}")),
                None => debug!("no session token stored; sending without Authorization"),
            }
        }

        if let Some(body) = &request.body {
            let payload = serde_json::to_vec(body).map_err(|err| {
                ErrorEnvelope::serialization(format!("Failed to encode request: {err}"))
            })?;
            builder = builder.body(payload);
        }

        let span = info_span!(
            "api.request",
            http.method = %request.method,
            url = %url,
            auth = request.auth
        );

        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_request_error)?;

        debug!("{} {} -> {}", request.method, request.path, status);

        let data: Value = serde_json::from_slice(&bytes).map_err(|err| {
            warn!("response from {} is not JSON: {err}", request.path);
            ErrorEnvelope::parse(status.as_u16())
        })?;

        if status.is_success() {
            Ok(data)
        } else {
            Err(ErrorEnvelope::http(status.as_u16(), data))
        }
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn get(&self, path: &str, auth: bool) -> Result<Value, ErrorEnvelope> {
        self.send(ApiRequest::new(Method::GET, path).authenticated(auth))
            .await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: bool,
    ) -> Result<Value, ErrorEnvelope> {
        self.send(ApiRequest::new(Method::POST, path).json(body)?.authenticated(auth))
            .await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: bool,
    ) -> Result<Value, ErrorEnvelope> {
        self.send(ApiRequest::new(Method::PUT, path).json(body)?.authenticated(auth))
            .await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: bool,
    ) -> Result<Value, ErrorEnvelope> {
        self.send(
            ApiRequest::new(Method::PATCH, path)
                .json(body)?
                .authenticated(auth),
        )
        .await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str, auth: bool) -> Result<Value, ErrorEnvelope> {
        self.send(ApiRequest::new(Method::DELETE, path).authenticated(auth))
            .await
    }
}

/// Maps transport errors into envelope variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ErrorEnvelope {
    if err.is_timeout() {
        warn!("request timed out: {err}");
        ErrorEnvelope::timeout()
    } else {
        warn!("unable to reach the server: {err}");
        ErrorEnvelope::network()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder_sets_body_and_auth() {
        let request = ApiRequest::new(Method::POST, "/api/auth/logout/")
            .json(&json!({}))
            .unwrap()
            .authenticated(true);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({})));
        assert!(request.auth);
    }

    #[test]
    fn request_defaults_to_anonymous_without_body() {
        let request = ApiRequest::new(Method::GET, "/api/auth/me/");
        assert!(request.body.is_none());
        assert!(!request.auth);
    }
}
