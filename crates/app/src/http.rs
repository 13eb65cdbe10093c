//! Authenticated HTTP transport for the storefront REST API.

use std::{
    fmt,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use zeroize::Zeroize;

/// Raw bearer token material.
///
/// Debug output is redacted and the backing string is zeroized on drop.
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap raw token material.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Shared holder for the session's bearer token.
///
/// The [`ApiClient`] reads it per request; the session writes it on login and
/// logout. Sharing one cell keeps "which token is attached" a single fact.
#[derive(Default)]
pub struct TokenCell {
    token: RwLock<Option<BearerToken>>,
}

impl TokenCell {
    /// An empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a token, replacing any previous one.
    pub fn set(&self, token: BearerToken) {
        *self.write_guard() = Some(token);
    }

    /// Drop the current token.
    pub fn clear(&self) {
        *self.write_guard() = None;
    }

    /// Whether a token is currently installed.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.read_guard().is_some()
    }

    fn bearer(&self) -> Option<String> {
        self.read_guard()
            .as_ref()
            .map(|token| token.expose().to_string())
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Option<BearerToken>> {
        match self.token.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Option<BearerToken>> {
        match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl fmt::Debug for TokenCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCell")
            .field("present", &self.is_present())
            .finish()
    }
}

/// Standard response envelope for the storefront API.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Payload; absent on empty results.
    pub data: Option<T>,
    /// Human-readable message from the server, when provided.
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, treating an absent `data` as a contract violation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingData`] when the envelope carries no payload.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }
}

/// Errors raised by the HTTP transport layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, or body-decoding failure.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or a generic fallback.
        message: String,
    },

    /// A success response arrived without its expected payload.
    #[error("the server response was missing its payload")]
    MissingData,
}

/// HTTP client for the storefront REST backend.
///
/// Attaches the bearer token when one is present and normalizes error
/// responses into [`ApiError`]. No retries, no backoff, and no client-side
/// timeout: a failed call fails once and propagates to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Arc<TokenCell>,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Arc<TokenCell>) -> Self {
        let base_url: String = base_url.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            token,
        }
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    /// Issue a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    /// Issue a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.http.request(method, url);

        match self.token.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(server_error(status, &body));
        }

        Ok(response.json().await?)
    }
}

/// Prefer the server's own message; fall back to a generic one.
fn server_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| format!("request failed with status {status}"));

    ApiError::Server {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn server_error_extracts_the_body_message() {
        let error = server_error(
            StatusCode::CONFLICT,
            r#"{"message":"Insufficient stock for Widget"}"#,
        );

        assert!(
            matches!(error, ApiError::Server { status: 409, ref message } if message == "Insufficient stock for Widget"),
            "expected extracted message, got {error:?}"
        );
    }

    #[test]
    fn server_error_falls_back_on_unparseable_bodies() {
        let error = server_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");

        assert!(
            matches!(error, ApiError::Server { status: 500, ref message } if message.contains("500")),
            "expected generic fallback, got {error:?}"
        );
    }

    #[test]
    fn envelope_without_data_is_a_contract_violation() -> TestResult {
        let envelope: Envelope<u64> = serde_json::from_str(r#"{"message":"ok"}"#)?;

        assert!(matches!(
            envelope.into_data(),
            Err(ApiError::MissingData)
        ));

        Ok(())
    }

    #[test]
    fn token_cell_tracks_presence() {
        let cell = TokenCell::new();

        assert!(!cell.is_present());

        cell.set(BearerToken::new("tok_abc"));
        assert!(cell.is_present());
        assert_eq!(cell.bearer().as_deref(), Some("tok_abc"));

        cell.clear();
        assert!(!cell.is_present());
        assert_eq!(cell.bearer(), None);
    }

    #[test]
    fn bearer_token_debug_is_redacted() {
        let token = BearerToken::new("tok_secret");

        assert_eq!(format!("{token:?}"), "BearerToken(**redacted**)");
    }
}
