//! Auth service adapter.

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;

use crate::{
    http::ApiClient,
    session::{
        errors::AuthServiceError,
        models::{AuthSession, Credentials, CurrentUser},
    },
};

/// Typed operations over the auth endpoints.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a bearer token and user profile.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthServiceError>;

    /// Invalidate the current token server-side.
    async fn logout(&self) -> Result<(), AuthServiceError>;
}

/// Auth adapter over the REST backend.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    /// Create the adapter.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthServiceError> {
        if credentials.email.trim().is_empty() {
            return Err(AuthServiceError::Validation(
                "email must not be empty".to_string(),
            ));
        }

        if credentials.password.is_empty() {
            return Err(AuthServiceError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        let payload: LoginPayload = self
            .api
            .post("/api/auth/login", credentials)
            .await?
            .into_data()?;

        Ok(AuthSession {
            token: payload.token,
            user: payload.user,
        })
    }

    async fn logout(&self) -> Result<(), AuthServiceError> {
        let _confirmation = self
            .api
            .post::<serde_json::Value, _>("/api/auth/logout", &serde_json::json!({}))
            .await?;

        Ok(())
    }
}

#[derive(Deserialize)]
struct LoginPayload {
    token: String,
    user: CurrentUser,
}
