//! Auth session holder.
//!
//! An explicit, injectable session object: it owns the current user, shares
//! the bearer token cell with the HTTP client, and publishes phase changes on
//! a watch channel for the header badge and cart views. No ambient globals;
//! tests substitute a [`MockAuthService`] and an in-memory token cell.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::warn;

use crate::http::{BearerToken, TokenCell};

mod errors;
mod models;
mod service;
mod store;

pub use errors::AuthServiceError;
pub use models::{AuthSession, Credentials, CurrentUser, SessionPhase};
pub use service::{AuthService, HttpAuthService, MockAuthService};
pub use store::SessionFile;

use store::PersistedSession;

/// The client's auth session.
pub struct Session {
    auth: Arc<dyn AuthService>,
    token: Arc<TokenCell>,
    file: Option<SessionFile>,
    user: RwLock<Option<CurrentUser>>,
    phase: watch::Sender<SessionPhase>,
}

impl Session {
    /// A signed-out session.
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthService>,
        token: Arc<TokenCell>,
        file: Option<SessionFile>,
    ) -> Self {
        let (phase, _) = watch::channel(SessionPhase::SignedOut);

        Self {
            auth,
            token,
            file,
            user: RwLock::new(None),
            phase,
        }
    }

    /// Restore a persisted session from disk when one exists.
    ///
    /// Best-effort: an unreadable or missing file just yields a signed-out
    /// session.
    #[must_use]
    pub fn restore(auth: Arc<dyn AuthService>, token: Arc<TokenCell>, file: SessionFile) -> Self {
        let session = Self::new(auth, token, Some(file));

        if let Some(persisted) = session.file.as_ref().and_then(SessionFile::load) {
            session.token.set(BearerToken::new(persisted.token));
            session.install_user(persisted.user);
        }

        session
    }

    /// Subscribe to phase transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    /// Whether a user is present.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.read_user().is_some()
    }

    /// The signed-in user, when present.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.read_user().clone()
    }

    /// Log in and persist the session.
    ///
    /// The phase flips to [`SessionPhase::SignedIn`] only after the roundtrip
    /// settles, so subscribers refreshing on the transition never race the
    /// login response.
    ///
    /// # Errors
    ///
    /// Returns the adapter or persistence failure; the session stays signed
    /// out.
    pub async fn login(&self, credentials: &Credentials) -> Result<CurrentUser, AuthServiceError> {
        let auth_session = self.auth.login(credentials).await?;

        if let Some(file) = &self.file {
            file.save(&PersistedSession {
                token: auth_session.token.clone(),
                user: auth_session.user.clone(),
            })
            .map_err(AuthServiceError::Store)?;
        }

        self.token.set(BearerToken::new(auth_session.token));
        self.install_user(auth_session.user.clone());

        Ok(auth_session.user)
    }

    /// Log out.
    ///
    /// Local state is reset regardless of the server roundtrip outcome: a
    /// failed revocation still clears the token, the persisted file, and the
    /// user, and publishes [`SessionPhase::SignedOut`].
    pub async fn logout(&self) {
        if let Err(error) = self.auth.logout().await {
            warn!("server-side logout failed: {error}");
        }

        self.token.clear();

        if let Some(file) = &self.file {
            if let Err(error) = file.remove() {
                warn!("failed to remove the session file: {error}");
            }
        }

        *self.write_user() = None;
        self.phase.send_replace(SessionPhase::SignedOut);
    }

    fn install_user(&self, user: CurrentUser) {
        *self.write_user() = Some(user);
        self.phase.send_replace(SessionPhase::SignedIn);
    }

    fn read_user(&self) -> RwLockReadGuard<'_, Option<CurrentUser>> {
        match self.user.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_user(&self) -> RwLockWriteGuard<'_, Option<CurrentUser>> {
        match self.user.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::http::ApiError;

    use super::*;

    fn test_user() -> CurrentUser {
        CurrentUser {
            id: "u1".to_string(),
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "t@example.com".to_string(),
            password: "pw".to_string(),
        }
    }

    fn accepting_auth() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_login().returning(|_| {
            Ok(AuthSession {
                token: "tok_abc".to_string(),
                user: test_user(),
            })
        });
        auth.expect_logout().returning(|| Ok(()));

        auth
    }

    #[tokio::test]
    async fn login_installs_user_token_and_phase() -> TestResult {
        let token = Arc::new(TokenCell::new());
        let session = Session::new(Arc::new(accepting_auth()), Arc::clone(&token), None);
        let mut phases = session.subscribe();

        let user = session.login(&credentials()).await?;

        assert_eq!(user, test_user());
        assert!(session.is_signed_in());
        assert!(token.is_present());
        assert!(phases.has_changed()?, "login should publish a phase change");
        assert_eq!(*phases.borrow_and_update(), SessionPhase::SignedIn);

        Ok(())
    }

    #[tokio::test]
    async fn logout_resets_even_when_the_server_fails() -> TestResult {
        let mut auth = MockAuthService::new();
        auth.expect_login().returning(|_| {
            Ok(AuthSession {
                token: "tok_abc".to_string(),
                user: test_user(),
            })
        });
        auth.expect_logout().returning(|| {
            Err(AuthServiceError::Api(ApiError::Server {
                status: 500,
                message: "boom".to_string(),
            }))
        });

        let token = Arc::new(TokenCell::new());
        let session = Session::new(Arc::new(auth), Arc::clone(&token), None);
        session.login(&credentials()).await?;

        session.logout().await;

        assert!(!session.is_signed_in());
        assert!(!token.is_present());

        Ok(())
    }

    #[tokio::test]
    async fn restore_round_trips_through_the_session_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let file = SessionFile::new(dir.path().join("session.json"));

        let token = Arc::new(TokenCell::new());
        let session = Session::new(
            Arc::new(accepting_auth()),
            Arc::clone(&token),
            Some(file.clone()),
        );
        session.login(&credentials()).await?;

        let restored_token = Arc::new(TokenCell::new());
        let restored = Session::restore(
            Arc::new(MockAuthService::new()),
            Arc::clone(&restored_token),
            file,
        );

        assert!(restored.is_signed_in());
        assert_eq!(restored.current_user(), Some(test_user()));
        assert!(restored_token.is_present());

        Ok(())
    }

    #[tokio::test]
    async fn logout_removes_the_session_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        let session = Session::new(
            Arc::new(accepting_auth()),
            Arc::new(TokenCell::new()),
            Some(SessionFile::new(&path)),
        );
        session.login(&credentials()).await?;
        assert!(path.exists(), "login should write the session file");

        session.logout().await;
        assert!(!path.exists(), "logout should remove the session file");

        Ok(())
    }
}
