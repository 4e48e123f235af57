//! Current user and token, persisted across restarts.
//!
//! This store is the only writer of the shared [`SessionHandle`]; every
//! service built from the same [`ApiClient`] sees a login or logout at once.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::user::{Credentials, Role, User};
use crate::services::AuthService;
use crate::session::SessionHandle;
use crate::storage::KeyValueStore;

use super::record;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

pub struct AuthStore {
    service: AuthService,
    session: SessionHandle,
    storage: Arc<dyn KeyValueStore>,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

impl AuthStore {
    pub fn new(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: api.session().clone(),
            service: AuthService::new(api),
            storage,
            user: None,
            loading: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_active()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_manager(&self) -> bool {
        self.role() == Some(Role::Manager)
    }

    pub fn is_waiter(&self) -> bool {
        self.role() == Some(Role::Waiter)
    }

    pub fn is_cashier(&self) -> bool {
        self.role() == Some(Role::Cashier)
    }

    pub fn is_barista(&self) -> bool {
        self.role() == Some(Role::Barista)
    }

    pub fn can_manage_handovers(&self) -> bool {
        self.is_cashier() || self.is_manager()
    }

    pub fn can_approve_discrepancies(&self) -> bool {
        self.is_manager()
    }

    /// Restore a saved session. A missing half of the pair, or a user record
    /// that no longer parses, leaves the store logged out and wipes both keys.
    pub fn init(&mut self) -> Result<bool, ApiError> {
        let token = self.storage.get(TOKEN_KEY)?;
        let user = self.storage.get(USER_KEY)?;
        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (token, user),
            (None, None) => return Ok(false),
            _ => {
                warn!("discarding half of a stored session");
                self.clear_storage()?;
                return Ok(false);
            }
        };
        match serde_json::from_str::<User>(&user) {
            Ok(user) => {
                info!(username = %user.username, role = user.role.as_str(), "session restored");
                self.session.set_token(token);
                self.user = Some(user);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "discarding unreadable stored user");
                self.clear_storage()?;
                Ok(false)
            }
        }
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<&User, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.login(credentials).await;
        self.loading = false;

        let response = match result {
            Ok(response) => response,
            Err(err) => return Err(record(&mut self.error, err, messages::LOGIN_FAILED)),
        };
        let (Some(token), Some(user)) = (response.token, response.user) else {
            let err = ApiError::Decode("login response lacks token or user".into());
            return Err(record(
                &mut self.error,
                err,
                messages::INVALID_LOGIN_RESPONSE,
            ));
        };

        if let Err(err) = self.persist(&token, &user) {
            return Err(record(&mut self.error, err, messages::SESSION_SAVE));
        }
        info!(username = %user.username, role = user.role.as_str(), "logged in");
        self.session.set_token(token);
        Ok(self.user.insert(user))
    }

    fn persist(&self, token: &str, user: &User) -> Result<(), ApiError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Memory is cleared even when storage fails.
    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.session.clear();
        self.user = None;
        self.error = None;
        info!("logged out");
        self.clear_storage()
    }

    fn clear_storage(&self) -> Result<(), ApiError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    pub fn set_user(&mut self, user: User) -> Result<(), ApiError> {
        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn set_token(&mut self, token: &str) -> Result<(), ApiError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.session.set_token(token.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::session::SessionHandle;
    use crate::storage::MemoryStore;
    use crate::testing::FakeBackend;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            username: "thu".into(),
            password: "secret".into(),
        }
    }

    fn logged_out_client(backend: &Arc<FakeBackend>) -> ApiClient {
        ApiClient::new(backend.clone(), SessionHandle::new())
    }

    #[tokio::test]
    async fn login_persists_and_shares_token() {
        let backend = FakeBackend::new();
        backend.on(
            Method::POST,
            "/login",
            Ok(json!({"token": "jwt-1", "user": {"id": "u1", "username": "thu", "role": "cashier"}})),
        );
        let api = logged_out_client(&backend);
        let storage = Arc::new(MemoryStore::new());
        let mut auth = AuthStore::new(api.clone(), storage.clone());

        let user = auth.login(&credentials()).await.unwrap();
        assert_eq!(user.role, Role::Cashier);
        assert!(auth.is_authenticated());
        assert!(auth.can_manage_handovers());
        assert!(!auth.can_approve_discrepancies());
        assert_eq!(api.session().token().as_deref(), Some("jwt-1"));
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("jwt-1"));

        let stored: User = serde_json::from_str(&storage.get("user").unwrap().unwrap()).unwrap();
        assert_eq!(stored.username, "thu");
    }

    #[tokio::test]
    async fn login_without_user_is_invalid() {
        let backend = FakeBackend::new();
        backend.on(Method::POST, "/login", Ok(json!({"token": "jwt-1"})));
        let storage = Arc::new(MemoryStore::new());
        let mut auth = AuthStore::new(logged_out_client(&backend), storage.clone());

        assert!(auth.login(&credentials()).await.is_err());
        assert_eq!(auth.error(), Some(messages::INVALID_LOGIN_RESPONSE));
        assert!(!auth.is_authenticated());
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[tokio::test]
    async fn rejected_login_shows_server_text() {
        let backend = FakeBackend::new();
        backend.on(
            Method::POST,
            "/login",
            Err(ApiError::Client {
                status: 401,
                message: Some("invalid credentials".into()),
            }),
        );
        let mut auth = AuthStore::new(logged_out_client(&backend), Arc::new(MemoryStore::new()));

        let err = auth.login(&credentials()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(auth.error(), Some("invalid credentials"));
        assert!(!auth.loading());
    }

    #[test]
    fn init_restores_then_logout_clears() {
        let backend = FakeBackend::new();
        let storage = Arc::new(MemoryStore::new());
        storage.set("token", "jwt-2").unwrap();
        storage
            .set("user", r#"{"id":"u2","username":"lan","role":"manager"}"#)
            .unwrap();
        let api = logged_out_client(&backend);
        let mut auth = AuthStore::new(api.clone(), storage.clone());

        assert!(auth.init().unwrap());
        assert!(auth.is_manager());
        assert!(auth.can_approve_discrepancies());
        assert_eq!(api.session().token().as_deref(), Some("jwt-2"));

        auth.logout().unwrap();
        assert!(auth.user().is_none());
        assert!(!api.session().is_active());
        assert_eq!(storage.get("user").unwrap(), None);
    }

    #[test]
    fn unreadable_user_is_dropped() {
        let backend = FakeBackend::new();
        let storage = Arc::new(MemoryStore::new());
        storage.set("token", "jwt-3").unwrap();
        storage.set("user", "{not json").unwrap();
        let mut auth = AuthStore::new(logged_out_client(&backend), storage.clone());

        assert!(!auth.init().unwrap());
        assert!(!auth.is_authenticated());
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn half_a_session_is_not_restored() {
        let backend = FakeBackend::new();
        let storage = Arc::new(MemoryStore::new());
        storage.set("token", "jwt-4").unwrap();
        let mut auth = AuthStore::new(logged_out_client(&backend), storage.clone());

        assert!(!auth.init().unwrap());
        assert!(!auth.is_waiter());
        assert!(!auth.is_authenticated());
        assert_eq!(storage.get("token").unwrap(), None);

        storage
            .set("user", r#"{"id": "u3", "username": "minh", "role": "waiter"}"#)
            .unwrap();
        assert!(!auth.init().unwrap());
        assert_eq!(storage.get("user").unwrap(), None);
    }
}
