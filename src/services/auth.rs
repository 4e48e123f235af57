//! `POST /login`.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::user::{Credentials, LoginResponse};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `{ token, user }` on success. Either field may be missing on a
    /// misbehaving server; the auth store rejects that.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.api.post("/login", credentials).await
    }
}
