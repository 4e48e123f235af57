//! Staff accounts under `/manager/users`, plus the caller's own profile and
//! password.

use crate::api::{build_query, ApiClient};
use crate::error::ApiError;
use crate::messages;
use crate::models::user::{ChangePasswordRequest, ResetPasswordRequest, Role, User};

use super::{empty_body, CrudMessages, Endpoints, Resource};

impl Resource for User {
    const NAME: &'static str = "user";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/users");
    const MESSAGES: CrudMessages = messages::USERS;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn reset_password(&self, id: &str, new_password: &str) -> Result<(), ApiError> {
        let request = ResetPasswordRequest {
            new_password: new_password.to_string(),
        };
        self.api
            .post_unit(&format!("/manager/users/{id}/reset-password"), &request)
            .await
    }

    /// Flips `active` and returns the updated user.
    pub async fn toggle_status(&self, id: &str) -> Result<User, ApiError> {
        self.api
            .post(&format!("/manager/users/{id}/toggle-status"), &empty_body())
            .await
    }

    pub async fn by_role(&self, role: Role) -> Result<Vec<User>, ApiError> {
        self.api
            .get_list_query(
                "/manager/users/by-role",
                build_query([("role", role.as_str())]),
            )
            .await
    }

    pub async fn active(&self) -> Result<Vec<User>, ApiError> {
        self.api.get_list("/manager/users/active").await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.api.get("/profile").await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.api.post_unit("/change-password", &request).await
    }
}
