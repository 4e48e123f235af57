//! Staff management and the signed-in profile.

use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::user::{Role, User};
use crate::services::UserService;

use super::CrudStore;

/// Staff accounts (manager view) and the signed-in user's profile.
pub struct UserStore {
    users: CrudStore<User>,
    service: UserService,
    current_user: Option<User>,
}

impl UserStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            users: CrudStore::new(api.clone()),
            service: UserService::new(api),
            current_user: None,
        }
    }

    pub fn users(&self) -> &[User] {
        self.users.items()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.users.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.users.error()
    }

    pub fn users_by_role(&self, role: Role) -> Vec<&User> {
        self.users().iter().filter(|u| u.role == role).collect()
    }

    pub fn active_users(&self) -> Vec<&User> {
        self.users().iter().filter(|u| u.active).collect()
    }

    pub fn inactive_users(&self) -> Vec<&User> {
        self.users().iter().filter(|u| !u.active).collect()
    }

    pub fn managers(&self) -> Vec<&User> {
        self.users_by_role(Role::Manager)
    }

    pub fn cashiers(&self) -> Vec<&User> {
        self.users_by_role(Role::Cashier)
    }

    pub fn waiters(&self) -> Vec<&User> {
        self.users_by_role(Role::Waiter)
    }

    pub fn baristas(&self) -> Vec<&User> {
        self.users_by_role(Role::Barista)
    }

    pub async fn fetch_users(&mut self) -> Result<&[User], ApiError> {
        self.users.fetch_all().await
    }

    pub async fn create_user<B>(&mut self, body: &B) -> Result<User, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.users.create(body).await
    }

    pub async fn update_user<B>(&mut self, id: &str, body: &B) -> Result<User, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.users.update(id, body).await
    }

    pub async fn delete_user(&mut self, id: &str) -> Result<(), ApiError> {
        self.users.delete(id).await
    }

    pub async fn reset_password(&mut self, id: &str, new_password: &str) -> Result<(), ApiError> {
        self.users.clear_error();
        match self.service.reset_password(id, new_password).await {
            Ok(()) => {
                info!(user_id = id, "password reset");
                Ok(())
            }
            Err(err) => Err(self.users.fail(err, messages::USER_RESET_PASSWORD)),
        }
    }

    pub async fn toggle_user_status(&mut self, id: &str) -> Result<User, ApiError> {
        self.users.clear_error();
        match self.service.toggle_status(id).await {
            Ok(user) => {
                info!(user_id = id, active = user.active, "user status changed");
                self.users.replace_local(user.clone());
                Ok(user)
            }
            Err(err) => Err(self.users.fail(err, messages::USER_TOGGLE_STATUS)),
        }
    }

    /// Replaces the list with one role's users.
    pub async fn fetch_users_by_role(&mut self, role: Role) -> Result<&[User], ApiError> {
        let service = self.service.clone();
        self.users
            .load(service.by_role(role), messages::USERS_BY_ROLE_LOAD)
            .await
    }

    /// Replaces the list with active users only.
    pub async fn fetch_active_users(&mut self) -> Result<&[User], ApiError> {
        let service = self.service.clone();
        self.users
            .load(service.active(), messages::ACTIVE_USERS_LOAD)
            .await
    }

    pub async fn fetch_current_user(&mut self) -> Result<&User, ApiError> {
        self.users.clear_error();
        match self.service.profile().await {
            Ok(user) => Ok(self.current_user.insert(user)),
            Err(err) => Err(self.users.fail(err, messages::PROFILE_LOAD)),
        }
    }

    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.users.clear_error();
        self.service
            .change_password(current_password, new_password)
            .await
            .map_err(|err| self.users.fail(err, messages::PASSWORD_CHANGE))
    }

    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    pub fn clear_error(&mut self) {
        self.users.clear_error();
    }

    pub fn reset(&mut self) {
        self.users.reset();
        self.current_user = None;
    }
}
