//! Resource services: one async method per backend endpoint.
//!
//! Services hold no state beyond a cloned [`ApiClient`] and never catch
//! errors. Plain CRUD resources share [`CrudService`]; everything with
//! workflow endpoints gets its own service type.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::ApiError;

pub mod auth;
pub mod cashier_shift;
pub mod catalog;
pub mod expense;
pub mod facility;
pub mod handover;
pub mod order;
pub mod shift;
pub mod user;

pub use auth::AuthService;
pub use cashier_shift::CashierShiftService;
pub use catalog::{IngredientService, MenuService, TableService};
pub use expense::ExpenseService;
pub use facility::FacilityService;
pub use handover::{CashierService, ManagerService};
pub use order::{BaristaService, OrderService};
pub use shift::ShiftService;
pub use user::UserService;

/// Paths for one resource. Reads and writes often live under different role
/// prefixes (`/waiter/tables` vs `/manager/tables`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub list: &'static str,
    pub create: &'static str,
    /// Base for `{item}/{id}`.
    pub item: &'static str,
}

impl Endpoints {
    pub const fn uniform(base: &'static str) -> Self {
        Self {
            list: base,
            create: base,
            item: base,
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.item, id)
    }
}

/// Fallback messages a store records when the server sends none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudMessages {
    pub load: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// An entity served by plain CRUD endpoints.
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Used in log fields.
    const NAME: &'static str;
    const ENDPOINTS: Endpoints;
    const MESSAGES: CrudMessages;

    fn id(&self) -> &str;
}

pub struct CrudService<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> CrudService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.api.get_list(R::ENDPOINTS.list).await
    }

    pub async fn list_query(&self, query: Vec<(String, String)>) -> Result<Vec<R>, ApiError> {
        self.api.get_list_query(R::ENDPOINTS.list, query).await
    }

    pub async fn get(&self, id: &str) -> Result<R, ApiError> {
        self.api.get(&R::ENDPOINTS.item_path(id)).await
    }

    pub async fn create<B>(&self, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.api.post(R::ENDPOINTS.create, body).await
    }

    pub async fn update<B>(&self, id: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.api.put(&R::ENDPOINTS.item_path(id), body).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_unit(&R::ENDPOINTS.item_path(id)).await
    }
}

/// Body for action endpoints that take no payload.
pub(crate) fn empty_body() -> serde_json::Value {
    serde_json::json!({})
}
