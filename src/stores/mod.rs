//! State stores: last-known server state plus loading/error slots.
//!
//! Every action returns `Result` and also records the localized message in
//! the store's error slot. Fetch failures reset the affected collection;
//! mutation failures leave local state untouched. Nothing is changed before
//! the server confirms it.

use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{user_message, ApiError};
use crate::services::{CrudService, Resource};

pub mod auth;
pub mod barista;
pub mod cashier;
pub mod cashier_shift;
pub mod catalog;
pub mod expense;
pub mod facility;
pub mod manager;
pub mod order;
pub mod shift;
pub mod user;

pub use auth::AuthStore;
pub use barista::BaristaStore;
pub use cashier::CashierStore;
pub use cashier_shift::CashierShiftStore;
pub use catalog::{IngredientStore, MenuStore, TableStore};
pub use expense::ExpenseStore;
pub use facility::FacilityStore;
pub use manager::ManagerStore;
pub use order::OrderStore;
pub use shift::ShiftStore;
pub use user::UserStore;

/// Record `err` in an error slot and hand it back for `Err(..)`.
pub(crate) fn record(slot: &mut Option<String>, err: ApiError, fallback: &str) -> ApiError {
    let message = user_message(&err, fallback);
    warn!(error = %err, "{message}");
    *slot = Some(message);
    err
}

/// Collection of one [`Resource`] with the generic fetch/create/update/delete
/// actions. Specialized stores wrap one of these and add their own endpoints.
pub struct CrudStore<R: Resource> {
    service: CrudService<R>,
    items: Vec<R>,
    loading: bool,
    error: Option<String>,
}

impl<R: Resource> CrudStore<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: CrudService::new(api),
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn service(&self) -> &CrudService<R> {
        &self.service
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.loading = false;
        self.error = None;
    }

    pub async fn fetch_all(&mut self) -> Result<&[R], ApiError> {
        let service = self.service.clone();
        self.load(service.list(), R::MESSAGES.load).await
    }

    pub async fn fetch_query(&mut self, query: Vec<(String, String)>) -> Result<&[R], ApiError> {
        let service = self.service.clone();
        self.load(service.list_query(query), R::MESSAGES.load).await
    }

    /// Replace the collection with whatever `request` yields. On failure the
    /// collection is emptied and `fallback` recorded.
    pub async fn load<F>(&mut self, request: F, fallback: &str) -> Result<&[R], ApiError>
    where
        F: Future<Output = Result<Vec<R>, ApiError>>,
    {
        self.loading = true;
        self.error = None;
        let result = request.await;
        self.loading = false;
        match result {
            Ok(items) => {
                debug!(resource = R::NAME, count = items.len(), "fetched");
                self.items = items;
                Ok(&self.items)
            }
            Err(err) => {
                self.items.clear();
                Err(self.fail(err, fallback))
            }
        }
    }

    pub async fn create<B>(&mut self, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.error = None;
        match self.service.create(body).await {
            Ok(item) => {
                debug!(resource = R::NAME, id = item.id(), "created");
                self.upsert(item.clone());
                Ok(item)
            }
            Err(err) => Err(self.fail(err, R::MESSAGES.create)),
        }
    }

    pub async fn update<B>(&mut self, id: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.error = None;
        match self.service.update(id, body).await {
            Ok(item) => {
                self.replace_local(item.clone());
                Ok(item)
            }
            Err(err) => Err(self.fail(err, R::MESSAGES.update)),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        self.error = None;
        match self.service.delete(id).await {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                debug!(resource = R::NAME, id, "deleted");
                Ok(())
            }
            Err(err) => Err(self.fail(err, R::MESSAGES.delete)),
        }
    }

    /// Replace the entry with the same id; unknown ids are ignored.
    pub fn replace_local(&mut self, item: R) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Replace by id, or append when new.
    pub fn upsert(&mut self, item: R) {
        if !self.replace_local(item.clone()) {
            self.items.push(item);
        }
    }

    /// Put an entry at the front, dropping any older copy.
    pub fn prepend(&mut self, item: R) {
        self.items.retain(|existing| existing.id() != item.id());
        self.items.insert(0, item);
    }

    pub fn remove_local(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }

    /// Record an error produced by a store-specific action.
    pub fn fail(&mut self, err: ApiError, fallback: &str) -> ApiError {
        record(&mut self.error, err, fallback)
    }
}
