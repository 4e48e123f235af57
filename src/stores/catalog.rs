//! Tables, menu and ingredient stock.

use serde::Serialize;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::catalog::{
    Ingredient, IngredientCategory, MenuItem, StockAdjustment, StockHistory, Table, TableStatus,
};
use crate::services::IngredientService;

use super::CrudStore;

pub type TableStore = CrudStore<Table>;
pub type MenuStore = CrudStore<MenuItem>;

impl CrudStore<Table> {
    pub fn empty_tables(&self) -> Vec<&Table> {
        self.with_status(TableStatus::Empty)
    }

    pub fn occupied_tables(&self) -> Vec<&Table> {
        self.with_status(TableStatus::Occupied)
    }

    fn with_status(&self, status: TableStatus) -> Vec<&Table> {
        self.items().iter().filter(|t| t.status == status).collect()
    }

    pub fn tables_by_area(&self, area: &str) -> Vec<&Table> {
        self.items().iter().filter(|t| t.area == area).collect()
    }
}

impl CrudStore<MenuItem> {
    pub fn available_items(&self) -> Vec<&MenuItem> {
        self.items().iter().filter(|m| m.available).collect()
    }

    pub fn items_in_category(&self, category: &str) -> Vec<&MenuItem> {
        self.items()
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }
}

pub struct IngredientStore {
    ingredients: CrudStore<Ingredient>,
    categories: CrudStore<IngredientCategory>,
    service: IngredientService,
    low_stock_items: Vec<Ingredient>,
}

impl IngredientStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            ingredients: CrudStore::new(api.clone()),
            categories: CrudStore::new(api.clone()),
            service: IngredientService::new(api),
            low_stock_items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Ingredient] {
        self.ingredients.items()
    }

    pub fn categories(&self) -> &[IngredientCategory] {
        self.categories.items()
    }

    pub fn low_stock_items(&self) -> &[Ingredient] {
        &self.low_stock_items
    }

    pub fn loading(&self) -> bool {
        self.ingredients.loading() || self.categories.loading()
    }

    /// Latest message from either ingredients or categories.
    pub fn error(&self) -> Option<&str> {
        self.ingredients.error().or(self.categories.error())
    }

    pub fn find(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.find(id)
    }

    pub async fn fetch_ingredients(&mut self) -> Result<&[Ingredient], ApiError> {
        self.ingredients.fetch_all().await
    }

    pub async fn create_ingredient<B>(&mut self, body: &B) -> Result<Ingredient, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.ingredients.create(body).await
    }

    pub async fn update_ingredient<B>(&mut self, id: &str, body: &B) -> Result<Ingredient, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.ingredients.update(id, body).await
    }

    pub async fn delete_ingredient(&mut self, id: &str) -> Result<(), ApiError> {
        self.ingredients.delete(id).await
    }

    pub async fn fetch_low_stock(&mut self) -> Result<&[Ingredient], ApiError> {
        match self.service.low_stock().await {
            Ok(items) => {
                self.low_stock_items = items;
                Ok(&self.low_stock_items)
            }
            Err(err) => {
                self.low_stock_items.clear();
                Err(self.ingredients.fail(err, messages::LOW_STOCK_LOAD))
            }
        }
    }

    /// Not cached; callers show it in a dialog.
    pub async fn fetch_stock_history(&mut self, id: &str) -> Result<Vec<StockHistory>, ApiError> {
        self.service
            .stock_history(id)
            .await
            .map_err(|err| self.ingredients.fail(err, messages::STOCK_HISTORY_LOAD))
    }

    /// Applies the adjusted ingredient, then reloads the low-stock list.
    pub async fn adjust_stock(
        &mut self,
        id: &str,
        adjustment: &StockAdjustment,
    ) -> Result<Ingredient, ApiError> {
        self.ingredients.clear_error();
        let ingredient = match self.service.adjust_stock(id, adjustment).await {
            Ok(ingredient) => ingredient,
            Err(err) => return Err(self.ingredients.fail(err, messages::STOCK_ADJUST)),
        };
        debug!(
            ingredient_id = id,
            delta = adjustment.quantity,
            quantity = ingredient.quantity,
            "stock adjusted"
        );
        self.ingredients.replace_local(ingredient.clone());
        if let Err(err) = self.fetch_low_stock().await {
            debug!(error = %err, "low stock refresh failed");
        }
        Ok(ingredient)
    }

    pub async fn fetch_categories(&mut self) -> Result<&[IngredientCategory], ApiError> {
        self.categories.fetch_all().await
    }

    pub async fn create_category<B>(&mut self, body: &B) -> Result<IngredientCategory, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.categories.create(body).await
    }

    pub async fn update_category<B>(
        &mut self,
        id: &str,
        body: &B,
    ) -> Result<IngredientCategory, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.categories.update(id, body).await
    }

    pub async fn delete_category(&mut self, id: &str) -> Result<(), ApiError> {
        self.categories.delete(id).await
    }

    pub fn clear_error(&mut self) {
        self.ingredients.clear_error();
        self.categories.clear_error();
    }

    pub fn reset(&mut self) {
        self.ingredients.reset();
        self.categories.reset();
        self.low_stock_items.clear();
    }
}
