//! Tables, menu items and ingredient stock.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::catalog::{
    Ingredient, IngredientCategory, MenuItem, StockAdjustment, StockHistory, Table,
};

use super::{CrudMessages, CrudService, Endpoints, Resource};

impl Resource for Table {
    const NAME: &'static str = "table";
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/waiter/tables",
        create: "/manager/tables",
        item: "/manager/tables",
    };
    const MESSAGES: CrudMessages = messages::TABLES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for MenuItem {
    const NAME: &'static str = "menu_item";
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/waiter/menu",
        create: "/manager/menu",
        item: "/manager/menu",
    };
    const MESSAGES: CrudMessages = messages::MENU;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Ingredient {
    const NAME: &'static str = "ingredient";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/ingredients");
    const MESSAGES: CrudMessages = messages::INGREDIENTS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for IngredientCategory {
    const NAME: &'static str = "ingredient_category";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/ingredient-categories");
    const MESSAGES: CrudMessages = messages::INGREDIENT_CATEGORIES;

    fn id(&self) -> &str {
        &self.id
    }
}

pub type TableService = CrudService<Table>;
pub type MenuService = CrudService<MenuItem>;

/// Stock endpoints beyond plain ingredient CRUD.
#[derive(Clone)]
pub struct IngredientService {
    api: ApiClient,
}

impl IngredientService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn low_stock(&self) -> Result<Vec<Ingredient>, ApiError> {
        self.api.get_list("/manager/ingredients/low-stock").await
    }

    pub async fn stock_history(&self, id: &str) -> Result<Vec<StockHistory>, ApiError> {
        self.api
            .get_list(&format!("/manager/ingredients/{id}/history"))
            .await
    }

    /// Returns the ingredient with its new quantity.
    pub async fn adjust_stock(
        &self,
        id: &str,
        adjustment: &StockAdjustment,
    ) -> Result<Ingredient, ApiError> {
        self.api
            .post(&format!("/manager/ingredients/{id}/adjust"), adjustment)
            .await
    }
}
