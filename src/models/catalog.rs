//! Menu items, tables and ingredients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Empty,
    Occupied,
    Reserved,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub status: TableStatus,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: f64,
    pub min_stock: f64,
    pub cost_per_unit: f64,
    pub supplier: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ingredient {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngredientCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StockHistory {
    pub id: String,
    pub ingredient_id: String,
    /// adjustment | order | purchase | waste
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub quantity: f64,
    pub before_qty: f64,
    pub after_qty: f64,
    pub reason: String,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Signed quantity change; negative removes stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub quantity: f64,
    pub reason: String,
}
