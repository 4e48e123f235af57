//! Expense records and the lists kept next to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Expense {
    pub id: String,
    pub date: Option<DateTime<Utc>>,
    pub category_id: String,
    pub amount: f64,
    pub description: String,
    /// cash | bank | card
    pub payment_method: String,
    pub vendor: String,
    pub notes: String,
    pub source_type: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecurringExpense {
    pub id: String,
    pub category_id: String,
    pub amount: f64,
    pub description: String,
    /// daily | weekly | monthly | quarterly | yearly
    pub frequency: String,
    pub start_date: Option<DateTime<Utc>>,
    pub next_due: Option<DateTime<Utc>>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PrepaidExpense {
    pub id: String,
    pub category_id: String,
    pub total_amount: f64,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Query filters for listing expenses and building reports. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseFilter {
    pub start_date: String,
    pub end_date: String,
    pub category_id: String,
    pub payment_method: String,
}

impl ExpenseFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        crate::api::build_query([
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("category_id", self.category_id.clone()),
            ("payment_method", self.payment_method.clone()),
        ])
    }
}
