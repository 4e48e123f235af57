//! `/manager/expenses` and its sibling resources.

use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::expense::{
    Expense, ExpenseCategory, ExpenseFilter, PrepaidExpense, RecurringExpense,
};

use super::{CrudMessages, Endpoints, Resource};

impl Resource for Expense {
    const NAME: &'static str = "expense";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/expenses");
    const MESSAGES: CrudMessages = messages::EXPENSES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for ExpenseCategory {
    const NAME: &'static str = "expense_category";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/expense-categories");
    const MESSAGES: CrudMessages = messages::EXPENSE_CATEGORIES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for RecurringExpense {
    const NAME: &'static str = "recurring_expense";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/recurring-expenses");
    const MESSAGES: CrudMessages = messages::RECURRING_EXPENSES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for PrepaidExpense {
    const NAME: &'static str = "prepaid_expense";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/prepaid-expenses");
    const MESSAGES: CrudMessages = messages::PREPAID_EXPENSES;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Reporting endpoints; expense CRUD goes through [`super::CrudService`].
#[derive(Clone)]
pub struct ExpenseService {
    api: ApiClient,
}

impl ExpenseService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The report layout is owned by the server and passed through as JSON.
    pub async fn report(&self, filter: &ExpenseFilter) -> Result<Value, ApiError> {
        self.api
            .get_query("/manager/expenses/report", filter.to_query())
            .await
    }

    pub async fn recurring_reminders(&self) -> Result<Vec<RecurringExpense>, ApiError> {
        self.api
            .get_list("/manager/recurring-expenses/reminders")
            .await
    }
}
