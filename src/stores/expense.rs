//! Expense bookkeeping for managers.

use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::expense::{
    Expense, ExpenseCategory, ExpenseFilter, PrepaidExpense, RecurringExpense,
};
use crate::services::ExpenseService;

use super::CrudStore;

/// Expenses and the three lists managed alongside them. Each list keeps its
/// own error slot; use the `_mut` accessors for their CRUD actions.
pub struct ExpenseStore {
    expenses: CrudStore<Expense>,
    categories: CrudStore<ExpenseCategory>,
    recurring: CrudStore<RecurringExpense>,
    prepaid: CrudStore<PrepaidExpense>,
    service: ExpenseService,
}

impl ExpenseStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            expenses: CrudStore::new(api.clone()),
            categories: CrudStore::new(api.clone()),
            recurring: CrudStore::new(api.clone()),
            prepaid: CrudStore::new(api.clone()),
            service: ExpenseService::new(api),
        }
    }

    pub fn expenses(&self) -> &CrudStore<Expense> {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut CrudStore<Expense> {
        &mut self.expenses
    }

    pub fn categories(&self) -> &CrudStore<ExpenseCategory> {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CrudStore<ExpenseCategory> {
        &mut self.categories
    }

    pub fn recurring(&self) -> &CrudStore<RecurringExpense> {
        &self.recurring
    }

    pub fn recurring_mut(&mut self) -> &mut CrudStore<RecurringExpense> {
        &mut self.recurring
    }

    pub fn prepaid(&self) -> &CrudStore<PrepaidExpense> {
        &self.prepaid
    }

    pub fn prepaid_mut(&mut self) -> &mut CrudStore<PrepaidExpense> {
        &mut self.prepaid
    }

    pub fn total_amount(&self) -> f64 {
        self.expenses.items().iter().map(|e| e.amount).sum()
    }

    pub fn category_name(&self, category_id: &str) -> Option<&str> {
        self.categories
            .find(category_id)
            .map(|c| c.name.as_str())
    }

    pub async fn fetch_expenses(&mut self, filter: &ExpenseFilter) -> Result<&[Expense], ApiError> {
        self.expenses.fetch_query(filter.to_query()).await
    }

    /// Server-built report, untyped. Errors land in the expense slot.
    pub async fn expense_report(&mut self, filter: &ExpenseFilter) -> Result<Value, ApiError> {
        self.service
            .report(filter)
            .await
            .map_err(|err| self.expenses.fail(err, messages::EXPENSE_REPORT_LOAD))
    }

    /// Recurring expenses coming due; not cached.
    pub async fn recurring_reminders(&mut self) -> Result<Vec<RecurringExpense>, ApiError> {
        self.service
            .recurring_reminders()
            .await
            .map_err(|err| self.recurring.fail(err, messages::RECURRING_EXPENSES.load))
    }

    pub fn reset(&mut self) {
        self.expenses.reset();
        self.categories.reset();
        self.recurring.reset();
        self.prepaid.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::testing::{server_error, FakeBackend};
    use serde_json::json;

    #[tokio::test]
    async fn filtered_fetch_and_total() {
        let backend = FakeBackend::new();
        backend.on(
            Method::GET,
            "/manager/expenses",
            Ok(json!([
                {"id": "e1", "amount": 120000, "category_id": "c1"},
                {"id": "e2", "amount": 80000, "category_id": "c2"}
            ])),
        );
        let mut store = ExpenseStore::new(backend.client());
        let filter = ExpenseFilter {
            start_date: "2026-10-01".into(),
            end_date: "2026-10-19".into(),
            ..Default::default()
        };

        store.fetch_expenses(&filter).await.unwrap();
        assert_eq!(store.total_amount(), 200_000.0);
        let request = backend.requests().pop().unwrap();
        assert_eq!(
            request.query,
            vec![
                ("start_date".to_string(), "2026-10-01".to_string()),
                ("end_date".to_string(), "2026-10-19".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn lists_keep_separate_errors() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/manager/expense-categories", Err(server_error()));
        backend.on(
            Method::POST,
            "/manager/prepaid-expenses",
            Ok(json!({"id": "p1", "total_amount": 12000000, "description": "Tiền thuê quý 4"})),
        );
        let mut store = ExpenseStore::new(backend.client());

        assert!(store.categories_mut().fetch_all().await.is_err());
        assert_eq!(
            store.categories().error(),
            Some(messages::EXPENSE_CATEGORIES.load)
        );
        store
            .prepaid_mut()
            .create(&json!({"total_amount": 12000000}))
            .await
            .unwrap();
        assert!(store.prepaid().error().is_none());
        assert_eq!(store.prepaid().items().len(), 1);
    }

    #[tokio::test]
    async fn report_passes_through() {
        let backend = FakeBackend::new();
        backend.on(
            Method::GET,
            "/manager/expenses/report",
            Ok(json!({"total": 200000, "by_category": [{"category_id": "c1", "total": 120000}]})),
        );
        let mut store = ExpenseStore::new(backend.client());

        let report = store.expense_report(&ExpenseFilter::default()).await.unwrap();
        assert_eq!(report["total"], 200000);
    }

    #[tokio::test]
    async fn report_failure_sets_message() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/manager/expenses/report", Err(server_error()));
        let mut store = ExpenseStore::new(backend.client());

        assert!(store.expense_report(&ExpenseFilter::default()).await.is_err());
        assert_eq!(store.expenses().error(), Some(messages::EXPENSE_REPORT_LOAD));
    }
}
