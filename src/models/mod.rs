//! Wire types. Every response struct is lenient (`#[serde(default)]`) so a
//! missing field never fails a whole list; enums fall back to `Unknown`.

pub mod cashier_shift;
pub mod catalog;
pub mod expense;
pub mod facility;
pub mod handover;
pub mod order;
pub mod shift;
pub mod user;

pub use cashier_shift::{
    CashierShift, CashierShiftStatus, ClosureStep, Variance, VarianceReason, WaiterShiftCheck,
};
pub use catalog::{Ingredient, IngredientCategory, MenuItem, StockAdjustment, Table, TableStatus};
pub use expense::{Expense, ExpenseCategory, ExpenseFilter, PrepaidExpense, RecurringExpense};
pub use facility::{Facility, FacilityFilter, IssueReport, MaintenanceRecord};
pub use handover::{
    ApprovalDecision, CashHandover, CreateHandoverRequest, DiscrepancyStats, HandoverStatus,
    HandoverType, ReconcileRequest, Responsibility,
};
pub use order::{Order, OrderStatus, PaymentMethod};
pub use shift::{RoleType, Shift, ShiftStatus, ShiftType, StartShiftRequest};
pub use user::{Credentials, Role, User};
