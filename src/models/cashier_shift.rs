//! Cashier drawer shifts, their variance record and the closure steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashierShiftStatus {
    #[default]
    Open,
    ClosureInitiated,
    Closed,
    #[serde(other)]
    Unknown,
}

/// Documented cause of a drawer variance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceReason {
    CountingError,
    UnrecordedSale,
    Theft,
    ChangeError,
    SystemError,
    Other,
    /// Anything the server accepts that isn't one of the above.
    #[serde(untagged)]
    Custom(String),
}

impl VarianceReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CountingError => "COUNTING_ERROR",
            Self::UnrecordedSale => "UNRECORDED_SALE",
            Self::Theft => "THEFT",
            Self::ChangeError => "CHANGE_ERROR",
            Self::SystemError => "SYSTEM_ERROR",
            Self::Other => "OTHER",
            Self::Custom(text) => text,
        }
    }
}

impl From<&str> for VarianceReason {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "COUNTING_ERROR" => Self::CountingError,
            "UNRECORDED_SALE" => Self::UnrecordedSale,
            "THEFT" => Self::Theft,
            "CHANGE_ERROR" => Self::ChangeError,
            "SYSTEM_ERROR" => Self::SystemError,
            "OTHER" => Self::Other,
            _ => Self::Custom(value.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Variance {
    pub system_cash: f64,
    pub actual_cash: f64,
    /// actual - system
    pub amount: f64,
    pub reason: Option<VarianceReason>,
    pub notes: String,
}

impl Variance {
    pub fn requires_documentation(&self) -> bool {
        self.amount != 0.0
    }

    pub fn is_documented(&self) -> bool {
        self.reason.is_some() && !self.notes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResponsibilityConfirmation {
    pub user_id: String,
    pub device_id: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CashierShift {
    pub id: String,
    pub cashier_id: String,
    pub cashier_name: String,
    pub status: CashierShiftStatus,
    pub starting_float: f64,
    /// Expected drawer cash.
    pub system_cash: f64,
    pub actual_cash: Option<f64>,
    pub variance: Option<Variance>,
    pub confirmation: Option<ResponsibilityConfirmation>,
    pub received_cash: f64,
    pub total_discrepancy: f64,
    pub handover_count: i64,
    pub discrepancy_count: i64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Next step of the closure procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureStep {
    InitiateClosure,
    RecordActualCash,
    DocumentVariance,
    ConfirmResponsibility,
    Close,
    Done,
}

impl ClosureStep {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InitiateClosure => "Initiate closure",
            Self::RecordActualCash => "Record actual cash",
            Self::DocumentVariance => "Document variance",
            Self::ConfirmResponsibility => "Confirm responsibility",
            Self::Close => "Close shift",
            Self::Done => "Shift is closed",
        }
    }
}

impl CashierShift {
    /// Advisory only; the server validates every step again.
    pub fn next_closure_step(&self) -> ClosureStep {
        match self.status {
            CashierShiftStatus::Open => ClosureStep::InitiateClosure,
            CashierShiftStatus::ClosureInitiated => {
                if self.actual_cash.is_none() {
                    return ClosureStep::RecordActualCash;
                }
                if let Some(variance) = &self.variance {
                    if variance.requires_documentation() && !variance.is_documented() {
                        return ClosureStep::DocumentVariance;
                    }
                }
                if self.confirmation.is_none() {
                    return ClosureStep::ConfirmResponsibility;
                }
                ClosureStep::Close
            }
            CashierShiftStatus::Closed | CashierShiftStatus::Unknown => ClosureStep::Done,
        }
    }

    pub fn variance_amount(&self) -> Option<f64> {
        self.variance.as_ref().map(|v| v.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartCashierShiftRequest {
    pub starting_float: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordActualCashRequest {
    pub actual_cash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVarianceRequest {
    pub reason: VarianceReason,
    pub notes: String,
}

/// The record-actual-cash step answers `{ shift, variance }`; other steps answer the bare shift.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ShiftStepResponse {
    WithVariance {
        shift: CashierShift,
        variance: Option<Variance>,
    },
    Shift(CashierShift),
}

impl ShiftStepResponse {
    pub fn into_shift(self) -> CashierShift {
        match self {
            Self::WithVariance { mut shift, variance } => {
                if shift.variance.is_none() {
                    shift.variance = variance;
                }
                shift
            }
            Self::Shift(shift) => shift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpenShiftSummary {
    pub id: String,
    pub user_name: String,
    pub role_type: String,
    pub started_at: Option<DateTime<Utc>>,
}

/// Result of checking whether any waiter/barista shift is still open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WaiterShiftCheck {
    pub all_closed: bool,
    pub open_shifts: Vec<OpenShiftSummary>,
    pub open_count: usize,
    pub can_close: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn initiated() -> CashierShift {
        CashierShift {
            id: "cs1".into(),
            status: CashierShiftStatus::ClosureInitiated,
            starting_float: 100000.0,
            system_cash: 100000.0,
            ..Default::default()
        }
    }

    #[test]
    fn closure_steps_follow_recorded_state() {
        let mut shift = CashierShift::default();
        assert_eq!(shift.next_closure_step(), ClosureStep::InitiateClosure);

        shift = initiated();
        assert_eq!(shift.next_closure_step(), ClosureStep::RecordActualCash);

        shift.actual_cash = Some(95000.0);
        shift.variance = Some(Variance {
            system_cash: 100000.0,
            actual_cash: 95000.0,
            amount: -5000.0,
            ..Default::default()
        });
        assert_eq!(shift.next_closure_step(), ClosureStep::DocumentVariance);

        if let Some(v) = shift.variance.as_mut() {
            v.reason = Some(VarianceReason::CountingError);
            v.notes = "đếm nhầm tờ 5000".into();
        }
        assert_eq!(shift.next_closure_step(), ClosureStep::ConfirmResponsibility);

        shift.confirmation = Some(ResponsibilityConfirmation::default());
        assert_eq!(shift.next_closure_step(), ClosureStep::Close);

        shift.status = CashierShiftStatus::Closed;
        assert_eq!(shift.next_closure_step(), ClosureStep::Done);
    }

    #[test]
    fn zero_variance_skips_documentation() {
        let mut shift = initiated();
        shift.actual_cash = Some(100000.0);
        shift.variance = Some(Variance {
            system_cash: 100000.0,
            actual_cash: 100000.0,
            ..Default::default()
        });
        assert_eq!(shift.next_closure_step(), ClosureStep::ConfirmResponsibility);
    }

    #[test]
    fn variance_reason_accepts_free_text() {
        let known: VarianceReason = serde_json::from_value(json!("THEFT")).unwrap();
        assert_eq!(known, VarianceReason::Theft);
        let custom: VarianceReason = serde_json::from_value(json!("shortage")).unwrap();
        assert_eq!(custom, VarianceReason::Custom("shortage".into()));
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!("shortage"));
        assert_eq!(VarianceReason::from("change_error"), VarianceReason::ChangeError);
        assert_eq!(VarianceReason::from("shortage").as_str(), "shortage");
    }

    #[test]
    fn step_response_accepts_both_shapes() {
        let wrapped: ShiftStepResponse = serde_json::from_value(json!({
            "shift": {"id": "cs1", "status": "CLOSURE_INITIATED", "actual_cash": 95000},
            "variance": {"system_cash": 100000, "actual_cash": 95000, "amount": -5000}
        }))
        .unwrap();
        let shift = wrapped.into_shift();
        assert_eq!(shift.variance_amount(), Some(-5000.0));

        let bare: ShiftStepResponse =
            serde_json::from_value(json!({"id": "cs1", "status": "CLOSED"})).unwrap();
        assert_eq!(bare.into_shift().status, CashierShiftStatus::Closed);
    }
}
