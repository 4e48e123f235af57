//! Cash handovers and their settlement payloads.
//!
//! A handover starts PENDING and ends CONFIRMED, DISCREPANCY or REJECTED.
//! `requires_manager_approval` is set by the server and only read here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandoverType {
    #[default]
    Partial,
    Full,
    EndShift,
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for HandoverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PARTIAL" => Ok(Self::Partial),
            "FULL" => Ok(Self::Full),
            "END_SHIFT" => Ok(Self::EndShift),
            other => Err(format!("unknown handover type: {other}")),
        }
    }
}

/// PENDING is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandoverStatus {
    #[default]
    Pending,
    Confirmed,
    Discrepancy,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Who is held responsible for a discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Responsibility {
    Waiter,
    Cashier,
    System,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for Responsibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WAITER" => Ok(Self::Waiter),
            "CASHIER" => Ok(Self::Cashier),
            "SYSTEM" => Ok(Self::System),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(format!("unknown responsibility: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CashHandover {
    pub id: String,
    #[serde(rename = "type")]
    pub handover_type: HandoverType,
    pub status: HandoverStatus,

    pub waiter_shift_id: String,
    pub waiter_id: String,
    pub waiter_name: String,

    pub cashier_shift_id: Option<String>,
    pub cashier_id: Option<String>,
    pub cashier_name: Option<String>,

    pub requested_amount: f64,
    /// Unset until the cashier confirms or reconciles.
    pub actual_amount: Option<f64>,

    pub waiter_notes: String,
    /// Cashier notes; also carries the rejection reason.
    pub cashier_notes: Option<String>,

    /// Signed: negative is a shortage, positive an overage.
    pub discrepancy_amount: Option<f64>,
    pub discrepancy_reason: Option<String>,
    pub responsibility: Option<Responsibility>,
    pub discrepancy_text: Option<String>,

    pub requires_manager_approval: bool,
    pub manager_approved: Option<bool>,
    pub manager_id: Option<String>,
    pub manager_notes: Option<String>,

    pub requested_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
}

impl CashHandover {
    pub fn is_pending(&self) -> bool {
        self.status == HandoverStatus::Pending
    }

    pub fn discrepancy(&self) -> f64 {
        self.discrepancy_amount.unwrap_or(0.0)
    }

    pub fn is_shortage(&self) -> bool {
        self.discrepancy() < 0.0
    }

    pub fn is_overage(&self) -> bool {
        self.discrepancy() > 0.0
    }

    /// Amount the cashier actually took in; the requested amount when confirmed as-is.
    pub fn received_amount(&self) -> f64 {
        match self.actual_amount {
            Some(actual) if actual != 0.0 => actual,
            _ => self.requested_amount,
        }
    }

    /// Awaiting a manager decision.
    pub fn awaits_approval(&self) -> bool {
        self.status == HandoverStatus::Discrepancy
            && self.requires_manager_approval
            && self.manager_approved.is_none()
    }
}

/// `{ "handovers": [...], "count": n }`; `handovers` may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HandoverList {
    pub handovers: Option<Vec<CashHandover>>,
    pub count: usize,
}

impl HandoverList {
    pub fn into_vec(self) -> Vec<CashHandover> {
        self.handovers.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHandoverRequest {
    #[serde(rename = "type")]
    pub handover_type: HandoverType,
    pub requested_amount: f64,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub waiter_notes: String,
}

impl CreateHandoverRequest {
    pub fn new(handover_type: HandoverType, requested_amount: f64) -> Self {
        Self {
            handover_type,
            requested_amount,
            waiter_notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.waiter_notes = notes.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuickConfirmRequest {
    pub cashier_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub actual_amount: f64,
    pub discrepancy_reason: String,
    pub responsibility: Responsibility,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub cashier_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub approved: bool,
    pub manager_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscrepancyStats {
    pub total_discrepancies: i64,
    pub total_shortages: i64,
    pub total_overages: i64,
    pub total_shortage_amount: f64,
    pub total_overage_amount: f64,
    pub net_discrepancy: f64,
    pub pending_count: i64,
    pub resolved_count: i64,
    pub escalated_count: i64,
}

/// `{ "stats": {...}, "start_date": "...", "end_date": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscrepancyStatsResponse {
    pub stats: Option<DiscrepancyStats>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Plain `{ "message": "..." }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Ack {
    pub message: Option<String>,
}
