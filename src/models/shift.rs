//! Waiter and barista shifts as the backend sends them, plus the request
//! bodies for starting and ending one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    #[default]
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    #[default]
    Morning,
    Afternoon,
    Evening,
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(format!("unknown shift type: {other}")),
        }
    }
}

/// Which staff role a waiter-side shift belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    #[default]
    Waiter,
    Barista,
    #[serde(other)]
    Unknown,
}

/// Waiter or barista shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Shift {
    pub id: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub status: ShiftStatus,
    pub role_type: RoleType,
    pub user_id: String,
    pub user_name: String,
    pub start_cash: f64,
    pub end_cash: f64,
    pub total_revenue: f64,
    pub total_orders: i64,
    /// Cash currently held by the shift owner.
    pub current_cash: f64,
    pub handed_over_cash: f64,
    /// Cash still to be handed over before the shift can end.
    pub remaining_cash: f64,
    pub total_discrepancy: f64,
    pub handover_count: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::Open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartShiftRequest {
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub start_cash: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleType>,
}

impl StartShiftRequest {
    pub fn new(shift_type: ShiftType, start_cash: f64) -> Self {
        Self {
            shift_type,
            start_cash,
            user_id: None,
            role_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndShiftRequest {
    pub end_cash: f64,
}
