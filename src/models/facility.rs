//! Facility assets, maintenance and issue reports.
//!
//! Type, status and area values are free-form localized labels (e.g. "Hỏng",
//! "Quầy bar") so they stay plain strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Facility {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    pub area: String,
    pub quantity: i64,
    pub status: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub cost: f64,
    pub supplier: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MaintenanceRecord {
    pub id: String,
    pub facility_id: String,
    /// scheduled | emergency
    #[serde(rename = "type")]
    pub record_type: String,
    pub description: String,
    pub cost: f64,
    pub vendor: String,
    pub date: Option<DateTime<Utc>>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScheduledMaintenance {
    pub id: String,
    pub facility_id: String,
    pub facility_name: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub description: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// pending | in_progress | completed | cancelled
    pub status: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IssueReport {
    pub id: String,
    pub facility_id: String,
    pub description: String,
    /// low | medium | high | critical
    pub severity: String,
    /// open | in_progress | resolved
    pub status: String,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacilityHistory {
    pub id: String,
    pub facility_id: String,
    pub action: String,
    pub description: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveAssetRequest {
    pub new_area: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeletionEligibility {
    pub can_delete: bool,
    pub reason: Option<String>,
}

/// Search filters; empty fields are left out of the query string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FacilityFilter {
    pub name: String,
    pub facility_type: String,
    pub area: String,
    pub status: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl FacilityFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        crate::api::build_query([
            ("name", self.name.clone()),
            ("type", self.facility_type.clone()),
            ("area", self.area.clone()),
            ("status", self.status.clone()),
            ("limit", self.limit.map(|v| v.to_string()).unwrap_or_default()),
            ("offset", self.offset.map(|v| v.to_string()).unwrap_or_default()),
        ])
    }
}

/// `{ "data": [...], "total": n }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacilityPage {
    pub data: Option<Vec<Facility>>,
    pub total: i64,
}
