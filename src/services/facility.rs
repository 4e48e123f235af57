//! Facility assets, maintenance and issue reports.
//!
//! Issue reports use the backend's `/manager/issues` and `/waiter/issues`
//! routes. The move, deletion check, status alert and by-status/by-area
//! lookups only exist under the paths below.

use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::facility::{
    DeletionEligibility, Facility, FacilityFilter, FacilityHistory, FacilityPage, IssueReport,
    MaintenanceRecord, MoveAssetRequest, ScheduledMaintenance,
};

use super::{CrudMessages, Endpoints, Resource};

impl Resource for Facility {
    const NAME: &'static str = "facility";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/manager/facilities");
    const MESSAGES: CrudMessages = messages::FACILITIES;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct FacilityService {
    api: ApiClient,
}

impl FacilityService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn move_asset(
        &self,
        id: &str,
        new_area: &str,
        reason: &str,
    ) -> Result<Facility, ApiError> {
        let request = MoveAssetRequest {
            new_area: new_area.to_string(),
            reason: reason.to_string(),
        };
        self.api
            .patch(&format!("/manager/facilities/{id}/move"), &request)
            .await
    }

    pub async fn deletion_eligibility(&self, id: &str) -> Result<DeletionEligibility, ApiError> {
        self.api
            .get(&format!("/manager/facilities/{id}/can-delete"))
            .await
    }

    /// Alert payloads are passed through untyped.
    pub async fn status_alerts(&self) -> Result<Vec<Value>, ApiError> {
        self.api.get_list("/manager/facilities/status-alerts").await
    }

    pub async fn by_status(&self, status: &str) -> Result<Vec<Facility>, ApiError> {
        self.api
            .get_list(&format!("/manager/facilities/status/{status}"))
            .await
    }

    pub async fn by_area(&self, area: &str) -> Result<Vec<Facility>, ApiError> {
        self.api
            .get_list(&format!("/manager/facilities/area/{area}"))
            .await
    }

    pub async fn history(&self, id: &str) -> Result<Vec<FacilityHistory>, ApiError> {
        self.api
            .get_list(&format!("/manager/facilities/{id}/history"))
            .await
    }

    pub async fn maintenance_history(&self, id: &str) -> Result<Vec<MaintenanceRecord>, ApiError> {
        self.api
            .get_list(&format!("/manager/facilities/{id}/maintenance"))
            .await
    }

    pub async fn create_maintenance(
        &self,
        record: &MaintenanceRecord,
    ) -> Result<MaintenanceRecord, ApiError> {
        self.api.post("/manager/maintenance", record).await
    }

    pub async fn scheduled_maintenance(&self) -> Result<Vec<ScheduledMaintenance>, ApiError> {
        self.api.get_list("/manager/maintenance/scheduled").await
    }

    pub async fn maintenance_due(&self) -> Result<Vec<ScheduledMaintenance>, ApiError> {
        self.api.get_list("/manager/maintenance/due").await
    }

    pub async fn issue_reports(&self) -> Result<Vec<IssueReport>, ApiError> {
        self.api.get_list("/manager/issues").await
    }

    /// Any staff member may report an issue.
    pub async fn create_issue_report(&self, report: &IssueReport) -> Result<IssueReport, ApiError> {
        self.api.post("/waiter/issues", report).await
    }

    pub async fn search(&self, filter: &FacilityFilter) -> Result<FacilityPage, ApiError> {
        self.api
            .get_query("/manager/facilities/search", filter.to_query())
            .await
    }

    pub async fn search_for_staff(&self, filter: &FacilityFilter) -> Result<FacilityPage, ApiError> {
        self.api
            .get_query("/waiter/facilities/search", filter.to_query())
            .await
    }
}
