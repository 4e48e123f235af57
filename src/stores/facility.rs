//! Facility assets plus the maintenance and issue-report lookups around them.
//!
//! Only the asset list is cached. Histories, alerts, schedules and search
//! results are handed straight back to the caller.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::facility::{
    DeletionEligibility, Facility, FacilityFilter, FacilityHistory, FacilityPage, IssueReport,
    MaintenanceRecord, ScheduledMaintenance,
};
use crate::services::FacilityService;

use super::CrudStore;

pub struct FacilityStore {
    facilities: CrudStore<Facility>,
    service: FacilityService,
}

impl FacilityStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            facilities: CrudStore::new(api.clone()),
            service: FacilityService::new(api),
        }
    }

    pub fn items(&self) -> &[Facility] {
        self.facilities.items()
    }

    pub fn loading(&self) -> bool {
        self.facilities.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.facilities.error()
    }

    pub fn find(&self, id: &str) -> Option<&Facility> {
        self.facilities.find(id)
    }

    pub async fn fetch_facilities(&mut self) -> Result<&[Facility], ApiError> {
        self.facilities.fetch_all().await
    }

    pub async fn create_facility<B>(&mut self, body: &B) -> Result<Facility, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.facilities.create(body).await
    }

    pub async fn update_facility<B>(&mut self, id: &str, body: &B) -> Result<Facility, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.facilities.update(id, body).await
    }

    pub async fn delete_facility(&mut self, id: &str) -> Result<(), ApiError> {
        self.facilities.delete(id).await
    }

    pub async fn move_asset(
        &mut self,
        id: &str,
        new_area: &str,
        reason: &str,
    ) -> Result<Facility, ApiError> {
        self.facilities.clear_error();
        match self.service.move_asset(id, new_area, reason).await {
            Ok(facility) => {
                debug!(facility_id = id, new_area, "asset moved");
                self.facilities.replace_local(facility.clone());
                Ok(facility)
            }
            Err(err) => Err(self.facilities.fail(err, messages::FACILITY_MOVE)),
        }
    }

    pub async fn check_can_delete(&mut self, id: &str) -> Result<DeletionEligibility, ApiError> {
        let service = self.service.clone();
        self.lookup(service.deletion_eligibility(id), messages::FACILITY_CAN_DELETE)
            .await
    }

    pub async fn fetch_status_alerts(&mut self) -> Result<Vec<Value>, ApiError> {
        let service = self.service.clone();
        self.lookup(service.status_alerts(), messages::STATUS_ALERTS_LOAD)
            .await
    }

    pub async fn fetch_facilities_by_status(
        &mut self,
        status: &str,
    ) -> Result<Vec<Facility>, ApiError> {
        let service = self.service.clone();
        self.lookup(service.by_status(status), messages::FACILITIES_BY_STATUS_LOAD)
            .await
    }

    pub async fn fetch_facilities_by_area(&mut self, area: &str) -> Result<Vec<Facility>, ApiError> {
        let service = self.service.clone();
        self.lookup(service.by_area(area), messages::FACILITIES_BY_AREA_LOAD)
            .await
    }

    pub async fn fetch_facility_history(
        &mut self,
        id: &str,
    ) -> Result<Vec<FacilityHistory>, ApiError> {
        let service = self.service.clone();
        self.lookup(service.history(id), messages::FACILITY_HISTORY_LOAD)
            .await
    }

    pub async fn fetch_maintenance_history(
        &mut self,
        id: &str,
    ) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let service = self.service.clone();
        self.lookup(service.maintenance_history(id), messages::MAINTENANCE_HISTORY_LOAD)
            .await
    }

    pub async fn create_maintenance_record(
        &mut self,
        record: &MaintenanceRecord,
    ) -> Result<MaintenanceRecord, ApiError> {
        self.facilities.clear_error();
        let service = self.service.clone();
        self.lookup(service.create_maintenance(record), messages::MAINTENANCE_CREATE)
            .await
    }

    /// Older backends lack the schedule routes; a 404 reads as nothing scheduled.
    pub async fn fetch_scheduled_maintenance(
        &mut self,
    ) -> Result<Vec<ScheduledMaintenance>, ApiError> {
        let result = self.service.scheduled_maintenance().await;
        self.optional_list(result, messages::MAINTENANCE_SCHEDULE_LOAD)
    }

    pub async fn fetch_maintenance_due(&mut self) -> Result<Vec<ScheduledMaintenance>, ApiError> {
        let result = self.service.maintenance_due().await;
        self.optional_list(result, messages::MAINTENANCE_SCHEDULE_LOAD)
    }

    pub async fn create_issue_report(
        &mut self,
        report: &IssueReport,
    ) -> Result<IssueReport, ApiError> {
        self.facilities.clear_error();
        let service = self.service.clone();
        self.lookup(service.create_issue_report(report), messages::ISSUE_REPORT_CREATE)
            .await
    }

    pub async fn fetch_issue_reports(&mut self) -> Result<Vec<IssueReport>, ApiError> {
        let service = self.service.clone();
        self.lookup(service.issue_reports(), messages::ISSUE_REPORTS_LOAD)
            .await
    }

    pub async fn search_facilities(
        &mut self,
        filter: &FacilityFilter,
    ) -> Result<FacilityPage, ApiError> {
        let service = self.service.clone();
        self.search(service.search(filter)).await
    }

    pub async fn search_facilities_for_staff(
        &mut self,
        filter: &FacilityFilter,
    ) -> Result<FacilityPage, ApiError> {
        let service = self.service.clone();
        self.search(service.search_for_staff(filter)).await
    }

    async fn search<F>(&mut self, request: F) -> Result<FacilityPage, ApiError>
    where
        F: Future<Output = Result<FacilityPage, ApiError>>,
    {
        self.facilities.clear_error();
        self.lookup(request, messages::FACILITY_SEARCH).await
    }

    async fn lookup<T, F>(&mut self, request: F, fallback: &str) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        request
            .await
            .map_err(|err| self.facilities.fail(err, fallback))
    }

    fn optional_list<T>(
        &mut self,
        result: Result<Vec<T>, ApiError>,
        fallback: &str,
    ) -> Result<Vec<T>, ApiError> {
        match result {
            Err(err) if err.is_not_found() => {
                debug!("maintenance schedule endpoint not available");
                Ok(Vec::new())
            }
            other => other.map_err(|err| self.facilities.fail(err, fallback)),
        }
    }

    pub fn clear_error(&mut self) {
        self.facilities.clear_error();
    }

    pub fn reset(&mut self) {
        self.facilities.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::testing::{bad_request, not_found, server_error, FakeBackend};
    use serde_json::json;

    fn listing() -> Value {
        json!([
            {"id": "f1", "name": "Máy pha", "area": "Quầy bar", "status": "Tốt"},
            {"id": "f2", "name": "Quạt", "area": "Tầng 1", "status": "Hỏng"}
        ])
    }

    #[tokio::test]
    async fn move_replaces_listed_asset() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/manager/facilities", Ok(listing()));
        backend.on(
            Method::PATCH,
            "/manager/facilities/f2/move",
            Ok(json!({"id": "f2", "name": "Quạt", "area": "Sân vườn", "status": "Hỏng"})),
        );
        let mut store = FacilityStore::new(backend.client());
        store.fetch_facilities().await.unwrap();

        store.move_asset("f2", "Sân vườn", "mùa hè").await.unwrap();
        assert_eq!(store.find("f2").unwrap().area, "Sân vườn");
        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn failed_move_keeps_area() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/manager/facilities", Ok(listing()));
        backend.on(
            Method::PATCH,
            "/manager/facilities/f1/move",
            Err(bad_request("area not found")),
        );
        let mut store = FacilityStore::new(backend.client());
        store.fetch_facilities().await.unwrap();

        assert!(store.move_asset("f1", "Kho", "").await.is_err());
        assert_eq!(store.find("f1").unwrap().area, "Quầy bar");
        assert_eq!(store.error(), Some("area not found"));
    }

    #[tokio::test]
    async fn missing_schedule_route_is_empty() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/manager/maintenance/due", Err(not_found("not found")));
        backend.on(Method::GET, "/manager/maintenance/scheduled", Err(server_error()));
        let mut store = FacilityStore::new(backend.client());

        assert!(store.fetch_maintenance_due().await.unwrap().is_empty());
        assert!(store.error().is_none());
        assert!(store.fetch_scheduled_maintenance().await.is_err());
        assert_eq!(store.error(), Some(messages::MAINTENANCE_SCHEDULE_LOAD));
    }

    #[tokio::test]
    async fn deletion_check_and_issue_report() {
        let backend = FakeBackend::new();
        backend.on(
            Method::GET,
            "/manager/facilities/f1/can-delete",
            Ok(json!({"can_delete": false, "reason": "còn lịch bảo trì"})),
        );
        backend.on(
            Method::POST,
            "/waiter/issues",
            Ok(json!({"id": "r1", "facility_id": "f2", "severity": "high", "status": "open"})),
        );
        let mut store = FacilityStore::new(backend.client());

        let eligibility = store.check_can_delete("f1").await.unwrap();
        assert!(!eligibility.can_delete);
        assert_eq!(eligibility.reason.as_deref(), Some("còn lịch bảo trì"));

        let report = IssueReport {
            facility_id: "f2".into(),
            description: "quạt không quay".into(),
            severity: "high".into(),
            ..Default::default()
        };
        let created = store.create_issue_report(&report).await.unwrap();
        assert_eq!(created.id, "r1");
        assert_eq!(created.status, "open");
    }

    #[tokio::test]
    async fn search_failure_records_fallback() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/manager/facilities/search", Err(server_error()));
        let mut store = FacilityStore::new(backend.client());

        let result = store.search_facilities(&FacilityFilter::default()).await;
        assert!(result.is_err());
        assert_eq!(store.error(), Some(messages::FACILITY_SEARCH));
        assert!(!store.loading());
    }
}
