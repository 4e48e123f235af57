//! Manager approvals for large handover discrepancies.

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::handover::{ApprovalDecision, CashHandover, DiscrepancyStats};
use crate::services::ManagerService;

use super::record;

pub struct ManagerStore {
    service: ManagerService,
    pending_approvals: Vec<CashHandover>,
    discrepancy_stats: Option<DiscrepancyStats>,
    discrepancy_threshold: f64,
    loading: bool,
    approval_loading: bool,
    error: Option<String>,
    approval_error: Option<String>,
}

impl ManagerStore {
    pub fn new(api: ApiClient, discrepancy_threshold: f64) -> Self {
        Self {
            service: ManagerService::new(api),
            pending_approvals: Vec::new(),
            discrepancy_stats: None,
            discrepancy_threshold,
            loading: false,
            approval_loading: false,
            error: None,
            approval_error: None,
        }
    }

    pub fn pending_approvals(&self) -> &[CashHandover] {
        &self.pending_approvals
    }

    pub fn discrepancy_stats(&self) -> Option<&DiscrepancyStats> {
        self.discrepancy_stats.as_ref()
    }

    pub fn discrepancy_threshold(&self) -> f64 {
        self.discrepancy_threshold
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn approval_loading(&self) -> bool {
        self.approval_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn approval_error(&self) -> Option<&str> {
        self.approval_error.as_deref()
    }

    pub fn pending_approval_count(&self) -> usize {
        self.pending_approvals.len()
    }

    pub fn large_discrepancies(&self) -> Vec<&CashHandover> {
        self.pending_approvals
            .iter()
            .filter(|h| h.requires_manager_approval)
            .collect()
    }

    pub fn shortage_discrepancies(&self) -> Vec<&CashHandover> {
        self.pending_approvals
            .iter()
            .filter(|h| h.is_shortage())
            .collect()
    }

    pub fn overage_discrepancies(&self) -> Vec<&CashHandover> {
        self.pending_approvals
            .iter()
            .filter(|h| h.is_overage())
            .collect()
    }

    pub fn has_discrepancy_stats(&self) -> bool {
        self.discrepancy_stats.is_some()
    }

    pub fn total_discrepancy_amount(&self) -> f64 {
        self.discrepancy_stats
            .as_ref()
            .map_or(0.0, |stats| stats.net_discrepancy)
    }

    pub async fn fetch_pending_approvals(&mut self) -> Result<&[CashHandover], ApiError> {
        self.approval_loading = true;
        self.approval_error = None;
        let result = self.service.pending_approvals().await;
        self.approval_loading = false;
        match result {
            Ok(handovers) => {
                self.pending_approvals = handovers;
                Ok(&self.pending_approvals)
            }
            Err(err) => {
                self.pending_approvals.clear();
                Err(record(&mut self.approval_error, err, messages::APPROVALS_LOAD))
            }
        }
    }

    /// Approve or reject a flagged discrepancy, then reload the queue.
    pub async fn approve_discrepancy(
        &mut self,
        id: &str,
        approved: bool,
        manager_notes: &str,
    ) -> Result<(), ApiError> {
        self.approval_loading = true;
        self.approval_error = None;
        let decision = ApprovalDecision {
            approved,
            manager_notes: manager_notes.to_string(),
        };
        let result = self.service.approve(id, &decision).await;
        if let Err(err) = result {
            self.approval_loading = false;
            return Err(record(&mut self.approval_error, err, messages::APPROVAL_DECIDE));
        }
        info!(handover_id = id, approved, "discrepancy decided");
        if let Err(err) = self.fetch_pending_approvals().await {
            debug!(error = %err, "approval queue refresh failed");
        }
        Ok(())
    }

    pub async fn fetch_discrepancy_stats(
        &mut self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<&DiscrepancyStats>, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.discrepancy_stats(start_date, end_date).await;
        self.loading = false;
        match result {
            Ok(response) => {
                self.discrepancy_stats = response.stats;
                Ok(self.discrepancy_stats.as_ref())
            }
            Err(err) => {
                self.discrepancy_stats = None;
                Err(record(&mut self.error, err, messages::DISCREPANCY_STATS_LOAD))
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_approval_error(&mut self) {
        self.approval_error = None;
    }

    pub fn reset(&mut self) {
        self.pending_approvals.clear();
        self.discrepancy_stats = None;
        self.loading = false;
        self.approval_loading = false;
        self.error = None;
        self.approval_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::models::handover::{
        CreateHandoverRequest, HandoverType, ReconcileRequest, Responsibility,
    };
    use crate::models::shift::{ShiftType, StartShiftRequest};
    use crate::stores::{CashierStore, ShiftStore};
    use crate::testing::{bad_request, server_error, FakeBackend};
    use serde_json::json;
    use std::sync::Arc;

    const THRESHOLD: f64 = 50_000.0;

    /// Waiter hands over 300k, cashier counts `actual`.
    async fn reconciled(backend: &Arc<FakeBackend>, actual: f64) -> String {
        let mut waiter = ShiftStore::new(backend.client());
        let shift = waiter
            .start_shift(&StartShiftRequest::new(ShiftType::Evening, 400_000.0))
            .await
            .unwrap();
        let handover = waiter
            .create_handover_and_end_shift(
                &shift.id,
                &CreateHandoverRequest::new(HandoverType::EndShift, 300_000.0),
            )
            .await
            .unwrap();

        let mut cashier = CashierStore::new(backend.client(), THRESHOLD);
        cashier
            .reconcile_handover(
                &handover.id,
                &ReconcileRequest {
                    actual_amount: actual,
                    discrepancy_reason: "thiếu tiền lẻ".into(),
                    responsibility: Responsibility::Waiter,
                    cashier_notes: String::new(),
                },
            )
            .await
            .unwrap();
        handover.id
    }

    #[tokio::test]
    async fn approval_clears_the_queue() {
        let backend = FakeBackend::with_cash_server(THRESHOLD);
        let id = reconciled(&backend, 240_000.0).await;
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);

        manager.fetch_pending_approvals().await.unwrap();
        assert_eq!(manager.pending_approval_count(), 1);
        assert_eq!(manager.large_discrepancies().len(), 1);
        assert_eq!(manager.shortage_discrepancies().len(), 1);
        assert!(manager.overage_discrepancies().is_empty());

        manager.approve_discrepancy(&id, true, "đã trừ lương").await.unwrap();
        assert_eq!(manager.pending_approval_count(), 0);
        assert!(!manager.approval_loading());

        let stored = backend.server(|s| s.handover(&id).cloned()).unwrap();
        assert_eq!(stored.manager_approved, Some(true));
        assert_eq!(stored.manager_notes.as_deref(), Some("đã trừ lương"));
        assert_eq!(
            backend.last_body(Method::POST, &format!("/manager/cash-handovers/{id}/approve")),
            Some(serde_json::json!({"approved": true, "manager_notes": "đã trừ lương"}))
        );
    }

    #[tokio::test]
    async fn small_discrepancy_never_reaches_manager() {
        let backend = FakeBackend::with_cash_server(THRESHOLD);
        reconciled(&backend, 290_000.0).await;
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);

        manager.fetch_pending_approvals().await.unwrap();
        assert_eq!(manager.pending_approval_count(), 0);
    }

    #[tokio::test]
    async fn exactly_at_threshold_needs_approval() {
        let backend = FakeBackend::with_cash_server(THRESHOLD);
        let id = reconciled(&backend, 250_000.0).await;
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);

        manager.fetch_pending_approvals().await.unwrap();
        assert_eq!(manager.pending_approval_count(), 1);
        assert_eq!(manager.pending_approvals()[0].id, id);
        assert_eq!(manager.large_discrepancies().len(), 1);

        let backend = FakeBackend::with_cash_server(THRESHOLD);
        reconciled(&backend, 250_001.0).await;
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);
        manager.fetch_pending_approvals().await.unwrap();
        assert_eq!(manager.pending_approval_count(), 0);
    }

    #[tokio::test]
    async fn failed_decision_keeps_queue() {
        let backend = FakeBackend::with_cash_server(THRESHOLD);
        let id = reconciled(&backend, 200_000.0).await;
        let path = format!("/manager/cash-handovers/{id}/approve");
        backend.on(Method::POST, &path, Err(bad_request("manager notes required")));
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);
        manager.fetch_pending_approvals().await.unwrap();

        assert!(manager.approve_discrepancy(&id, false, "").await.is_err());
        assert_eq!(manager.pending_approval_count(), 1);
        assert_eq!(manager.approval_error(), Some("manager notes required"));

        manager.clear_approval_error();
        assert!(manager.approval_error().is_none());
    }

    #[tokio::test]
    async fn decision_stands_when_queue_reload_fails() {
        let backend = FakeBackend::new();
        let pending = "/manager/cash-handovers/pending-approval";
        backend.on(
            Method::GET,
            pending,
            Ok(json!([{
                "id": "h1",
                "status": "DISCREPANCY",
                "requested_amount": 300000,
                "actual_amount": 220000,
                "discrepancy_amount": -80000,
                "requires_manager_approval": true
            }])),
        );
        backend.on(Method::GET, pending, Err(server_error()));
        backend.on(
            Method::POST,
            "/manager/cash-handovers/h1/approve",
            Ok(json!({"message": "Discrepancy approved successfully"})),
        );
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);
        manager.fetch_pending_approvals().await.unwrap();
        assert_eq!(manager.pending_approval_count(), 1);

        manager.approve_discrepancy("h1", true, "").await.unwrap();
        assert_eq!(backend.count(Method::POST, "/manager/cash-handovers/h1/approve"), 1);
        assert_eq!(backend.count(Method::GET, pending), 2);
        assert_eq!(manager.pending_approval_count(), 0);
        assert_eq!(manager.approval_error(), Some(messages::APPROVALS_LOAD));
        assert!(!manager.approval_loading());
    }

    #[tokio::test]
    async fn stats_net_amount() {
        let backend = FakeBackend::with_cash_server(THRESHOLD);
        reconciled(&backend, 240_000.0).await;
        let mut manager = ManagerStore::new(backend.client(), THRESHOLD);
        assert_eq!(manager.total_discrepancy_amount(), 0.0);

        manager.fetch_discrepancy_stats("", "").await.unwrap();
        assert!(manager.has_discrepancy_stats());
        assert_eq!(manager.total_discrepancy_amount(), -60_000.0);
        assert_eq!(manager.discrepancy_stats().unwrap().escalated_count, 1);

        manager.reset();
        assert!(!manager.has_discrepancy_stats());
    }
}
