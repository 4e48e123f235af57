//! Handover queue endpoints for cashiers and the approval queue for managers.
//!
//! Every transition endpoint answers with a bare `{ "message": ... }`, so the
//! calling store refetches whatever lists it shows.

use crate::api::{build_query, ApiClient};
use crate::error::ApiError;
use crate::models::handover::{
    ApprovalDecision, CashHandover, DiscrepancyStatsResponse, HandoverList, QuickConfirmRequest,
    ReconcileRequest, RejectRequest,
};

fn date_range(start_date: &str, end_date: &str) -> Vec<(String, String)> {
    build_query([("start_date", start_date), ("end_date", end_date)])
}

#[derive(Clone)]
pub struct CashierService {
    api: ApiClient,
}

impl CashierService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn pending(&self) -> Result<Vec<CashHandover>, ApiError> {
        let list: HandoverList = self.api.get("/cash-handovers/pending").await?;
        Ok(list.into_vec())
    }

    pub async fn today(&self) -> Result<Vec<CashHandover>, ApiError> {
        let list: HandoverList = self.api.get("/cash-handovers/today").await?;
        Ok(list.into_vec())
    }

    /// Accept the requested amount as counted.
    pub async fn quick_confirm(&self, id: &str, cashier_notes: &str) -> Result<(), ApiError> {
        let request = QuickConfirmRequest {
            cashier_notes: cashier_notes.to_string(),
        };
        self.api
            .post_unit(&format!("/cash-handovers/{id}/quick-confirm"), &request)
            .await
    }

    pub async fn reconcile(&self, id: &str, request: &ReconcileRequest) -> Result<(), ApiError> {
        self.api
            .post_unit(&format!("/cash-handovers/{id}/reconcile"), request)
            .await
    }

    pub async fn reject(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        let request = RejectRequest {
            reason: reason.to_string(),
        };
        self.api
            .post_unit(&format!("/cash-handovers/{id}/reject"), &request)
            .await
    }

    /// Dates are `YYYY-MM-DD`; empty means unbounded.
    pub async fn discrepancy_stats(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<DiscrepancyStatsResponse, ApiError> {
        self.api
            .get_query(
                "/cash-handovers/discrepancy-stats",
                date_range(start_date, end_date),
            )
            .await
    }
}

#[derive(Clone)]
pub struct ManagerService {
    api: ApiClient,
}

impl ManagerService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn pending_approvals(&self) -> Result<Vec<CashHandover>, ApiError> {
        let list: HandoverList = self
            .api
            .get("/manager/cash-handovers/pending-approval")
            .await?;
        Ok(list.into_vec())
    }

    pub async fn approve(&self, id: &str, decision: &ApprovalDecision) -> Result<(), ApiError> {
        self.api
            .post_unit(&format!("/manager/cash-handovers/{id}/approve"), decision)
            .await
    }

    pub async fn discrepancy_stats(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<DiscrepancyStatsResponse, ApiError> {
        self.api
            .get_query(
                "/manager/discrepancies/stats",
                date_range(start_date, end_date),
            )
            .await
    }
}
