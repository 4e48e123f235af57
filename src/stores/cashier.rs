//! Cashier side of the handover workflow: the pending queue, today's
//! handovers and discrepancy statistics.
//!
//! Transition endpoints only acknowledge, so every successful confirm,
//! reconcile or reject refetches both lists before returning.

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::handover::{
    CashHandover, DiscrepancyStats, HandoverStatus, ReconcileRequest,
};
use crate::services::CashierService;

use super::record;

pub struct CashierStore {
    service: CashierService,
    pending_handovers: Vec<CashHandover>,
    today_handovers: Vec<CashHandover>,
    discrepancy_stats: Option<DiscrepancyStats>,
    discrepancy_threshold: f64,
    handover_loading: bool,
    handover_error: Option<String>,
}

impl CashierStore {
    pub fn new(api: ApiClient, discrepancy_threshold: f64) -> Self {
        Self {
            service: CashierService::new(api),
            pending_handovers: Vec::new(),
            today_handovers: Vec::new(),
            discrepancy_stats: None,
            discrepancy_threshold,
            handover_loading: false,
            handover_error: None,
        }
    }

    pub fn pending_handovers(&self) -> &[CashHandover] {
        &self.pending_handovers
    }

    pub fn today_handovers(&self) -> &[CashHandover] {
        &self.today_handovers
    }

    pub fn discrepancy_stats(&self) -> Option<&DiscrepancyStats> {
        self.discrepancy_stats.as_ref()
    }

    pub fn discrepancy_threshold(&self) -> f64 {
        self.discrepancy_threshold
    }

    pub fn handover_loading(&self) -> bool {
        self.handover_loading
    }

    pub fn handover_error(&self) -> Option<&str> {
        self.handover_error.as_deref()
    }

    pub fn pending_handover_count(&self) -> usize {
        self.pending_handovers.len()
    }

    pub fn today_handover_count(&self) -> usize {
        self.today_handovers.len()
    }

    pub fn confirmed_handovers(&self) -> Vec<&CashHandover> {
        self.today_with_status(HandoverStatus::Confirmed)
    }

    pub fn discrepancy_handovers(&self) -> Vec<&CashHandover> {
        self.today_with_status(HandoverStatus::Discrepancy)
    }

    pub fn rejected_handovers(&self) -> Vec<&CashHandover> {
        self.today_with_status(HandoverStatus::Rejected)
    }

    /// Cash taken in today through confirmed handovers.
    pub fn total_handover_amount(&self) -> f64 {
        self.confirmed_handovers()
            .into_iter()
            .map(CashHandover::received_amount)
            .sum()
    }

    /// Whether a discrepancy of `amount` would need a manager. Display only;
    /// the server sets `requires_manager_approval`.
    pub fn exceeds_threshold(&self, amount: f64) -> bool {
        amount.abs() >= self.discrepancy_threshold
    }

    fn today_with_status(&self, status: HandoverStatus) -> Vec<&CashHandover> {
        self.today_handovers
            .iter()
            .filter(|h| h.status == status)
            .collect()
    }

    pub async fn fetch_pending_handovers(&mut self) -> Result<&[CashHandover], ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.pending().await;
        self.handover_loading = false;
        self.apply_pending(result)?;
        Ok(&self.pending_handovers)
    }

    pub async fn fetch_today_handovers(&mut self) -> Result<&[CashHandover], ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.today().await;
        self.handover_loading = false;
        self.apply_today(result)?;
        Ok(&self.today_handovers)
    }

    fn apply_pending(&mut self, result: Result<Vec<CashHandover>, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(handovers) => {
                self.pending_handovers = handovers;
                Ok(())
            }
            Err(err) => {
                self.pending_handovers.clear();
                Err(record(
                    &mut self.handover_error,
                    err,
                    messages::PENDING_HANDOVERS_LOAD,
                ))
            }
        }
    }

    fn apply_today(&mut self, result: Result<Vec<CashHandover>, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(handovers) => {
                self.today_handovers = handovers;
                Ok(())
            }
            Err(err) => {
                self.today_handovers.clear();
                Err(record(
                    &mut self.handover_error,
                    err,
                    messages::TODAY_HANDOVERS_LOAD,
                ))
            }
        }
    }

    /// Fetch both lists concurrently. A failed list is emptied and its
    /// message recorded; the transition that triggered the refresh still
    /// counts as done.
    async fn refresh_queues(&mut self) {
        let (pending, today) = tokio::join!(self.service.pending(), self.service.today());
        if let Err(err) = self.apply_pending(pending) {
            debug!(error = %err, "pending refresh failed");
        }
        if let Err(err) = self.apply_today(today) {
            debug!(error = %err, "today refresh failed");
        }
    }

    pub async fn quick_confirm(&mut self, id: &str, cashier_notes: &str) -> Result<(), ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.quick_confirm(id, cashier_notes).await;
        self.after_transition(id, "confirmed", result, messages::HANDOVER_CONFIRM)
            .await
    }

    pub async fn reconcile_handover(
        &mut self,
        id: &str,
        request: &ReconcileRequest,
    ) -> Result<(), ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.reconcile(id, request).await;
        self.after_transition(id, "reconciled", result, messages::HANDOVER_RECONCILE)
            .await
    }

    pub async fn reject_handover(&mut self, id: &str, reason: &str) -> Result<(), ApiError> {
        if reason.trim().is_empty() {
            let err = ApiError::Precondition(messages::REJECT_REASON_REQUIRED.to_string());
            return Err(record(
                &mut self.handover_error,
                err,
                messages::REJECT_REASON_REQUIRED,
            ));
        }
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.reject(id, reason.trim()).await;
        self.after_transition(id, "rejected", result, messages::HANDOVER_REJECT)
            .await
    }

    async fn after_transition(
        &mut self,
        id: &str,
        action: &str,
        result: Result<(), ApiError>,
        fallback: &str,
    ) -> Result<(), ApiError> {
        if let Err(err) = result {
            self.handover_loading = false;
            return Err(record(&mut self.handover_error, err, fallback));
        }
        info!(handover_id = id, action, "handover settled");
        self.refresh_queues().await;
        self.handover_loading = false;
        Ok(())
    }

    /// Dates are `YYYY-MM-DD`, empty for unbounded.
    pub async fn fetch_discrepancy_stats(
        &mut self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<&DiscrepancyStats>, ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.discrepancy_stats(start_date, end_date).await;
        self.handover_loading = false;
        match result {
            Ok(response) => {
                self.discrepancy_stats = response.stats;
                Ok(self.discrepancy_stats.as_ref())
            }
            Err(err) => {
                self.discrepancy_stats = None;
                Err(record(
                    &mut self.handover_error,
                    err,
                    messages::DISCREPANCY_STATS_LOAD,
                ))
            }
        }
    }

    pub fn clear_handover_error(&mut self) {
        self.handover_error = None;
    }

    pub fn reset(&mut self) {
        self.pending_handovers.clear();
        self.today_handovers.clear();
        self.discrepancy_stats = None;
        self.handover_loading = false;
        self.handover_error = None;
    }
}
