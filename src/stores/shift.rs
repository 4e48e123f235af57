//! Waiter/barista shift state and the handover raised from the open shift.

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::handover::{CashHandover, CreateHandoverRequest};
use crate::models::shift::{RoleType, Shift, ShiftStatus, StartShiftRequest};
use crate::services::ShiftService;

use super::record;

/// The server's answer when the user simply has no open shift.
const NO_OPEN_SHIFT: &str = "no open shift found";

pub struct ShiftStore {
    service: ShiftService,
    current_shift: Option<Shift>,
    shifts: Vec<Shift>,
    pending_handover: Option<CashHandover>,
    handover_history: Vec<CashHandover>,
    loading: bool,
    handover_loading: bool,
    error: Option<String>,
    handover_error: Option<String>,
}

impl ShiftStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: ShiftService::new(api),
            current_shift: None,
            shifts: Vec::new(),
            pending_handover: None,
            handover_history: Vec::new(),
            loading: false,
            handover_loading: false,
            error: None,
            handover_error: None,
        }
    }

    pub fn current_shift(&self) -> Option<&Shift> {
        self.current_shift.as_ref()
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn pending_handover(&self) -> Option<&CashHandover> {
        self.pending_handover.as_ref()
    }

    pub fn handover_history(&self) -> &[CashHandover] {
        &self.handover_history
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn handover_loading(&self) -> bool {
        self.handover_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handover_error(&self) -> Option<&str> {
        self.handover_error.as_deref()
    }

    // -- derived ------------------------------------------------------------

    pub fn has_open_shift(&self) -> bool {
        self.current_shift.as_ref().is_some_and(Shift::is_open)
    }

    pub fn open_shifts(&self) -> Vec<&Shift> {
        self.shifts_with_status(ShiftStatus::Open)
    }

    pub fn closed_shifts(&self) -> Vec<&Shift> {
        self.shifts_with_status(ShiftStatus::Closed)
    }

    pub fn waiter_shifts(&self) -> Vec<&Shift> {
        self.shifts_with_role(RoleType::Waiter)
    }

    pub fn barista_shifts(&self) -> Vec<&Shift> {
        self.shifts_with_role(RoleType::Barista)
    }

    pub fn has_pending_handover(&self) -> bool {
        self.pending_handover
            .as_ref()
            .is_some_and(CashHandover::is_pending)
    }

    pub fn available_cash(&self) -> f64 {
        self.current_shift
            .as_ref()
            .map(|s| s.remaining_cash)
            .unwrap_or(0.0)
    }

    /// Advisory: no handover outstanding and every note handed over.
    pub fn can_end_shift(&self) -> bool {
        self.pending_handover.is_none() && self.available_cash() == 0.0
    }

    fn shifts_with_status(&self, status: ShiftStatus) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.status == status).collect()
    }

    fn shifts_with_role(&self, role: RoleType) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.role_type == role).collect()
    }

    // -- shift actions ------------------------------------------------------

    pub async fn start_shift(&mut self, request: &StartShiftRequest) -> Result<Shift, ApiError> {
        self.error = None;
        match self.service.start_shift(request).await {
            Ok(shift) => {
                info!(shift_id = %shift.id, start_cash = shift.start_cash, "shift started");
                self.current_shift = Some(shift.clone());
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, messages::SHIFT_START)),
        }
    }

    pub async fn end_shift(&mut self, id: &str, end_cash: f64) -> Result<Shift, ApiError> {
        self.error = None;
        match self.service.end_shift(id, end_cash).await {
            Ok(shift) => {
                info!(shift_id = %id, end_cash, "shift ended");
                self.current_shift = None;
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, messages::SHIFT_END)),
        }
    }

    /// Closes the shift and locks its orders. Local state is left for the
    /// next fetch to reconcile.
    pub async fn close_shift(&mut self, id: &str, end_cash: f64) -> Result<Shift, ApiError> {
        self.error = None;
        match self.service.close_shift(id, end_cash).await {
            Ok(shift) => {
                info!(shift_id = %id, end_cash, "shift closed");
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, messages::SHIFT_CLOSE)),
        }
    }

    /// `Ok(None)` when the user has no open shift.
    pub async fn fetch_current_shift(&mut self) -> Result<Option<&Shift>, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.current_shift().await;
        self.loading = false;
        match result {
            Ok(shift) => {
                self.current_shift = Some(shift);
                Ok(self.current_shift.as_ref())
            }
            Err(err) => {
                self.current_shift = None;
                if err.is_not_found() || err.server_message() == Some(NO_OPEN_SHIFT) {
                    debug!("no open shift");
                    return Ok(None);
                }
                Err(record(&mut self.error, err, messages::SHIFT_LOAD))
            }
        }
    }

    pub async fn fetch_my_shifts(&mut self) -> Result<&[Shift], ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.my_shifts().await;
        self.apply_shifts(result)
    }

    pub async fn fetch_all_shifts(&mut self) -> Result<&[Shift], ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.all_shifts().await;
        self.apply_shifts(result)
    }

    fn apply_shifts(&mut self, result: Result<Vec<Shift>, ApiError>) -> Result<&[Shift], ApiError> {
        self.loading = false;
        match result {
            Ok(shifts) => {
                self.shifts = shifts;
                Ok(&self.shifts)
            }
            Err(err) => {
                self.shifts.clear();
                Err(record(&mut self.error, err, messages::SHIFTS_LOAD))
            }
        }
    }

    /// Fetch one shift; refreshes `current_shift` when it is the same one.
    pub async fn fetch_shift(&mut self, id: &str) -> Result<Shift, ApiError> {
        self.error = None;
        match self.service.get_shift(id).await {
            Ok(shift) => {
                if self.current_shift.as_ref().is_some_and(|c| c.id == shift.id) {
                    self.current_shift = Some(shift.clone());
                }
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, messages::SHIFT_LOAD)),
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.current_shift = None;
        self.shifts.clear();
        self.pending_handover = None;
        self.handover_history.clear();
        self.loading = false;
        self.handover_loading = false;
        self.error = None;
        self.handover_error = None;
    }

    // -- handover actions ---------------------------------------------------

    /// Refused locally while a handover is pending; the server checks again.
    pub async fn create_cash_handover(
        &mut self,
        shift_id: &str,
        request: &CreateHandoverRequest,
    ) -> Result<CashHandover, ApiError> {
        self.guard_no_pending()?;
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.create_handover(shift_id, request).await;
        self.after_handover_created(shift_id, result, messages::HANDOVER_CREATE)
            .await
    }

    pub async fn create_handover_and_end_shift(
        &mut self,
        shift_id: &str,
        request: &CreateHandoverRequest,
    ) -> Result<CashHandover, ApiError> {
        self.guard_no_pending()?;
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.create_handover_and_end(shift_id, request).await;
        self.after_handover_created(shift_id, result, messages::HANDOVER_AND_END)
            .await
    }

    fn guard_no_pending(&mut self) -> Result<(), ApiError> {
        if self.has_pending_handover() {
            let err = ApiError::Precondition(messages::HANDOVER_ALREADY_PENDING.to_string());
            return Err(record(
                &mut self.handover_error,
                err,
                messages::HANDOVER_ALREADY_PENDING,
            ));
        }
        Ok(())
    }

    async fn after_handover_created(
        &mut self,
        shift_id: &str,
        result: Result<CashHandover, ApiError>,
        fallback: &str,
    ) -> Result<CashHandover, ApiError> {
        let handover = match result {
            Ok(handover) => handover,
            Err(err) => {
                self.handover_loading = false;
                return Err(record(&mut self.handover_error, err, fallback));
            }
        };
        info!(
            shift_id,
            handover_id = %handover.id,
            amount = handover.requested_amount,
            "handover requested"
        );
        self.pending_handover = Some(handover.clone());
        self.refresh_current_shift().await;
        self.handover_loading = false;
        Ok(handover)
    }

    /// Refetch after a transition; a failure is already in `error`.
    async fn refresh_current_shift(&mut self) {
        if let Err(err) = self.fetch_current_shift().await {
            debug!(error = %err, "shift refresh failed");
        }
    }

    /// `Ok(None)` when nothing is pending.
    pub async fn fetch_pending_handover(
        &mut self,
        shift_id: &str,
    ) -> Result<Option<&CashHandover>, ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.pending_handover(shift_id).await;
        self.handover_loading = false;
        match result {
            Ok(handover) => {
                self.pending_handover = Some(handover);
                Ok(self.pending_handover.as_ref())
            }
            Err(err) => {
                self.pending_handover = None;
                if err.is_not_found() {
                    return Ok(None);
                }
                Err(record(&mut self.handover_error, err, messages::HANDOVER_LOAD))
            }
        }
    }

    pub async fn fetch_handover_history(
        &mut self,
        shift_id: &str,
    ) -> Result<&[CashHandover], ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.handover_history(shift_id).await;
        self.handover_loading = false;
        match result {
            Ok(history) => {
                self.handover_history = history;
                Ok(&self.handover_history)
            }
            Err(err) => {
                self.handover_history.clear();
                Err(record(
                    &mut self.handover_error,
                    err,
                    messages::HANDOVER_HISTORY_LOAD,
                ))
            }
        }
    }

    pub async fn cancel_handover(&mut self, handover_id: &str) -> Result<(), ApiError> {
        self.handover_loading = true;
        self.handover_error = None;
        let result = self.service.cancel_handover(handover_id).await;
        if let Err(err) = result {
            self.handover_loading = false;
            return Err(record(&mut self.handover_error, err, messages::HANDOVER_CANCEL));
        }
        info!(handover_id, "handover cancelled");
        self.pending_handover = None;
        self.refresh_current_shift().await;
        self.handover_loading = false;
        Ok(())
    }

    pub fn clear_handover_error(&mut self) {
        self.handover_error = None;
    }
}
