//! Cashier drawer shift and its closure procedure.
//!
//! Closure steps act on the current drawer and replace it with whatever the
//! server answers; the next step is only ever read back from that state.

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::cashier_shift::{
    CashierShift, CashierShiftStatus, ClosureStep, VarianceReason, WaiterShiftCheck,
};
use crate::services::CashierShiftService;

use super::record;

pub struct CashierShiftStore {
    service: CashierShiftService,
    current_cashier_shift: Option<CashierShift>,
    cashier_shifts: Vec<CashierShift>,
    loading: bool,
    error: Option<String>,
}

impl CashierShiftStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: CashierShiftService::new(api),
            current_cashier_shift: None,
            cashier_shifts: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn current_cashier_shift(&self) -> Option<&CashierShift> {
        self.current_cashier_shift.as_ref()
    }

    pub fn cashier_shifts(&self) -> &[CashierShift] {
        &self.cashier_shifts
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn current_status(&self) -> Option<CashierShiftStatus> {
        self.current_cashier_shift.as_ref().map(|s| s.status)
    }

    pub fn has_open_cashier_shift(&self) -> bool {
        self.current_status() == Some(CashierShiftStatus::Open)
    }

    pub fn can_start_cashier_shift(&self) -> bool {
        matches!(self.current_status(), None | Some(CashierShiftStatus::Closed))
    }

    pub fn is_closure_initiated(&self) -> bool {
        self.current_status() == Some(CashierShiftStatus::ClosureInitiated)
    }

    pub fn is_closed(&self) -> bool {
        self.current_status() == Some(CashierShiftStatus::Closed)
    }

    pub fn current_shift_id(&self) -> Option<&str> {
        self.current_cashier_shift.as_ref().map(|s| s.id.as_str())
    }

    /// Advisory next step for the current drawer.
    pub fn closure_step(&self) -> Option<ClosureStep> {
        self.current_cashier_shift
            .as_ref()
            .map(CashierShift::next_closure_step)
    }

    pub async fn start_cashier_shift(
        &mut self,
        starting_float: f64,
    ) -> Result<CashierShift, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.start(starting_float).await;
        self.loading = false;
        match result {
            Ok(shift) => {
                info!(shift_id = %shift.id, starting_float, "cashier shift started");
                self.current_cashier_shift = Some(shift.clone());
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, messages::CASHIER_SHIFT_START)),
        }
    }

    /// `Ok(None)` when no drawer is open.
    pub async fn fetch_current_cashier_shift(
        &mut self,
    ) -> Result<Option<&CashierShift>, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.current().await;
        self.loading = false;
        match result {
            Ok(shift) => {
                self.current_cashier_shift = Some(shift);
                Ok(self.current_cashier_shift.as_ref())
            }
            Err(err) => {
                self.current_cashier_shift = None;
                if err.is_not_found() {
                    debug!("no open cashier shift");
                    return Ok(None);
                }
                Err(record(&mut self.error, err, messages::CASHIER_SHIFT_CURRENT))
            }
        }
    }

    pub async fn fetch_all_cashier_shifts(&mut self) -> Result<&[CashierShift], ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.all().await;
        self.apply_shifts(result)
    }

    pub async fn fetch_my_cashier_shifts(&mut self) -> Result<&[CashierShift], ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.mine().await;
        self.apply_shifts(result)
    }

    fn apply_shifts(
        &mut self,
        result: Result<Vec<CashierShift>, ApiError>,
    ) -> Result<&[CashierShift], ApiError> {
        self.loading = false;
        match result {
            Ok(shifts) => {
                self.cashier_shifts = shifts;
                Ok(&self.cashier_shifts)
            }
            Err(err) => {
                self.cashier_shifts.clear();
                Err(record(&mut self.error, err, messages::CASHIER_SHIFTS_LOAD))
            }
        }
    }

    pub async fn fetch_cashier_shift(&mut self, id: &str) -> Result<CashierShift, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.get(id).await;
        self.loading = false;
        match result {
            Ok(shift) => {
                if self.current_shift_id() == Some(id) {
                    self.current_cashier_shift = Some(shift.clone());
                }
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, messages::CASHIER_SHIFT_LOAD)),
        }
    }

    pub async fn initiate_closure(&mut self) -> Result<CashierShift, ApiError> {
        let id = self.require_current()?;
        self.begin_step();
        let result = self.service.initiate_closure(&id).await;
        self.finish_step(ClosureStep::InitiateClosure, result, messages::CLOSURE_INITIATE)
    }

    pub async fn record_actual_cash(&mut self, actual_cash: f64) -> Result<CashierShift, ApiError> {
        let id = self.require_current()?;
        self.begin_step();
        let result = self.service.record_actual_cash(&id, actual_cash).await;
        self.finish_step(
            ClosureStep::RecordActualCash,
            result,
            messages::CLOSURE_RECORD_CASH,
        )
    }

    pub async fn document_variance(
        &mut self,
        reason: VarianceReason,
        notes: &str,
    ) -> Result<CashierShift, ApiError> {
        let id = self.require_current()?;
        self.begin_step();
        let result = self.service.document_variance(&id, reason, notes).await;
        self.finish_step(
            ClosureStep::DocumentVariance,
            result,
            messages::CLOSURE_DOCUMENT_VARIANCE,
        )
    }

    pub async fn confirm_responsibility(&mut self) -> Result<CashierShift, ApiError> {
        let id = self.require_current()?;
        self.begin_step();
        let result = self.service.confirm_responsibility(&id).await;
        self.finish_step(
            ClosureStep::ConfirmResponsibility,
            result,
            messages::CLOSURE_CONFIRM,
        )
    }

    pub async fn close_shift(&mut self) -> Result<CashierShift, ApiError> {
        let id = self.require_current()?;
        self.begin_step();
        let result = self.service.close(&id).await;
        self.finish_step(ClosureStep::Close, result, messages::CLOSURE_CLOSE)
    }

    fn require_current(&mut self) -> Result<String, ApiError> {
        match self.current_shift_id() {
            Some(id) => Ok(id.to_string()),
            None => {
                let err = ApiError::Precondition(messages::NO_CASHIER_SHIFT.to_string());
                Err(record(&mut self.error, err, messages::NO_CASHIER_SHIFT))
            }
        }
    }

    fn begin_step(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish_step(
        &mut self,
        step: ClosureStep,
        result: Result<CashierShift, ApiError>,
        fallback: &str,
    ) -> Result<CashierShift, ApiError> {
        self.loading = false;
        match result {
            Ok(shift) => {
                info!(
                    shift_id = %shift.id,
                    step = step.label(),
                    status = ?shift.status,
                    "cashier shift closure step"
                );
                self.current_cashier_shift = Some(shift.clone());
                Ok(shift)
            }
            Err(err) => Err(record(&mut self.error, err, fallback)),
        }
    }

    /// Whether every waiter/barista shift is closed, which the drawer
    /// closure expects first.
    pub async fn check_waiter_shifts(&mut self) -> Result<WaiterShiftCheck, ApiError> {
        self.error = None;
        match self.service.check_waiter_shifts().await {
            Ok(check) => {
                debug!(open = check.open_count, "waiter shift check");
                Ok(check)
            }
            Err(err) => Err(record(&mut self.error, err, messages::WAITER_SHIFTS_CHECK)),
        }
    }

    pub fn clear_current_shift(&mut self) {
        self.current_cashier_shift = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.current_cashier_shift = None;
        self.cashier_shifts.clear();
        self.loading = false;
        self.error = None;
    }
}
