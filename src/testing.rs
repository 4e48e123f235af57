//! In-process backend for store tests.
//!
//! [`FakeBackend`] answers scripted routes first, then falls through to an
//! optional [`CashServer`] that keeps just enough state to play the shift,
//! handover and cashier-shift workflows the way the real backend does.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiRequest, Method, Transport};
use crate::error::ApiError;
use crate::models::cashier_shift::{
    CashierShift, CashierShiftStatus, ClosureStep, DocumentVarianceRequest,
    RecordActualCashRequest, ResponsibilityConfirmation, StartCashierShiftRequest,
};
use crate::models::handover::{
    ApprovalDecision, CashHandover, CreateHandoverRequest, DiscrepancyStats, HandoverStatus,
    HandoverType, QuickConfirmRequest, ReconcileRequest, RejectRequest,
};
use crate::models::shift::{EndShiftRequest, Shift, ShiftStatus, StartShiftRequest};
use crate::session::SessionHandle;

type Reply = Result<Value, ApiError>;

pub(crate) fn bad_request(message: &str) -> ApiError {
    ApiError::Client {
        status: 400,
        message: Some(message.to_string()),
    }
}

pub(crate) fn not_found(message: &str) -> ApiError {
    ApiError::Client {
        status: 404,
        message: Some(message.to_string()),
    }
}

pub(crate) fn server_error() -> ApiError {
    ApiError::Server {
        status: 500,
        message: None,
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    routes: Mutex<HashMap<(String, String), Vec<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
    server: Option<Mutex<CashServer>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Backend with a stateful cash server behind the scripted routes.
    pub fn with_cash_server(threshold: f64) -> Arc<Self> {
        Arc::new(Self {
            server: Some(Mutex::new(CashServer::new(threshold))),
            ..Self::default()
        })
    }

    /// Queue a reply; the last queued reply for a route repeats.
    pub fn on(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method.as_str().to_string(), path.to_string()))
            .or_default()
            .push(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_body(&self, method: Method, path: &str) -> Option<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .and_then(|r| r.body.clone())
    }

    pub fn server<R>(&self, f: impl FnOnce(&mut CashServer) -> R) -> R {
        let server = self.server.as_ref().expect("backend has no cash server");
        f(&mut server.lock().unwrap())
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone(), SessionHandle::with_token("test-token"))
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let key = (request.method.as_str().to_string(), request.path.clone());
        let scripted = {
            let mut routes = self.routes.lock().unwrap();
            routes.get_mut(&key).and_then(|queue| {
                if queue.len() > 1 {
                    Some(queue.remove(0))
                } else {
                    queue.first().cloned()
                }
            })
        };
        if let Some(reply) = scripted {
            return reply;
        }

        match &self.server {
            Some(server) => server.lock().unwrap().handle(&request),
            None => Err(not_found("route not found")),
        }
    }
}

// ---------------------------------------------------------------------------
// Cash server
// ---------------------------------------------------------------------------

pub(crate) struct CashServer {
    pub threshold: f64,
    pub shifts: Vec<Shift>,
    pub handovers: Vec<CashHandover>,
    pub cashier_shifts: Vec<CashierShift>,
    next_id: u32,
}

fn body<T: DeserializeOwned>(req: &ApiRequest) -> Result<T, ApiError> {
    serde_json::from_value(req.body.clone().unwrap_or(Value::Null))
        .map_err(|e| bad_request(&e.to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Reply {
    Ok(serde_json::to_value(value)?)
}

fn list(handovers: Vec<&CashHandover>) -> Reply {
    Ok(json!({ "count": handovers.len(), "handovers": handovers }))
}

impl CashServer {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            shifts: Vec::new(),
            handovers: Vec::new(),
            cashier_shifts: Vec::new(),
            next_id: 0,
        }
    }

    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn handover(&self, id: &str) -> Option<&CashHandover> {
        self.handovers.iter().find(|h| h.id == id)
    }

    fn shift_mut(&mut self, id: &str) -> Result<&mut Shift, ApiError> {
        self.shifts
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("shift not found"))
    }

    fn handover_mut(&mut self, id: &str) -> Result<&mut CashHandover, ApiError> {
        self.handovers
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| not_found("handover not found"))
    }

    fn cashier_shift_mut(&mut self, id: &str) -> Result<&mut CashierShift, ApiError> {
        self.cashier_shifts
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("shift not found"))
    }

    fn pending_for(&self, shift_id: &str) -> Option<&CashHandover> {
        self.handovers
            .iter()
            .find(|h| h.waiter_shift_id == shift_id && h.is_pending())
    }

    fn stats(&self) -> DiscrepancyStats {
        let mut stats = DiscrepancyStats::default();
        for h in self.handovers.iter().filter(|h| h.status == HandoverStatus::Discrepancy) {
            stats.total_discrepancies += 1;
            let d = h.discrepancy();
            if d < 0.0 {
                stats.total_shortages += 1;
                stats.total_shortage_amount += d.abs();
            } else {
                stats.total_overages += 1;
                stats.total_overage_amount += d;
            }
            stats.net_discrepancy += d;
            if h.awaits_approval() {
                stats.pending_count += 1;
            } else {
                stats.resolved_count += 1;
            }
            if h.requires_manager_approval {
                stats.escalated_count += 1;
            }
        }
        stats
    }

    pub fn handle(&mut self, req: &ApiRequest) -> Reply {
        let path = req.path.trim_matches('/').to_string();
        let segs: Vec<&str> = path.split('/').collect();
        match (req.method.as_str(), segs.as_slice()) {
            // waiter/barista shifts
            ("POST", ["shifts", "start"]) => self.start_shift(body(req)?),
            ("GET", ["shifts", "current"]) => match self.shifts.iter().find(|s| s.is_open()) {
                Some(shift) => to_json(shift),
                None => Err(not_found("no open shift found")),
            },
            ("GET", ["shifts"]) | ("GET", ["shifts", "my"]) => to_json(&self.shifts),
            ("GET", ["shifts", id]) => match self.shift(id) {
                Some(shift) => to_json(shift),
                None => Err(not_found("shift not found")),
            },
            ("POST", ["shifts", id, "end"]) | ("POST", ["shifts", id, "close"]) => {
                self.end_shift(id, body(req)?)
            }
            ("POST", ["shifts", id, "handover"]) => self.create_handover(id, body(req)?),
            ("POST", ["shifts", id, "handover-and-end"]) => {
                let mut request: CreateHandoverRequest = body(req)?;
                request.handover_type = HandoverType::EndShift;
                self.create_handover(id, request)
            }
            ("GET", ["shifts", id, "pending-handover"]) => match self.pending_for(id) {
                Some(h) => to_json(h),
                None => Err(ApiError::Client {
                    status: 404,
                    message: Some("No pending handover found".into()),
                }),
            },
            ("GET", ["shifts", id, "handovers"]) => {
                list(self.handovers.iter().filter(|h| h.waiter_shift_id == *id).collect())
            }

            // handovers
            ("GET", ["cash-handovers", "pending"]) => {
                list(self.handovers.iter().filter(|h| h.is_pending()).collect())
            }
            ("GET", ["cash-handovers", "today"]) => list(self.handovers.iter().collect()),
            ("GET", ["cash-handovers", "discrepancy-stats"])
            | ("GET", ["manager", "discrepancies", "stats"]) => Ok(json!({
                "stats": self.stats(),
                "start_date": "2026-10-01",
                "end_date": "2026-10-19",
            })),
            ("POST", ["cash-handovers", id, "quick-confirm"]) => {
                let request: QuickConfirmRequest = body(req)?;
                let requested = self.handover_mut(id)?.requested_amount;
                self.settle(id, requested, request.cashier_notes, None)
            }
            ("POST", ["cash-handovers", id, "reconcile"]) => {
                let request: ReconcileRequest = body(req)?;
                let notes = request.cashier_notes.clone();
                self.settle(id, request.actual_amount, notes, Some(request))
            }
            ("POST", ["cash-handovers", id, "reject"]) => self.reject(id, body(req)?),
            ("POST", ["cash-handovers", id, "cancel"]) => {
                let handover = self.handover_mut(id)?;
                if !handover.is_pending() {
                    return Err(bad_request("can only cancel pending handovers"));
                }
                self.handovers.retain(|h| h.id != *id);
                Ok(json!({"message": "Handover cancelled successfully"}))
            }

            // manager approvals
            ("GET", ["manager", "cash-handovers", "pending-approval"]) => {
                list(self.handovers.iter().filter(|h| h.awaits_approval()).collect())
            }
            ("POST", ["manager", "cash-handovers", id, "approve"]) => {
                let decision: ApprovalDecision = body(req)?;
                let handover = self.handover_mut(id)?;
                if !handover.awaits_approval() {
                    return Err(bad_request("handover does not require manager approval"));
                }
                handover.manager_approved = Some(decision.approved);
                handover.manager_notes = Some(decision.manager_notes);
                let action = if decision.approved { "approved" } else { "rejected" };
                Ok(json!({"message": format!("Discrepancy {action} successfully")}))
            }

            // cashier shifts
            ("POST", ["cashier-shifts"]) => self.start_cashier_shift(body(req)?),
            ("GET", ["cashier-shifts"]) | ("GET", ["cashier-shifts", "my-shifts"]) => {
                to_json(&self.cashier_shifts)
            }
            ("GET", ["cashier-shifts", "current"]) => {
                match self
                    .cashier_shifts
                    .iter()
                    .find(|s| s.status != CashierShiftStatus::Closed)
                {
                    Some(shift) => to_json(shift),
                    None => Err(not_found("no open cashier shift found")),
                }
            }
            ("GET", ["cashier-shifts", "check-waiter-shifts"]) => {
                let open: Vec<Value> = self
                    .shifts
                    .iter()
                    .filter(|s| s.is_open())
                    .map(|s| json!({"id": s.id, "user_name": s.user_name, "role_type": s.role_type}))
                    .collect();
                Ok(json!({
                    "all_closed": open.is_empty(),
                    "open_count": open.len(),
                    "can_close": open.is_empty(),
                    "open_shifts": open,
                }))
            }
            ("GET", ["cashier-shifts", id]) => match self.cashier_shifts.iter().find(|s| s.id == *id) {
                Some(shift) => to_json(shift),
                None => Err(not_found("shift not found")),
            },
            ("POST", ["cashier-shifts", id, step]) => self.closure_step(id, step, req),

            _ => Err(not_found("route not found")),
        }
    }

    fn start_shift(&mut self, req: StartShiftRequest) -> Reply {
        if self.shifts.iter().any(|s| s.is_open()) {
            return Err(bad_request("user already has an open shift"));
        }
        let shift = Shift {
            id: self.id("shift"),
            shift_type: req.shift_type,
            status: ShiftStatus::Open,
            role_type: req.role_type.unwrap_or_default(),
            user_id: "u-waiter".into(),
            user_name: "Minh".into(),
            start_cash: req.start_cash,
            current_cash: req.start_cash,
            remaining_cash: req.start_cash,
            started_at: Some(Utc::now()),
            ..Default::default()
        };
        self.shifts.push(shift.clone());
        to_json(&shift)
    }

    fn end_shift(&mut self, id: &str, req: EndShiftRequest) -> Reply {
        if self.pending_for(id).is_some() {
            return Err(bad_request("cannot end shift with pending handover"));
        }
        let shift = self.shift_mut(id)?;
        if !shift.is_open() {
            return Err(bad_request("shift is already closed"));
        }
        shift.status = ShiftStatus::Closed;
        shift.end_cash = req.end_cash;
        shift.ended_at = Some(Utc::now());
        to_json(&*shift)
    }

    fn create_handover(&mut self, shift_id: &str, req: CreateHandoverRequest) -> Reply {
        if self.pending_for(shift_id).is_some() {
            return Err(bad_request("shift already has a pending handover"));
        }
        if req.requested_amount <= 0.0 {
            return Err(bad_request("requested amount must be greater than 0"));
        }
        let id = self.id("handover");
        let shift = self.shift_mut(shift_id)?;
        if req.requested_amount > shift.remaining_cash {
            return Err(bad_request("requested amount exceeds remaining cash"));
        }
        let handover = CashHandover {
            id,
            handover_type: req.handover_type,
            status: HandoverStatus::Pending,
            waiter_shift_id: shift.id.clone(),
            waiter_id: shift.user_id.clone(),
            waiter_name: shift.user_name.clone(),
            requested_amount: req.requested_amount,
            waiter_notes: req.waiter_notes,
            requested_at: Some(Utc::now()),
            ..Default::default()
        };
        self.handovers.push(handover.clone());
        to_json(&handover)
    }

    fn settle(
        &mut self,
        id: &str,
        actual: f64,
        notes: String,
        reconcile: Option<ReconcileRequest>,
    ) -> Reply {
        let threshold = self.threshold;
        let handover = self.handover_mut(id)?;
        if !handover.is_pending() {
            return Err(bad_request("can only confirm pending handovers"));
        }
        handover.actual_amount = Some(actual);
        handover.cashier_notes = Some(notes);
        handover.cashier_name = Some("Thu".into());
        handover.confirmed_at = Some(Utc::now());

        let discrepancy = actual - handover.requested_amount;
        if discrepancy != 0.0 {
            handover.status = HandoverStatus::Discrepancy;
            handover.discrepancy_amount = Some(discrepancy);
            handover.requires_manager_approval = discrepancy.abs() >= threshold;
            if let Some(r) = reconcile {
                handover.discrepancy_reason = Some(r.discrepancy_reason);
                handover.responsibility = Some(r.responsibility);
            }
        } else {
            handover.status = HandoverStatus::Confirmed;
        }

        let shift_id = handover.waiter_shift_id.clone();
        let requested = handover.requested_amount;
        let shift = self.shift_mut(&shift_id)?;
        shift.handed_over_cash += actual;
        shift.current_cash -= requested;
        shift.remaining_cash -= requested;
        shift.total_discrepancy += discrepancy;
        shift.handover_count += 1;

        if let Some(drawer) = self
            .cashier_shifts
            .iter_mut()
            .find(|s| s.status == CashierShiftStatus::Open)
        {
            drawer.received_cash += actual;
            drawer.system_cash += actual;
            drawer.handover_count += 1;
        }

        let message = if discrepancy != 0.0 {
            "Handover reconciled successfully"
        } else {
            "Handover confirmed successfully"
        };
        Ok(json!({ "message": message }))
    }

    fn reject(&mut self, id: &str, req: RejectRequest) -> Reply {
        if req.reason.trim().is_empty() {
            return Err(bad_request("rejection reason is required"));
        }
        let handover = self.handover_mut(id)?;
        if !handover.is_pending() {
            return Err(bad_request("can only reject pending handovers"));
        }
        handover.status = HandoverStatus::Rejected;
        handover.cashier_notes = Some(req.reason);
        handover.rejected_at = Some(Utc::now());
        Ok(json!({"message": "Handover rejected successfully"}))
    }

    fn start_cashier_shift(&mut self, req: StartCashierShiftRequest) -> Reply {
        if self
            .cashier_shifts
            .iter()
            .any(|s| s.status != CashierShiftStatus::Closed)
        {
            return Err(bad_request("cashier already has an open shift"));
        }
        let shift = CashierShift {
            id: self.id("cashier-shift"),
            cashier_id: "u-cashier".into(),
            cashier_name: "Thu".into(),
            status: CashierShiftStatus::Open,
            starting_float: req.starting_float,
            system_cash: req.starting_float,
            start_time: Some(Utc::now()),
            ..Default::default()
        };
        self.cashier_shifts.push(shift.clone());
        to_json(&shift)
    }

    fn closure_step(&mut self, id: &str, step: &str, req: &ApiRequest) -> Reply {
        let shift = self.cashier_shift_mut(id)?;
        let expected = shift.next_closure_step();
        let requested = match step {
            "initiate-closure" => ClosureStep::InitiateClosure,
            "record-actual-cash" => ClosureStep::RecordActualCash,
            "document-variance" => ClosureStep::DocumentVariance,
            "confirm-responsibility" => ClosureStep::ConfirmResponsibility,
            "close" => ClosureStep::Close,
            _ => return Err(not_found("route not found")),
        };
        if requested != expected {
            return Err(ApiError::Client {
                status: 400,
                message: Some(format!("invalid step, next step: {}", expected.label())),
            });
        }

        match requested {
            ClosureStep::InitiateClosure => {
                shift.status = CashierShiftStatus::ClosureInitiated;
                to_json(&*shift)
            }
            ClosureStep::RecordActualCash => {
                let request: RecordActualCashRequest = body(req)?;
                if request.actual_cash < 0.0 {
                    return Err(bad_request("actual cash must be non-negative"));
                }
                let variance = crate::models::Variance {
                    system_cash: shift.system_cash,
                    actual_cash: request.actual_cash,
                    amount: request.actual_cash - shift.system_cash,
                    ..Default::default()
                };
                shift.actual_cash = Some(request.actual_cash);
                shift.variance = Some(variance.clone());
                Ok(json!({ "shift": &*shift, "variance": variance }))
            }
            ClosureStep::DocumentVariance => {
                let request: DocumentVarianceRequest = body(req)?;
                if request.notes.chars().count() < 10 {
                    return Err(bad_request("variance notes must be at least 10 characters"));
                }
                if let Some(variance) = shift.variance.as_mut() {
                    variance.reason = Some(request.reason);
                    variance.notes = request.notes;
                }
                to_json(&*shift)
            }
            ClosureStep::ConfirmResponsibility => {
                shift.confirmation = Some(ResponsibilityConfirmation {
                    user_id: shift.cashier_id.clone(),
                    device_id: "test-device".into(),
                    timestamp: Some(Utc::now()),
                });
                to_json(&*shift)
            }
            ClosureStep::Close => {
                shift.status = CashierShiftStatus::Closed;
                shift.end_time = Some(Utc::now());
                to_json(&*shift)
            }
            ClosureStep::Done => Err(bad_request("shift is closed")),
        }
    }
}
