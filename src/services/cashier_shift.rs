//! Cashier drawer shifts and their closure procedure.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::cashier_shift::{
    CashierShift, DocumentVarianceRequest, RecordActualCashRequest, ShiftStepResponse,
    StartCashierShiftRequest, VarianceReason, WaiterShiftCheck,
};

use super::empty_body;

#[derive(Clone)]
pub struct CashierShiftService {
    api: ApiClient,
}

impl CashierShiftService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn start(&self, starting_float: f64) -> Result<CashierShift, ApiError> {
        self.api
            .post("/cashier-shifts", &StartCashierShiftRequest { starting_float })
            .await
    }

    /// 404 when the cashier has no open drawer.
    pub async fn current(&self) -> Result<CashierShift, ApiError> {
        self.api.get("/cashier-shifts/current").await
    }

    pub async fn all(&self) -> Result<Vec<CashierShift>, ApiError> {
        self.api.get_list("/cashier-shifts").await
    }

    pub async fn mine(&self) -> Result<Vec<CashierShift>, ApiError> {
        self.api.get_list("/cashier-shifts/my-shifts").await
    }

    pub async fn get(&self, id: &str) -> Result<CashierShift, ApiError> {
        self.api.get(&format!("/cashier-shifts/{id}")).await
    }

    pub async fn initiate_closure(&self, id: &str) -> Result<CashierShift, ApiError> {
        self.step(id, "initiate-closure", &empty_body()).await
    }

    pub async fn record_actual_cash(
        &self,
        id: &str,
        actual_cash: f64,
    ) -> Result<CashierShift, ApiError> {
        self.step(id, "record-actual-cash", &RecordActualCashRequest { actual_cash })
            .await
    }

    pub async fn document_variance(
        &self,
        id: &str,
        reason: VarianceReason,
        notes: &str,
    ) -> Result<CashierShift, ApiError> {
        let request = DocumentVarianceRequest {
            reason,
            notes: notes.to_string(),
        };
        self.step(id, "document-variance", &request).await
    }

    pub async fn confirm_responsibility(&self, id: &str) -> Result<CashierShift, ApiError> {
        self.step(id, "confirm-responsibility", &empty_body()).await
    }

    pub async fn close(&self, id: &str) -> Result<CashierShift, ApiError> {
        self.step(id, "close", &empty_body()).await
    }

    pub async fn check_waiter_shifts(&self) -> Result<WaiterShiftCheck, ApiError> {
        self.api.get("/cashier-shifts/check-waiter-shifts").await
    }

    async fn step<B>(&self, id: &str, step: &str, body: &B) -> Result<CashierShift, ApiError>
    where
        B: serde::Serialize + Sync + ?Sized,
    {
        let response: ShiftStepResponse = self
            .api
            .post(&format!("/cashier-shifts/{id}/{step}"), body)
            .await?;
        Ok(response.into_shift())
    }
}
