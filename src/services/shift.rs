//! Waiter/barista shifts and the cash handovers raised from them.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::handover::{CashHandover, CreateHandoverRequest, HandoverList};
use crate::models::shift::{EndShiftRequest, Shift, StartShiftRequest};

use super::empty_body;

#[derive(Clone)]
pub struct ShiftService {
    api: ApiClient,
}

impl ShiftService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn start_shift(&self, request: &StartShiftRequest) -> Result<Shift, ApiError> {
        self.api.post("/shifts/start", request).await
    }

    pub async fn end_shift(&self, id: &str, end_cash: f64) -> Result<Shift, ApiError> {
        self.api
            .post(&format!("/shifts/{id}/end"), &EndShiftRequest { end_cash })
            .await
    }

    /// Ends the shift and locks its orders.
    pub async fn close_shift(&self, id: &str, end_cash: f64) -> Result<Shift, ApiError> {
        self.api
            .post(&format!("/shifts/{id}/close"), &EndShiftRequest { end_cash })
            .await
    }

    /// 404 when the user has no open shift.
    pub async fn current_shift(&self) -> Result<Shift, ApiError> {
        self.api.get("/shifts/current").await
    }

    pub async fn my_shifts(&self) -> Result<Vec<Shift>, ApiError> {
        self.api.get_list("/shifts/my").await
    }

    pub async fn all_shifts(&self) -> Result<Vec<Shift>, ApiError> {
        self.api.get_list("/shifts").await
    }

    pub async fn get_shift(&self, id: &str) -> Result<Shift, ApiError> {
        self.api.get(&format!("/shifts/{id}")).await
    }

    pub async fn create_handover(
        &self,
        shift_id: &str,
        request: &CreateHandoverRequest,
    ) -> Result<CashHandover, ApiError> {
        self.api
            .post(&format!("/shifts/{shift_id}/handover"), request)
            .await
    }

    /// Hand over everything and end the shift in one request.
    pub async fn create_handover_and_end(
        &self,
        shift_id: &str,
        request: &CreateHandoverRequest,
    ) -> Result<CashHandover, ApiError> {
        self.api
            .post(&format!("/shifts/{shift_id}/handover-and-end"), request)
            .await
    }

    /// 404 when nothing is pending.
    pub async fn pending_handover(&self, shift_id: &str) -> Result<CashHandover, ApiError> {
        self.api
            .get(&format!("/shifts/{shift_id}/pending-handover"))
            .await
    }

    pub async fn handover_history(&self, shift_id: &str) -> Result<Vec<CashHandover>, ApiError> {
        let list: HandoverList = self
            .api
            .get(&format!("/shifts/{shift_id}/handovers"))
            .await?;
        Ok(list.into_vec())
    }

    pub async fn cancel_handover(&self, handover_id: &str) -> Result<(), ApiError> {
        self.api
            .post_unit(&format!("/cash-handovers/{handover_id}/cancel"), &empty_body())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::models::handover::HandoverType;
    use crate::testing::FakeBackend;
    use serde_json::json;

    #[tokio::test]
    async fn handover_history_unwraps_envelope() {
        let backend = FakeBackend::new();
        backend.on(
            Method::GET,
            "/shifts/s1/handovers",
            Ok(json!({"handovers": [{"id": "h1", "status": "CONFIRMED"}], "count": 1})),
        );
        backend.on(
            Method::GET,
            "/shifts/s2/handovers",
            Ok(json!({"handovers": null, "count": 0})),
        );

        let service = ShiftService::new(backend.client());
        assert_eq!(service.handover_history("s1").await.unwrap().len(), 1);
        assert!(service.handover_history("s2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_and_handover_bodies() {
        let backend = FakeBackend::new();
        backend.on(Method::POST, "/shifts/s1/end", Ok(json!({"id": "s1", "status": "CLOSED"})));
        backend.on(Method::POST, "/shifts/s1/handover", Ok(json!({"id": "h1"})));

        let service = ShiftService::new(backend.client());
        let shift = service.end_shift("s1", 120_000.0).await.unwrap();
        assert!(!shift.is_open());
        assert_eq!(
            backend.last_body(Method::POST, "/shifts/s1/end"),
            Some(json!({"end_cash": 120000.0}))
        );

        let request = CreateHandoverRequest::new(HandoverType::Partial, 50_000.0).with_notes("tiền lẻ");
        service.create_handover("s1", &request).await.unwrap();
        let body = backend.last_body(Method::POST, "/shifts/s1/handover").unwrap();
        assert_eq!(body["type"], "PARTIAL");
        assert_eq!(body["requested_amount"], 50000.0);
        assert_eq!(body["waiter_notes"], "tiền lẻ");
    }
}
