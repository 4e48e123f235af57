//! Orders from the waiter/cashier side and the barista queue.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::order::{
    CancelRequest, CreateOrderRequest, EditOrderRequest, EditOrderResponse, Order, PaymentRequest,
    RefundRequest,
};

use super::{empty_body, CrudMessages, Endpoints, Resource};

impl Resource for Order {
    const NAME: &'static str = "order";
    const ENDPOINTS: Endpoints = Endpoints::uniform("/waiter/orders");
    const MESSAGES: CrudMessages = messages::ORDERS;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.api.post("/waiter/orders", request).await
    }

    pub async fn collect_payment(
        &self,
        id: &str,
        payment: &PaymentRequest,
    ) -> Result<Order, ApiError> {
        self.api
            .post(&format!("/waiter/orders/{id}/payment"), payment)
            .await
    }

    /// Edits a paid order; the response carries any refund owed.
    pub async fn edit(
        &self,
        id: &str,
        request: &EditOrderRequest,
    ) -> Result<EditOrderResponse, ApiError> {
        self.api
            .put(&format!("/waiter/orders/{id}/edit"), request)
            .await
    }

    pub async fn send_to_bar(&self, id: &str) -> Result<Order, ApiError> {
        self.api
            .post(&format!("/waiter/orders/{id}/send"), &empty_body())
            .await
    }

    pub async fn serve(&self, id: &str) -> Result<Order, ApiError> {
        self.api
            .post(&format!("/waiter/orders/{id}/serve"), &empty_body())
            .await
    }

    pub async fn cancel(&self, id: &str, reason: &str) -> Result<Order, ApiError> {
        let request = CancelRequest {
            reason: reason.to_string(),
        };
        self.api
            .post(&format!("/cashier/orders/{id}/cancel"), &request)
            .await
    }

    pub async fn refund_partial(
        &self,
        id: &str,
        amount: f64,
        reason: &str,
    ) -> Result<Order, ApiError> {
        let request = RefundRequest {
            amount,
            reason: reason.to_string(),
        };
        self.api
            .post(&format!("/cashier/orders/{id}/refund"), &request)
            .await
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get_list("/waiter/orders").await
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get_list("/cashier/orders").await
    }

    pub async fn get(&self, id: &str) -> Result<Order, ApiError> {
        self.api.get(&format!("/waiter/orders/{id}")).await
    }
}

#[derive(Clone)]
pub struct BaristaService {
    api: ApiClient,
}

impl BaristaService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn queue(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get_list("/barista/orders/queue").await
    }

    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get_list("/barista/orders/my").await
    }

    pub async fn accept(&self, id: &str) -> Result<Order, ApiError> {
        self.api
            .post(&format!("/barista/orders/{id}/accept"), &empty_body())
            .await
    }

    pub async fn mark_ready(&self, id: &str) -> Result<Order, ApiError> {
        self.api
            .post(&format!("/barista/orders/{id}/ready"), &empty_body())
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Order, ApiError> {
        self.api.get(&format!("/barista/orders/{id}")).await
    }
}
