//! Waiter and cashier order lists with the selected order.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::order::{
    CreateOrderRequest, EditOrderRequest, EditOrderResponse, Order, OrderStatus, PaymentRequest,
};
use crate::services::OrderService;

use super::CrudStore;

/// Waiter/cashier order list plus the order currently open in the UI.
pub struct OrderStore {
    orders: CrudStore<Order>,
    service: OrderService,
    current_order: Option<Order>,
}

impl OrderStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            orders: CrudStore::new(api.clone()),
            service: OrderService::new(api),
            current_order: None,
        }
    }

    pub fn orders(&self) -> &[Order] {
        self.orders.items()
    }

    pub fn loading(&self) -> bool {
        self.orders.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.orders.error()
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders().iter().filter(|o| o.status == status).collect()
    }

    pub fn created_orders(&self) -> Vec<&Order> {
        self.orders_by_status(OrderStatus::Created)
    }

    pub fn paid_orders(&self) -> Vec<&Order> {
        self.orders_by_status(OrderStatus::Paid)
    }

    pub fn in_progress_orders(&self) -> Vec<&Order> {
        self.orders_by_status(OrderStatus::InProgress)
    }

    pub fn served_orders(&self) -> Vec<&Order> {
        self.orders_by_status(OrderStatus::Served)
    }

    /// The signed-in waiter's orders.
    pub async fn fetch_orders(&mut self) -> Result<&[Order], ApiError> {
        let request = self.service.my_orders();
        self.orders.load(request, messages::ORDERS_LOAD).await
    }

    /// Every order, cashier view.
    pub async fn fetch_all_orders(&mut self) -> Result<&[Order], ApiError> {
        let request = self.service.all_orders();
        self.orders.load(request, messages::ORDERS_LOAD).await
    }

    /// New orders go to the front of the list.
    pub async fn create_order(&mut self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.orders.clear_error();
        match self.service.create(request).await {
            Ok(order) => {
                self.orders.prepend(order.clone());
                Ok(order)
            }
            Err(err) => Err(self.orders.fail(err, messages::ORDER_CREATE)),
        }
    }

    pub async fn collect_payment(
        &mut self,
        id: &str,
        payment: &PaymentRequest,
    ) -> Result<Order, ApiError> {
        self.orders.clear_error();
        let result = self.service.collect_payment(id, payment).await;
        self.apply(result, messages::ORDER_PAYMENT)
    }

    pub async fn edit_order(
        &mut self,
        id: &str,
        request: &EditOrderRequest,
    ) -> Result<EditOrderResponse, ApiError> {
        self.orders.clear_error();
        match self.service.edit(id, request).await {
            Ok(response) => {
                if let Some(order) = response.order.clone() {
                    self.replace(order);
                }
                Ok(response)
            }
            Err(err) => Err(self.orders.fail(err, messages::ORDER_EDIT)),
        }
    }

    pub async fn send_to_bar(&mut self, id: &str) -> Result<Order, ApiError> {
        self.orders.clear_error();
        let result = self.service.send_to_bar(id).await;
        self.apply(result, messages::ORDER_SEND)
    }

    pub async fn serve_order(&mut self, id: &str) -> Result<Order, ApiError> {
        self.orders.clear_error();
        let result = self.service.serve(id).await;
        self.apply(result, messages::ORDER_SERVE)
    }

    pub async fn cancel_order(&mut self, id: &str, reason: &str) -> Result<Order, ApiError> {
        self.orders.clear_error();
        let result = self.service.cancel(id, reason).await;
        self.apply(result, messages::ORDER_CANCEL)
    }

    pub async fn refund_partial(
        &mut self,
        id: &str,
        amount: f64,
        reason: &str,
    ) -> Result<Order, ApiError> {
        self.orders.clear_error();
        let result = self.service.refund_partial(id, amount, reason).await;
        self.apply(result, messages::ORDER_REFUND)
    }

    pub async fn fetch_order(&mut self, id: &str) -> Result<&Order, ApiError> {
        self.orders.clear_error();
        match self.service.get(id).await {
            Ok(order) => Ok(self.current_order.insert(order)),
            Err(err) => Err(self.orders.fail(err, messages::ORDER_LOAD)),
        }
    }

    fn apply(&mut self, result: Result<Order, ApiError>, fallback: &str) -> Result<Order, ApiError> {
        match result {
            Ok(order) => {
                self.replace(order.clone());
                Ok(order)
            }
            Err(err) => Err(self.orders.fail(err, fallback)),
        }
    }

    /// Keeps the selected order in step with the list.
    fn replace(&mut self, order: Order) {
        if let Some(current) = self.current_order.as_mut() {
            if current.id == order.id {
                *current = order.clone();
            }
        }
        self.orders.replace_local(order);
    }

    pub fn set_current_order(&mut self, order: Order) {
        self.current_order = Some(order);
    }

    pub fn clear_current_order(&mut self) {
        self.current_order = None;
    }

    pub fn clear_error(&mut self) {
        self.orders.clear_error();
    }

    pub fn reset(&mut self) {
        self.orders.reset();
        self.current_order = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::models::order::PaymentMethod;
    use crate::testing::{bad_request, server_error, FakeBackend};
    use serde_json::json;

    fn listing() -> serde_json::Value {
        json!([
            {"id": "o1", "status": "CREATED", "total": 45000},
            {"id": "o2", "status": "PAID", "total": 30000},
            {"id": "o3", "status": "SERVED", "total": 60000}
        ])
    }

    #[tokio::test]
    async fn status_filters() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/cashier/orders", Ok(listing()));
        let mut store = OrderStore::new(backend.client());

        store.fetch_all_orders().await.unwrap();
        assert_eq!(store.created_orders().len(), 1);
        assert_eq!(store.paid_orders()[0].id, "o2");
        assert_eq!(store.served_orders().len(), 1);
        assert!(store.in_progress_orders().is_empty());
    }

    #[tokio::test]
    async fn new_order_is_listed_first() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/waiter/orders", Ok(listing()));
        backend.on(
            Method::POST,
            "/waiter/orders",
            Ok(json!({"id": "o4", "status": "CREATED", "customer_name": "Hà"})),
        );
        let mut store = OrderStore::new(backend.client());
        store.fetch_orders().await.unwrap();

        store
            .create_order(&CreateOrderRequest {
                customer_name: "Hà".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(store.orders()[0].id, "o4");
        assert_eq!(store.orders().len(), 4);
    }

    #[tokio::test]
    async fn payment_updates_list_and_selection() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/waiter/orders", Ok(listing()));
        backend.on(
            Method::POST,
            "/waiter/orders/o1/payment",
            Ok(json!({"id": "o1", "status": "PAID", "total": 45000, "amount_paid": 45000})),
        );
        let mut store = OrderStore::new(backend.client());
        store.fetch_orders().await.unwrap();
        let first = store.orders()[0].clone();
        store.set_current_order(first);

        let paid = store
            .collect_payment(
                "o1",
                &PaymentRequest {
                    payment_method: PaymentMethod::Cash,
                    amount: 45_000.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
        assert_eq!(store.paid_orders().len(), 2);
        assert_eq!(store.current_order().unwrap().amount_paid, 45_000.0);
    }

    #[tokio::test]
    async fn edit_keeps_refund_details() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/waiter/orders", Ok(listing()));
        backend.on(
            Method::PUT,
            "/waiter/orders/o2/edit",
            Ok(json!({
                "order": {"id": "o2", "status": "PAID", "total": 20000},
                "refund_amount": 10000,
                "message": "Order updated"
            })),
        );
        let mut store = OrderStore::new(backend.client());
        store.fetch_orders().await.unwrap();

        let response = store
            .edit_order("o2", &EditOrderRequest::default())
            .await
            .unwrap();
        assert_eq!(response.refund_amount, Some(10_000.0));
        assert_eq!(store.paid_orders()[0].total, 20_000.0);
    }

    #[tokio::test]
    async fn cancel_failure_keeps_order() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/waiter/orders", Ok(listing()));
        backend.on(
            Method::POST,
            "/cashier/orders/o3/cancel",
            Err(bad_request("cannot cancel served order")),
        );
        let mut store = OrderStore::new(backend.client());
        store.fetch_orders().await.unwrap();

        assert!(store.cancel_order("o3", "khách đổi ý").await.is_err());
        assert_eq!(store.served_orders().len(), 1);
        assert_eq!(store.error(), Some("cannot cancel served order"));
        assert_eq!(
            backend.last_body(Method::POST, "/cashier/orders/o3/cancel"),
            Some(json!({"reason": "khách đổi ý"}))
        );
    }

    #[tokio::test]
    async fn failed_load_uses_order_fallback() {
        let backend = FakeBackend::new();
        backend.on(Method::GET, "/waiter/orders", Err(server_error()));
        let mut store = OrderStore::new(backend.client());

        assert!(store.fetch_orders().await.is_err());
        assert_eq!(store.error(), Some(messages::ORDERS_LOAD));
        assert!(store.orders().is_empty());
    }
}
