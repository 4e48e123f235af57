//! Barista queue: orders waiting at the bar and the ones this barista took.

use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages;
use crate::models::order::{Order, OrderStatus};
use crate::services::BaristaService;

use super::record;

/// Bar queue and the orders this barista has taken.
pub struct BaristaStore {
    service: BaristaService,
    queued_orders: Vec<Order>,
    my_orders: Vec<Order>,
    current_order: Option<Order>,
    loading: bool,
    error: Option<String>,
}

impl BaristaStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: BaristaService::new(api),
            queued_orders: Vec::new(),
            my_orders: Vec::new(),
            current_order: None,
            loading: false,
            error: None,
        }
    }

    pub fn queued_orders(&self) -> &[Order] {
        &self.queued_orders
    }

    pub fn my_orders(&self) -> &[Order] {
        &self.my_orders
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn mine_with(&self, status: OrderStatus) -> impl Iterator<Item = &Order> {
        self.my_orders.iter().filter(move |o| o.status == status)
    }

    pub fn in_progress_orders(&self) -> Vec<&Order> {
        self.mine_with(OrderStatus::InProgress).collect()
    }

    pub fn ready_orders(&self) -> Vec<&Order> {
        self.mine_with(OrderStatus::Ready).collect()
    }

    pub fn served_orders(&self) -> Vec<&Order> {
        self.mine_with(OrderStatus::Served).collect()
    }

    pub fn queue_count(&self) -> usize {
        self.queued_orders.len()
    }

    pub fn in_progress_count(&self) -> usize {
        self.mine_with(OrderStatus::InProgress).count()
    }

    pub fn ready_count(&self) -> usize {
        self.mine_with(OrderStatus::Ready).count()
    }

    pub fn served_count(&self) -> usize {
        self.mine_with(OrderStatus::Served).count()
    }

    pub async fn fetch_queued_orders(&mut self) -> Result<&[Order], ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.queue().await;
        self.loading = false;
        match result {
            Ok(orders) => {
                self.queued_orders = orders;
                Ok(&self.queued_orders)
            }
            Err(err) => {
                self.queued_orders.clear();
                Err(record(&mut self.error, err, messages::QUEUE_LOAD))
            }
        }
    }

    pub async fn fetch_my_orders(&mut self) -> Result<&[Order], ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.service.mine().await;
        self.loading = false;
        match result {
            Ok(orders) => {
                self.my_orders = orders;
                Ok(&self.my_orders)
            }
            Err(err) => {
                self.my_orders.clear();
                Err(record(&mut self.error, err, messages::ORDERS_LOAD))
            }
        }
    }

    /// Takes an order off the queue and onto this barista's list.
    pub async fn accept_order(&mut self, id: &str) -> Result<Order, ApiError> {
        self.error = None;
        match self.service.accept(id).await {
            Ok(order) => {
                info!(order_id = id, "order accepted");
                self.queued_orders.retain(|o| o.id != id);
                self.my_orders.retain(|o| o.id != order.id);
                self.my_orders.insert(0, order.clone());
                Ok(order)
            }
            Err(err) => Err(record(&mut self.error, err, messages::ORDER_ACCEPT)),
        }
    }

    pub async fn mark_ready(&mut self, id: &str) -> Result<Order, ApiError> {
        self.error = None;
        match self.service.mark_ready(id).await {
            Ok(order) => {
                if let Some(existing) = self.my_orders.iter_mut().find(|o| o.id == id) {
                    *existing = order.clone();
                }
                Ok(order)
            }
            Err(err) => Err(record(&mut self.error, err, messages::ORDER_READY)),
        }
    }

    pub async fn fetch_order(&mut self, id: &str) -> Result<&Order, ApiError> {
        self.error = None;
        match self.service.get(id).await {
            Ok(order) => Ok(self.current_order.insert(order)),
            Err(err) => Err(record(&mut self.error, err, messages::ORDER_LOAD)),
        }
    }

    pub fn clear_current_order(&mut self) {
        self.current_order = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.queued_orders.clear();
        self.my_orders.clear();
        self.current_order = None;
        self.loading = false;
        self.error = None;
    }
}
