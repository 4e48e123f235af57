//! Orders, order lines and the payloads for payment, edits and refunds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Created,
    Paid,
    InProgress,
    Ready,
    Served,
    Cancelled,
    Locked,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Qr,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub table_id: Option<String>,
    pub waiter_id: String,
    pub waiter_name: String,
    pub shift_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub amount_paid: f64,
    pub amount_due: f64,
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>,
    pub collector_name: Option<String>,
    pub note: String,
    pub cancel_reason: Option<String>,
    pub refund_amount: Option<f64>,
    pub refund_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CreateOrderRequest {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub table_id: Option<String>,
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub payment_method: PaymentMethod,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditOrderRequest {
    pub items: Vec<OrderItem>,
    pub discount: f64,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub note: String,
}

/// Editing a paid order may produce a refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditOrderResponse {
    pub order: Option<Order>,
    pub refund_amount: Option<f64>,
    pub refund_reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    pub amount: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}
