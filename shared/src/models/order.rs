//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status
///
/// Defaults to `Pending` when absent from a stored payload. Transitions
/// are one-way: `pending -> delivered` or `pending -> cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Wire-format name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Order line item
///
/// Immutable after the order is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub name: String,
    pub quantity: f64,
    /// Unit price in currency units
    pub price: f64,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// quantity x unit price
    pub fn line_total(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Order entity
///
/// A timestamped purchase record tied to one shop. Items are immutable
/// after save; `total_value` is derived once at creation and never
/// recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque unique identifier
    pub id: String,
    /// Foreign key referencing a [`Shop`](crate::models::Shop)
    pub shop_id: String,
    /// Shop name, denormalized at creation
    pub shop_name: String,
    pub items: Vec<OrderItem>,
    /// sum(quantity x price) over items, fixed at save time
    pub total_value: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Set only on the pending -> delivered transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// Set only on the pending -> cancelled transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = OrderItem::new("Tea", 2.0, 10.0);
        assert_eq!(item.line_total(), 20.0);
    }

    #[test]
    fn test_status_defaults_to_pending_when_absent() {
        // Legacy payloads written before the status field existed
        let json = r#"{
            "id": "o1",
            "shopId": "s1",
            "shopName": "Chai Point",
            "items": [{"name": "Tea", "quantity": 1, "price": 10}],
            "totalValue": 10,
            "createdAt": "2026-03-01T08:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.delivered_at.is_none());
        assert!(order.cancelled_at.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
