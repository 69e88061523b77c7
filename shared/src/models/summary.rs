//! Derived summary types
//!
//! Outputs of the domain aggregator and geospatial matcher, consumed by
//! the presentation layer.

use crate::models::{Order, Shop};
use serde::{Deserialize, Serialize};

/// Per-shop rollup over its full order history
///
/// Status-agnostic: cancelled orders still count toward shop totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShopSummary {
    pub order_count: usize,
    pub total_value: f64,
}

/// One row of the daily per-item rollup
///
/// `name` and `price` are retained from the first occurrence of the item
/// (case-insensitive) encountered on the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemAggregate {
    pub name: String,
    pub quantity: f64,
    /// Unit price from the first occurrence
    pub price: f64,
    pub total_value: f64,
}

/// Aggregate statistics over non-cancelled orders created on one calendar day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub daily_total: f64,
    pub order_count: usize,
    /// sum of quantity across all aggregated items
    pub total_items_count: f64,
    /// Sorted descending by total value
    pub items: Vec<ItemAggregate>,
}

/// A shop within range of a queried point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyShop {
    pub shop: Shop,
    pub distance_meters: f64,
}

/// A shop paired with its order history rollup (previous-shops listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOverview {
    pub shop: Shop,
    pub summary: ShopSummary,
}

/// Everything the dashboard screen renders for the current shop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub shop: Shop,
    /// The shop's orders, newest first
    pub orders: Vec<Order>,
    pub summary: ShopSummary,
    pub daily: DailySummary,
}
