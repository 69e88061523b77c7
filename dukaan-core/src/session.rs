//! Session controller
//!
//! Owns the working state (captured location, selected shop, both
//! collections) and orchestrates the matcher, gateway, and aggregator.
//! Single-writer discipline: one call at a time, no interior locking.
//! Persistence writes are synchronous write-throughs.

use crate::config::Config;
use crate::geo;
use crate::location::{LocationError, LocationProvider};
use crate::stats;
use crate::storage::{ORDERS_KEY, SHOPS_KEY, Storage};
use chrono::Utc;
use shared::error::{AppError, AppResult};
use shared::models::{Dashboard, NearbyShop, Order, OrderItem, OrderStatus, Shop, ShopOverview};
use shared::types::Point;
use shared::util::new_id;

/// Result of a successful location capture
///
/// The presentation layer decides what to do with it: show the matches,
/// or prompt shop registration when `nearby` is empty.
#[derive(Debug, Clone)]
pub struct LocationCapture {
    pub point: Point,
    pub nearby: Vec<NearbyShop>,
}

/// In-memory working state plus the persistence handle
pub struct Session {
    config: Config,
    storage: Storage,
    current_location: Option<Point>,
    current_shop_id: Option<String>,
    shops: Vec<Shop>,
    orders: Vec<Order>,
}

impl Session {
    /// Load both collections through the gateway and start a session
    pub fn load(storage: Storage, config: Config) -> AppResult<Self> {
        let data = storage.load_app_data()?;
        tracing::info!(
            shops = data.shops.len(),
            orders = data.orders.len(),
            "session loaded"
        );
        Ok(Self {
            config,
            storage,
            current_location: None,
            current_shop_id: None,
            shops: data.shops,
            orders: data.orders,
        })
    }

    // ========== Location ==========

    /// Capture a fresh location fix and resolve nearby shops
    ///
    /// The sole suspending operation: awaits the provider under the
    /// configured timeout, stores the fix, and matches the shop
    /// collection against it. On failure `current_location` is left
    /// unchanged.
    pub async fn capture_location(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> AppResult<LocationCapture> {
        let request = self.config.location_request();
        let position = match tokio::time::timeout(
            request.timeout,
            provider.current_position(&request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        };

        let point = position.inspect_err(|e| {
            tracing::warn!(class = e.class(), "location capture failed");
        })?;

        self.current_location = Some(point);
        let nearby = geo::find_nearby(point, &self.shops, self.config.nearby_radius_m);
        tracing::info!(
            lat = point.lat,
            lng = point.lng,
            nearby = nearby.len(),
            "location captured"
        );
        Ok(LocationCapture { point, nearby })
    }

    // ========== Shops ==========

    /// Register a new shop at the captured location and make it current
    pub fn register_shop(&mut self, name: &str) -> AppResult<Shop> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("shop name is required"));
        }
        let location = self
            .current_location
            .ok_or_else(|| AppError::validation("no location captured"))?;

        let shop = Shop {
            id: new_id(),
            name: name.to_string(),
            lat: location.lat,
            lng: location.lng,
            created_at: Utc::now(),
        };
        self.shops.push(shop.clone());
        self.storage.save(SHOPS_KEY, &self.shops)?;
        self.current_shop_id = Some(shop.id.clone());
        tracing::info!(shop_id = %shop.id, name = %shop.name, "shop registered");
        Ok(shop)
    }

    /// Select an existing shop, adopting its coordinate as current
    pub fn select_shop(&mut self, shop_id: &str) -> AppResult<Shop> {
        let shop = self
            .shops
            .iter()
            .find(|s| s.id == shop_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("shop"))?;
        self.current_shop_id = Some(shop.id.clone());
        self.current_location = Some(shop.point());
        tracing::info!(shop_id = %shop.id, "shop selected");
        Ok(shop)
    }

    /// Clear the current shop and location (back to the welcome state)
    pub fn change_shop(&mut self) {
        self.current_shop_id = None;
        self.current_location = None;
        tracing::debug!("current shop cleared");
    }

    // ========== Orders ==========

    /// Save a new order for the current shop
    ///
    /// Items are immutable after save; the total is computed here and
    /// never recomputed. Validation failures leave both collections
    /// untouched.
    pub fn save_order(&mut self, items: Vec<OrderItem>) -> AppResult<Order> {
        let shop = self
            .current_shop()
            .cloned()
            .ok_or_else(|| AppError::validation("no shop selected"))?;
        if items.is_empty() {
            return Err(AppError::validation("order has no items"));
        }

        let mut normalized = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let item_name = item.name.trim();
            if item_name.is_empty() {
                return Err(
                    AppError::validation("item name is required").with_detail("index", index)
                );
            }
            if item.quantity <= 0.0 || item.price <= 0.0 {
                return Err(
                    AppError::validation("item quantity and price must be positive")
                        .with_detail("index", index),
                );
            }
            normalized.push(OrderItem::new(item_name, item.quantity, item.price));
        }

        let total_value = normalized.iter().map(OrderItem::line_total).sum();
        let order = Order {
            id: new_id(),
            shop_id: shop.id,
            shop_name: shop.name,
            items: normalized,
            total_value,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            delivered_at: None,
            cancelled_at: None,
        };
        self.orders.push(order.clone());
        self.storage.save(ORDERS_KEY, &self.orders)?;
        tracing::info!(order_id = %order.id, total_value, "order saved");
        Ok(order)
    }

    /// One-way status transition: pending -> delivered or cancelled
    ///
    /// An unknown id is a no-op, not an error. Transitioning an order
    /// that already left `Pending` is rejected.
    pub fn set_order_status(&mut self, order_id: &str, status: OrderStatus) -> AppResult<()> {
        if status == OrderStatus::Pending {
            return Err(AppError::validation("orders cannot return to pending"));
        }
        let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) else {
            tracing::warn!(order_id = %order_id, "status change for unknown order ignored");
            return Ok(());
        };
        if order.status != OrderStatus::Pending {
            return Err(AppError::validation("order status is already final")
                .with_detail("status", order.status.as_str()));
        }

        let now = Utc::now();
        order.status = status;
        match status {
            OrderStatus::Delivered => order.delivered_at = Some(now),
            OrderStatus::Cancelled => order.cancelled_at = Some(now),
            OrderStatus::Pending => unreachable!("rejected above"),
        }
        self.storage.save(ORDERS_KEY, &self.orders)?;
        tracing::info!(order_id = %order_id, ?status, "order status updated");
        Ok(())
    }

    /// Remove an order by id, regardless of status
    ///
    /// An unknown id is a no-op.
    pub fn delete_order(&mut self, order_id: &str) -> AppResult<()> {
        let Some(index) = self.orders.iter().position(|o| o.id == order_id) else {
            tracing::debug!(order_id = %order_id, "delete for unknown order ignored");
            return Ok(());
        };
        self.orders.remove(index);
        self.storage.save(ORDERS_KEY, &self.orders)?;
        tracing::info!(order_id = %order_id, "order deleted");
        Ok(())
    }

    // ========== Read Accessors ==========

    pub fn current_location(&self) -> Option<Point> {
        self.current_location
    }

    pub fn current_shop(&self) -> Option<&Shop> {
        let id = self.current_shop_id.as_deref()?;
        self.shops.iter().find(|s| s.id == id)
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// All registered shops with their rollups, newest first
    pub fn shop_overviews(&self) -> Vec<ShopOverview> {
        stats::shop_overviews(&self.shops, &self.orders)
    }

    /// Everything the dashboard renders for the current shop
    ///
    /// `None` when no shop is selected. The daily summary covers the
    /// current calendar day in the configured timezone.
    pub fn dashboard(&self) -> Option<Dashboard> {
        let shop = self.current_shop()?.clone();
        let shop_orders = stats::shop_orders(&self.orders, &shop.id);
        let summary = stats::shop_summary(shop_orders.iter().copied());
        let daily = stats::daily_summary(
            shop_orders.iter().copied(),
            Utc::now(),
            self.config.timezone,
        );
        let orders = stats::recent_first(shop_orders)
            .into_iter()
            .cloned()
            .collect();
        Some(Dashboard {
            shop,
            orders,
            summary,
            daily,
        })
    }
}
