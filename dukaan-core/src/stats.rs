//! Domain aggregator
//!
//! Pure derivations over the order collection:
//! - per-shop totals over the full order history
//! - daily summaries with per-item rollups
//!
//! No hidden state; every function is a deterministic fold over its
//! inputs.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::{DailySummary, ItemAggregate, Order, OrderStatus, Shop, ShopOverview, ShopSummary};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Orders belonging to one shop, collection order preserved
pub fn shop_orders<'a>(orders: &'a [Order], shop_id: &str) -> Vec<&'a Order> {
    orders.iter().filter(|o| o.shop_id == shop_id).collect()
}

/// Count and total value over a set of orders
///
/// Status-agnostic: cancelled orders still count toward shop totals.
/// The fold is commutative; input order does not matter.
pub fn shop_summary<'a, I>(orders: I) -> ShopSummary
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut summary = ShopSummary::default();
    for order in orders {
        summary.order_count += 1;
        summary.total_value += order.total_value;
    }
    summary
}

/// Aggregate statistics for the calendar day of `reference` in `tz`
///
/// Filters to orders created on that day whose status is not cancelled,
/// then totals them and rolls items up case-insensitively by name.
/// Display name and unit price come from the first occurrence; rows
/// accumulate in first-encounter order and are then stable-sorted
/// descending by total value.
pub fn daily_summary<'a, I>(orders: I, reference: DateTime<Utc>, tz: Tz) -> DailySummary
where
    I: IntoIterator<Item = &'a Order>,
{
    let day = reference.with_timezone(&tz).date_naive();
    let todays: Vec<&Order> = orders
        .into_iter()
        .filter(|o| {
            o.status != OrderStatus::Cancelled && o.created_at.with_timezone(&tz).date_naive() == day
        })
        .collect();

    let daily_total = todays.iter().map(|o| o.total_value).sum();

    let mut items: Vec<ItemAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for order in &todays {
        for item in &order.items {
            let key = item.name.to_lowercase();
            match index.get(&key) {
                Some(&i) => {
                    items[i].quantity += item.quantity;
                    items[i].total_value += item.line_total();
                }
                None => {
                    index.insert(key, items.len());
                    items.push(ItemAggregate {
                        name: item.name.clone(),
                        quantity: item.quantity,
                        price: item.price,
                        total_value: item.line_total(),
                    });
                }
            }
        }
    }
    items.sort_by(|a, b| {
        b.total_value
            .partial_cmp(&a.total_value)
            .unwrap_or(Ordering::Equal)
    });

    let total_items_count = items.iter().map(|i| i.quantity).sum();

    DailySummary {
        daily_total,
        order_count: todays.len(),
        total_items_count,
        items,
    }
}

/// Every shop paired with its order-history rollup, newest-registered first
pub fn shop_overviews(shops: &[Shop], orders: &[Order]) -> Vec<ShopOverview> {
    let mut overviews: Vec<ShopOverview> = shops
        .iter()
        .map(|shop| ShopOverview {
            summary: shop_summary(shop_orders(orders, &shop.id)),
            shop: shop.clone(),
        })
        .collect();
    overviews.sort_by(|a, b| b.shop.created_at.cmp(&a.shop.created_at));
    overviews
}

/// Orders sorted newest first (dashboard listing)
pub fn recent_first<'a, I>(orders: I) -> Vec<&'a Order>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut sorted: Vec<&Order> = orders.into_iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::OrderItem;
    use shared::util::new_id;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    fn order_at(shop_id: &str, created_at: DateTime<Utc>, items: Vec<OrderItem>) -> Order {
        let total_value = items.iter().map(OrderItem::line_total).sum();
        Order {
            id: new_id(),
            shop_id: shop_id.to_string(),
            shop_name: "Chai Point".to_string(),
            items,
            total_value,
            status: OrderStatus::Pending,
            created_at,
            delivered_at: None,
            cancelled_at: None,
        }
    }

    fn morning() -> DateTime<Utc> {
        // 2026-03-01 09:00 IST
        TZ.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_shop_orders_preserves_order() {
        let orders = vec![
            order_at("s1", morning(), vec![OrderItem::new("Tea", 1.0, 10.0)]),
            order_at("s2", morning(), vec![OrderItem::new("Tea", 1.0, 10.0)]),
            order_at("s1", morning(), vec![OrderItem::new("Coffee", 1.0, 20.0)]),
        ];
        let mine = shop_orders(&orders, "s1");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, orders[0].id);
        assert_eq!(mine[1].id, orders[2].id);
    }

    #[test]
    fn test_shop_summary_commutative() {
        let a = order_at("s1", morning(), vec![OrderItem::new("Tea", 2.0, 10.0)]);
        let b = order_at("s1", morning(), vec![OrderItem::new("Coffee", 1.0, 20.0)]);

        let forward = shop_summary([&a, &b]);
        let backward = shop_summary([&b, &a]);
        assert_eq!(forward, backward);
        assert_eq!(forward.order_count, 2);
        assert_eq!(forward.total_value, 40.0);
    }

    #[test]
    fn test_shop_summary_includes_cancelled() {
        let mut cancelled = order_at("s1", morning(), vec![OrderItem::new("Tea", 1.0, 10.0)]);
        cancelled.status = OrderStatus::Cancelled;
        let pending = order_at("s1", morning(), vec![OrderItem::new("Tea", 1.0, 10.0)]);

        let summary = shop_summary([&cancelled, &pending]);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.total_value, 20.0);
    }

    #[test]
    fn test_daily_summary_excludes_cancelled_and_other_days() {
        let today = order_at("s1", morning(), vec![OrderItem::new("Tea", 2.0, 10.0)]);
        let mut cancelled = order_at("s1", morning(), vec![OrderItem::new("Tea", 5.0, 10.0)]);
        cancelled.status = OrderStatus::Cancelled;
        let yesterday = order_at(
            "s1",
            morning() - chrono::Duration::days(1),
            vec![OrderItem::new("Tea", 3.0, 10.0)],
        );

        let summary = daily_summary([&today, &cancelled, &yesterday], morning(), TZ);
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.daily_total, 20.0);
        assert_eq!(summary.total_items_count, 2.0);
    }

    #[test]
    fn test_daily_summary_day_boundary_is_local() {
        // 2026-03-01 01:30 IST is still 2026-02-28 in UTC
        let early = TZ
            .with_ymd_and_hms(2026, 3, 1, 1, 30, 0)
            .unwrap()
            .with_timezone(&Utc);
        let order = order_at("s1", early, vec![OrderItem::new("Tea", 1.0, 10.0)]);

        let summary = daily_summary([&order], morning(), TZ);
        assert_eq!(summary.order_count, 1);
    }

    #[test]
    fn test_daily_summary_merges_items_case_insensitively() {
        let a = order_at("s1", morning(), vec![OrderItem::new("Tea", 2.0, 10.0)]);
        let b = order_at(
            "s1",
            morning(),
            vec![
                OrderItem::new("tea", 1.0, 12.0),
                OrderItem::new("Coffee", 1.0, 20.0),
            ],
        );

        let summary = daily_summary([&a, &b], morning(), TZ);
        assert_eq!(summary.items.len(), 2);

        // Tea: 2x10 + 1x12 = 32 > Coffee: 20, so tea sorts first
        let tea = &summary.items[0];
        assert_eq!(tea.name, "Tea"); // display name from first occurrence
        assert_eq!(tea.quantity, 3.0);
        assert_eq!(tea.price, 10.0); // unit price from first occurrence
        assert_eq!(tea.total_value, 32.0);

        assert_eq!(summary.items[1].name, "Coffee");
        assert_eq!(summary.total_items_count, 4.0);
    }

    #[test]
    fn test_daily_summary_sorted_descending_by_value() {
        let order = order_at(
            "s1",
            morning(),
            vec![
                OrderItem::new("Samosa", 1.0, 15.0),
                OrderItem::new("Thali", 2.0, 120.0),
                OrderItem::new("Tea", 4.0, 10.0),
            ],
        );
        let summary = daily_summary([&order], morning(), TZ);
        let values: Vec<f64> = summary.items.iter().map(|i| i.total_value).collect();
        assert_eq!(values, vec![240.0, 40.0, 15.0]);
    }

    #[test]
    fn test_daily_summary_empty() {
        let summary = daily_summary([], morning(), TZ);
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.daily_total, 0.0);
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_shop_overviews_newest_first() {
        let older = Shop {
            id: "s1".to_string(),
            name: "Old Shop".to_string(),
            lat: 0.0,
            lng: 0.0,
            created_at: morning() - chrono::Duration::days(2),
        };
        let newer = Shop {
            id: "s2".to_string(),
            name: "New Shop".to_string(),
            lat: 0.0,
            lng: 0.0,
            created_at: morning(),
        };
        let orders = vec![order_at("s1", morning(), vec![OrderItem::new("Tea", 1.0, 10.0)])];

        let overviews = shop_overviews(&[older, newer], &orders);
        assert_eq!(overviews[0].shop.id, "s2");
        assert_eq!(overviews[0].summary.order_count, 0);
        assert_eq!(overviews[1].shop.id, "s1");
        assert_eq!(overviews[1].summary.total_value, 10.0);
    }

    #[test]
    fn test_recent_first() {
        let old = order_at(
            "s1",
            morning() - chrono::Duration::hours(3),
            vec![OrderItem::new("Tea", 1.0, 10.0)],
        );
        let new = order_at("s1", morning(), vec![OrderItem::new("Tea", 1.0, 10.0)]);

        let sorted = recent_first([&old, &new]);
        assert_eq!(sorted[0].id, new.id);
        assert_eq!(sorted[1].id, old.id);
    }
}
