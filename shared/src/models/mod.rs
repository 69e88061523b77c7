//! Domain models

pub mod order;
pub mod shop;
pub mod summary;

pub use order::{Order, OrderItem, OrderStatus};
pub use shop::Shop;
pub use summary::{Dashboard, DailySummary, ItemAggregate, NearbyShop, ShopOverview, ShopSummary};
