//! Geospatial matcher
//!
//! Great-circle distance via the Haversine formula and proximity
//! filtering of the shop collection.

use shared::models::{NearbyShop, Shop};
use shared::types::Point;
use std::cmp::Ordering;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters
///
/// Pure and symmetric in its arguments. Antipodal and pole-adjacent
/// inputs are mathematically valid but not specially handled.
pub fn distance_meters(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Shops within `radius_meters` of `point`, closest first
///
/// The sort is stable: ties keep the collection order. Empty input or
/// no matches yields an empty vec, not an error. A radius of 0 matches
/// only shops at the exact coordinate, subject to floating-point
/// precision; do not rely on it as exact-match logic.
pub fn find_nearby(point: Point, shops: &[Shop], radius_meters: f64) -> Vec<NearbyShop> {
    let mut matches: Vec<NearbyShop> = shops
        .iter()
        .filter_map(|shop| {
            let distance = distance_meters(point, shop.point());
            (distance <= radius_meters).then(|| NearbyShop {
                shop: shop.clone(),
                distance_meters: distance,
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        a.distance_meters
            .partial_cmp(&b.distance_meters)
            .unwrap_or(Ordering::Equal)
    });
    matches
}

/// Human-readable distance: `"340m away"` below 1 km, `"1.2km away"` above
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m away", meters.round() as i64)
    } else {
        format!("{:.1}km away", meters / 1000.0)
    }
}
