//! Shop Model

use crate::types::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shop entity
///
/// A registered physical location with a name and fixed coordinate.
/// Created once via registration; never mutated or deleted thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    /// Opaque unique identifier, immutable
    pub id: String,
    pub name: String,
    /// Latitude in WGS-84 decimal degrees
    pub lat: f64,
    /// Longitude in WGS-84 decimal degrees
    pub lng: f64,
    pub created_at: DateTime<Utc>,
}

impl Shop {
    /// The shop's fixed coordinate
    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lng)
    }
}
