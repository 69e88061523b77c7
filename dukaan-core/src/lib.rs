//! Dukaan engine
//!
//! A local-first shop/order tracking engine for a single operator
//! managing one or more shop locations, matched by GPS proximity. All
//! state persists in an embedded key/value store; a presentation layer
//! drives the engine through [`Session`] and renders what it returns.
//!
//! # Components
//!
//! - [`geo`]: great-circle distance and proximity matching
//! - [`storage`]: redb-backed persistence gateway
//! - [`stats`]: order aggregation (shop totals, daily summaries)
//! - [`location`]: platform location provider abstraction
//! - [`session`]: working state and operation orchestration

pub mod config;
pub mod geo;
pub mod location;
pub mod logger;
pub mod session;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use location::{LocationError, LocationProvider, LocationRequest};
pub use session::{LocationCapture, Session};
pub use storage::{Storage, StorageError};
