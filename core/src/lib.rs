//! shopsim-core — seeded e-commerce dataset synthesis and analytics.
//!
//! The crate has three moving parts, wired one way:
//!
//!   DatasetGenerator ──writes──▶ SqlStore ──reads──▶ AnalyticsEngine
//!
//! The generator populates the four entity tables (customers, products,
//! orders, order items) from a validated configuration and a master seed;
//! the analytics engine answers the six canonical reporting queries over
//! the finished dataset. Nothing mutates data after generation completes
//! except the one-time finalization of each order's total, which happens
//! inside the generation run itself.
//!
//! RULE: Only the store modules talk to SQLite. Generator, engine and
//! reporter call store methods — they never execute SQL directly.

pub mod analytics;
pub mod config;
pub mod error;
pub mod generator;
pub mod report;
pub mod rng;
pub mod store;
pub mod types;

pub use analytics::AnalyticsEngine;
pub use config::GenConfig;
pub use error::{DataError, DataResult};
pub use generator::DatasetGenerator;
pub use store::SqlStore;
