//! # Sales Analytics Engine
//!
//! This crate answers descriptive-statistics and cross-entity join questions
//! over the sales ledger: averages, sample standard deviations, outlier
//! thresholds, revenue aggregation, and day-of-week distributions.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O; an
//!   external loader populates the repositories before an analyst exists.
//! - **Stateless Reads:** The `SalesAnalyst` caches nothing. Every call
//!   recomputes from the current repository contents, so callers may mutate
//!   the shared stores between calls and observe the change immediately.
//! - **Fixed-Point Throughout:** Prices and derived statistics are
//!   `rust_decimal::Decimal`; binary floating point never enters an
//!   aggregation path.
//!
//! ## Public API
//!
//! - `SalesAnalyst`: the aggregation engine over the six shared repositories.
//! - `stats`: the decimal mean / standard-deviation / rounding helpers.

// Declare the modules that constitute this crate.
pub mod analyst;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use analyst::{SalesAnalyst, DEFAULT_TOP_EARNERS};
