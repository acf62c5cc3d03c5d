//! Shared test fixtures for DutyRoster crates.
//!
//! This crate depends on `dutyroster-core` only, so every other crate can
//! pull it in as a dev-dependency without cycles.
//!
//! - [`fixtures`] - dates, rosters and horizons
//! - [`random`] - seeded random rosters and admin constraints
//! - [`checks`] - assertions for the scheduling properties
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! dutyroster-test = { workspace = true }
//! ```
//!
//! ```
//! use dutyroster_test::fixtures::{date, roster};
//!
//! let employees = roster(4);
//! assert_eq!(employees.len(), 4);
//! assert_eq!(date(2025, 1, 1).to_string(), "2025-01-01");
//! ```

pub mod checks;
pub mod fixtures;
pub mod random;
