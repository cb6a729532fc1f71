//! Shared types and models for HarvestGuard
//!
//! This crate contains the domain model and the pure advisory algorithms
//! (forecast classification, synthetic forecasts, spoilage risk) shared
//! between the backend service and the browser toolkit (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
