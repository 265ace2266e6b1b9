//! critmetrics - evaluation-criteria metrics per entity
//!
//! Aggregates criteria and enrollment counts from a relational store, merges
//! them into one row per entity, and serves filtered, sorted and exported
//! views of the result.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod export;
pub mod merge;
pub mod observability;
pub mod selection;
pub mod source;

pub use dashboard::Dashboard;
pub use errors::{DashboardError, DashboardResult};
