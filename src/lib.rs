//! Deterministic 48-month cost, savings and ROI projection for automation
//! business cases.
//!
//! [`core`] holds the pure engine; [`api`], [`cli`] and [`telemetry`] host it.

pub mod api;
pub mod cli;
pub mod core;
pub mod telemetry;
