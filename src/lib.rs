#![doc(test(attr(deny(warnings))))]

//! Donor Reports turns already-fetched donation history, health-indicator
//! samples and per-contact giving rows into chart-ready periods and
//! export-ready CSV grids for fundraising dashboards.

pub mod config;
pub mod currency;
pub mod errors;
pub mod report;
pub mod time;
pub mod utils;

pub use errors::{ReportError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Donor Reports tracing initialized.");
    });
}
