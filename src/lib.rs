#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records income and expense entries and keeps the running
//! totals, the net budget, and each expense's share of income up to date.

pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod ledger;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Tracker tracing initialized.");
    });
}
