#![doc(test(attr(deny(warnings))))]

//! Aether Ledger keeps a personal money ledger: income and expense
//! transactions, informal debts, and a stored card profile. The core computes
//! dashboard totals, spending analytics, filtered feeds, and reconciled
//! statements; the bundled CLI is a thin presentation layer on top.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Aether Ledger tracing initialized.");
    });
}
