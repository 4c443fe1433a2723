#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger ties the ledger engine to configuration and durable storage.
//!
//! The heavy lifting lives in the workspace crates; this crate wires them
//! together behind [`LedgerSession`] and installs logging.

pub mod build_info;
pub mod errors;
pub mod logging;
pub mod report;
pub mod session;

pub use errors::{PocketError, Result};
pub use session::LedgerSession;

pub use pocket_config as config;
pub use pocket_core as engine;
pub use pocket_domain as domain;
pub use pocket_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with_filter(None);
}

/// Like [`init`], adding `directive` (typically the configured `log_filter`).
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        logging::init_tracing(directive);
        tracing::info!(version = build_info::VERSION, "Pocket Ledger tracing initialized.");
    });
}
