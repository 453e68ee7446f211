#![doc(test(attr(deny(warnings))))]

//! Costing Core offers the costing and financial-aggregation engine for
//! small multi-tenant organizations: tenant visibility resolution,
//! labor-rate override resolution, recipe unit-cost computation, and
//! year-over-year dashboard rollups.

pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;
pub mod workspace;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Costing Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
