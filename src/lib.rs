#![doc(test(attr(deny(warnings))))]

//! Wizard Core provides a stepped form wizard with per-step validation
//! gating and a single asynchronous submission at the terminal step, plus
//! the event, league and team creation wizards built on top of it.

pub mod cli;
pub mod clock;
pub mod config;
pub mod currency;
pub mod errors;
pub mod events;
pub mod leagues;
pub mod remote;
pub mod teams;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wizard Core tracing initialized.");
    });
}
