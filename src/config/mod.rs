//! Wizard preferences and their on-disk persistence.
//!
//! Owns the [`WizardConfig`] model plus the JSON helpers that load and save it.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{WizardConfig, MAX_EVENT_DURATION_DAYS};
