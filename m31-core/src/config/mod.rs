//! Configuration module for M31 Code.
//!
//! Manages application settings stored as JSON.

mod settings;

pub use settings::{Settings, DEFAULT_AVAILABLE_MODELS, DEFAULT_LOG_FILTER, DEFAULT_MODEL};
