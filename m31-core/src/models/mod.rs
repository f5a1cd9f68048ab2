//! Model descriptors, handles and registry.
//!
//! This module provides:
//! - `ModelDescriptor` - Identifies a backend (name, key, endpoint)
//! - `LanguageModel` - The invocable handle interface
//! - `ModelBuilder` - Turns descriptors into handles
//! - `ModelRegistry` - Known models, active selection, constructed handles

mod config;
mod mock;
mod registry;
mod types;

pub use config::ModelDescriptor;
pub use mock::{MockModel, MockModelBuilder};
pub use registry::ModelRegistry;
pub use types::{LanguageModel, ModelBuilder, RegistryError};
