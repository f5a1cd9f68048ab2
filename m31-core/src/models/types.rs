//! Core model type definitions.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::config::ModelDescriptor;

/// Errors that can occur in the model registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The active model has no constructed handle.
    #[error("No model available: {0}")]
    ModelUnavailable(String),
    /// A switch target has no constructed handle.
    #[error("Model not found: {0}")]
    UnknownModel(String),
    /// The backend builder failed for a descriptor.
    #[error("Failed to build model {name}")]
    Build {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// A constructed, invocable model backend.
///
/// Handles are owned by the registry and shared as `Arc<dyn LanguageModel>`.
/// Callers resolve a handle per request and drop it afterwards, so a model
/// switch takes effect on the next call.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Name of the descriptor this handle was built from.
    fn name(&self) -> &str;

    /// Produce a code suggestion for the given input.
    async fn generate_suggestion(&self, input: &str) -> anyhow::Result<String>;

    /// Produce a chat response for the given input.
    async fn generate_response(&self, input: &str) -> anyhow::Result<String>;
}

/// Builds model handles from descriptors.
///
/// Supplied by whoever sets up the registry. Building may involve I/O in a
/// real backend.
#[async_trait]
pub trait ModelBuilder: Send + Sync {
    async fn build(&self, descriptor: &ModelDescriptor) -> anyhow::Result<Arc<dyn LanguageModel>>;
}
