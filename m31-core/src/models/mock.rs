//! Local mock backend.
//!
//! Echoes its input back with a fixed prefix. No network calls are made;
//! this is the backend the host wires up until a real provider exists.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::config::ModelDescriptor;
use super::types::{LanguageModel, ModelBuilder};

/// Echo model bound to one descriptor.
#[derive(Debug, Clone)]
pub struct MockModel {
    name: String,
}

impl MockModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_suggestion(&self, input: &str) -> anyhow::Result<String> {
        Ok(format!("Suggestion for: {input}"))
    }

    async fn generate_response(&self, input: &str) -> anyhow::Result<String> {
        Ok(format!("Response to: {input}"))
    }
}

/// Builds a [`MockModel`] for every descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockModelBuilder;

#[async_trait]
impl ModelBuilder for MockModelBuilder {
    async fn build(&self, descriptor: &ModelDescriptor) -> anyhow::Result<Arc<dyn LanguageModel>> {
        debug!(
            model = %descriptor.name,
            has_api_key = descriptor.has_api_key(),
            endpoint = ?descriptor.endpoint,
            "Building mock model"
        );
        Ok(Arc::new(MockModel::new(&descriptor.name)))
    }
}
