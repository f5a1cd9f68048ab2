//! AI service mediating every model request.
//!
//! Both entry points run the same pipeline: sanitize the input, resolve the
//! active model, invoke it, sanitize the output. Backend failures are turned
//! into one opaque error per pipeline.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ModelRegistry, RegistryError};
use crate::security::{SanitizationPolicy, SecurityManager};

/// Errors returned by [`AiService`].
///
/// The display text of the invocation failures never includes the backend
/// error. The cause is still reachable through `Error::source` for logging.
#[derive(Debug, Error)]
pub enum AiServiceError {
    /// Model resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to generate suggestion")]
    SuggestionFailed {
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to generate response")]
    ResponseFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Routes suggestion and chat requests to the active model.
#[derive(Clone)]
pub struct AiService {
    registry: Arc<ModelRegistry>,
    policy: Arc<dyn SanitizationPolicy>,
}

impl std::fmt::Debug for AiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl AiService {
    /// Create a service with an explicit sanitization policy.
    pub fn new(registry: Arc<ModelRegistry>, policy: Arc<dyn SanitizationPolicy>) -> Self {
        Self { registry, policy }
    }

    /// Create a service using [`SecurityManager`].
    pub fn with_default_policy(registry: Arc<ModelRegistry>) -> Self {
        Self::new(registry, Arc::new(SecurityManager))
    }

    /// The registry this service resolves models from.
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Generate a code suggestion with the active model.
    pub async fn get_suggestion(&self, code: &str) -> Result<String, AiServiceError> {
        let sanitized = self.policy.sanitize_input(code);
        let model = self.registry.current_model().await?;
        debug!(model = %model.name(), input_len = sanitized.len(), "Requesting suggestion");

        match model.generate_suggestion(&sanitized).await {
            Ok(suggestion) => Ok(self.policy.validate_output(&suggestion)),
            Err(source) => {
                warn!(model = %model.name(), error = %source, "Suggestion failed");
                Err(AiServiceError::SuggestionFailed { source })
            }
        }
    }

    /// Generate a chat response with the active model.
    pub async fn chat(&self, message: &str) -> Result<String, AiServiceError> {
        let sanitized = self.policy.sanitize_input(message);
        let model = self.registry.current_model().await?;
        debug!(model = %model.name(), input_len = sanitized.len(), "Requesting response");

        match model.generate_response(&sanitized).await {
            Ok(response) => Ok(self.policy.validate_output(&response)),
            Err(source) => {
                warn!(model = %model.name(), error = %source, "Response failed");
                Err(AiServiceError::ResponseFailed { source })
            }
        }
    }
}
