//! M31 Code Core Library
//!
//! This crate provides the request path of M31 Code, an editor assistant
//! that routes code and chat prompts to a selectable model backend. It
//! includes:
//!
//! - Model registry with explicit initialization and active-model switching
//! - Sanitization policy applied to every model input and output
//! - AI service running the sanitize → dispatch → sanitize pipeline
//! - Chat sessions speaking the host UI's message contract
//! - Configuration management (settings file, defaults)

pub mod chat;
pub mod config;
pub mod models;
pub mod security;
pub mod service;

// Re-exports for convenience
pub use config::{Settings, DEFAULT_AVAILABLE_MODELS, DEFAULT_LOG_FILTER, DEFAULT_MODEL};

// Re-export models
pub use models::{
    LanguageModel, MockModel, MockModelBuilder, ModelBuilder, ModelDescriptor, ModelRegistry,
    RegistryError,
};

// Re-export security
pub use security::{SanitizationPolicy, SecurityManager};

// Re-export service
pub use service::{AiService, AiServiceError};

// Re-export chat
pub use chat::{ChatSession, ClientMessage, Message, MessageRole, ServerMessage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn exports_are_accessible() {
        // Verify all public types are accessible
        fn _check_types(
            _settings: &Settings,
            _descriptor: &ModelDescriptor,
            _registry: &ModelRegistry,
            _model: &dyn LanguageModel,
            _builder: &dyn ModelBuilder,
            _policy: &dyn SanitizationPolicy,
            _service: &AiService,
            _session: &ChatSession,
            _message: &Message,
        ) {
        }
    }

    #[test]
    fn defaults_exported() {
        assert_eq!(DEFAULT_MODEL, "gpt4");
        assert!(DEFAULT_AVAILABLE_MODELS.contains(&DEFAULT_MODEL));
    }
}
