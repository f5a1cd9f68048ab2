//! Model registry for constructing and selecting model handles.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{Settings, DEFAULT_AVAILABLE_MODELS, DEFAULT_MODEL};

use super::config::ModelDescriptor;
use super::mock::MockModelBuilder;
use super::types::{LanguageModel, ModelBuilder, RegistryError};

/// Mutable half of the registry.
struct RegistryState {
    active_name: String,
    handles: HashMap<String, Arc<dyn LanguageModel>>,
}

/// Registry of known models, the active selection, and constructed handles.
///
/// The declared model list is fixed at construction. Handles exist only for
/// descriptors passed to [`ModelRegistry::initialize`]. Share it behind an
/// `Arc`; the active name is read and replaced under a lock, so concurrent
/// readers see either the old or the new value.
pub struct ModelRegistry {
    known_names: Vec<String>,
    builder: Arc<dyn ModelBuilder>,
    state: RwLock<RegistryState>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("known_names", &self.known_names)
            .finish_non_exhaustive()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_AVAILABLE_MODELS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_MODEL,
            Arc::new(MockModelBuilder),
        )
    }
}

impl ModelRegistry {
    /// Create a registry with a declared model list and a default active model.
    ///
    /// No handles are built here; call [`initialize`](Self::initialize).
    pub fn new(
        known_names: Vec<String>,
        default_active: impl Into<String>,
        builder: Arc<dyn ModelBuilder>,
    ) -> Self {
        Self {
            known_names,
            builder,
            state: RwLock::new(RegistryState {
                active_name: default_active.into(),
                handles: HashMap::new(),
            }),
        }
    }

    /// Create a registry from settings.
    pub fn from_settings(settings: &Settings, builder: Arc<dyn ModelBuilder>) -> Self {
        Self::new(
            settings.available_models.clone(),
            settings.default_model.clone(),
            builder,
        )
    }

    /// Build a handle for each descriptor and register it under its name.
    ///
    /// A later descriptor with the same name replaces the earlier handle.
    /// Stops at the first builder failure; handles built before it stay.
    pub async fn initialize(&self, descriptors: &[ModelDescriptor]) -> Result<(), RegistryError> {
        for descriptor in descriptors {
            // Build outside the lock so readers are never blocked on backend I/O.
            let handle = self
                .builder
                .build(descriptor)
                .await
                .map_err(|source| RegistryError::Build {
                    name: descriptor.name.clone(),
                    source,
                })?;

            let replaced = self
                .state
                .write()
                .await
                .handles
                .insert(descriptor.name.clone(), handle)
                .is_some();

            debug!(model = %descriptor.name, replaced, "Registered model handle");
        }

        info!(count = descriptors.len(), "Model registry initialized");
        Ok(())
    }

    /// Resolve the handle for the active model.
    pub async fn current_model(&self) -> Result<Arc<dyn LanguageModel>, RegistryError> {
        let state = self.state.read().await;
        state
            .handles
            .get(&state.active_name)
            .cloned()
            .ok_or_else(|| RegistryError::ModelUnavailable(state.active_name.clone()))
    }

    /// Declared model names, in declaration order.
    ///
    /// Not filtered by readiness: names without a handle are listed too.
    pub fn list_available(&self) -> Vec<String> {
        self.known_names.clone()
    }

    /// Make `name` the active model.
    ///
    /// Fails with [`RegistryError::UnknownModel`] unless a handle has been
    /// built for `name`; the active model is left unchanged in that case.
    pub async fn switch_active(&self, name: &str) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        if !state.handles.contains_key(name) {
            return Err(RegistryError::UnknownModel(name.to_string()));
        }

        let previous = std::mem::replace(&mut state.active_name, name.to_string());
        info!(from = %previous, to = %name, "Switched active model");
        Ok(())
    }

    /// Name of the active model.
    pub async fn active_name(&self) -> String {
        self.state.read().await.active_name.clone()
    }

    /// Check if a handle has been built for `name`.
    pub async fn is_initialized(&self, name: &str) -> bool {
        self.state.read().await.handles.contains_key(name)
    }
}
