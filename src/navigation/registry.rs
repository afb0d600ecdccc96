//! Registry loader

use crate::domain::errors::LoadError;
use crate::domain::repositories::DocumentSource;
use crate::types::registry::ScreenRegistry;
use std::cell::RefCell;
use std::sync::Arc;

/// Fetches the screen registry once and hands out the cached copy afterwards
pub struct RegistryLoader {
    source: Arc<dyn DocumentSource>,
    path: String,
    cached: RefCell<Option<Arc<ScreenRegistry>>>,
}

impl RegistryLoader {
    pub fn new(source: Arc<dyn DocumentSource>, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
            cached: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The registry, if a previous `load` succeeded
    pub fn cached(&self) -> Option<Arc<ScreenRegistry>> {
        self.cached.borrow().clone()
    }

    /// Load the registry; repeat calls return the cached result without refetching.
    /// Failures are not cached, so a later call fetches again.
    pub async fn load(&self) -> Result<Arc<ScreenRegistry>, LoadError> {
        if let Some(registry) = self.cached() {
            return Ok(registry);
        }

        let doc = self.source.fetch_json(&self.path).await?;
        let registry = Arc::new(ScreenRegistry::from_value(doc, &self.path)?);
        log::info!(
            "[navigation] registry {} loaded with {} screens",
            self.path,
            registry.screens.len()
        );

        *self.cached.borrow_mut() = Some(Arc::clone(&registry));
        Ok(registry)
    }
}
