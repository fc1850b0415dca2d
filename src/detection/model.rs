//! Lazy, at-most-once provisioning of the optional segmentation model

use crate::detection::learned::SegmentationModel;
use crate::io::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Source of a trained segmentation model
pub trait ModelLoader: Send + Sync {
    /// Load the model, or `Ok(None)` when none is available
    ///
    /// # Errors
    ///
    /// Returns an error if a model exists but cannot be loaded
    fn load(&self) -> Result<Option<Arc<dyn SegmentationModel>>>;
}

/// Looks for serialized network weights on disk
///
/// No inference runtime ships with this crate, so a weights file is reported
/// but never turned into a model.
#[derive(Debug, Clone)]
pub struct WeightsFileLoader {
    path: PathBuf,
}

impl WeightsFileLoader {
    /// Loader for the weights file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured weights location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelLoader for WeightsFileLoader {
    fn load(&self) -> Result<Option<Arc<dyn SegmentationModel>>> {
        if self.path.is_file() {
            log::warn!(
                "Model weights found at {} but no inference runtime is available; using statistical detection",
                self.path.display()
            );
        } else {
            log::info!(
                "No model weights found at {}; using statistical detection",
                self.path.display()
            );
        }
        Ok(None)
    }
}

struct NoModel;

impl ModelLoader for NoModel {
    fn load(&self) -> Result<Option<Arc<dyn SegmentationModel>>> {
        Ok(None)
    }
}

/// Memoized model factory
///
/// The loader runs at most once, even when several threads ask for the model
/// concurrently; afterwards the cached handle is shared read-only. A failed
/// load is logged and cached as "no model".
pub struct ModelFactory {
    loader: Box<dyn ModelLoader>,
    model: OnceLock<Option<Arc<dyn SegmentationModel>>>,
}

impl ModelFactory {
    /// Factory backed by `loader`
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            model: OnceLock::new(),
        }
    }

    /// Factory that never yields a model
    pub fn disabled() -> Self {
        Self::new(NoModel)
    }

    /// The shared model, loading it on first use
    pub fn get(&self) -> Option<Arc<dyn SegmentationModel>> {
        self.model
            .get_or_init(|| match self.loader.load() {
                Ok(model) => {
                    if let Some(ref loaded) = model {
                        log::info!("Segmentation model '{}' loaded", loaded.name());
                    }
                    model
                }
                Err(error) => {
                    log::error!("Failed to load segmentation model: {error}");
                    None
                }
            })
            .clone()
    }

    /// Whether the loader has already run
    pub fn is_initialized(&self) -> bool {
        self.model.get().is_some()
    }
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new(WeightsFileLoader::new(
            crate::io::configuration::DEFAULT_MODEL_WEIGHTS,
        ))
    }
}

impl fmt::Debug for ModelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.model.get() {
            None => "uninitialized",
            Some(None) => "no model",
            Some(Some(_)) => "loaded",
        };
        f.debug_struct("ModelFactory").field("model", &state).finish()
    }
}
