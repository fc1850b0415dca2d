//! Fallback chaining between a preferred and a dependable detector

use crate::detection::detector::{Detector, check_mask_contract};
use crate::io::error::Result;
use ndarray::Array2;

/// Runs `primary`, substituting `fallback` whenever it fails
///
/// A primary result that breaks the mask contract (wrong shape, values
/// outside [0, 1]) counts as a failure. Primary errors are logged and never
/// returned.
#[derive(Debug, Clone)]
pub struct FallbackDetector<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackDetector<P, F> {
    /// Chain `primary` in front of `fallback`
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Detector, F: Detector> Detector for FallbackDetector<P, F> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn detect(&self, image: &Array2<f64>, sensitivity: f64) -> Result<Array2<f64>> {
        let attempt = self
            .primary
            .detect(image, sensitivity)
            .and_then(|mask| check_mask_contract(image, &mask).map(|()| mask));

        match attempt {
            Ok(mask) => {
                log::info!("Used {} detector", self.primary.name());
                Ok(mask)
            }
            Err(error) => {
                log::warn!(
                    "{} detector failed, falling back to {}: {error}",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.fallback.detect(image, sensitivity)
            }
        }
    }
}
