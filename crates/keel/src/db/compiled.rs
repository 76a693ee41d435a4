use crate::{schema::Model, Result};

use std::sync::{Arc, OnceLock};

/// A process-wide compiled model, built on first use and shared afterwards.
///
/// ```ignore
/// static MODEL: Compiled = Compiled::new(build_model);
///
/// let model = MODEL.get()?;
/// ```
#[derive(Debug)]
pub struct Compiled {
    model: OnceLock<Arc<Model>>,
    build: fn() -> Result<Arc<Model>>,
}

impl Compiled {
    pub const fn new(build: fn() -> Result<Arc<Model>>) -> Compiled {
        Compiled {
            model: OnceLock::new(),
            build,
        }
    }

    /// Returns the compiled model, building it if no thread has yet.
    ///
    /// Threads racing the first call may each build a model; only the first
    /// published one is ever returned. A failed build publishes nothing, so
    /// a later call retries.
    pub fn get(&self) -> Result<Arc<Model>> {
        if let Some(model) = self.model.get() {
            return Ok(model.clone());
        }

        let model = (self.build)()?;
        Ok(self.model.get_or_init(|| model).clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.model.get().is_some()
    }
}
