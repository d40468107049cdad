//! Lazily populated, thread-safe cache for the compiled form of an expression

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Compute-once cell shared by every evaluation of an expression node.
///
/// Readers that find the cell populated never lock. The first caller that
/// finds it empty takes the mutex, re-checks, compiles and stores. A failed
/// compilation leaves the cell empty so a later caller may retry.
pub struct CompiledCell<T> {
    value: OnceLock<Arc<T>>,
    lock: Mutex<()>,
}

impl<T> CompiledCell<T> {
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
            lock: Mutex::new(()),
        }
    }

    /// The compiled form, if it has been computed
    pub fn get(&self) -> Option<Arc<T>> {
        self.value.get().cloned()
    }

    pub fn is_compiled(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the cached form or compile and cache it
    pub fn get_or_try_compile<E, F>(&self, compile: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(compiled) = self.value.get() {
            return Ok(compiled.clone());
        }

        // a panicking compiler never stored anything, so the guard is still usable
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(compiled) = self.value.get() {
            return Ok(compiled.clone());
        }

        let compiled = Arc::new(compile()?);
        // only the lock holder writes
        let _ = self.value.set(compiled.clone());
        Ok(compiled)
    }
}

impl<T> Default for CompiledCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CompiledCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledCell")
            .field("compiled", &self.is_compiled())
            .finish()
    }
}
