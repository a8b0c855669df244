use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Uninit,
    Init,
}

pub struct GuardedCell<T> {
    slot: OnceLock<Arc<T>>,
    init_lock: Mutex<()>,
}

impl<T> GuardedCell<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn state(&self) -> CellState {
        if self.is_initialized() {
            CellState::Init
        } else {
            CellState::Uninit
        }
    }

    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, std::convert::Infallible>(init())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // On `Err` the cell stays unset and the next caller waiting on the init
    // lock runs its own constructor.
    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.slot.get() {
            tracing::trace!("guarded cell fast path hit");
            return Ok(Arc::clone(value));
        }

        // The guarded data is `()`, so a constructor that panicked while
        // holding the lock leaves nothing to repair.
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());

        if let Some(value) = self.slot.get() {
            tracing::debug!("guarded cell initialized by another caller while waiting");
            return Ok(Arc::clone(value));
        }

        let value = Arc::new(init()?);
        Ok(Arc::clone(self.slot.get_or_init(|| value)))
    }
}

impl<T> Default for GuardedCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GuardedCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedCell")
            .field("value", &self.slot.get())
            .finish()
    }
}
