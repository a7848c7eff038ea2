// src/shutdown.rs

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Default)]
struct State {
    requested: Mutex<bool>,
    wake: Condvar,
}

/// Cooperative stop flag shared between the signal handler and a run loop.
///
/// Set from any thread. The owning loop polls it once per iteration and
/// waits on it instead of sleeping, so a request cuts the wait short.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    state: Arc<State>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag that is raised on Ctrl-C / SIGTERM.
    ///
    /// May only be called once per process.
    pub fn install() -> Result<Self> {
        let shutdown = Self::new();
        let handle = shutdown.clone();
        ctrlc::set_handler(move || handle.request())?;
        Ok(shutdown)
    }

    pub fn request(&self) {
        *self.lock() = true;
        self.state.wake.notify_all();
    }

    pub fn is_requested(&self) -> bool {
        *self.lock()
    }

    /// Block for `timeout`, returning early if shutdown is requested.
    ///
    /// Returns `true` when shutdown has been requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .state
            .wake
            .wait_timeout_while(guard, timeout, |requested| !*requested)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }

    // The flag is a plain bool, so a poisoned lock still holds a valid value
    #[inline]
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.state
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
