//! A simulator shared between threads.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::boundary::Boundary;
use crate::error::Result;
use crate::simulator::Simulator;

/// Cloneable handle to one [`Simulator`], serializing calls with a mutex.
///
/// The bridge itself never locks; this wrapper is for hosts that need
/// several threads to drive the same engine instance. The instance is
/// destroyed when the last clone is dropped, or earlier by
/// [`destroy`](Self::destroy).
pub struct SharedSimulator<B: Boundary> {
    /// The guarded simulator.
    inner: Arc<Mutex<Simulator<B>>>,
}

impl<B: Boundary> SharedSimulator<B> {
    /// Wraps `sim` for shared use.
    pub fn new(sim: Simulator<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sim)),
        }
    }

    /// Locks the simulator for a sequence of calls.
    ///
    /// A poisoned lock is recovered: a panic mid-call cannot leave the
    /// handle half-destroyed.
    pub fn lock(&self) -> MutexGuard<'_, Simulator<B>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls `method` with `args` under the lock.
    pub fn call<T, A>(&self, method: &str, args: &A) -> Result<T>
    where
        T: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        self.lock().call(method, args)
    }

    /// Whether the engine instance is still live.
    pub fn is_live(&self) -> bool {
        self.lock().is_live()
    }

    /// Destroys the engine instance for every clone.
    pub fn destroy(&self) {
        self.lock().destroy();
    }
}

impl<B: Boundary> Clone for SharedSimulator<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Boundary> From<Simulator<B>> for SharedSimulator<B> {
    fn from(sim: Simulator<B>) -> Self {
        Self::new(sim)
    }
}

impl<B: Boundary> fmt::Debug for SharedSimulator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSimulator").finish_non_exhaustive()
    }
}
