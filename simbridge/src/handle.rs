//! Engine instance lifecycle.

#![allow(unsafe_code)]

use std::fmt;
use std::ptr::NonNull;

use simbridge_sys::SimulatorHandle;
use tracing::{debug, warn};

use crate::boundary::Boundary;
use crate::error::{Error, Result};

/// Exclusive owner of one live engine instance.
///
/// States: live after [`create`](Self::create), destroyed after
/// [`destroy`](Self::destroy). There is no way back from destroyed. `Drop`
/// runs the same `destroy`, so an instance that was never destroyed
/// explicitly is still released exactly once, and one that was is not
/// released again.
pub struct EngineHandle<B: Boundary> {
    /// Boundary that created the instance.
    boundary: B,
    /// `None` once destroyed.
    raw: Option<NonNull<SimulatorHandle>>,
}

// The engine serializes access to its own state, so the instance may move
// between threads. It is not `Sync`: concurrent callers go through
// `SharedSimulator`.
unsafe impl<B: Boundary + Send> Send for EngineHandle<B> {}

impl<B: Boundary> EngineHandle<B> {
    /// Asks `boundary` for a new engine instance.
    pub fn create(boundary: B) -> Result<Self> {
        let Some(raw) = NonNull::new(boundary.create_instance()) else {
            warn!("engine returned a null handle");
            return Err(Error::CreationFailed);
        };
        debug!(handle = ?raw, "created engine instance");
        Ok(Self {
            boundary,
            raw: Some(raw),
        })
    }

    /// Whether the instance has not been destroyed yet.
    pub const fn is_live(&self) -> bool {
        self.raw.is_some()
    }

    /// The boundary this instance was created through.
    pub const fn boundary(&self) -> &B {
        &self.boundary
    }

    /// The live foreign handle, or [`Error::HandleDestroyed`].
    pub(crate) fn raw(&self) -> Result<NonNull<SimulatorHandle>> {
        self.raw.ok_or(Error::HandleDestroyed)
    }

    /// Destroys the instance. Later calls are no-ops.
    pub fn destroy(&mut self) {
        if let Some(raw) = self.raw.take() {
            // `take` above guarantees this pointer is destroyed at most once.
            unsafe { self.boundary.destroy_instance(raw) };
            debug!(handle = ?raw, "destroyed engine instance");
        }
    }
}

impl<B: Boundary> Drop for EngineHandle<B> {
    fn drop(&mut self) {
        if self.is_live() {
            debug!("engine handle dropped while live");
        }
        self.destroy();
    }
}

impl<B: Boundary> fmt::Debug for EngineHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}
