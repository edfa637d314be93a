//! Simulator wrapper and builder.

use serde::Serialize;
use serde::de::DeserializeOwned;
use simbridge_proto::MAX_RESPONSE_LEN;

#[cfg(feature = "native")]
use crate::boundary::NativeBoundary;
use crate::boundary::Boundary;
use crate::dispatch::{self, CallOptions};
use crate::error::Result;
use crate::handle::EngineHandle;

/// Builder for a [`Simulator`].
///
/// Defaults: 16 MiB response limit, payload tracing off.
#[derive(Debug, Clone, Copy)]
#[must_use = "a SimulatorBuilder does nothing until .build() is called"]
pub struct SimulatorBuilder {
    /// Options applied to every call.
    options: CallOptions,
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBuilder {
    /// Returns a builder with default options.
    pub const fn new() -> Self {
        Self {
            options: CallOptions {
                max_response_len: MAX_RESPONSE_LEN,
                trace_payloads: false,
            },
        }
    }

    /// Sets the largest response accepted, in bytes.
    pub const fn max_response_len(mut self, len: usize) -> Self {
        self.options.max_response_len = len;
        self
    }

    /// Logs raw request and response JSON at `trace` level.
    pub const fn trace_payloads(mut self, enable: bool) -> Self {
        self.options.trace_payloads = enable;
        self
    }

    /// Creates a simulator on the native engine.
    #[cfg(feature = "native")]
    pub fn build(self) -> Result<Simulator<NativeBoundary>> {
        self.build_with(NativeBoundary)
    }

    /// Creates a simulator on the given boundary.
    pub fn build_with<B: Boundary>(self, boundary: B) -> Result<Simulator<B>> {
        Ok(Simulator {
            handle: EngineHandle::create(boundary)?,
            options: self.options,
        })
    }
}

/// A running engine instance.
///
/// The instance is destroyed by [`destroy`](Self::destroy) or, failing
/// that, when the `Simulator` is dropped. Calls after `destroy` fail with
/// [`Error::HandleDestroyed`](crate::Error::HandleDestroyed).
///
/// Calls block the current thread until the engine returns.
#[derive(Debug)]
pub struct Simulator<B: Boundary> {
    /// Owned engine instance.
    handle: EngineHandle<B>,
    /// Options applied to every call.
    options: CallOptions,
}

#[cfg(feature = "native")]
impl Simulator<NativeBoundary> {
    /// Creates a simulator on the native engine with default options.
    pub fn new() -> Result<Self> {
        SimulatorBuilder::new().build()
    }

    /// Returns a new [`SimulatorBuilder`].
    pub const fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }
}

impl<B: Boundary> Simulator<B> {
    /// Creates a simulator on `boundary` with default options.
    pub fn with_boundary(boundary: B) -> Result<Self> {
        SimulatorBuilder::new().build_with(boundary)
    }

    /// Calls `method` with `args` and decodes the result as `T`.
    ///
    /// Pass `&()` for operations without arguments.
    pub fn call<T, A>(&self, method: &str, args: &A) -> Result<T>
    where
        T: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        dispatch::call(&self.handle, method, args, &self.options)
    }

    /// Whether the engine instance is still live.
    pub const fn is_live(&self) -> bool {
        self.handle.is_live()
    }

    /// Destroys the engine instance. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.handle.destroy();
    }

    /// Options applied to every call.
    pub const fn options(&self) -> &CallOptions {
        &self.options
    }
}
