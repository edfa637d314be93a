//! The four calls that cross into the engine.
//!
//! [`Boundary`] is the only seam between host code and the foreign runtime.
//! [`NativeBoundary`] forwards to [`simbridge_sys`]; tests substitute mock
//! engines that own real heap buffers.

#![allow(unsafe_code)]

use std::ptr::NonNull;

use simbridge_sys::{ByteArray, SimulatorHandle};

/// Boundary call surface of an engine.
///
/// Implementations must uphold the engine's ownership contract: a buffer
/// returned by [`execute`](Self::execute) stays valid until it is passed to
/// [`release`](Self::release), and the engine keeps no reference to the
/// request bytes after `execute` returns.
pub trait Boundary {
    /// Asks the engine for a new instance. Returns null on failure.
    fn create_instance(&self) -> *mut SimulatorHandle;

    /// Destroys an instance and all of its foreign-side state.
    ///
    /// # Safety
    ///
    /// `handle` must come from [`create_instance`](Self::create_instance) on
    /// this boundary and must not have been destroyed already.
    unsafe fn destroy_instance(&self, handle: NonNull<SimulatorHandle>);

    /// Executes one encoded request and returns an engine-owned response.
    ///
    /// # Safety
    ///
    /// `handle` must be a live instance created by this boundary.
    unsafe fn execute(&self, handle: NonNull<SimulatorHandle>, request: &[u8]) -> ByteArray;

    /// Hands a response buffer back to the engine.
    ///
    /// # Safety
    ///
    /// `buffer` must have been returned by [`execute`](Self::execute) on this
    /// boundary and must not have been released already.
    unsafe fn release(&self, buffer: ByteArray);
}

/// Boundary backed by the linked native engine library.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBoundary;

#[cfg(feature = "native")]
impl Boundary for NativeBoundary {
    fn create_instance(&self) -> *mut SimulatorHandle {
        unsafe { simbridge_sys::simulator_create() }
    }

    unsafe fn destroy_instance(&self, handle: NonNull<SimulatorHandle>) {
        unsafe { simbridge_sys::simulator_destroy(handle.as_ptr()) }
    }

    unsafe fn execute(&self, handle: NonNull<SimulatorHandle>, request: &[u8]) -> ByteArray {
        unsafe { simbridge_sys::simulator_execute(handle.as_ptr(), request.as_ptr(), request.len()) }
    }

    unsafe fn release(&self, buffer: ByteArray) {
        unsafe { simbridge_sys::simulator_free_byte_array(buffer) }
    }
}
