//! Raw FFI bindings to the native simulator engine.
//!
//! Mirrors the engine's C header one to one:
//!
//! ```c
//! typedef struct SimulatorHandle SimulatorHandle;
//! typedef struct { uint8_t* data; size_t length; } ByteArray;
//!
//! SimulatorHandle* simulator_create();
//! void simulator_destroy(SimulatorHandle* handle);
//! ByteArray simulator_execute(SimulatorHandle* handle, const uint8_t* request_data, size_t request_len);
//! void simulator_free_byte_array(ByteArray array);
//! ```
//!
//! Linking only happens with the `link` feature; see `build.rs` for the
//! environment variables that locate the library.

#![no_std]

use core::marker::{PhantomData, PhantomPinned};

/// Opaque engine instance owned by the foreign runtime.
#[repr(C)]
pub struct SimulatorHandle {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

impl core::fmt::Debug for SimulatorHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SimulatorHandle")
    }
}

/// Byte buffer allocated by the engine and returned by value.
///
/// Must be handed back to [`simulator_free_byte_array`] exactly once.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteArray {
    pub data: *mut u8,
    pub length: usize,
}

unsafe extern "C" {
    /// Creates a new engine instance. Returns null on failure.
    pub fn simulator_create() -> *mut SimulatorHandle;

    /// Destroys an engine instance. Null is ignored by the engine.
    pub fn simulator_destroy(handle: *mut SimulatorHandle);

    /// Executes one JSON request and returns an engine-owned JSON response.
    ///
    /// The engine does not keep `request_data` past the call.
    pub fn simulator_execute(
        handle: *mut SimulatorHandle,
        request_data: *const u8,
        request_len: usize,
    ) -> ByteArray;

    /// Releases a buffer returned by [`simulator_execute`].
    pub fn simulator_free_byte_array(array: ByteArray);
}
