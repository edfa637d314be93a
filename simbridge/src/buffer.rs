//! Scoped ownership of engine-allocated response buffers.

#![allow(unsafe_code)]

use simbridge_sys::ByteArray;

use crate::boundary::Boundary;

/// Whether a result with a null data pointer is still handed to
/// [`Boundary::release`].
///
/// The native engine treats null as "nothing was allocated" and its free
/// routine ignores it, so null buffers are not released.
pub(crate) const RELEASE_NULL_BUFFERS: bool = false;

/// An engine-owned buffer that is released exactly once, on drop.
///
/// Wrapping the raw [`ByteArray`] as soon as `execute` returns means every
/// exit from the call path (null result, size check, decode failure,
/// engine-reported failure, success) goes through the same release.
pub(crate) struct ForeignBuffer<'b, B: Boundary + ?Sized> {
    /// Buffer as returned by the engine.
    raw: ByteArray,
    /// Boundary that produced the buffer and must release it.
    boundary: &'b B,
}

impl<'b, B: Boundary + ?Sized> ForeignBuffer<'b, B> {
    /// Takes ownership of `raw`.
    ///
    /// # Safety
    ///
    /// `raw` must have been returned by `boundary.execute` and not yet
    /// released, and must not be released by anyone else.
    pub(crate) const unsafe fn new(boundary: &'b B, raw: ByteArray) -> Self {
        Self { raw, boundary }
    }

    /// Length reported by the engine.
    pub(crate) const fn len(&self) -> usize {
        self.raw.length
    }

    /// Whether the engine produced no buffer.
    pub(crate) fn is_null(&self) -> bool {
        self.raw.data.is_null()
    }

    /// Borrows the engine's bytes, or `None` if no buffer was produced.
    pub(crate) fn bytes(&self) -> Option<&[u8]> {
        if self.is_null() {
            return None;
        }
        // SAFETY: non-null, and the engine guarantees `length` readable bytes
        // until the buffer is released, which cannot happen while borrowed.
        Some(unsafe { std::slice::from_raw_parts(self.raw.data, self.raw.length) })
    }
}

impl<B: Boundary + ?Sized> Drop for ForeignBuffer<'_, B> {
    fn drop(&mut self) {
        if self.is_null() && !RELEASE_NULL_BUFFERS {
            return;
        }
        unsafe { self.boundary.release(self.raw) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::ptr::NonNull;

    use super::*;
    use crate::mock::{MockEngine, Reply};

    fn execute(engine: &MockEngine, reply: Reply) -> ByteArray {
        engine.push_reply(reply);
        let handle = NonNull::new(engine.create_instance()).unwrap();
        let raw = unsafe { engine.execute(handle, b"{}") };
        unsafe { engine.destroy_instance(handle) };
        raw
    }

    #[test]
    fn releases_once_on_drop() {
        let engine = MockEngine::default();
        let raw = execute(&engine, Reply::Bytes(b"hello".to_vec()));

        let buf = unsafe { ForeignBuffer::new(&engine, raw) };
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.bytes().unwrap(), b"hello");
        assert_eq!(engine.stats().released(), 0);
        drop(buf);
        assert_eq!(engine.stats().released(), 1);
        assert_eq!(engine.stats().outstanding(), 0);
    }

    #[test]
    fn empty_buffer_is_still_released() {
        let engine = MockEngine::default();
        let raw = execute(&engine, Reply::Bytes(Vec::new()));

        let buf = unsafe { ForeignBuffer::new(&engine, raw) };
        assert_eq!(buf.bytes().unwrap(), b"");
        drop(buf);
        assert_eq!(engine.stats().released(), 1);
    }

    #[test]
    fn null_buffer_is_not_released() {
        let engine = MockEngine::default();
        let raw = execute(&engine, Reply::Null { length: 12 });

        let buf = unsafe { ForeignBuffer::new(&engine, raw) };
        assert!(buf.is_null());
        assert!(buf.bytes().is_none());
        drop(buf);
        assert_eq!(engine.stats().released(), 0);
    }
}
