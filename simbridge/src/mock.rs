//! Counting mock engine for tests.
//!
//! Buffers and handles are real heap allocations, so a double release or a
//! double destroy panics instead of silently passing.

#![allow(unsafe_code, clippy::unwrap_used, clippy::panic)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use simbridge_sys::{ByteArray, SimulatorHandle};

use crate::boundary::Boundary;

/// What the mock engine returns from one `execute`.
pub(crate) enum Reply {
    /// A heap buffer with these bytes.
    Bytes(Vec<u8>),
    /// A null data pointer with an arbitrary length.
    Null { length: usize },
}

impl Reply {
    /// A success envelope carrying `data`.
    pub(crate) fn ok(data: Value) -> Self {
        Self::Bytes(
            serde_json::to_vec(&json!({ "success": true, "data": data, "error_message": null }))
                .unwrap(),
        )
    }

    /// A failure envelope carrying `message`.
    pub(crate) fn err(message: &str) -> Self {
        Self::Bytes(
            serde_json::to_vec(&json!({ "success": false, "data": null, "error_message": message }))
                .unwrap(),
        )
    }
}

/// Per-engine call counters.
#[derive(Debug, Default)]
pub(crate) struct Stats {
    created: AtomicUsize,
    destroyed: AtomicUsize,
    executed: AtomicUsize,
    released: AtomicUsize,
    live: Mutex<HashSet<usize>>,
    outstanding: Mutex<HashMap<usize, usize>>,
}

impl Stats {
    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub(crate) fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub(crate) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Buffers handed out and not yet released.
    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.lock().unwrap().values().sum()
    }
}

type Handler = Box<dyn Fn(&str, &Value) -> Reply + Send + Sync>;

/// In-process engine implementing [`Boundary`].
pub(crate) struct MockEngine {
    stats: Arc<Stats>,
    handler: Handler,
    scripted: Mutex<VecDeque<Reply>>,
    fail_create: bool,
}

impl Default for MockEngine {
    /// Knows `ping` and `echo`; anything else is an unknown method.
    fn default() -> Self {
        Self::with_handler(|method, args| match method {
            "ping" => Reply::ok(json!("pong")),
            "echo" => Reply::ok(args.clone()),
            other => Reply::err(&format!("Unknown method: {other}")),
        })
    }
}

impl MockEngine {
    pub(crate) fn with_handler(
        handler: impl Fn(&str, &Value) -> Reply + Send + Sync + 'static,
    ) -> Self {
        Self {
            stats: Arc::default(),
            handler: Box::new(handler),
            scripted: Mutex::default(),
            fail_create: false,
        }
    }

    /// An engine that cannot create instances.
    pub(crate) fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// Queues a reply that takes precedence over the handler.
    pub(crate) fn push_reply(&self, reply: Reply) {
        self.scripted.lock().unwrap().push_back(reply);
    }

    pub(crate) fn stats(&self) -> Arc<Stats> {
        Arc::clone(&self.stats)
    }

    fn dispatch(&self, request: &[u8]) -> Reply {
        if let Some(reply) = self.scripted.lock().unwrap().pop_front() {
            return reply;
        }
        match serde_json::from_slice::<Value>(request) {
            Ok(req) => match req["method"].as_str() {
                Some(method) => (self.handler)(method, &req["args"]),
                None => Reply::err("Missing method"),
            },
            Err(e) => Reply::err(&format!("Failed to parse request: {e}")),
        }
    }
}

impl Boundary for MockEngine {
    fn create_instance(&self) -> *mut SimulatorHandle {
        if self.fail_create {
            return std::ptr::null_mut();
        }
        self.stats.created.fetch_add(1, Ordering::SeqCst);
        let ptr = Box::into_raw(Box::new(0u64));
        self.stats.live.lock().unwrap().insert(ptr as usize);
        ptr.cast()
    }

    unsafe fn destroy_instance(&self, handle: NonNull<SimulatorHandle>) {
        let addr = handle.as_ptr() as usize;
        assert!(
            self.stats.live.lock().unwrap().remove(&addr),
            "destroy of unknown or already destroyed handle"
        );
        self.stats.destroyed.fetch_add(1, Ordering::SeqCst);
        drop(unsafe { Box::from_raw(handle.as_ptr().cast::<u64>()) });
    }

    unsafe fn execute(&self, handle: NonNull<SimulatorHandle>, request: &[u8]) -> ByteArray {
        assert!(
            self.stats.live.lock().unwrap().contains(&(handle.as_ptr() as usize)),
            "execute on a handle that is not live"
        );
        self.stats.executed.fetch_add(1, Ordering::SeqCst);
        match self.dispatch(request) {
            Reply::Null { length } => ByteArray {
                data: std::ptr::null_mut(),
                length,
            },
            Reply::Bytes(bytes) => {
                let length = bytes.len();
                let data = Box::into_raw(bytes.into_boxed_slice()).cast::<u8>();
                *self
                    .stats
                    .outstanding
                    .lock()
                    .unwrap()
                    .entry(data as usize)
                    .or_default() += 1;
                ByteArray { data, length }
            }
        }
    }

    unsafe fn release(&self, buffer: ByteArray) {
        self.stats.released.fetch_add(1, Ordering::SeqCst);
        if buffer.data.is_null() {
            return;
        }
        {
            let mut outstanding = self.stats.outstanding.lock().unwrap();
            let count = outstanding
                .get_mut(&(buffer.data as usize))
                .filter(|c| **c > 0)
                .unwrap_or_else(|| panic!("release of unknown or already released buffer"));
            *count -= 1;
        }
        let slice = std::ptr::slice_from_raw_parts_mut(buffer.data, buffer.length);
        drop(unsafe { Box::from_raw(slice) });
    }
}
