//! Safe host-side bridge to an opaque native simulator engine.
//!
//! The engine is reached only through four C calls (create, destroy,
//! execute, free buffer). Every operation is one JSON request crossing
//! `execute` and one JSON response coming back in an engine-owned buffer,
//! which `simbridge` copies and hands back to the engine exactly once.
//!
//! # Quick start
//!
//! ```ignore
//! use simbridge::Simulator;
//!
//! // Requires the `native` feature and SIMBRIDGE_LIB_DIR at build time.
//! let mut sim = Simulator::new()?;
//! let checkpoint = sim.get_latest_checkpoint()?;
//! println!("checkpoint #{}", checkpoint.data.sequence_number);
//!
//! // Any method the engine registers, with any JSON-shaped result.
//! let raw: serde_json::Value = sim.call("getLatestCheckpoint", &())?;
//!
//! sim.destroy();
//! # Ok::<(), simbridge::Error>(())
//! ```
//!
//! Without the `native` feature, bring your own [`Boundary`] and use
//! [`Simulator::with_boundary`].

mod boundary;
mod buffer;
mod checkpoint;
mod dispatch;
mod error;
mod handle;
#[cfg(test)]
mod mock;
mod ops;
mod shared;
mod simulator;

#[cfg(feature = "native")]
pub use boundary::NativeBoundary;
pub use boundary::Boundary;
pub use checkpoint::{AuthSignature, CheckpointSummary, GasCostSummary, VerifiedCheckpoint};
pub use dispatch::{CallOptions, call};
pub use error::{Error, Result};
pub use handle::EngineHandle;
pub use ops::method;
pub use shared::SharedSimulator;
pub use simbridge_proto::{CodecError, MAX_RESPONSE_LEN};
pub use simbridge_sys::{ByteArray, SimulatorHandle};
pub use simulator::{Simulator, SimulatorBuilder};

/// A simulator on the linked native engine.
#[cfg(feature = "native")]
pub type NativeSimulator = Simulator<NativeBoundary>;
