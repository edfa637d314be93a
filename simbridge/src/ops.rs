//! Typed engine operations.
//!
//! Each operation is a method name plus an expected result shape routed
//! through [`Simulator::call`]; nothing here touches the boundary directly.

use std::time::Duration;

use serde::Serialize;
use simbridge_proto::CodecError;

use crate::boundary::Boundary;
use crate::checkpoint::VerifiedCheckpoint;
use crate::error::{Error, Result};
use crate::simulator::Simulator;

/// Engine method names.
pub mod method {
    /// Latest certified checkpoint.
    pub const GET_LATEST_CHECKPOINT: &str = "getLatestCheckpoint";
    /// Seal pending transactions into a new checkpoint.
    pub const CREATE_CHECKPOINT: &str = "createCheckpoint";
    /// Move the simulated clock forward.
    pub const ADVANCE_CLOCK: &str = "advanceClock";
    /// End the current epoch.
    pub const ADVANCE_EPOCH: &str = "advanceEpoch";
}

/// Arguments of [`method::ADVANCE_CLOCK`].
#[derive(Debug, Serialize)]
struct AdvanceClock {
    /// Milliseconds to advance by.
    duration: u32,
}

impl<B: Boundary> Simulator<B> {
    /// Returns the most recent checkpoint.
    pub fn get_latest_checkpoint(&self) -> Result<VerifiedCheckpoint> {
        self.call(method::GET_LATEST_CHECKPOINT, &())
    }

    /// Creates a checkpoint and returns it.
    pub fn create_checkpoint(&self) -> Result<VerifiedCheckpoint> {
        self.call(method::CREATE_CHECKPOINT, &())
    }

    /// Advances the simulated clock by `by`, at millisecond precision.
    ///
    /// The engine takes a 32-bit millisecond count; anything longer fails
    /// with [`Error::EncodingFailed`] before reaching the engine.
    pub fn advance_clock(&self, by: Duration) -> Result<()> {
        let duration = u32::try_from(by.as_millis())
            .map_err(|_| Error::EncodingFailed(CodecError::OutOfRange("duration")))?;
        self.call(method::ADVANCE_CLOCK, &AdvanceClock { duration })
    }

    /// Advances to the next epoch.
    pub fn advance_epoch(&self) -> Result<()> {
        self.call(method::ADVANCE_EPOCH, &())
    }
}
