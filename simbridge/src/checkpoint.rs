//! Checkpoint shapes returned by the engine's checkpoint operations.

use serde::{Deserialize, Serialize};

/// A checkpoint summary together with the certifying committee signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct VerifiedCheckpoint {
    /// Checkpoint summary.
    pub data: CheckpointSummary,
    /// Aggregated authority signature over `data`.
    pub auth_signature: AuthSignature,
}

/// Summary of one checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CheckpointSummary {
    /// Epoch the checkpoint belongs to.
    pub epoch: u64,
    /// Position of the checkpoint in the chain.
    pub sequence_number: u64,
    /// Transactions executed up to and including this checkpoint.
    pub network_total_transactions: u64,
    /// Digest of the checkpoint contents.
    pub content_digest: String,
    /// Digest of the previous checkpoint, absent for genesis.
    #[serde(default)]
    pub previous_digest: Option<String>,
    /// Gas costs accumulated over the epoch so far.
    pub epoch_rolling_gas_cost_summary: GasCostSummary,
    /// Checkpoint timestamp in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Commitments, opaque to the bridge.
    #[serde(default)]
    pub checkpoint_commitments: Vec<serde_json::Value>,
    /// Present only on the last checkpoint of an epoch.
    #[serde(default)]
    pub end_of_epoch_data: Option<serde_json::Value>,
    /// Version-specific opaque bytes.
    #[serde(default)]
    pub version_specific_data: Vec<u8>,
}

/// Gas cost totals. Amounts are decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct GasCostSummary {
    /// Computation fees charged.
    pub computation_cost: String,
    /// Portion of computation fees burned.
    pub computation_cost_burned: String,
    /// Storage fees charged.
    pub storage_cost: String,
    /// Storage fees refunded.
    pub storage_rebate: String,
    /// Storage fees retained regardless of rebate.
    pub non_refundable_storage_fee: String,
}

/// Committee signature over a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AuthSignature {
    /// Epoch of the signing committee.
    pub epoch: u64,
    /// Aggregated signature, base64.
    pub signature: String,
    /// Serialized bitmap of the signers.
    pub signers_map: Vec<u8>,
}
