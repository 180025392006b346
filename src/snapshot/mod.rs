//! Snapshot and restore functionality for machines.
//!
//! A snapshot captures a machine's bookkeeping — current and previous
//! state, lifecycle flags, and the transition trace — so that behavior
//! sessions can be persisted and resumed. Behaviors themselves are not
//! serialized: restoring brings the machine back to a position, not the
//! internal data of the states at that position.

use crate::core::StateId;
use crate::trace::TransitionTrace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's bookkeeping.
///
/// # Example
///
/// ```rust
/// use instinct::{FlatMachine, MachineSnapshot, State};
///
/// struct Idle;
/// impl State<()> for Idle {}
///
/// let mut builder = FlatMachine::builder();
/// let idle = builder.add_state(Idle);
/// let machine = builder.initial(idle).build(()).unwrap();
///
/// let json = machine.snapshot().to_json().unwrap();
/// let snapshot = MachineSnapshot::from_json(&json).unwrap();
/// assert_eq!(snapshot.current, idle);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version.
    pub version: u32,

    /// Unique snapshot identifier.
    pub id: String,

    /// When the snapshot was captured.
    pub timestamp: DateTime<Utc>,

    /// Current state (or leaf) at capture time.
    pub current: StateId,

    /// Previous state (or leaf) at capture time.
    pub previous: Option<StateId>,

    /// Whether the machine was started.
    pub started: bool,

    /// Whether the machine was running.
    pub running: bool,

    /// Transition trace up to the capture.
    pub trace: TransitionTrace,
}

impl MachineSnapshot {
    pub(crate) fn capture(
        current: StateId,
        previous: Option<StateId>,
        started: bool,
        running: bool,
        trace: TransitionTrace,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current,
            previous,
            started,
            running,
            trace,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.ensure_supported()?;
        Ok(snapshot)
    }

    /// Serialize to a compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format, rejecting unsupported versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.ensure_supported()?;
        Ok(snapshot)
    }

    pub(crate) fn ensure_supported(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}
