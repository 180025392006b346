//! Machine runtime errors.

use crate::core::id::StateId;
use thiserror::Error;

/// Errors surfaced by machine entry points.
///
/// All of these are programmer errors caught fail-fast; the core performs no
/// I/O and has no transient failure class, so nothing is ever retried.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The id does not name a state registered with this machine.
    #[error("state {0:?} is not registered with this machine")]
    UnknownState(StateId),

    /// The hierarchical root is a sentinel and can never become the leaf.
    #[error("the root node cannot become the current leaf")]
    RootLeaf,

    /// `start` was called while the machine is running.
    #[error("machine is running; stop it before starting it again")]
    AlreadyRunning,

    /// `run` was called before `start`.
    #[error("machine must be started before it can run")]
    NotStarted,

    /// `revert_to_previous` was called before any transition completed.
    #[error("no previous state recorded to revert to")]
    NoPreviousState,

    /// `set_transitions` was given an empty list.
    #[error("transition list for state {0:?} must not be empty")]
    EmptyTransitions(StateId),

    /// The state carries no priority data, so it cannot own transitions.
    #[error("state {0:?} carries no priority data")]
    NotPriorityState(StateId),
}
