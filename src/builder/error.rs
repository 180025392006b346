//! Build errors for machine builders.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when building machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State {0:?} was not created by this builder")]
    UnknownState(StateId),

    #[error("The root sentinel cannot be the initial leaf")]
    RootLeaf,

    #[error("Transition list for state {0:?} is empty. Add at least one transition")]
    EmptyTransitions(StateId),

    #[error("State {0:?} carries no priority data and cannot own transitions")]
    NotPriorityState(StateId),
}
