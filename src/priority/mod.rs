//! Priority-state data: transitions, per-state configuration, condition
//! latches, and the ordering used to arbitrate between them.

mod ordering;

pub use ordering::{PriorityOrdering, TransitionCandidate};

use crate::core::{Signal, StateId};
use crate::tree::StateTree;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering as CmpOrdering;

/// Edge candidate pointing at a target state.
///
/// The target is fixed at construction; an existing transition cannot be
/// rebound. Whether the transition is currently allowed is read from the
/// target's enter latch during the owning state's scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    target: StateId,
}

impl Transition {
    /// A transition into `target`.
    pub fn to(target: StateId) -> Self {
        Self { target }
    }

    /// The state this transition leads to.
    pub fn target(&self) -> StateId {
        self.target
    }
}

/// Per-state priority configuration.
///
/// This is the loadable description of a priority state — typically
/// deserialized from application data — expanded into condition latches and
/// an empty transition list when the state is added to a machine.
///
/// # Example
///
/// ```rust
/// use instinct::priority::PriorityStateData;
///
/// let data: PriorityStateData =
///     serde_json::from_str(r#"{ "priority": 3, "interruptible": true }"#).unwrap();
///
/// assert_eq!(data.priority, 3);
/// assert!(data.interruptible);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityStateData {
    /// Rank used by the machine's ordering; higher wins under the stock
    /// descending order.
    pub priority: i32,
    /// Whether a higher-ranked candidate may cut this state's execution
    /// short before its own exit condition fires.
    #[serde(default)]
    pub interruptible: bool,
}

impl PriorityStateData {
    /// Convenience constructor.
    pub fn new(priority: i32, interruptible: bool) -> Self {
        Self {
            priority,
            interruptible,
        }
    }
}

/// Runtime payload a priority state carries inside the tree.
pub(crate) struct PriorityProfile {
    pub(crate) priority: i32,
    pub(crate) interruptible: bool,
    pub(crate) enter_signal: Signal,
    pub(crate) exit_signal: Signal,
    pub(crate) transitions: Vec<Transition>,
}

impl PriorityProfile {
    pub(crate) fn new(data: PriorityStateData) -> Self {
        Self {
            priority: data.priority,
            interruptible: data.interruptible,
            enter_signal: Signal::new(),
            exit_signal: Signal::new(),
            transitions: Vec::new(),
        }
    }
}

/// Sort a transition list with the configured ordering, resolving each
/// target's priority through the tree. Targets without priority data sort
/// last. The sort is stable, so equal-ranked transitions keep their
/// assignment order.
pub(crate) fn sort_transitions<E>(
    tree: &StateTree<E>,
    ordering: &PriorityOrdering,
    transitions: &mut [Transition],
) {
    transitions.sort_by(|a, b| {
        let pa = tree.profile(a.target()).map(|p| p.priority);
        let pb = tree.profile(b.target()).map(|p| p.priority);
        match (pa, pb) {
            (None, _) => CmpOrdering::Greater,
            (_, None) => CmpOrdering::Less,
            (Some(pa), Some(pb)) => ordering.compare(
                TransitionCandidate {
                    state: a.target(),
                    priority: pa,
                },
                TransitionCandidate {
                    state: b.target(),
                    priority: pb,
                },
            ),
        }
    });
}
