//! Priority orderings over transition candidates.

use crate::core::StateId;
use std::cmp::Ordering;

/// A transition target resolved for comparison: the state and the priority
/// it carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionCandidate {
    /// Target state of the candidate transition.
    pub state: StateId,
    /// Priority the target carries.
    pub priority: i32,
}

/// Total order over transition candidates.
///
/// Sorting a state's transition list and authorizing interruptions both use
/// the same ordering: a candidate "outranks" another when it compares
/// strictly earlier. The stock ordering ranks higher priorities first and
/// reports equal priorities as equal, so a stable sort keeps assignment
/// order for ties. Custom orderings may rank by any strict weak order, by
/// state category for instance.
///
/// # Example
///
/// ```rust
/// use std::cmp::Ordering;
/// use instinct::priority::{PriorityOrdering, TransitionCandidate};
/// # use instinct::{HierarchicalMachine, State};
/// # struct Plain;
/// # impl State<()> for Plain {}
/// # let mut builder = HierarchicalMachine::<()>::builder();
/// # let a = builder.child(builder.root(), Plain).unwrap();
/// # let b = builder.child(builder.root(), Plain).unwrap();
///
/// let ordering = PriorityOrdering::descending();
/// let flee = TransitionCandidate { state: a, priority: 9 };
/// let idle = TransitionCandidate { state: b, priority: 1 };
///
/// assert_eq!(ordering.compare(flee, idle), Ordering::Less); // flee sorts first
/// ```
pub struct PriorityOrdering {
    cmp: Box<dyn Fn(TransitionCandidate, TransitionCandidate) -> Ordering>,
}

impl PriorityOrdering {
    /// Wrap a comparison function.
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn(TransitionCandidate, TransitionCandidate) -> Ordering + 'static,
    {
        Self { cmp: Box::new(cmp) }
    }

    /// Descending target priority: higher priorities sort first.
    pub fn descending() -> Self {
        Self::new(|a, b| b.priority.cmp(&a.priority))
    }

    /// Compare two candidates under this ordering.
    pub fn compare(&self, a: TransitionCandidate, b: TransitionCandidate) -> Ordering {
        (self.cmp)(a, b)
    }
}

impl Default for PriorityOrdering {
    fn default() -> Self {
        Self::descending()
    }
}
