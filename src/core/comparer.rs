//! State equality strategies.

use crate::core::id::StateId;

/// Equality strategy over state handles, injected at machine construction.
///
/// The default compares handles by identity. A custom comparer lets callers
/// treat states as equal by category or by an external key instead of by
/// instance; the machine consults it for same-state no-op checks, for the
/// preemption skip check, and during LCA computation.
///
/// # Example
///
/// ```rust
/// use instinct::builder::FlatMachineBuilder;
/// use instinct::core::{State, StateComparer};
///
/// struct Idle;
/// impl State<()> for Idle {}
/// struct Rest;
/// impl State<()> for Rest {}
///
/// let mut builder = FlatMachineBuilder::new();
/// let idle = builder.add_state(Idle);
/// let rest = builder.add_state(Rest);
///
/// // Treat both calm states as interchangeable.
/// let calm = [idle, rest];
/// let comparer = StateComparer::new(move |a, b| {
///     a == b || (calm.contains(&a) && calm.contains(&b))
/// });
///
/// assert!(comparer.same(idle, rest));
/// # let _machine = builder.initial(idle).comparer(comparer).build(()).unwrap();
/// ```
pub struct StateComparer {
    eq: Box<dyn Fn(StateId, StateId) -> bool>,
}

impl StateComparer {
    /// Wrap an equality predicate.
    pub fn new<F>(eq: F) -> Self
    where
        F: Fn(StateId, StateId) -> bool + 'static,
    {
        Self { eq: Box::new(eq) }
    }

    /// Identity comparison: two handles are equal when they are the same id.
    pub fn identity() -> Self {
        Self::new(|a, b| a == b)
    }

    /// Check whether two states are the same under this strategy.
    pub fn same(&self, a: StateId, b: StateId) -> bool {
        (self.eq)(a, b)
    }
}

impl Default for StateComparer {
    fn default() -> Self {
        Self::identity()
    }
}
