//! Builder for hierarchical machines.

use crate::builder::error::BuildError;
use crate::core::{Signal, State, StateComparer, StateId};
use crate::hierarchical::HierarchicalMachine;
use crate::priority::{
    sort_transitions, PriorityOrdering, PriorityProfile, PriorityStateData, Transition,
};
use crate::tree::StateTree;

/// Builder for [`HierarchicalMachine`] construction.
///
/// The builder owns the tree as it grows: the root sentinel exists from the
/// start, and every state is added under an already-existing parent, which
/// is what keeps the ancestry a simple rooted tree. Priority states are
/// added with their [`PriorityStateData`]; their transition lists are
/// validated as they are declared and sorted once at build time.
///
/// # Example
///
/// ```rust
/// use instinct::{HierarchicalMachine, State};
/// use instinct::priority::{PriorityStateData, Transition};
///
/// struct Plain;
/// impl State<()> for Plain {}
///
/// let mut builder = HierarchicalMachine::builder();
/// let root = builder.root();
/// let calm = builder
///     .priority_child(root, Plain, PriorityStateData::new(1, true))
///     .unwrap();
/// let alert = builder
///     .priority_child(root, Plain, PriorityStateData::new(4, false))
///     .unwrap();
/// builder.transitions(calm, vec![Transition::to(alert)]).unwrap();
///
/// let alert_trigger = builder.enter_signal(alert).unwrap();
/// let machine = builder.initial_leaf(calm).build(()).unwrap();
///
/// alert_trigger.raise(); // external event source flips the latch
/// assert_eq!(machine.current_leaf(), calm);
/// ```
pub struct HierarchicalMachineBuilder<E> {
    tree: StateTree<E>,
    initial: Option<StateId>,
    comparer: StateComparer,
    ordering: PriorityOrdering,
    pending: Vec<(StateId, Vec<Transition>)>,
}

impl<E> HierarchicalMachineBuilder<E> {
    /// Create a new builder holding only the root sentinel.
    pub fn new() -> Self {
        Self {
            tree: StateTree::new(),
            initial: None,
            comparer: StateComparer::identity(),
            ordering: PriorityOrdering::descending(),
            pending: Vec::new(),
        }
    }

    /// Handle of the implicit root sentinel.
    pub fn root(&self) -> StateId {
        self.tree.root()
    }

    /// Add a plain hierarchical state under `parent`.
    pub fn child(
        &mut self,
        parent: StateId,
        state: impl State<E> + 'static,
    ) -> Result<StateId, BuildError> {
        self.tree
            .add_child(parent, Box::new(state), None)
            .ok_or(BuildError::UnknownState(parent))
    }

    /// Add a priority state under `parent`.
    pub fn priority_child(
        &mut self,
        parent: StateId,
        state: impl State<E> + 'static,
        data: PriorityStateData,
    ) -> Result<StateId, BuildError> {
        self.tree
            .add_child(parent, Box::new(state), Some(PriorityProfile::new(data)))
            .ok_or(BuildError::UnknownState(parent))
    }

    /// Declare a priority state's outgoing transitions. The list must be
    /// non-empty and every target must already exist; it is sorted with the
    /// configured ordering at build time.
    pub fn transitions(
        &mut self,
        state: StateId,
        transitions: Vec<Transition>,
    ) -> Result<(), BuildError> {
        if !self.tree.contains(state) {
            return Err(BuildError::UnknownState(state));
        }
        if self.tree.profile(state).is_none() {
            return Err(BuildError::NotPriorityState(state));
        }
        if transitions.is_empty() {
            return Err(BuildError::EmptyTransitions(state));
        }
        for transition in &transitions {
            if !self.tree.contains(transition.target()) {
                return Err(BuildError::UnknownState(transition.target()));
            }
        }
        self.pending.push((state, transitions));
        Ok(())
    }

    /// A priority state's enter-condition latch, for wiring to external
    /// triggers before the machine is built.
    pub fn enter_signal(&self, state: StateId) -> Option<Signal> {
        self.tree
            .profile(state)
            .map(|profile| profile.enter_signal.clone())
    }

    /// A priority state's exit-condition latch.
    pub fn exit_signal(&self, state: StateId) -> Option<Signal> {
        self.tree
            .profile(state)
            .map(|profile| profile.exit_signal.clone())
    }

    /// Set the initial leaf (required). The root sentinel is not a leaf.
    pub fn initial_leaf(mut self, leaf: StateId) -> Self {
        self.initial = Some(leaf);
        self
    }

    /// Replace the identity comparer.
    pub fn comparer(mut self, comparer: StateComparer) -> Self {
        self.comparer = comparer;
        self
    }

    /// Replace the descending-priority ordering.
    pub fn ordering(mut self, ordering: PriorityOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Build the machine around `owner`.
    /// Returns an error if required fields are missing.
    pub fn build(self, owner: E) -> Result<HierarchicalMachine<E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if !self.tree.contains(initial) {
            return Err(BuildError::UnknownState(initial));
        }
        if initial == self.tree.root() {
            return Err(BuildError::RootLeaf);
        }

        let mut tree = self.tree;
        for (state, mut transitions) in self.pending {
            sort_transitions(&tree, &self.ordering, &mut transitions);
            if let Some(profile) = tree.profile_mut(state) {
                profile.transitions = transitions;
            }
        }

        Ok(HierarchicalMachine::from_parts(
            tree,
            initial,
            self.comparer,
            self.ordering,
            owner,
        ))
    }
}

impl<E> Default for HierarchicalMachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
