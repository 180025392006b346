//! Hierarchical state machines.
//!
//! States form an ancestry tree; the machine drives the set of nodes
//! between the current leaf and the root (the active path). Transitions
//! exit and enter only the minimal slice of the tree between two leaves:
//! nodes above their lowest common ancestor stay untouched.

use crate::builder::HierarchicalMachineBuilder;
use crate::core::{MachineError, Signal, StateComparer, StateId, TransitionRequest};
use crate::priority::{sort_transitions, PriorityOrdering, Transition, TransitionCandidate};
use crate::snapshot::{MachineSnapshot, SnapshotError};
use crate::trace::{TransitionObserver, TransitionTrace};
use crate::tree::StateTree;
use std::cmp::Ordering;

/// State machine over an ancestry tree of states.
///
/// The current position is a leaf; the materialized active path runs from
/// that leaf up to (but excluding) the root sentinel. Each tick executes
/// the path deepest-first, so the most specific behavior gets first refusal
/// on handling the tick. Transitions exit leaf-to-LCA and enter
/// LCA-to-leaf, tearing down the most specific behavior first and
/// initializing ancestors before their children.
///
/// Priority states (added with
/// [`priority_child`](HierarchicalMachineBuilder::priority_child)) carry a
/// rank, an interruptible flag, enter/exit condition latches, and a sorted
/// transition list that is scanned after their own tick logic.
///
/// # Example
///
/// ```rust
/// use instinct::{HierarchicalMachine, State, TransitionRequest};
///
/// struct Named(&'static str);
///
/// impl State<Vec<String>> for Named {
///     fn enter(&mut self, log: &mut Vec<String>) {
///         log.push(format!("enter {}", self.0));
///     }
///     fn exit(&mut self, log: &mut Vec<String>) {
///         log.push(format!("exit {}", self.0));
///     }
/// }
///
/// let mut builder = HierarchicalMachine::builder();
/// let root = builder.root();
/// let combat = builder.child(root, Named("combat")).unwrap();
/// let strike = builder.child(combat, Named("strike")).unwrap();
/// let scout = builder.child(root, Named("scout")).unwrap();
/// let sneak = builder.child(scout, Named("sneak")).unwrap();
///
/// let mut machine = builder.initial_leaf(strike).build(Vec::new()).unwrap();
/// machine.start(true).unwrap();
/// machine.run().unwrap();
/// machine.owner_mut().clear();
///
/// machine.transition_to(TransitionRequest::to(sneak)).unwrap();
///
/// // Exits climb to the shared ancestor (the root); enters descend from it.
/// assert_eq!(
///     machine.owner(),
///     &[
///         "exit strike".to_string(),
///         "exit combat".into(),
///         "enter scout".into(),
///         "enter sneak".into()
///     ]
/// );
/// assert_eq!(machine.active_path(), [sneak, scout]);
/// ```
pub struct HierarchicalMachine<E> {
    tree: StateTree<E>,
    owner: E,
    current: StateId,
    previous: Option<StateId>,
    active_path: Vec<StateId>,
    comparer: StateComparer,
    ordering: PriorityOrdering,
    trace: TransitionTrace,
    observer: Option<TransitionObserver>,
    started: bool,
    running: bool,
}

impl<E> HierarchicalMachine<E> {
    /// Start building a machine.
    pub fn builder() -> HierarchicalMachineBuilder<E> {
        HierarchicalMachineBuilder::new()
    }

    pub(crate) fn from_parts(
        tree: StateTree<E>,
        initial: StateId,
        comparer: StateComparer,
        ordering: PriorityOrdering,
        owner: E,
    ) -> Self {
        let active_path = tree.path_to_root(initial);
        Self {
            tree,
            owner,
            current: initial,
            previous: None,
            active_path,
            comparer,
            ordering,
            trace: TransitionTrace::new(),
            observer: None,
            started: false,
            running: false,
        }
    }

    /// Tick the machine: every node on the active path executes, deepest
    /// first. After a priority node's own logic, its transition table is
    /// scanned. A transition that changes the current leaf ends the walk —
    /// the remainder of the old path has just been exited and must not
    /// execute stale.
    pub fn execute(&mut self, dt: f32) -> Result<(), MachineError> {
        if !self.running || !self.started {
            return Ok(());
        }
        let mut index = 0;
        while index < self.active_path.len() {
            let id = self.active_path[index];
            let mut request = self.tree.node_mut(id).behavior.execute(&mut self.owner, dt);
            if request.is_none() {
                request = self.select_transition(id);
            }
            if let Some(request) = request {
                let before = self.current;
                self.transition_to(request)?;
                if !self.comparer.same(before, self.current) {
                    break;
                }
            }
            index += 1;
        }
        Ok(())
    }

    /// Transition the machine to a new leaf.
    ///
    /// The machine is stopped for the duration of the traversal — a
    /// re-entrant transition fired from an exit/enter hook finds it stopped
    /// and cannot corrupt the walk — and is started and running again once
    /// the new path is in place. Exits climb from the old leaf up to (but
    /// excluding) the lowest common ancestor; enters descend from below the
    /// LCA to the new leaf.
    pub fn transition_to(&mut self, request: TransitionRequest) -> Result<(), MachineError> {
        let target = request.target();
        if !self.tree.contains(target) {
            return Err(MachineError::UnknownState(target));
        }
        if target == self.tree.root() {
            return Err(MachineError::RootLeaf);
        }
        if !request.allows_same_state() && self.comparer.same(self.current, target) {
            return Ok(());
        }

        self.stop();

        let from = self.current;
        self.previous = Some(from);

        let lca = self.tree.lca(self.current, target, &self.comparer);

        if request.exits() && !self.active_path.is_empty() {
            let mut cursor = self.current;
            while !self.comparer.same(cursor, lca) {
                self.exit_node(cursor);
                match self.tree.ancestor(cursor) {
                    Some(up) => cursor = up,
                    None => break,
                }
            }
        }

        self.active_path = self.tree.path_to_root(target);
        self.current = target;

        if request.enters() {
            // Nodes strictly below the LCA, most general first.
            let mut rising = Vec::new();
            let mut cursor = target;
            while !self.comparer.same(cursor, lca) {
                rising.push(cursor);
                match self.tree.ancestor(cursor) {
                    Some(up) => cursor = up,
                    None => break,
                }
            }
            for index in (0..rising.len()).rev() {
                self.enter_node(rising[index]);
            }
        }

        // Re-start half of the bracket.
        self.started = true;
        self.running = true;

        self.trace.record(from, target);
        if let Some(observer) = self.observer.as_mut() {
            observer(from, target);
        }
        Ok(())
    }

    /// Transition back to the previously active leaf.
    pub fn revert_to_previous(&mut self) -> Result<(), MachineError> {
        let previous = self.previous.ok_or(MachineError::NoPreviousState)?;
        self.transition_to(TransitionRequest::to(previous))
    }

    /// Mark the machine started, optionally entering the whole active path
    /// root-to-leaf. The machine must be stopped before it can be started
    /// again.
    pub fn start(&mut self, do_enter: bool) -> Result<(), MachineError> {
        if self.running {
            return Err(MachineError::AlreadyRunning);
        }
        if do_enter {
            for index in (0..self.active_path.len()).rev() {
                let id = self.active_path[index];
                self.enter_node(id);
            }
        }
        self.started = true;
        Ok(())
    }

    /// Begin running; requires a prior `start`.
    pub fn run(&mut self) -> Result<(), MachineError> {
        if !self.started {
            return Err(MachineError::NotStarted);
        }
        self.running = true;
        Ok(())
    }

    /// Stop the machine; it must be started again before it runs.
    pub fn stop(&mut self) {
        self.started = false;
        self.running = false;
    }

    /// Suspend ticking without losing the started flag.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume ticking after a pause.
    pub fn resume(&mut self) -> Result<(), MachineError> {
        self.run()
    }

    /// Whether the machine has been started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the machine is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The currently active leaf.
    pub fn current_leaf(&self) -> StateId {
        self.current
    }

    /// The leaf active before the last transition, if any.
    pub fn previous_leaf(&self) -> Option<StateId> {
        self.previous
    }

    /// The active path, leaf first, excluding the root.
    pub fn active_path(&self) -> &[StateId] {
        &self.active_path
    }

    /// Handle of the root sentinel.
    pub fn root(&self) -> StateId {
        self.tree.root()
    }

    /// Ancestor of `id`; `None` for the root or an unknown id.
    pub fn ancestor(&self, id: StateId) -> Option<StateId> {
        self.tree.ancestor(id)
    }

    /// Ancestor hops between `id` and the root.
    pub fn depth(&self, id: StateId) -> Result<usize, MachineError> {
        if !self.tree.contains(id) {
            return Err(MachineError::UnknownState(id));
        }
        Ok(self.tree.depth(id))
    }

    /// Lowest common ancestor of two nodes under the machine's comparer.
    pub fn lca(&self, a: StateId, b: StateId) -> Result<StateId, MachineError> {
        if !self.tree.contains(a) {
            return Err(MachineError::UnknownState(a));
        }
        if !self.tree.contains(b) {
            return Err(MachineError::UnknownState(b));
        }
        Ok(self.tree.lca(a, b, &self.comparer))
    }

    /// Compare two states under the machine's comparer.
    pub fn same_state(&self, a: StateId, b: StateId) -> bool {
        self.comparer.same(a, b)
    }

    /// Whether `id` names a state in this machine's tree.
    pub fn contains(&self, id: StateId) -> bool {
        self.tree.contains(id)
    }

    /// The owned entity.
    pub fn owner(&self) -> &E {
        &self.owner
    }

    /// Mutable access to the owned entity.
    pub fn owner_mut(&mut self) -> &mut E {
        &mut self.owner
    }

    /// Replace a priority state's outgoing transitions. The list must be
    /// non-empty, every target must belong to the tree, and it is re-sorted
    /// with the machine's ordering on assignment.
    pub fn set_transitions(
        &mut self,
        state: StateId,
        transitions: Vec<Transition>,
    ) -> Result<(), MachineError> {
        if !self.tree.contains(state) {
            return Err(MachineError::UnknownState(state));
        }
        if transitions.is_empty() {
            return Err(MachineError::EmptyTransitions(state));
        }
        for transition in &transitions {
            if !self.tree.contains(transition.target()) {
                return Err(MachineError::UnknownState(transition.target()));
            }
        }
        if self.tree.profile(state).is_none() {
            return Err(MachineError::NotPriorityState(state));
        }

        let mut transitions = transitions;
        sort_transitions(&self.tree, &self.ordering, &mut transitions);
        if let Some(profile) = self.tree.profile_mut(state) {
            profile.transitions = transitions;
        }
        Ok(())
    }

    /// A priority state's sorted transition list.
    pub fn transitions(&self, state: StateId) -> Option<&[Transition]> {
        self.tree
            .profile(state)
            .map(|profile| profile.transitions.as_slice())
    }

    /// A priority state's enter-condition latch.
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

    /// The transitions this machine has performed.
    pub fn trace(&self) -> &TransitionTrace {
        &self.trace
    }

    /// Install a callback invoked after every completed transition.
    pub fn observe_transitions<F>(&mut self, observer: F)
    where
        F: FnMut(StateId, StateId) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Capture the machine's bookkeeping as a serializable snapshot.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot::capture(
            self.current,
            self.previous,
            self.started,
            self.running,
            self.trace.clone(),
        )
    }

    /// Restore bookkeeping from a snapshot and rebuild the active path.
    /// State ids must belong to this machine's tree; no enter/exit hooks
    /// run.
    pub fn restore(&mut self, snapshot: &MachineSnapshot) -> Result<(), SnapshotError> {
        snapshot.ensure_supported()?;
        if !self.tree.contains(snapshot.current) || snapshot.current == self.tree.root() {
            return Err(SnapshotError::ValidationFailed(format!(
                "current leaf {:?} is not a leaf of this machine's tree",
                snapshot.current
            )));
        }
        if let Some(previous) = snapshot.previous {
            if !self.tree.contains(previous) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "previous leaf {:?} is not part of this machine's tree",
                    previous
                )));
            }
        }
        self.current = snapshot.current;
        self.previous = snapshot.previous;
        self.started = snapshot.started;
        self.running = snapshot.running;
        self.trace = snapshot.trace.clone();
        self.active_path = self.tree.path_to_root(self.current);
        Ok(())
    }

    /// Scan a priority node's transition table, per the arbitration rules:
    /// the scan only runs when the node's exit latch is raised or the node
    /// is interruptible; candidates are considered in sorted order; and an
    /// interruption is only authorized for a candidate that strictly
    /// outranks the node itself.
    fn select_transition(&self, id: StateId) -> Option<TransitionRequest> {
        let profile = self.tree.profile(id)?;
        let exit_raised = profile.exit_signal.is_raised();
        if !exit_raised && !profile.interruptible {
            return None;
        }
        let is_interruption = !exit_raised;
        let own = TransitionCandidate {
            state: id,
            priority: profile.priority,
        };

        for transition in &profile.transitions {
            let target = transition.target();
            let Some(target_profile) = self.tree.profile(target) else {
                continue;
            };
            if !target_profile.enter_signal.is_raised() {
                continue;
            }
            if self.comparer.same(target, id) {
                continue;
            }

            let candidate = TransitionCandidate {
                state: target,
                priority: target_profile.priority,
            };
            if is_interruption && self.ordering.compare(own, candidate) != Ordering::Greater {
                // Equal rank is not enough to interrupt; the scan stops.
                break;
            }
            return Some(TransitionRequest::to(target));
        }
        None
    }

    fn enter_node(&mut self, id: StateId) {
        if let Some(profile) = self.tree.profile(id) {
            profile.enter_signal.clear();
        }
        self.tree.node_mut(id).behavior.enter(&mut self.owner);
    }

    fn exit_node(&mut self, id: StateId) {
        if let Some(profile) = self.tree.profile(id) {
            profile.exit_signal.clear();
        }
        self.tree.node_mut(id).behavior.exit(&mut self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::priority::PriorityStateData;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Named(&'static str);

    impl State<Vec<String>> for Named {
        fn enter(&mut self, log: &mut Vec<String>) {
            log.push(format!("enter {}", self.0));
        }

        fn execute(&mut self, log: &mut Vec<String>, _dt: f32) -> Option<TransitionRequest> {
            log.push(format!("execute {}", self.0));
            None
        }

        fn exit(&mut self, log: &mut Vec<String>) {
            log.push(format!("exit {}", self.0));
        }
    }

    /// Requests a transition to the slotted target on every execute.
    struct Jump {
        target: Rc<Cell<Option<StateId>>>,
    }

    impl State<Vec<String>> for Jump {
        fn execute(&mut self, log: &mut Vec<String>, _dt: f32) -> Option<TransitionRequest> {
            log.push("execute jump".to_string());
            self.target.get().map(TransitionRequest::to)
        }

        fn exit(&mut self, log: &mut Vec<String>) {
            log.push("exit jump".to_string());
        }
    }

    /// root → a → {c, d}, root → b → {e, f}; initial leaf is c.
    fn two_branch_machine() -> (HierarchicalMachine<Vec<String>>, [StateId; 6]) {
        let mut builder = HierarchicalMachine::builder();
        let root = builder.root();
        let a = builder.child(root, Named("a")).unwrap();
        let b = builder.child(root, Named("b")).unwrap();
        let c = builder.child(a, Named("c")).unwrap();
        let d = builder.child(a, Named("d")).unwrap();
        let e = builder.child(b, Named("e")).unwrap();
        let f = builder.child(b, Named("f")).unwrap();
        let machine = builder.initial_leaf(c).build(Vec::new()).unwrap();
        (machine, [a, b, c, d, e, f])
    }

    fn running_two_branch_machine() -> (HierarchicalMachine<Vec<String>>, [StateId; 6]) {
        let (mut machine, ids) = two_branch_machine();
        machine.start(false).unwrap();
        machine.run().unwrap();
        (machine, ids)
    }

    #[test]
    fn start_enters_the_path_root_to_leaf() {
        let (mut machine, [a, _, c, ..]) = two_branch_machine();

        machine.start(true).unwrap();

        assert_eq!(
            machine.owner(),
            &["enter a".to_string(), "enter c".into()]
        );
        assert_eq!(machine.active_path(), [c, a]);
    }

    #[test]
    fn cross_branch_transition_exits_to_the_root_and_enters_down() {
        let (mut machine, [_, b, c, _, e, _]) = running_two_branch_machine();

        assert_eq!(machine.lca(c, e).unwrap(), machine.root());

        machine.transition_to(TransitionRequest::to(e)).unwrap();

        assert_eq!(
            machine.owner(),
            &[
                "exit c".to_string(),
                "exit a".into(),
                "enter b".into(),
                "enter e".into()
            ]
        );
        assert_eq!(machine.current_leaf(), e);
        assert_eq!(machine.previous_leaf(), Some(c));
        assert_eq!(machine.active_path(), [e, b]);
    }

    #[test]
    fn sibling_transition_spares_the_shared_parent() {
        let (mut machine, [a, _, _, d, ..]) = running_two_branch_machine();

        machine.transition_to(TransitionRequest::to(d)).unwrap();

        assert_eq!(
            machine.owner(),
            &["exit c".to_string(), "enter d".into()]
        );
        assert_eq!(machine.active_path(), [d, a]);
    }

    #[test]
    fn transition_to_an_active_ancestor_only_exits() {
        let (mut machine, [a, ..]) = running_two_branch_machine();

        machine.transition_to(TransitionRequest::to(a)).unwrap();

        assert_eq!(machine.owner(), &["exit c".to_string()]);
        assert_eq!(machine.current_leaf(), a);
        assert_eq!(machine.active_path(), [a]);
    }

    #[test]
    fn execute_runs_the_path_deepest_first() {
        let (mut machine, ..) = running_two_branch_machine();

        machine.execute(0.1).unwrap();

        assert_eq!(
            machine.owner(),
            &["execute c".to_string(), "execute a".into()]
        );
    }

    #[test]
    fn leaf_change_mid_walk_stops_the_tick() {
        let slot = Rc::new(Cell::new(None));
        let mut builder = HierarchicalMachine::builder();
        let root = builder.root();
        let a = builder.child(root, Named("a")).unwrap();
        let d = builder.child(a, Named("d")).unwrap();
        let jump = builder.child(a, Jump { target: slot.clone() }).unwrap();
        slot.set(Some(d));
        let mut machine = builder.initial_leaf(jump).build(Vec::new()).unwrap();
        machine.start(false).unwrap();
        machine.run().unwrap();

        machine.execute(0.1).unwrap();

        // The jump leaf transitioned away, so its ancestor must not execute
        // from the abandoned path this tick.
        assert_eq!(
            machine.owner(),
            &[
                "execute jump".to_string(),
                "exit jump".into(),
                "enter d".into()
            ]
        );
        assert_eq!(machine.current_leaf(), d);
    }

    #[test]
    fn transition_restarts_the_machine() {
        let (mut machine, [.., e, _]) = two_branch_machine();
        machine.stop();

        machine.transition_to(TransitionRequest::to(e)).unwrap();

        assert!(machine.is_started());
        assert!(machine.is_running());
    }

    #[test]
    fn revert_restores_the_prior_leaf_and_path() {
        let (mut machine, [a, _, c, _, e, _]) = running_two_branch_machine();

        machine.transition_to(TransitionRequest::to(e)).unwrap();
        machine.revert_to_previous().unwrap();

        assert_eq!(machine.current_leaf(), c);
        assert_eq!(machine.active_path(), [c, a]);
        assert_eq!(machine.previous_leaf(), Some(e));
    }

    #[test]
    fn revert_without_history_fails() {
        let (mut machine, ..) = two_branch_machine();

        assert!(matches!(
            machine.revert_to_previous(),
            Err(MachineError::NoPreviousState)
        ));
    }

    #[test]
    fn the_root_is_not_a_valid_target() {
        let (mut machine, ..) = running_two_branch_machine();
        let root = machine.root();

        assert!(matches!(
            machine.transition_to(TransitionRequest::to(root)),
            Err(MachineError::RootLeaf)
        ));
        assert!(matches!(
            machine.transition_to(TransitionRequest::to(StateId::new(42))),
            Err(MachineError::UnknownState(_))
        ));
    }

    #[test]
    fn active_path_has_no_duplicates_and_reaches_the_root() {
        let (mut machine, [.., f]) = running_two_branch_machine();

        machine.transition_to(TransitionRequest::to(f)).unwrap();

        let path = machine.active_path();
        assert_eq!(path[0], machine.current_leaf());
        for (index, id) in path.iter().enumerate() {
            assert!(!path[index + 1..].contains(id));
        }
        let last = *path.last().unwrap();
        assert_eq!(machine.ancestor(last), Some(machine.root()));
    }

    // Priority-state arbitration.

    fn named_priority_machine(
        low_interruptible: bool,
    ) -> (HierarchicalMachine<Vec<String>>, [StateId; 4]) {
        let mut builder = HierarchicalMachine::builder();
        let root = builder.root();
        let low = builder
            .priority_child(root, Named("low"), PriorityStateData::new(1, low_interruptible))
            .unwrap();
        let peer = builder
            .priority_child(root, Named("peer"), PriorityStateData::new(1, false))
            .unwrap();
        let mid = builder
            .priority_child(root, Named("mid"), PriorityStateData::new(2, false))
            .unwrap();
        let high = builder
            .priority_child(root, Named("high"), PriorityStateData::new(5, false))
            .unwrap();
        builder
            .transitions(
                low,
                vec![
                    Transition::to(peer),
                    Transition::to(mid),
                    Transition::to(high),
                ],
            )
            .unwrap();
        let mut machine = builder.initial_leaf(low).build(Vec::new()).unwrap();
        machine.start(false).unwrap();
        machine.run().unwrap();
        (machine, [low, peer, mid, high])
    }

    #[test]
    fn transition_lists_sort_by_descending_target_priority() {
        let (machine, [low, peer, mid, high]) = named_priority_machine(false);

        let sorted: Vec<StateId> = machine
            .transitions(low)
            .unwrap()
            .iter()
            .map(|t| t.target())
            .collect();

        assert_eq!(sorted, vec![high, mid, peer]);
    }

    #[test]
    fn non_interruptible_state_without_exit_latch_never_transitions() {
        let (mut machine, [low, _, mid, high]) = named_priority_machine(false);
        machine.enter_signal(mid).unwrap().raise();
        machine.enter_signal(high).unwrap().raise();

        machine.execute(0.1).unwrap();

        assert_eq!(machine.current_leaf(), low);
        assert_eq!(machine.trace().len(), 0);
    }

    #[test]
    fn interruptible_state_yields_to_a_strictly_higher_candidate() {
        let (mut machine, [_, _, mid, _]) = named_priority_machine(true);
        machine.enter_signal(mid).unwrap().raise();

        machine.execute(0.1).unwrap();

        assert_eq!(machine.current_leaf(), mid);
    }

    #[test]
    fn interruption_tie_keeps_current_state() {
        let (mut machine, [low, peer, ..]) = named_priority_machine(true);
        machine.enter_signal(peer).unwrap().raise();

        machine.execute(0.1).unwrap();

        // Equal priority is not enough to interrupt: ties favor staying.
        assert_eq!(machine.current_leaf(), low);
    }

    #[test]
    fn exit_latch_permits_lower_priority_targets() {
        let (mut machine, [low, peer, ..]) = named_priority_machine(false);
        machine.exit_signal(low).unwrap().raise();
        machine.enter_signal(peer).unwrap().raise();

        machine.execute(0.1).unwrap();

        assert_eq!(machine.current_leaf(), peer);
    }

    #[test]
    fn scan_prefers_the_highest_ranked_raised_candidate() {
        let (mut machine, [low, _, mid, high]) = named_priority_machine(false);
        machine.exit_signal(low).unwrap().raise();
        machine.enter_signal(mid).unwrap().raise();
        machine.enter_signal(high).unwrap().raise();

        machine.execute(0.1).unwrap();

        assert_eq!(machine.current_leaf(), high);
    }

    #[test]
    fn latches_are_consumed_across_the_transition() {
        let (mut machine, [low, _, mid, _]) = named_priority_machine(false);
        machine.exit_signal(low).unwrap().raise();
        machine.enter_signal(mid).unwrap().raise();

        machine.execute(0.1).unwrap();

        assert!(!machine.exit_signal(low).unwrap().is_raised());
        assert!(!machine.enter_signal(mid).unwrap().is_raised());
    }

    #[test]
    fn a_self_targeting_transition_is_skipped() {
        let mut builder = HierarchicalMachine::builder();
        let root = builder.root();
        let solo = builder
            .priority_child(root, Named("solo"), PriorityStateData::new(1, false))
            .unwrap();
        let other = builder
            .priority_child(root, Named("other"), PriorityStateData::new(9, false))
            .unwrap();
        builder
            .transitions(solo, vec![Transition::to(solo), Transition::to(other)])
            .unwrap();
        let mut machine = builder.initial_leaf(solo).build(Vec::new()).unwrap();
        machine.start(false).unwrap();
        machine.run().unwrap();
        machine.exit_signal(solo).unwrap().raise();
        machine.enter_signal(solo).unwrap().raise();

        machine.execute(0.1).unwrap();

        // Its own raised enter latch does not let a state re-elect itself.
        assert_eq!(machine.current_leaf(), solo);
    }

    #[test]
    fn set_transitions_replaces_and_re_sorts_the_list() {
        let (mut machine, [low, peer, mid, high]) = named_priority_machine(false);

        machine
            .set_transitions(low, vec![Transition::to(peer), Transition::to(high)])
            .unwrap();

        let targets: Vec<StateId> = machine
            .transitions(low)
            .unwrap()
            .iter()
            .map(|t| t.target())
            .collect();
        assert_eq!(targets, vec![high, peer]);
        assert!(!targets.contains(&mid));
    }

    #[test]
    fn set_transitions_validates_its_input() {
        let (mut machine, [low, peer, ..]) = named_priority_machine(false);

        assert!(matches!(
            machine.set_transitions(low, Vec::new()),
            Err(MachineError::EmptyTransitions(_))
        ));
        assert!(matches!(
            machine.set_transitions(low, vec![Transition::to(StateId::new(99))]),
            Err(MachineError::UnknownState(_))
        ));
        assert!(matches!(
            machine.set_transitions(machine.root(), vec![Transition::to(peer)]),
            Err(MachineError::NotPriorityState(_))
        ));
    }
}
