//! Preemptive flat machines.

use crate::builder::PreemptiveMachineBuilder;
use crate::core::{MachineError, StateId, TransitionRequest};
use crate::flat::FlatMachine;
use crate::snapshot::{MachineSnapshot, SnapshotError};
use crate::trace::TransitionTrace;

/// Flat machine with one designated preemptive state.
///
/// Every tick, before the current state executes, the preemptive state's
/// [`evaluate_preemption`](crate::core::State::evaluate_preemption) hook is
/// consulted and any transition it requests is applied. When that evaluation changes the
/// current state (under the machine's comparer), the normal `execute` is
/// skipped for the tick: the freshly entered state gets its first `execute`
/// on the next tick, and the state that was just exited is never executed
/// stale.
///
/// The preemptive state is an ordinary member of the state set — once
/// transitioned into, it enters, executes, and exits like any other state.
pub struct PreemptiveMachine<E> {
    machine: FlatMachine<E>,
    preemptive: Option<StateId>,
}

impl<E> PreemptiveMachine<E> {
    /// Start building a machine.
    pub fn builder() -> PreemptiveMachineBuilder<E> {
        PreemptiveMachineBuilder::new()
    }

    pub(crate) fn from_parts(machine: FlatMachine<E>, preemptive: Option<StateId>) -> Self {
        Self {
            machine,
            preemptive,
        }
    }

    /// Tick the machine: preemption first, then — unless preemption changed
    /// the current state — the normal execute.
    pub fn execute(&mut self, dt: f32) -> Result<(), MachineError> {
        if !self.machine.running || !self.machine.started {
            return Ok(());
        }

        let before = self.machine.current;

        if let Some(preemptive) = self.preemptive {
            let request = self.machine.states[preemptive.index()]
                .evaluate_preemption(&mut self.machine.owner);
            if let Some(request) = request {
                self.machine.transition_to(request)?;
            }
        }

        if !self.machine.comparer.same(before, self.machine.current) {
            // State changed during preemption; skip execute for this tick.
            return Ok(());
        }

        let request =
            self.machine.states[self.machine.current.index()].execute(&mut self.machine.owner, dt);
        if let Some(request) = request {
            self.machine.transition_to(request)?;
        }
        Ok(())
    }

    /// Replace the preemptive state; `None` disables preemption.
    pub fn set_preemptive_state(&mut self, state: Option<StateId>) -> Result<(), MachineError> {
        if let Some(id) = state {
            if !self.machine.contains(id) {
                return Err(MachineError::UnknownState(id));
            }
        }
        self.preemptive = state;
        Ok(())
    }

    /// The designated preemptive state, if any.
    pub fn preemptive_state(&self) -> Option<StateId> {
        self.preemptive
    }

    /// See [`FlatMachine::transition_to`].
    pub fn transition_to(&mut self, request: TransitionRequest) -> Result<(), MachineError> {
        self.machine.transition_to(request)
    }

    /// See [`FlatMachine::revert_to_previous`].
    pub fn revert_to_previous(&mut self) -> Result<(), MachineError> {
        self.machine.revert_to_previous()
    }

    /// See [`FlatMachine::start`].
    pub fn start(&mut self, do_enter: bool) -> Result<(), MachineError> {
        self.machine.start(do_enter)
    }

    /// See [`FlatMachine::run`].
    pub fn run(&mut self) -> Result<(), MachineError> {
        self.machine.run()
    }

    /// See [`FlatMachine::stop`].
    pub fn stop(&mut self) {
        self.machine.stop();
    }

    /// See [`FlatMachine::pause`].
    pub fn pause(&mut self) {
        self.machine.pause();
    }

    /// See [`FlatMachine::resume`].
    pub fn resume(&mut self) -> Result<(), MachineError> {
        self.machine.resume()
    }

    /// Whether the machine has been started.
    pub fn is_started(&self) -> bool {
        self.machine.is_started()
    }

    /// Whether the machine is currently running.
    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    /// The currently active state.
    pub fn current_state(&self) -> StateId {
        self.machine.current_state()
    }

    /// The state active before the last transition, if any.
    pub fn previous_state(&self) -> Option<StateId> {
        self.machine.previous_state()
    }

    /// Compare two states under the machine's comparer.
    pub fn same_state(&self, a: StateId, b: StateId) -> bool {
        self.machine.same_state(a, b)
    }

    /// Whether `id` names a state registered with this machine.
    pub fn contains(&self, id: StateId) -> bool {
        self.machine.contains(id)
    }

    /// The owned entity.
    pub fn owner(&self) -> &E {
        self.machine.owner()
    }

    /// Mutable access to the owned entity.
    pub fn owner_mut(&mut self) -> &mut E {
        self.machine.owner_mut()
    }

    /// See [`FlatMachine::change_owner`].
    pub fn change_owner(&mut self, new_owner: E, re_enter: bool) -> E {
        self.machine.change_owner(new_owner, re_enter)
    }

    /// The transitions this machine has performed.
    pub fn trace(&self) -> &TransitionTrace {
        self.machine.trace()
    }

    /// Install a callback invoked after every completed transition.
    pub fn observe_transitions<F>(&mut self, observer: F)
    where
        F: FnMut(StateId, StateId) + 'static,
    {
        self.machine.observe_transitions(observer);
    }

    /// See [`FlatMachine::snapshot`].
    pub fn snapshot(&self) -> MachineSnapshot {
        self.machine.snapshot()
    }

    /// See [`FlatMachine::restore`].
    pub fn restore(&mut self, snapshot: &MachineSnapshot) -> Result<(), SnapshotError> {
        self.machine.restore(snapshot)
    }
}
