//! Flat state machines.
//!
//! [`FlatMachine`] drives a single current state over a flat state set;
//! [`PreemptiveMachine`] layers a designated interrupting state on top of
//! it.

mod preemptive;

pub use preemptive::PreemptiveMachine;

use crate::builder::FlatMachineBuilder;
use crate::core::{MachineError, State, StateComparer, StateId, TransitionRequest};
use crate::snapshot::{MachineSnapshot, SnapshotError};
use crate::trace::{TransitionObserver, TransitionTrace};

/// Finite state machine over a flat state set.
///
/// The machine owns its states, the opaque entity `E` they act on, and the
/// current/previous bookkeeping. It must be `start`ed and then `run` before
/// `execute` does anything, and stopped before it can be started again.
///
/// # Example
///
/// ```rust
/// use instinct::{FlatMachine, State, TransitionRequest};
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
/// let mut builder = FlatMachine::builder();
/// let idle = builder.add_state(Named("idle"));
/// let walk = builder.add_state(Named("walk"));
/// let mut machine = builder.initial(idle).build(Vec::new()).unwrap();
///
/// machine.start(true).unwrap();
/// machine.run().unwrap();
/// machine.transition_to(TransitionRequest::to(walk)).unwrap();
///
/// assert_eq!(machine.current_state(), walk);
/// assert_eq!(
///     machine.owner(),
///     &["enter idle".to_string(), "exit idle".into(), "enter walk".into()]
/// );
/// ```
pub struct FlatMachine<E> {
    pub(crate) states: Vec<Box<dyn State<E>>>,
    pub(crate) owner: E,
    pub(crate) current: StateId,
    pub(crate) previous: Option<StateId>,
    pub(crate) comparer: StateComparer,
    pub(crate) trace: TransitionTrace,
    pub(crate) observer: Option<TransitionObserver>,
    pub(crate) started: bool,
    pub(crate) running: bool,
}

impl<E> FlatMachine<E> {
    /// Start building a machine.
    pub fn builder() -> FlatMachineBuilder<E> {
        FlatMachineBuilder::new()
    }

    pub(crate) fn from_parts(
        states: Vec<Box<dyn State<E>>>,
        initial: StateId,
        comparer: StateComparer,
        owner: E,
    ) -> Self {
        Self {
            states,
            owner,
            current: initial,
            previous: None,
            comparer,
            trace: TransitionTrace::new(),
            observer: None,
            started: false,
            running: false,
        }
    }

    /// Tick the machine: the current state executes while the machine is
    /// running and started, and any transition it requests is applied
    /// before this call returns.
    pub fn execute(&mut self, dt: f32) -> Result<(), MachineError> {
        if !self.running || !self.started {
            return Ok(());
        }
        let request = self.states[self.current.index()].execute(&mut self.owner, dt);
        if let Some(request) = request {
            self.transition_to(request)?;
        }
        Ok(())
    }

    /// Transition to the requested target.
    ///
    /// A target equal to the current state under the comparer is ignored
    /// unless the request allows same-state transitions. Otherwise the
    /// previous state is recorded, the outgoing state optionally exits, and
    /// the target optionally enters.
    pub fn transition_to(&mut self, request: TransitionRequest) -> Result<(), MachineError> {
        let target = request.target();
        if !self.contains(target) {
            return Err(MachineError::UnknownState(target));
        }
        if !request.allows_same_state() && self.comparer.same(self.current, target) {
            return Ok(());
        }

        let from = self.current;
        self.previous = Some(from);
        if request.exits() {
            self.states[from.index()].exit(&mut self.owner);
        }
        self.current = target;
        if request.enters() {
            self.states[target.index()].enter(&mut self.owner);
        }

        self.trace.record(from, target);
        if let Some(observer) = self.observer.as_mut() {
            observer(from, target);
        }
        Ok(())
    }

    /// Transition back to the previously active state.
    pub fn revert_to_previous(&mut self) -> Result<(), MachineError> {
        let previous = self.previous.ok_or(MachineError::NoPreviousState)?;
        self.transition_to(TransitionRequest::to(previous))
    }

    /// Mark the machine started, optionally entering the current state.
    /// The machine must be stopped before it can be started again.
    pub fn start(&mut self, do_enter: bool) -> Result<(), MachineError> {
        if self.running {
            return Err(MachineError::AlreadyRunning);
        }
        if do_enter {
            self.states[self.current.index()].enter(&mut self.owner);
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

    /// The currently active state.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// The state active before the last transition, if any.
    pub fn previous_state(&self) -> Option<StateId> {
        self.previous
    }

    /// Compare two states under the machine's comparer.
    pub fn same_state(&self, a: StateId, b: StateId) -> bool {
        self.comparer.same(a, b)
    }

    /// Whether `id` names a state registered with this machine.
    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.states.len()
    }

    /// The owned entity.
    pub fn owner(&self) -> &E {
        &self.owner
    }

    /// Mutable access to the owned entity.
    pub fn owner_mut(&mut self) -> &mut E {
        &mut self.owner
    }

    /// Swap the owned entity, returning the old one. With `re_enter`, the
    /// current state exits under the old owner and enters under the new
    /// one, keeping its hook pairing balanced.
    pub fn change_owner(&mut self, new_owner: E, re_enter: bool) -> E {
        if re_enter {
            self.states[self.current.index()].exit(&mut self.owner);
        }
        let old = std::mem::replace(&mut self.owner, new_owner);
        if re_enter {
            self.states[self.current.index()].enter(&mut self.owner);
        }
        old
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

    /// Restore bookkeeping from a snapshot. State ids must belong to this
    /// machine. No enter/exit hooks run; the snapshot restores position,
    /// lifecycle flags, and trace, not behavior-internal data.
    pub fn restore(&mut self, snapshot: &MachineSnapshot) -> Result<(), SnapshotError> {
        snapshot.ensure_supported()?;
        if !self.contains(snapshot.current) {
            return Err(SnapshotError::ValidationFailed(format!(
                "current state {:?} is not registered with this machine",
                snapshot.current
            )));
        }
        if let Some(previous) = snapshot.previous {
            if !self.contains(previous) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "previous state {:?} is not registered with this machine",
                    previous
                )));
            }
        }
        self.current = snapshot.current;
        self.previous = snapshot.previous;
        self.started = snapshot.started;
        self.running = snapshot.running;
        self.trace = snapshot.trace.clone();
        Ok(())
    }
}
