//! Builders for flat and preemptive machines.

use crate::builder::error::BuildError;
use crate::core::{State, StateComparer, StateId};
use crate::flat::{FlatMachine, PreemptiveMachine};

/// Builder for [`FlatMachine`] construction.
///
/// States are registered first (each registration hands back the state's
/// id), then the initial state and optional comparer are set and the
/// machine is built around its owner.
pub struct FlatMachineBuilder<E> {
    states: Vec<Box<dyn State<E>>>,
    initial: Option<StateId>,
    comparer: StateComparer,
}

impl<E> FlatMachineBuilder<E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            comparer: StateComparer::identity(),
        }
    }

    /// Register a state; ids are handed out in registration order.
    pub fn add_state(&mut self, state: impl State<E> + 'static) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(Box::new(state));
        id
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the identity comparer.
    pub fn comparer(mut self, comparer: StateComparer) -> Self {
        self.comparer = comparer;
        self
    }

    /// Build the machine around `owner`.
    /// Returns an error if required fields are missing.
    pub fn build(self, owner: E) -> Result<FlatMachine<E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if initial.index() >= self.states.len() {
            return Err(BuildError::UnknownState(initial));
        }
        Ok(FlatMachine::from_parts(
            self.states,
            initial,
            self.comparer,
            owner,
        ))
    }
}

impl<E> Default for FlatMachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`PreemptiveMachine`] construction.
pub struct PreemptiveMachineBuilder<E> {
    inner: FlatMachineBuilder<E>,
    preemptive: Option<StateId>,
}

impl<E> PreemptiveMachineBuilder<E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            inner: FlatMachineBuilder::new(),
            preemptive: None,
        }
    }

    /// Register a state; ids are handed out in registration order.
    pub fn add_state(&mut self, state: impl State<E> + 'static) -> StateId {
        self.inner.add_state(state)
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: StateId) -> Self {
        self.inner = self.inner.initial(state);
        self
    }

    /// Replace the identity comparer.
    pub fn comparer(mut self, comparer: StateComparer) -> Self {
        self.inner = self.inner.comparer(comparer);
        self
    }

    /// Designate the preemptive state.
    pub fn preemptive(mut self, state: StateId) -> Self {
        self.preemptive = Some(state);
        self
    }

    /// Build the machine around `owner`.
    /// Returns an error if required fields are missing.
    pub fn build(self, owner: E) -> Result<PreemptiveMachine<E>, BuildError> {
        let machine = self.inner.build(owner)?;
        if let Some(preemptive) = self.preemptive {
            if !machine.contains(preemptive) {
                return Err(BuildError::UnknownState(preemptive));
            }
        }
        Ok(PreemptiveMachine::from_parts(machine, self.preemptive))
    }
}

impl<E> Default for PreemptiveMachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
