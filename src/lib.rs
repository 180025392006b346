//! Instinct: state machines for entity behavior logic
//!
//! Instinct provides a family of tick-driven state machines for the
//! AI/behavior layer of interactive applications:
//!
//! - [`FlatMachine`]: a finite state machine over a flat state set
//! - [`PreemptiveMachine`]: a flat machine with one designated state that
//!   is consulted before normal execution every tick and may interrupt it
//! - [`HierarchicalMachine`]: states form an ancestry tree and transitions
//!   exit/enter only the minimal set of nodes between two leaves
//! - priority states: per-state priority, interruptibility, and sorted
//!   transition lists layered on the hierarchical machine
//!
//! Machines are single-threaded and cooperatively ticked: an external loop
//! calls `execute(dt)`, states run their hooks, and any transition a state
//! requests is applied synchronously before the tick finishes.
//!
//! # Example
//!
//! ```rust
//! use instinct::{FlatMachine, State, TransitionRequest};
//!
//! struct Idle;
//!
//! impl State<u32> for Idle {
//!     fn execute(&mut self, ticks: &mut u32, _dt: f32) -> Option<TransitionRequest> {
//!         *ticks += 1;
//!         None
//!     }
//! }
//!
//! let mut builder = FlatMachine::builder();
//! let idle = builder.add_state(Idle);
//! let mut machine = builder.initial(idle).build(0u32).unwrap();
//!
//! machine.start(true).unwrap();
//! machine.run().unwrap();
//! machine.execute(0.016).unwrap();
//!
//! assert_eq!(*machine.owner(), 1);
//! ```

pub mod builder;
pub mod core;
pub mod flat;
pub mod hierarchical;
pub mod priority;
pub mod snapshot;
pub mod trace;

mod tree;

// Re-export commonly used types
pub use crate::builder::{
    BuildError, FlatMachineBuilder, HierarchicalMachineBuilder, PreemptiveMachineBuilder,
};
pub use crate::core::{MachineError, Signal, State, StateComparer, StateId, TransitionRequest};
pub use crate::flat::{FlatMachine, PreemptiveMachine};
pub use crate::hierarchical::HierarchicalMachine;
pub use crate::priority::{PriorityOrdering, PriorityStateData, Transition, TransitionCandidate};
pub use crate::snapshot::{MachineSnapshot, SnapshotError};
pub use crate::trace::{TransitionObserver, TransitionRecord, TransitionTrace};
