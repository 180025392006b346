//! Builder API for machine construction.
//!
//! Builders own the state set while it is assembled, validate the wiring
//! (initial state, tree shape, transition targets), and hand over a ready
//! machine. Registration order determines state ids.

pub mod error;
pub mod flat;
pub mod hierarchical;

pub use error::BuildError;
pub use flat::{FlatMachineBuilder, PreemptiveMachineBuilder};
pub use hierarchical::HierarchicalMachineBuilder;
