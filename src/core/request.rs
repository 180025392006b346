//! Transition requests returned by state hooks.

use crate::core::id::StateId;

/// Request for the owning machine to transition to a target state.
///
/// The defaults mirror a plain transition: the outgoing state exits, the
/// target enters, and a request whose target equals the current state under
/// the machine's comparer is ignored.
///
/// # Example
///
/// ```rust
/// use instinct::core::TransitionRequest;
/// # use instinct::{FlatMachine, State};
/// # struct Idle;
/// # impl State<()> for Idle {}
/// # let mut builder = FlatMachine::builder();
/// # let idle = builder.add_state(Idle);
/// # let _machine = builder.initial(idle).build(()).unwrap();
///
/// let request = TransitionRequest::to(idle).allowing_same_state();
/// assert_eq!(request.target(), idle);
/// assert!(request.enters());
/// assert!(request.allows_same_state());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    target: StateId,
    do_enter: bool,
    do_exit: bool,
    allow_same_state: bool,
}

impl TransitionRequest {
    /// Request a transition into `target` with default flags.
    pub fn to(target: StateId) -> Self {
        Self {
            target,
            do_enter: true,
            do_exit: true,
            allow_same_state: false,
        }
    }

    /// Skip the `enter` hooks of the incoming state(s).
    pub fn without_enter(mut self) -> Self {
        self.do_enter = false;
        self
    }

    /// Skip the `exit` hooks of the outgoing state(s).
    pub fn without_exit(mut self) -> Self {
        self.do_exit = false;
        self
    }

    /// Apply the transition even when the target equals the current state
    /// under the machine's comparer.
    pub fn allowing_same_state(mut self) -> Self {
        self.allow_same_state = true;
        self
    }

    /// The requested target state.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// Whether the incoming state(s) run their `enter` hooks.
    pub fn enters(&self) -> bool {
        self.do_enter
    }

    /// Whether the outgoing state(s) run their `exit` hooks.
    pub fn exits(&self) -> bool {
        self.do_exit
    }

    /// Whether a same-state target is re-applied instead of ignored.
    pub fn allows_same_state(&self) -> bool {
        self.allow_same_state
    }
}
