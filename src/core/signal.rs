//! Shared condition latches.

use std::cell::Cell;
use std::rc::Rc;

/// Idempotent boolean latch shared between a machine and external code.
///
/// Priority states carry a pair of these as their enter/exit conditions:
/// whatever event source the application uses raises the latch, and the
/// owning machine reads it during transition scans and lowers it across the
/// enter/exit lifecycle. Raising an already-raised signal is harmless, so
/// at-least-once delivery is fine.
///
/// Clones share the underlying flag.
///
/// # Example
///
/// ```rust
/// use instinct::core::Signal;
///
/// let signal = Signal::new();
/// let handle = signal.clone();
///
/// handle.raise();
/// assert!(signal.is_raised());
///
/// signal.clear();
/// assert!(!handle.is_raised());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Signal {
    raised: Rc<Cell<bool>>,
}

impl Signal {
    /// Create a lowered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the latch.
    pub fn raise(&self) {
        self.raised.set(true);
    }

    /// Lower the latch.
    pub fn clear(&self) {
        self.raised.set(false);
    }

    /// Whether the latch is currently raised.
    pub fn is_raised(&self) -> bool {
        self.raised.get()
    }
}
