//! Copyable state handles.

use serde::{Deserialize, Serialize};

/// Handle identifying a state registered with a machine.
///
/// Ids are handed out in registration order and are only meaningful to the
/// machine (or builder) that issued them. A `StateId` is a plain index into
/// the machine's state table: cheap to copy, hash, and serialize.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
pub struct StateId(u32);

impl StateId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of this state in its machine's state table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
