//! Common types used across procsim
//!
//! This module defines shared types to avoid circular dependencies between
//! the registry, the ready queue and the memory stack.

use core::fmt;
use core::num::NonZeroU32;

/// Scheduling priority (lower value runs first)
pub type Priority = NonZeroU32;

/// Size of a simulated memory block
pub type BlockSize = NonZeroU32;

/// Process identifier
///
/// Always positive. Uniqueness is enforced by the registry at insertion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(NonZeroU32);

impl Pid {
    /// Create a pid from a raw value, rejecting zero
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Pid)
    }

    /// Raw numeric value
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl From<NonZeroU32> for Pid {
    fn from(raw: NonZeroU32) -> Self {
        Pid(raw)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a registry slot
///
/// The generation is bumped whenever the slot is vacated, so a handle taken
/// before a delete never resolves to a record inserted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}
