//! Process registry for procsim
//!
//! The registry is the only owner of process records. Records live in
//! generation-tagged slots; the ready queue and the memory stack keep
//! [`ProcessHandle`]s into those slots instead of the records themselves.
//!
//! Key properties:
//! - pids are pairwise distinct among live records
//! - listing order is insertion order (new records go to the tail)
//! - lookups by pid are a linear scan in listing order

use crate::error::SimError;
use crate::types::{Pid, Priority, ProcessHandle};

/// A simulated process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    /// Unique identifier
    pub pid: Pid,
    /// Descriptive name, already trimmed and non-empty
    pub name: String,
    /// Scheduling priority (lower runs first)
    pub priority: Priority,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    process: Option<Process>,
}

/// Ordered table of live processes
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    slots: Vec<Slot>,
    /// Live slot indices, oldest first
    order: Vec<usize>,
    /// Vacated slots available for reuse
    free: Vec<usize>,
}

impl ProcessRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new process at the tail
    ///
    /// Fails with [`SimError::DuplicatePid`] if `pid` is live, or with
    /// [`SimError::InvalidName`] if `name` is blank once trimmed. The registry
    /// is untouched on failure.
    pub fn insert(
        &mut self,
        pid: Pid,
        name: &str,
        priority: Priority,
    ) -> Result<ProcessHandle, SimError> {
        if self.contains(pid) {
            return Err(SimError::DuplicatePid(pid));
        }
        let name = name.trim_matches(|c: char| c.is_ascii_whitespace());
        if name.is_empty() {
            return Err(SimError::InvalidName);
        }

        let process = Process {
            pid,
            name: name.to_string(),
            priority,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].process = Some(process);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    process: Some(process),
                });
                self.slots.len() - 1
            }
        };
        self.order.push(index);

        Ok(ProcessHandle {
            index,
            generation: self.slots[index].generation,
        })
    }

    /// Unlink and return the process with `pid`
    ///
    /// Handles into the vacated slot stop resolving. Queue entries and
    /// memory blocks are not touched here; see [`crate::system::System`].
    pub fn remove(&mut self, pid: Pid) -> Result<Process, SimError> {
        let position = self
            .order
            .iter()
            .position(|&index| self.slot_pid(index) == Some(pid))
            .ok_or(SimError::NotFound(pid))?;
        let index = self.order.remove(position);

        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let process = slot.process.take().ok_or(SimError::NotFound(pid))?;
        self.free.push(index);
        Ok(process)
    }

    /// Look up a live process and its handle by pid
    pub fn find(&self, pid: Pid) -> Option<(ProcessHandle, &Process)> {
        self.order.iter().find_map(|&index| {
            let slot = &self.slots[index];
            slot.process
                .as_ref()
                .filter(|process| process.pid == pid)
                .map(|process| {
                    let handle = ProcessHandle {
                        index,
                        generation: slot.generation,
                    };
                    (handle, process)
                })
        })
    }

    /// Look up a live process by pid
    pub fn find_by_pid(&self, pid: Pid) -> Option<&Process> {
        self.find(pid).map(|(_, process)| process)
    }

    /// Resolve a handle, failing if its record has since been removed
    pub fn resolve(&self, handle: ProcessHandle) -> Option<&Process> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.process.as_ref())
    }

    /// Check whether `pid` is live
    pub fn contains(&self, pid: Pid) -> bool {
        self.find(pid).is_some()
    }

    /// All live processes in insertion order
    pub fn list_all(&self) -> impl Iterator<Item = &Process> + '_ {
        self.order
            .iter()
            .filter_map(move |&index| self.slots[index].process.as_ref())
    }

    /// Number of live processes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no process is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn slot_pid(&self, index: usize) -> Option<Pid> {
        self.slots[index].process.as_ref().map(|process| process.pid)
    }
}
