//! Ready queue for procsim
//!
//! Simulates priority scheduling: entries are kept sorted by the priority
//! their process had when it was enqueued, lowest value at the head.
//! Equal priorities keep arrival order, so a new entry goes after every
//! entry whose priority is less than or equal to its own.

use std::collections::VecDeque;

use crate::error::SimError;
use crate::process::ProcessRegistry;
use crate::types::{Pid, Priority, ProcessHandle};

/// A queued reference to a registered process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    /// Pid of the referenced process
    pub pid: Pid,
    /// Priority captured at enqueue time
    pub priority: Priority,
    handle: ProcessHandle,
}

impl QueueEntry {
    /// Registry handle of the referenced process
    pub fn handle(&self) -> ProcessHandle {
        self.handle
    }
}

/// Read-only view of one queue position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyView<'a> {
    pub pid: Pid,
    pub priority: Priority,
    /// `None` once the process has been deleted from the registry
    pub name: Option<&'a str>,
}

/// Priority-ordered ready queue
#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: VecDeque<QueueEntry>,
}

impl ReadyQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the registered process `pid`
    pub fn enqueue(&mut self, registry: &ProcessRegistry, pid: Pid) -> Result<(), SimError> {
        let (handle, process) = registry.find(pid).ok_or(SimError::ProcessNotFound(pid))?;
        if self.contains(pid) {
            return Err(SimError::AlreadyQueued(pid));
        }

        let entry = QueueEntry {
            pid,
            priority: process.priority,
            handle,
        };
        let at = self
            .entries
            .partition_point(|queued| queued.priority <= entry.priority);
        self.entries.insert(at, entry);
        Ok(())
    }

    /// Remove the head entry (lowest priority value)
    pub fn dequeue_front(&mut self) -> Result<QueueEntry, SimError> {
        self.entries.pop_front().ok_or(SimError::EmptyQueue)
    }

    /// Traverse entries head to tail
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.entries.iter()
    }

    /// Traverse entries head to tail, resolving names through `registry`
    pub fn peek_all<'a>(
        &'a self,
        registry: &'a ProcessRegistry,
    ) -> impl Iterator<Item = ReadyView<'a>> + 'a {
        self.entries.iter().map(move |entry| ReadyView {
            pid: entry.pid,
            priority: entry.priority,
            name: registry
                .resolve(entry.handle)
                .map(|process| process.name.as_str()),
        })
    }

    /// Check whether `pid` is queued, counting stale entries
    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.iter().any(|entry| entry.pid == pid)
    }

    /// Drop every entry referencing `handle`, returning how many were dropped
    pub fn purge(&mut self, handle: ProcessHandle) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        before - self.entries.len()
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
