//! Simulator context
//!
//! [`System`] bundles the registry, the ready queue and the memory stack.
//! It is built once per session (or per test) and every operation goes
//! through it, so the queue and the stack always resolve pids against the
//! same registry.

use crate::config::DeletePolicy;
use crate::error::SimError;
use crate::memory::{MemoryBlock, MemoryStack, MemoryView};
use crate::process::{Process, ProcessRegistry};
use crate::scheduler::{ReadyQueue, ReadyView};
use crate::types::{BlockSize, Pid, Priority};

/// Outcome of deleting a process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub process: Process,
    /// Queue entries removed with it (always 0 under [`DeletePolicy::Retain`])
    pub dequeued: usize,
    /// Memory blocks removed with it (always 0 under [`DeletePolicy::Retain`])
    pub freed: usize,
}

/// The three managers and the delete policy tying them together
#[derive(Debug, Default)]
pub struct System {
    registry: ProcessRegistry,
    ready_queue: ReadyQueue,
    memory: MemoryStack,
    policy: DeletePolicy,
}

impl System {
    pub fn new(policy: DeletePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DeletePolicy {
        self.policy
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready_queue
    }

    pub fn memory(&self) -> &MemoryStack {
        &self.memory
    }

    /// Register a new process
    pub fn create_process(
        &mut self,
        pid: Pid,
        name: &str,
        priority: Priority,
    ) -> Result<(), SimError> {
        self.registry.insert(pid, name, priority).map(|_| ())
    }

    /// Delete a process, applying the delete policy to its references
    pub fn destroy_process(&mut self, pid: Pid) -> Result<Removal, SimError> {
        let (handle, _) = self.registry.find(pid).ok_or(SimError::NotFound(pid))?;
        let process = self.registry.remove(pid)?;

        let (dequeued, freed) = match self.policy {
            DeletePolicy::Retain => (0, 0),
            DeletePolicy::Cascade => (self.ready_queue.purge(handle), self.memory.purge(handle)),
        };
        Ok(Removal {
            process,
            dequeued,
            freed,
        })
    }

    /// Put a registered process on the ready queue
    pub fn enqueue(&mut self, pid: Pid) -> Result<(), SimError> {
        self.ready_queue.enqueue(&self.registry, pid)
    }

    /// "Run" the head of the ready queue
    ///
    /// The entry is consumed even if its process has been deleted, in which
    /// case [`SimError::StaleReference`] is returned. The process itself
    /// stays registered.
    pub fn execute_next(&mut self) -> Result<&Process, SimError> {
        let entry = self.ready_queue.dequeue_front()?;
        self.registry
            .resolve(entry.handle())
            .ok_or(SimError::StaleReference(entry.pid))
    }

    /// Push a memory block for a registered process
    pub fn allocate(&mut self, pid: Pid, size: BlockSize) -> Result<(), SimError> {
        self.memory.push(&self.registry, pid, size)
    }

    /// Pop the most recent memory block
    pub fn free(&mut self) -> Result<MemoryBlock, SimError> {
        self.memory.pop()
    }

    /// Ready queue contents, head first
    pub fn ready_view(&self) -> impl Iterator<Item = ReadyView<'_>> + '_ {
        self.ready_queue.peek_all(&self.registry)
    }

    /// Memory stack contents, top first
    pub fn memory_view(&self) -> impl Iterator<Item = MemoryView<'_>> + '_ {
        self.memory.peek_all(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::num::NonZeroU32;

    fn pid(raw: u32) -> Pid {
        Pid::new(raw).unwrap()
    }

    fn n(raw: u32) -> NonZeroU32 {
        NonZeroU32::new(raw).unwrap()
    }

    fn populated(policy: DeletePolicy) -> System {
        let mut system = System::new(policy);
        system.create_process(pid(1), "Editor", n(3)).unwrap();
        system.create_process(pid(2), "Compiler", n(1)).unwrap();
        system.enqueue(pid(1)).unwrap();
        system.enqueue(pid(2)).unwrap();
        system.allocate(pid(1), n(100)).unwrap();
        system.allocate(pid(2), n(50)).unwrap();
        system
    }

    #[test]
    fn test_execute_keeps_process_registered() {
        let mut system = populated(DeletePolicy::Retain);
        assert_eq!(system.execute_next().unwrap().pid, pid(2));
        assert!(system.registry().contains(pid(2)));
        assert_eq!(system.ready_queue().len(), 1);
    }

    #[test]
    fn test_retain_leaves_stale_references() {
        let mut system = populated(DeletePolicy::Retain);
        let removal = system.destroy_process(pid(2)).unwrap();
        assert_eq!(removal.process.name, "Compiler");
        assert_eq!((removal.dequeued, removal.freed), (0, 0));

        let queue: Vec<_> = system.ready_view().map(|v| (v.pid.get(), v.name)).collect();
        assert_eq!(queue, vec![(2, None), (1, Some("Editor"))]);

        assert_eq!(system.execute_next(), Err(SimError::StaleReference(pid(2))));
        assert_eq!(system.execute_next().unwrap().pid, pid(1));

        // Popping a stale block still works; the block carries its pid
        let block = system.free().unwrap();
        assert_eq!((block.pid, block.size.get()), (pid(2), 50));
    }

    #[test]
    fn test_retain_stale_entry_blocks_requeue_of_same_pid() {
        let mut system = populated(DeletePolicy::Retain);
        system.destroy_process(pid(2)).unwrap();
        system.create_process(pid(2), "Linker", n(2)).unwrap();

        assert_eq!(system.enqueue(pid(2)), Err(SimError::AlreadyQueued(pid(2))));
        // The stale entry never resolves to the new record
        let names: Vec<_> = system.ready_view().map(|v| v.name).collect();
        assert_eq!(names, vec![None, Some("Editor")]);
    }

    #[test]
    fn test_cascade_removes_references() {
        let mut system = populated(DeletePolicy::Cascade);
        system.allocate(pid(2), n(7)).unwrap();

        let removal = system.destroy_process(pid(2)).unwrap();
        assert_eq!((removal.dequeued, removal.freed), (1, 2));
        assert_eq!(system.ready_queue().len(), 1);
        assert_eq!(system.memory().len(), 1);
        assert_eq!(system.memory().total_size(), 100);

        system.create_process(pid(2), "Linker", n(2)).unwrap();
        system.enqueue(pid(2)).unwrap();
        let order: Vec<_> = system.ready_view().map(|v| v.pid.get()).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_destroy_missing_leaves_state() {
        let mut system = populated(DeletePolicy::Cascade);
        assert_eq!(system.destroy_process(pid(9)), Err(SimError::NotFound(pid(9))));
        assert_eq!(system.registry().len(), 2);
        assert_eq!(system.ready_queue().len(), 2);
        assert_eq!(system.memory().len(), 2);
    }
}
