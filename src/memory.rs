//! Memory stack for procsim
//!
//! Allocations are simulated as a LIFO stack of blocks, each tagged with
//! the process that requested it. Freeing always releases the block that
//! was allocated last.

use crate::error::SimError;
use crate::process::ProcessRegistry;
use crate::types::{BlockSize, Pid, ProcessHandle};

/// One simulated allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBlock {
    /// Pid of the owning process
    pub pid: Pid,
    /// Allocated size
    pub size: BlockSize,
    handle: ProcessHandle,
}

impl MemoryBlock {
    /// Registry handle of the owning process
    pub fn handle(&self) -> ProcessHandle {
        self.handle
    }
}

/// Read-only view of one stack position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryView<'a> {
    pub pid: Pid,
    pub size: BlockSize,
    /// `None` once the owner has been deleted from the registry
    pub name: Option<&'a str>,
}

/// LIFO stack of memory blocks; the top is the last element
#[derive(Debug, Default)]
pub struct MemoryStack {
    blocks: Vec<MemoryBlock>,
}

impl MemoryStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `size` for the registered process `pid`
    pub fn push(
        &mut self,
        registry: &ProcessRegistry,
        pid: Pid,
        size: BlockSize,
    ) -> Result<(), SimError> {
        let (handle, _) = registry.find(pid).ok_or(SimError::ProcessNotFound(pid))?;
        self.blocks.push(MemoryBlock { pid, size, handle });
        Ok(())
    }

    /// Free the most recently allocated block
    pub fn pop(&mut self) -> Result<MemoryBlock, SimError> {
        self.blocks.pop().ok_or(SimError::EmptyStack)
    }

    /// Traverse blocks top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &MemoryBlock> + '_ {
        self.blocks.iter().rev()
    }

    /// Traverse blocks top to bottom, resolving owner names through `registry`
    pub fn peek_all<'a>(
        &'a self,
        registry: &'a ProcessRegistry,
    ) -> impl Iterator<Item = MemoryView<'a>> + 'a {
        self.iter().map(move |block| MemoryView {
            pid: block.pid,
            size: block.size,
            name: registry
                .resolve(block.handle)
                .map(|process| process.name.as_str()),
        })
    }

    /// Sum of every block on the stack
    pub fn total_size(&self) -> u64 {
        self.blocks
            .iter()
            .map(|block| u64::from(block.size.get()))
            .sum()
    }

    /// Drop every block owned by `handle`, returning how many were dropped
    pub fn purge(&mut self, handle: ProcessHandle) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|block| block.handle != handle);
        before - self.blocks.len()
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
