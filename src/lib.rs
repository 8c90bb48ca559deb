//! procsim - a teaching simulator for three operating-system structures
//!
//! This crate models a process table, a priority-ordered ready queue and a
//! stack-based memory allocator. Nothing is executed and no real memory is
//! handed out; the structures only record what a kernel would track.

// Core types
pub mod types;

pub mod config;
pub mod console;
pub mod error;
pub mod memory;
pub mod process;
pub mod scheduler;
pub mod shell;
pub mod system;

pub use config::{DeletePolicy, SessionConfig};
pub use error::{IntegerError, ShellError, SimError};
pub use memory::{MemoryBlock, MemoryStack, MemoryView};
pub use process::{Process, ProcessRegistry};
pub use scheduler::{QueueEntry, ReadyQueue, ReadyView};
pub use shell::{SessionEnd, Shell};
pub use system::{Removal, System};
pub use types::{BlockSize, Pid, Priority, ProcessHandle};

/// Simulator version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Simulator name
pub const NAME: &str = "procsim";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(NAME, "procsim");
        assert!(!VERSION.is_empty());
    }
}
