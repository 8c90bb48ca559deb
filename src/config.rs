//! Session configuration

use clap::ValueEnum;

/// What deleting a process does to queue entries and memory blocks that
/// still reference it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DeletePolicy {
    /// Leave them in place; they show up as stale
    #[default]
    Retain,
    /// Remove them together with the process
    Cascade,
}

/// Settings for one interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub delete_policy: DeletePolicy,
    /// Wait for Enter after each submenu action
    pub pause: bool,
    /// Clear the screen after each submenu action
    pub clear_screen: bool,
    /// Trace operations on stderr
    pub verbose: bool,
}

impl SessionConfig {
    /// No pausing or clearing, for piped input and tests
    pub fn batch() -> Self {
        Self {
            pause: false,
            clear_screen: false,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delete_policy: DeletePolicy::Retain,
            pause: true,
            clear_screen: true,
            verbose: false,
        }
    }
}
