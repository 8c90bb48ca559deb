//! Menu shell for procsim
//!
//! Line-oriented front end over [`System`]. The top-level menu picks one of
//! three managers; each manager has its own submenu with three actions and
//! a "back" entry. All numbers and names are validated by [`parser`] before
//! any core operation runs, and every [`SimError`] is turned into a message.

use core::num::NonZeroU32;
use std::io::{BufRead, Write};

use crate::config::SessionConfig;
use crate::console::Console;
use crate::error::{ShellError, SimError};
use crate::system::System;
use crate::types::Pid;

pub mod parser;

use parser::{read_line, read_non_empty, read_positive_integer};

/// Menu entry that leaves a submenu (or the program, at top level)
const BACK: u32 = 4;

/// Shown in place of the name of a deleted process
const STALE_NAME: &str = "<deleted>";

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Exit was chosen from the main menu
    Exit,
    /// Input ran out first
    InputClosed,
}

/// The three managers reachable from the top-level menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Submenu {
    Processes,
    Scheduler,
    Memory,
}

impl Submenu {
    fn from_option(option: u32) -> Option<Self> {
        match option {
            1 => Some(Submenu::Processes),
            2 => Some(Submenu::Scheduler),
            3 => Some(Submenu::Memory),
            _ => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Submenu::Processes => "PROCESS MANAGER",
            Submenu::Scheduler => "CPU SCHEDULER",
            Submenu::Memory => "MEMORY MANAGER",
        }
    }

    fn entries(self) -> [&'static str; 3] {
        match self {
            Submenu::Processes => ["Insert process", "Delete process", "Show processes"],
            Submenu::Scheduler => ["Enqueue process", "Execute process", "Show queue"],
            Submenu::Memory => ["Allocate memory", "Free memory", "Show memory state"],
        }
    }
}

/// Interactive session state
pub struct Shell<R: BufRead, W: Write> {
    input: R,
    console: Console<W>,
    system: System,
    config: SessionConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a session reading from `input` and writing to `output`
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        Self {
            input,
            console: Console::new(output, config.clear_screen, config.verbose),
            system: System::new(config.delete_policy),
            config,
        }
    }

    /// Simulator state
    pub fn system(&self) -> &System {
        &self.system
    }

    /// Tear the session down into its state and output writer
    pub fn into_parts(self) -> (System, W) {
        (self.system, self.console.into_inner())
    }

    /// Run the session, treating end of input as a normal way to leave
    ///
    /// Only write failures and other I/O errors are returned as errors.
    pub fn run_to_end(&mut self) -> Result<SessionEnd, ShellError> {
        match self.run() {
            Ok(()) => Ok(SessionEnd::Exit),
            Err(ShellError::InputClosed) => {
                self.console.trace(format_args!("input closed, leaving"));
                Ok(SessionEnd::InputClosed)
            }
            Err(e) => Err(e),
        }
    }

    /// Run the top-level menu until Exit is chosen
    pub fn run(&mut self) -> Result<(), ShellError> {
        self.console
            .trace(format_args!("session started ({:?})", self.config));
        loop {
            writeln!(self.console, "\n========== MAIN MENU ==========")?;
            writeln!(self.console, "[1] Process manager")?;
            writeln!(self.console, "[2] CPU scheduler")?;
            writeln!(self.console, "[3] Memory manager")?;
            writeln!(self.console, "[4] Exit")?;

            let option = self.read_number("Select an option: ")?;
            if option == BACK {
                break;
            }
            match Submenu::from_option(option) {
                Some(submenu) => self.run_submenu(submenu)?,
                None => self
                    .console
                    .trace(format_args!("ignoring main menu option {}", option)),
            }
        }
        writeln!(self.console, "Exiting...")?;
        self.console.flush()?;
        Ok(())
    }

    fn run_submenu(&mut self, submenu: Submenu) -> Result<(), ShellError> {
        loop {
            writeln!(self.console, "\n--- {} ---", submenu.title())?;
            for (number, entry) in submenu.entries().iter().enumerate() {
                writeln!(self.console, "[{}] {}", number + 1, entry)?;
            }
            writeln!(self.console, "[{}] Back", BACK)?;

            let option = self.read_number("Option: ")?;
            self.console
                .trace(format_args!("{:?} option {}", submenu, option));
            match (submenu, option) {
                (Submenu::Processes, 1) => self.insert_process()?,
                (Submenu::Processes, 2) => self.delete_process()?,
                (Submenu::Processes, 3) => self.show_processes()?,
                (Submenu::Scheduler, 1) => self.enqueue_process()?,
                (Submenu::Scheduler, 2) => self.execute_process()?,
                (Submenu::Scheduler, 3) => self.show_queue()?,
                (Submenu::Memory, 1) => self.allocate_memory()?,
                (Submenu::Memory, 2) => self.free_memory()?,
                (Submenu::Memory, 3) => self.show_memory()?,
                _ => {}
            }

            self.pause()?;
            self.console.clear()?;
            if option == BACK {
                return Ok(());
            }
        }
    }

    fn insert_process(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Insert new process ---")?;
        let pid = self.read_pid("Enter the PID: ")?;
        if self.system.registry().contains(pid) {
            return self.report(SimError::DuplicatePid(pid));
        }

        let name = read_non_empty(
            &mut self.input,
            &mut self.console,
            "Enter the process name: ",
            "Error: the name cannot be empty.",
        )?;
        let priority = self.read_positive("Enter the priority: ")?;

        match self.system.create_process(pid, &name, priority) {
            Ok(()) => {
                self.console.trace(format_args!(
                    "registered pid {} ({} live)",
                    pid,
                    self.system.registry().len()
                ));
                writeln!(self.console, "Process added successfully.")?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn delete_process(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Delete process ---")?;
        let pid = self.read_pid("Enter the PID to delete: ")?;
        if self.system.registry().is_empty() {
            writeln!(self.console, "No processes registered.")?;
            return Ok(());
        }

        match self.system.destroy_process(pid) {
            Ok(removal) => {
                self.console.trace(format_args!(
                    "removed pid {} under {:?}: {} queue entries, {} memory blocks",
                    pid,
                    self.system.policy(),
                    removal.dequeued,
                    removal.freed
                ));
                writeln!(self.console, "Process deleted successfully.")?;
                if removal.dequeued + removal.freed > 0 {
                    writeln!(
                        self.console,
                        "Also removed {} queue entries and {} memory blocks.",
                        removal.dequeued, removal.freed
                    )?;
                }
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn show_processes(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Process list ---")?;
        if self.system.registry().is_empty() {
            writeln!(self.console, "No processes registered.")?;
            return Ok(());
        }
        for process in self.system.registry().list_all() {
            writeln!(
                self.console,
                "PID: {} | Name: {} | Priority: {}",
                process.pid, process.name, process.priority
            )?;
        }
        Ok(())
    }

    fn enqueue_process(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Enqueue process ---")?;
        let pid = self.read_pid("Enter the PID: ")?;
        match self.system.enqueue(pid) {
            Ok(()) => {
                self.console.trace(format_args!(
                    "queued pid {} ({} waiting)",
                    pid,
                    self.system.ready_queue().len()
                ));
                writeln!(self.console, "Process enqueued successfully.")?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn execute_process(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Dequeue and execute ---")?;
        let executed = self.system.execute_next().map(|process| {
            format!(
                "Executing process PID: {} | Name: {} | Priority: {}",
                process.pid, process.name, process.priority
            )
        });
        match executed {
            Ok(line) => {
                self.console.trace(format_args!(
                    "executed queue head ({} waiting)",
                    self.system.ready_queue().len()
                ));
                writeln!(self.console, "{}", line)?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn show_queue(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Scheduler queue ---")?;
        if self.system.ready_queue().is_empty() {
            writeln!(self.console, "The queue is empty.")?;
            return Ok(());
        }
        for view in self.system.ready_view() {
            writeln!(
                self.console,
                "PID: {} | Name: {} | Priority: {}",
                view.pid,
                view.name.unwrap_or(STALE_NAME),
                view.priority
            )?;
        }
        Ok(())
    }

    fn allocate_memory(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Allocate memory ---")?;
        let pid = self.read_pid("Enter the PID: ")?;
        if !self.system.registry().contains(pid) {
            return self.report(SimError::ProcessNotFound(pid));
        }

        let size = self.read_positive("Enter the memory size: ")?;
        match self.system.allocate(pid, size) {
            Ok(()) => {
                self.console.trace(format_args!(
                    "pushed {} for pid {} ({} blocks)",
                    size,
                    pid,
                    self.system.memory().len()
                ));
                writeln!(self.console, "Memory allocated successfully.")?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn free_memory(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Free memory ---")?;
        match self.system.free() {
            Ok(block) => {
                self.console.trace(format_args!(
                    "popped {} from pid {} ({} blocks)",
                    block.size,
                    block.pid,
                    self.system.memory().len()
                ));
                writeln!(
                    self.console,
                    "Memory freed from process PID: {} | Size: {}",
                    block.pid, block.size
                )?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn show_memory(&mut self) -> Result<(), ShellError> {
        writeln!(self.console, "\n--- Memory state ---")?;
        if self.system.memory().is_empty() {
            writeln!(self.console, "Memory is free.")?;
            return Ok(());
        }
        for view in self.system.memory_view() {
            writeln!(
                self.console,
                "PID: {} | Name: {} | Size: {}",
                view.pid,
                view.name.unwrap_or(STALE_NAME),
                view.size
            )?;
        }
        writeln!(
            self.console,
            "Total allocated: {}",
            self.system.memory().total_size()
        )?;
        Ok(())
    }

    /// Print a core failure and carry on
    fn report(&mut self, error: SimError) -> Result<(), ShellError> {
        self.console.trace(format_args!("{:?}", error));
        writeln!(self.console, "Error: {}.", error)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), ShellError> {
        if self.config.pause {
            self.console.prompt("Press Enter to continue...")?;
            read_line(&mut self.input)?;
        }
        Ok(())
    }

    fn read_positive(&mut self, prompt: &str) -> Result<NonZeroU32, ShellError> {
        read_positive_integer(&mut self.input, &mut self.console, prompt)
    }

    fn read_number(&mut self, prompt: &str) -> Result<u32, ShellError> {
        self.read_positive(prompt).map(NonZeroU32::get)
    }

    fn read_pid(&mut self, prompt: &str) -> Result<Pid, ShellError> {
        self.read_positive(prompt).map(Pid::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeletePolicy;
    use std::io::Cursor;

    fn run(script: &str, config: SessionConfig) -> (System, String) {
        let mut shell = Shell::new(Cursor::new(script.to_string()), Vec::new(), config);
        shell.run().unwrap();
        let (system, out) = shell.into_parts();
        (system, String::from_utf8(out).unwrap())
    }

    fn run_bytes(script: &[u8]) -> (System, String) {
        let input = Cursor::new(script.to_vec());
        let mut shell = Shell::new(input, Vec::new(), SessionConfig::batch());
        shell.run().unwrap();
        let (system, out) = shell.into_parts();
        (system, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_immediately() {
        let (system, out) = run("4\n", SessionConfig::batch());
        assert!(out.contains("MAIN MENU"));
        assert!(out.ends_with("Exiting...\n"));
        assert!(system.registry().is_empty());
    }

    #[test]
    fn test_unknown_options_are_ignored() {
        let (_, out) = run("9\n1\n7\n4\n4\n", SessionConfig::batch());
        assert_eq!(out.matches("MAIN MENU").count(), 3);
        assert_eq!(out.matches("PROCESS MANAGER").count(), 2);
    }

    #[test]
    fn test_duplicate_pid_rejected_before_name() {
        let script = "1\n1\n5\nEditor\n3\n1\n5\n4\n4\n";
        let (system, out) = run(script, SessionConfig::batch());
        assert!(out.contains("Error: a process with PID 5 already exists."));
        // The second insert never asked for a name
        assert_eq!(out.matches("Enter the process name: ").count(), 1);
        assert_eq!(system.registry().len(), 1);
    }

    #[test]
    fn test_blank_name_reprompts() {
        let script = "1\n1\n5\n   \nEditor\n3\n4\n4\n";
        let (system, out) = run(script, SessionConfig::batch());
        assert!(out.contains("Error: the name cannot be empty."));
        let process = system.registry().find_by_pid(Pid::new(5).unwrap()).unwrap();
        assert_eq!(process.name, "Editor");
    }

    #[test]
    fn test_delete_on_empty_registry() {
        let (_, out) = run("1\n2\n3\n4\n4\n", SessionConfig::batch());
        assert!(out.contains("No processes registered."));
        assert!(!out.contains("was not found"));
    }

    #[test]
    fn test_allocate_unknown_pid_skips_size_prompt() {
        let (system, out) = run("3\n1\n8\n4\n4\n", SessionConfig::batch());
        assert!(out.contains("Error: no process with PID 8 exists."));
        assert!(!out.contains("Enter the memory size: "));
        assert!(system.memory().is_empty());
    }

    #[test]
    fn test_stale_queue_entry_is_shown_and_reported() {
        let script = "1\n1\n1\nEditor\n3\n4\n\
                      2\n1\n1\n4\n\
                      1\n2\n1\n4\n\
                      2\n3\n2\n4\n4\n";
        let (system, out) = run(script, SessionConfig::batch());
        assert!(out.contains("PID: 1 | Name: <deleted> | Priority: 3"));
        assert!(out.contains("Error: process 1 was deleted while still referenced."));
        assert!(system.ready_queue().is_empty());
    }

    #[test]
    fn test_cascade_reports_removed_references() {
        let config = SessionConfig {
            delete_policy: DeletePolicy::Cascade,
            ..SessionConfig::batch()
        };
        let script = "1\n1\n1\nEditor\n3\n4\n\
                      2\n1\n1\n4\n\
                      3\n1\n1\n64\n4\n\
                      1\n2\n1\n4\n4\n";
        let (system, out) = run(script, config);
        assert!(out.contains("Also removed 1 queue entries and 1 memory blocks."));
        assert!(system.ready_queue().is_empty());
        assert!(system.memory().is_empty());
    }

    #[test]
    fn test_pause_and_clear() {
        let config = SessionConfig::default();
        let (_, out) = run("1\n3\n\n4\n\n4\n", config);
        assert_eq!(out.matches("Press Enter to continue...").count(), 2);
        assert_eq!(out.matches("\x1B[2J").count(), 2);
    }

    #[test]
    fn test_input_closed_mid_session() {
        let mut shell = Shell::new(Cursor::new("1\n1\n"), Vec::new(), SessionConfig::batch());
        assert!(matches!(shell.run(), Err(ShellError::InputClosed)));
    }

    #[test]
    fn test_run_to_end_treats_closed_input_as_normal() {
        let mut shell = Shell::new(Cursor::new("1\n1\n"), Vec::new(), SessionConfig::batch());
        assert_eq!(shell.run_to_end().unwrap(), SessionEnd::InputClosed);

        let mut shell = Shell::new(Cursor::new("4\n"), Vec::new(), SessionConfig::batch());
        assert_eq!(shell.run_to_end().unwrap(), SessionEnd::Exit);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_to_end_propagates_write_errors() {
        let mut shell = Shell::new(Cursor::new("4\n"), BrokenPipe, SessionConfig::batch());
        assert!(matches!(shell.run_to_end(), Err(ShellError::Io(_))));
    }

    #[test]
    fn test_invalid_utf8_option_is_reprompted() {
        let (_, out) = run_bytes(b"\xff\n4\n");
        assert!(out.contains("Error: only digits are allowed."));
        assert!(out.ends_with("Exiting...\n"));
    }
}
