//! Unified error types for procsim using thiserror

use thiserror::Error;

use crate::types::Pid;

/// Failures reported by the registry, the ready queue and the memory stack
///
/// Every variant is recoverable: the shell prints it and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("a process with PID {0} already exists")]
    DuplicatePid(Pid),

    #[error("the process name cannot be empty")]
    InvalidName,

    #[error("no process with PID {0} exists")]
    ProcessNotFound(Pid),

    #[error("process {0} is already in the queue")]
    AlreadyQueued(Pid),

    #[error("the queue is empty")]
    EmptyQueue,

    #[error("there is no memory to free")]
    EmptyStack,

    #[error("process {0} was not found")]
    NotFound(Pid),

    #[error("process {0} was deleted while still referenced")]
    StaleReference(Pid),
}

/// Rejections produced while validating a positive integer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerError {
    #[error("Error: enter a positive whole number.")]
    Empty,

    #[error("Error: only digits are allowed.")]
    NotDigits,

    #[error("Error: the number must be greater than 0.")]
    NotPositive,

    #[error("Error: the number is too large.")]
    TooLarge,
}

/// Session-level errors
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("input closed before the session ended")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
