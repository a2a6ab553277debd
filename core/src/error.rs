use std::io;

use thiserror::Error;

/// Errors that stop a ROM from being loaded
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read ROM")]
    Io(#[from] io::Error),
}

/// Conditions the interpreter recovers from by skipping the offending instruction.
/// They're reported through the diagnostic channel and never stop execution.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("stack overflow calling {addr:#05X}; the stack is already 16 deep")]
    StackOverflow { addr: u16 },

    #[error("stack underflow; returned with an empty stack")]
    StackUnderflow,
}
