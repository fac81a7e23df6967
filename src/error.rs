use std::io;

/// Everything that can stop a running program.
///
/// None of these are retried: they point at a malformed program or loader,
/// and the execution loop halts and reports them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognised opcode {opcode:#06X}")]
    Decode { opcode: u16 },

    #[error("stack overflow: all {capacity} return address slots are in use")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: no return address on the stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06X}")]
    OutOfBounds { address: usize },

    #[error("key {key:#04X} is not on the keypad")]
    InvalidKey { key: u8 },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("failed to read ROM: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
