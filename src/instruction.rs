use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;

/// Selects the Operation for a given Opcode
///
/// Unknown words (including the `0nnn` machine-code calls) are rejected rather than skipped.
pub fn decode(op: u16) -> Result<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0x0, 0x0) => halt,
        (0x0, 0xA, 0x0, 0x0) => halt,
        (0x0, 0x0, 0xE, 0x0) => cls,
        (0x0, 0x0, 0xE, 0xE) => ret,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => moved,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => loads,
        (0xF, _, 0x1, 0x8) => ld,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => return Err(Error::Decode { opcode: op }),
    };
    Ok(operation)
}
