use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, ShiftQuirk};
use crate::constants::PROGRAM_START;
use crate::display::DisplayBuffer;
use crate::memory::Memory;
use crate::stack::Stack;

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register for carry, borrow and sprite collision
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - a call stack of return addresses
/// - a 64x32 display buffer
///
/// Timers and keys are not here: they are shared with other threads, see `Peripherals`.
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub memory: Memory,
    pub stack: Stack,
    pub display: DisplayBuffer,
    pub rng: StdRng,
    pub shift_quirk: ShiftQuirk,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            memory: Memory::new(),
            stack: Stack::new(config.stack_capacity),
            display: DisplayBuffer::new(),
            rng,
            shift_quirk: config.shift_quirk,
        }
    }
}
