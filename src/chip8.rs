use std::io;

use crate::config::Config;
use crate::display::FrameBuffer;
use crate::error::Result;
use crate::halt::Halt;
use crate::instruction::decode;
use crate::operations::Flow;
use crate::peripherals::Peripherals;
use crate::state::State;

/// Whether the machine can keep executing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the owned `state` (registers, memory, stack, display)
///  - a handle to the shared `peripherals` (timers and keypad)
///  - the machine-wide `halt` signal
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing keys
/// - executing one instruction at a time
/// - inspecting its frame buffer for rendering by some display
///
/// Timers are not advanced here; something has to call `Peripherals::tick` at 60Hz (see
/// `run`).
pub struct Chip8 {
    state: State,
    peripherals: Peripherals,
    halt: Halt,
}

impl Chip8 {
    pub fn new(config: &Config) -> Self {
        Chip8 {
            state: State::new(config),
            peripherals: Peripherals::new(config.key_expiry_ticks()),
            halt: Halt::new(),
        }
    }

    /// Copy a program into memory at 0x200
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.state.memory.load(program)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn io::Read) -> Result<()> {
        self.state.memory.load_rom(reader)
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        self.state.display.take_frame()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit keypad symbol that was pressed
    pub fn key_press(&self, key: u8) -> Result<()> {
        self.peripherals.on_key_down(key)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// A handle to the timers and keypad that can be moved to other threads
    pub fn peripherals(&self) -> &Peripherals {
        &self.peripherals
    }

    pub fn halt_signal(&self) -> &Halt {
        &self.halt
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_halted()
    }

    /// Fetches, decodes and executes the instruction at the program counter.
    ///
    /// `LD Vx, K` blocks here until a key goes down or the machine halts. Once halted, nothing
    /// else executes. On error the machine is left exactly as it was before the instruction.
    pub fn execute_one(&mut self) -> Result<Status> {
        if self.halt.is_halted() {
            return Ok(Status::Halted);
        }

        let op = self.state.memory.fetch(self.state.pc)?;
        tracing::trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        let operation = decode(op)?;
        let flow = operation(op, &mut self.state, &self.peripherals)?;
        Ok(self.advance(flow))
    }

    /// The only place the program counter moves
    fn advance(&mut self, flow: Flow) -> Status {
        let pc = self.state.pc;
        self.state.pc = match flow {
            Flow::Next => pc.wrapping_add(2),
            Flow::Skip => pc.wrapping_add(4),
            Flow::Jump(addr) => addr,
            Flow::Return(addr) => addr.wrapping_add(2),
            Flow::AwaitKey(x) => match self.peripherals.wait_for_key(&self.halt) {
                Some(key) => {
                    self.state.v[x] = key;
                    pc.wrapping_add(2)
                }
                None => return Status::Halted,
            },
            Flow::Halt => {
                tracing::debug!("halt instruction at {:04X}", pc);
                self.halt.halt();
                return Status::Halted;
            }
        };
        Status::Running
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
