pub use chip8::{Chip8, Status};
pub use config::{Config, ShiftQuirk};
pub use constants::CLOCK_SPEED;
pub use display::{DisplayBuffer, FrameBuffer};
pub use error::{Error, Result};
pub use halt::Halt;
pub use peripherals::Peripherals;
pub use run::{run, Render};
pub use stack::Stack;

mod chip8;
pub mod config;
pub mod constants;
pub mod display;
mod error;
mod halt;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod operations;
mod peripherals;
mod run;
mod stack;
pub mod state;
