use std::time::Duration;

use crate::constants::{CLOCK_SPEED, KEY_EXPIRY, STACK_CAPACITY, TIMER_HZ};

/// Which register `SHR`/`SHL` read from
///
/// The COSMAC VIP interpreter shifted Vy into Vx; most later ones shift Vx in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftQuirk {
    /// `Vx = Vx >> 1` / `Vx = Vx << 1`
    InPlace,
    /// `Vx = Vy >> 1` / `Vx = Vy << 1`
    FromVy,
}

/// # Config
/// Tunables for a machine; `Config::default()` is a standard Chip-8.
#[derive(Clone, Debug)]
pub struct Config {
    /// Instructions executed per second
    pub clock_speed: u32,
    /// Timer decay rate in ticks per second
    pub timer_hz: u32,
    /// How long a key stays pressed unless an opcode consumes it
    pub key_expiry: Duration,
    /// Number of nested calls allowed
    pub stack_capacity: usize,
    pub shift_quirk: ShiftQuirk,
    /// Fixes the `RND` sequence; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Config {
    /// Time between two instructions
    pub fn cycle_time(&self) -> Duration {
        Duration::from_secs(1) / self.clock_speed.max(1)
    }

    /// Time between two timer ticks
    pub fn tick_time(&self) -> Duration {
        Duration::from_secs(1) / self.timer_hz.max(1)
    }

    /// `key_expiry` as a number of timer ticks, rounded up and never zero
    pub fn key_expiry_ticks(&self) -> u32 {
        let ticks = (self.key_expiry.as_secs_f64() * f64::from(self.timer_hz)).ceil();
        (ticks as u32).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            timer_hz: TIMER_HZ,
            key_expiry: KEY_EXPIRY,
            stack_capacity: STACK_CAPACITY,
            shift_quirk: ShiftQuirk::InPlace,
            seed: None,
        }
    }
}
