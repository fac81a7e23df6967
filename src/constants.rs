use std::time::Duration;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory in bytes (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded (and start executing) here; everything below is reserved
pub const PROGRAM_START: u16 = 0x200;

/// Number of return addresses the call stack can hold
pub const STACK_CAPACITY: usize = 16;

/// Number of keys on the hex keypad (0x0..=0xF)
pub const KEY_COUNT: usize = 16;

/// Instructions executed per second
pub const CLOCK_SPEED: u32 = 500;

/// Rate at which the delay and sound timers decay
pub const TIMER_HZ: u32 = 60;

/// How long a key stays pressed if nothing consumes it
pub const KEY_EXPIRY: Duration = Duration::from_millis(250);

/// Bytes per built-in digit sprite
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Sprites for the hex digits 0..F, 5 bytes each, stored from 0x000.
/// `LD F, Vx` relies on digit `d` living at `d * 5`.
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
