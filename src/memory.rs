use std::io;

use crate::constants::{MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000-0x04F  built-in hex digit sprites
/// 0x050-0x1FF  reserved
/// 0x200-0xFFF  program and data
/// ```
///
/// Instruction fetches are bounds-checked: a program counter that has run off the end is a
/// program defect. Data accesses through I wrap around the address space instead, so
/// `I + offset` always lands somewhere in memory.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = Box::new([0; MEMORY_SIZE]);
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a program to 0x200
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        let start = usize::from(PROGRAM_START);
        let max = MEMORY_SIZE - start;
        if program.len() > max {
            return Err(Error::RomTooLarge {
                size: program.len(),
                max,
            });
        }
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Reads a whole ROM from `reader` and copies it to 0x200
    pub fn load_rom(&mut self, reader: &mut dyn io::Read) -> Result<()> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load(&program)
    }

    /// Reads the big-endian instruction word at `pc`
    pub fn fetch(&self, pc: u16) -> Result<u16> {
        let address = usize::from(pc);
        match self.bytes.get(address..address + 2) {
            Some(word) => Ok(u16::from(word[0]) << 8 | u16::from(word[1])),
            None => Err(Error::OutOfBounds { address }),
        }
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[Self::wrap(address)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.bytes[Self::wrap(address)] = value;
    }

    /// Reads `len` bytes starting at `address`, wrapping past 0xFFF
    pub fn read_range(&self, address: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.bytes[(Self::wrap(address) + offset) % MEMORY_SIZE])
            .collect()
    }

    /// Writes `data` starting at `address`, wrapping past 0xFFF
    pub fn write_range(&mut self, address: u16, data: &[u8]) {
        let start = Self::wrap(address);
        for (offset, &value) in data.iter().enumerate() {
            self.bytes[(start + offset) % MEMORY_SIZE] = value;
        }
    }

    fn wrap(address: u16) -> usize {
        usize::from(address) % MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
