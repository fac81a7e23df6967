/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian. Their behavior is cased on some
/// combination of:
/// - `(n, _, _, _)` the operation class; applies to all opcodes
/// - `(_, _, _, n)` a sub-selector within the `5`, `8` and `9` classes
/// - `(_, _, n, n)` a sub-selector within the `0`, `E` and `F` classes
///
/// The remaining nibbles carry operands:
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an 8-bit immediate assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx, or the range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a sprite height for `DRW`
pub trait Opcode {
    /// The Opcode's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[c___]`
    fn class(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its operation class.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.class(), self.x() as u8, self.y() as u8, self.n())
    }

    fn class(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self & 0x0F00) >> 8)
    }

    fn y(&self) -> usize {
        usize::from((self & 0x00F0) >> 4)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
