use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; `true` is a lit pixel
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display Buffer
/// The Chip-8 display is composed of 64x32 monochrome pixels.
///
/// Pixels are only ever changed by XOR-ing 8-pixel-wide sprite rows onto them, or by a full
/// clear. Both axes wrap, so a sprite hanging off the right or bottom edge reappears on the
/// left or top. The buffer never renders itself: `take_frame` hands a snapshot to whoever
/// does, and only when something changed since the last one.
#[derive(Clone, Debug)]
pub struct DisplayBuffer {
    pixels: FrameBuffer,
    dirty: bool,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        DisplayBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs `sprite` onto the buffer with its top-left corner at (x, y).
    ///
    /// Each byte is one row, most significant bit leftmost. Returns whether any lit pixel was
    /// turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 1 == 0 {
                    continue;
                }
                let px = (x + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn snapshot(&self) -> FrameBuffer {
        self.pixels
    }

    /// Returns a snapshot if the buffer changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.dirty {
            self.dirty = false;
            Some(self.pixels)
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(display: &DisplayBuffer) -> Vec<(usize, usize)> {
        let frame = display.snapshot();
        let mut points = Vec::new();
        for (y, row) in frame.iter().enumerate() {
            for (x, &on) in row.iter().enumerate() {
                if on {
                    points.push((x, y));
                }
            }
        }
        points
    }

    #[test]
    fn test_starts_blank_and_clean() {
        let mut display = DisplayBuffer::new();
        assert!(lit(&display).is_empty());
        assert_eq!(display.take_frame(), None);
    }

    #[test]
    fn test_draw_msb_first() {
        let mut display = DisplayBuffer::new();
        let collision = display.draw_sprite(10, 5, &[0b1000_0001]);
        assert!(!collision);
        assert_eq!(lit(&display), vec![(10, 5), (17, 5)]);
    }

    #[test]
    fn test_draw_twice_erases_and_collides() {
        let mut display = DisplayBuffer::new();
        let sprite = [0xF0, 0x90, 0xF0];
        assert!(!display.draw_sprite(3, 4, &sprite));
        assert!(display.draw_sprite(3, 4, &sprite));
        assert!(lit(&display).is_empty());
    }

    #[test]
    fn test_no_collision_when_bits_disjoint() {
        let mut display = DisplayBuffer::new();
        display.draw_sprite(0, 0, &[0xF0]);
        assert!(!display.draw_sprite(0, 0, &[0x0F]));
        assert_eq!(lit(&display).len(), 8);
    }

    #[test]
    fn test_wraps_both_axes() {
        let mut display = DisplayBuffer::new();
        display.draw_sprite(60, 30, &[0xFF, 0xFF]);
        let points = lit(&display);
        assert_eq!(points.len(), 16);
        for &y in &[30, 31] {
            for &x in &[60, 61, 62, 63, 0, 1, 2, 3] {
                assert!(points.contains(&(x, y)), "missing ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_wraps_tall_sprite_to_top() {
        let mut display = DisplayBuffer::new();
        display.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(display.pixel(0, 31));
        assert!(display.pixel(0, 0));
    }

    #[test]
    fn test_clear() {
        let mut display = DisplayBuffer::new();
        display.draw_sprite(0, 0, &[0xFF]);
        display.take_frame();
        display.clear();
        assert!(lit(&display).is_empty());
        assert!(display.is_dirty());
    }

    #[test]
    fn test_take_frame_once_per_change() {
        let mut display = DisplayBuffer::new();
        display.draw_sprite(0, 0, &[0x80]);
        let frame = display.take_frame().unwrap();
        assert!(frame[0][0]);
        assert_eq!(display.take_frame(), None);
    }
}
