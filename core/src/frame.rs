use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The 64x32 monochrome display, indexed as `[y][x]`.
/// Every pixel is either 0 (off) or 1 (on); only the clear and draw instructions change it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// The pixel at `(x, y)`; coordinates wrap around the edges of the display
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    /// Rows of pixels from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    /// XORs an 8-pixel-wide sprite onto the display with its top left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost. Pixels that run off an
    /// edge wrap around to the opposite edge. Returns whether any pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_sprite() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw_sprite(2, 1, &[0b1100_0001]);
        assert!(!collision);
        assert_eq!(frame.rows().nth(1).unwrap()[2..10], [1, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(frame.rows().map(|r| r.iter().sum::<u8>()).sum::<u8>(), 3);
    }

    #[test]
    fn test_xors_and_collides() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0b1010_0000]);
        let collision = frame.draw_sprite(0, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(frame.rows().next().unwrap()[0..3], [0, 1, 1]);
    }

    #[test]
    fn test_blank_sprite_bits_dont_collide() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xFF]);
        assert!(!frame.draw_sprite(0, 0, &[0x00]));
        assert_eq!(frame.pixel(7, 0), 1);
    }

    #[test]
    fn test_wraps_horizontally() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(62, 0, &[0xF0]);
        assert_eq!(frame.pixel(62, 0), 1);
        assert_eq!(frame.pixel(63, 0), 1);
        assert_eq!(frame.pixel(0, 0), 1);
        assert_eq!(frame.pixel(1, 0), 1);
        assert_eq!(frame.pixel(2, 0), 0);
    }

    #[test]
    fn test_wraps_vertically() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 31, &[0x80, 0x80]);
        assert_eq!(frame.pixel(0, 31), 1);
        assert_eq!(frame.pixel(0, 0), 1);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(10, 10, &[0xFF; 4]);
        frame.clear();
        assert_eq!(frame, FrameBuffer::new());
    }
}
