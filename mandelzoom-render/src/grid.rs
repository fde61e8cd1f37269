/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// A square RGB8 image, row-major, origin at the top-left.
///
/// Freshly zeroed on construction, so any pixel the kernel does not write
/// stays black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbGrid {
    pub size: u32,
    /// `size * size * 3` bytes; pixel `(x, y)` starts at `(y * size + x) * 3`.
    pub pixels: Vec<u8>,
}

impl RgbGrid {
    /// Create a black `size × size` grid.
    pub fn new(size: u32) -> Self {
        let side = size as usize;
        Self {
            size,
            pixels: vec![0u8; side * side * CHANNELS],
        }
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.size as usize * CHANNELS
    }

    /// The color at column `x`, row `y`.
    ///
    /// # Panics
    /// If either coordinate is outside the grid.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.size && y < self.size, "pixel ({x}, {y}) outside grid");
        let i = y as usize * self.stride() + x as usize * CHANNELS;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.pixels[start..start + self.stride()]
    }

    /// Number of pixels that are not pure black.
    pub fn colored_count(&self) -> usize {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|px| px.iter().any(|&c| c != 0))
            .count()
    }

    /// Take the raw bytes, e.g. to hand them to a display surface.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_black() {
        let grid = RgbGrid::new(4);
        assert_eq!(grid.pixels.len(), 4 * 4 * 3);
        assert!(grid.pixels.iter().all(|&b| b == 0));
        assert_eq!(grid.colored_count(), 0);
    }

    #[test]
    fn pixel_addressing_is_row_major() {
        let mut grid = RgbGrid::new(5);
        // Column 3 of row 1.
        let i = (1 * 5 + 3) * 3;
        grid.pixels[i..i + 3].copy_from_slice(&[9, 8, 7]);

        assert_eq!(grid.pixel(3, 1), [9, 8, 7]);
        assert_eq!(grid.pixel(1, 3), [0, 0, 0]);
        assert_eq!(&grid.row(1)[9..12], &[9, 8, 7]);
        assert_eq!(grid.colored_count(), 1);
    }

    #[test]
    #[should_panic]
    fn pixel_out_of_range_panics() {
        RgbGrid::new(2).pixel(2, 0);
    }

    #[test]
    fn zero_size_grid_is_empty() {
        assert!(RgbGrid::new(0).into_pixels().is_empty());
    }
}
