//! Drawing surfaces for rendered windows.

use core::fmt;

use alloc::{vec, vec::Vec};

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
use std::io::{self, Write};

/// A two-dimensional surface marks can be painted onto.
///
/// Rendering creates a fresh surface of the window's size and paints a
/// single-cell mark for each foreground cell, with `(0, 0)` at the top left.
pub trait Surface {
    /// Create a blank surface.
    fn create(width: usize, height: usize) -> Self
    where
        Self: Sized;

    /// Paint a mark at the given coordinates.
    fn paint(&mut self, x: usize, y: usize);
}

/// A monochrome bitmap.
///
/// Each line is packed eight marks to a byte, leftmost mark in the most
/// significant bit, and padded to a whole byte. This is also the layout of a
/// binary PBM image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: usize,
    height: usize,
    stride: usize,
    bits: Vec<u8>,
}

impl Bitmap {
    /// Create a blank bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width.div_ceil(8);

        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether a mark was painted at the given coordinates. Coordinates outside
    /// the bitmap are never marked.
    pub fn is_marked(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        self.bits[y * self.stride + x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// The number of marks painted.
    pub fn count_marked(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// The packed lines of the bitmap.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Write the bitmap as a binary PBM (`P4`) image, marks in black.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn write_pbm(&self, w: &mut impl Write) -> io::Result<()> {
        write!(w, "P4\n{} {}\n", self.width, self.height)?;
        w.write_all(&self.bits)
    }
}

impl Surface for Bitmap {
    fn create(width: usize, height: usize) -> Self {
        Self::new(width, height)
    }

    fn paint(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.bits[y * self.stride + x / 8] |= 0x80 >> (x % 8);
    }
}

/// Draws marks as `#` and blanks as `.`, one line of text per line.
impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.is_marked(x, y) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn paint_packs_most_significant_bit_first() {
        let mut bitmap = Bitmap::create(10, 2);
        bitmap.paint(0, 0);
        bitmap.paint(9, 0);
        bitmap.paint(3, 1);

        assert_eq!(bitmap.as_bytes(), &[0b1000_0000, 0b0100_0000, 0b0001_0000, 0]);
        assert!(bitmap.is_marked(9, 0));
        assert!(!bitmap.is_marked(8, 0));
        assert_eq!(bitmap.count_marked(), 3);
    }

    #[test]
    fn paint_outside_is_ignored() {
        let mut bitmap = Bitmap::new(3, 3);
        bitmap.paint(3, 0);
        bitmap.paint(0, 3);

        assert_eq!(bitmap.count_marked(), 0);
        assert!(!bitmap.is_marked(3, 0));
    }

    #[test]
    fn display_as_text() {
        let mut bitmap = Bitmap::new(4, 2);
        bitmap.paint(1, 0);
        bitmap.paint(3, 1);

        assert_eq!(bitmap.to_string(), ".#..\n...#\n");
    }

    #[cfg(feature = "std")]
    #[test]
    fn write_binary_pbm() {
        let mut bitmap = Bitmap::new(9, 1);
        bitmap.paint(8, 0);

        let mut out = Vec::new();
        bitmap.write_pbm(&mut out).unwrap();
        assert_eq!(out, b"P4\n9 1\n\x00\x80");
    }
}
