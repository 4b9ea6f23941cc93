//! Rows of automaton history.
//!
//! A row stores a bounded segment of explicit cells, packed eight to a byte
//! with the leftmost cell in the most significant bit, starting at column
//! [`Row::offset`]. Every column left of the segment holds the segment's first
//! cell (the head), and every column right of it holds its last (the tail).
//!
//! ```text
//!   ... h h h [ explicit segment ] t t t ...
//!             ^ offset           ^ end
//! ```

use alloc::{vec, vec::Vec};

use tartan_bitfield::bitfield;

bitfield! {
    struct Cells(u8) {
        [7] first,
        [0] last,
    }
}

/// A single row of automaton history.
///
/// The payload `B` is any byte storage: decoding from a slice yields rows
/// borrowing from it, and decoding from a reader yields rows owning a `Vec`.
/// Rows always hold at least one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row<B> {
    pub(super) offset: i64,
    pub(super) data: B,
}

impl<B: AsRef<[u8]>> Row<B> {
    /// Construct a row from the column of its first explicit cell and its
    /// packed cells. Returns `None` if `data` is empty.
    pub fn new(offset: i64, data: B) -> Option<Self> {
        if data.as_ref().is_empty() {
            return None;
        }

        Some(Self { offset, data })
    }

    /// The column of the first explicit cell.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The packed explicit cells.
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// The number of bytes of explicit cells.
    pub fn byte_length(&self) -> usize {
        self.data().len()
    }

    /// The first column after the explicit segment.
    ///
    /// Widened, as a segment starting near `i64::MAX` may end beyond it.
    pub fn end(&self) -> i128 {
        self.offset as i128 + 8 * self.byte_length() as i128
    }

    /// The value of every column left of the explicit segment.
    pub fn head(&self) -> u8 {
        Cells(self.data()[0]).first() as u8
    }

    /// The value of every column right of the explicit segment.
    pub fn tail(&self) -> u8 {
        let data = self.data();
        Cells(data[data.len() - 1]).last() as u8
    }

    /// Extract a window of `out.len()` cells starting at column `x` into `out`,
    /// using only the runs flanking the explicit segment.
    ///
    /// Columns up to the start of the segment are filled with the head, and
    /// all remaining columns with the tail. Explicit cells are never written:
    /// a window starting inside or after the segment is entirely tail, and a
    /// window starting before it is head up to `offset` and tail beyond. Use
    /// [`Row::window_into`] to read the explicit cells themselves.
    ///
    /// This is the extraction used by
    /// [`Automaton::render`](crate::avec::automaton::Automaton::render).
    pub fn slice_into(&self, x: i64, out: &mut [u8]) {
        let len = out.len();

        // Length of the slice built so far. May run past the window.
        let mut n = 0;

        if x < self.offset {
            n = usize::try_from(self.offset.abs_diff(x)).unwrap_or(usize::MAX);
            out[..n.min(len)].fill(self.head());
        }

        if (x as i128) + (len as i128) < self.offset as i128 {
            // The head run already covers the window, so the first check
            // always stops the copy.
            for &b in self.data() {
                if n > len {
                    n = len;
                    break;
                }

                for i in (0..8).rev() {
                    if let Some(cell) = out.get_mut(n) {
                        *cell = (b >> i) & 1;
                    }
                    n += 1;
                }
            }
        }

        if n < len {
            out[n..].fill(self.tail());
        }
    }

    /// Extract a window of `len` cells starting at column `x`.
    ///
    /// See [`Row::slice_into`].
    pub fn slice(&self, x: i64, len: usize) -> Vec<u8> {
        let mut out = vec![0; len];
        self.slice_into(x, &mut out);
        out
    }

    /// The value of the cell at column `p`.
    pub fn cell(&self, p: i64) -> u8 {
        self.cell_wide(p as i128)
    }

    /// Extract a window of `out.len()` cells starting at column `x` into `out`,
    /// reading explicit cells where the window overlaps the segment.
    pub fn window_into(&self, x: i64, out: &mut [u8]) {
        for (p, cell) in (x as i128..).zip(out.iter_mut()) {
            *cell = self.cell_wide(p);
        }
    }

    /// Extract a window of `len` cells starting at column `x`, reading explicit
    /// cells where the window overlaps the segment.
    pub fn window(&self, x: i64, len: usize) -> Vec<u8> {
        let mut out = vec![0; len];
        self.window_into(x, &mut out);
        out
    }

    fn cell_wide(&self, p: i128) -> u8 {
        let offset = self.offset as i128;

        if p < offset {
            return self.head();
        }
        if p >= self.end() {
            return self.tail();
        }

        // Within the segment, so the distance fits the payload's length.
        let i = (p - offset) as usize;
        (self.data()[i / 8] >> (7 - i % 8)) & 1
    }
}
