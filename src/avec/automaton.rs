//! Decoded automaton histories and windowed rendering.

use alloc::{vec, vec::Vec};

use crate::sans::row::Row;

use super::{slice, surface::Surface};

/// An ordered history of rows, one per generation.
///
/// Row `i` is the `i`-th record of the stream it was decoded from, and is drawn
/// on line `i` of the history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Automaton<B> {
    rows: Vec<Row<B>>,
}

impl<'a> Automaton<&'a [u8]> {
    /// Decode an automaton from a slice, borrowing each row's cells.
    pub fn from_slice(r: &'a [u8]) -> Result<Self, slice::Error> {
        slice::decode(r).map(Self::new)
    }
}

impl<B: AsRef<[u8]>> Automaton<B> {
    pub fn new(rows: Vec<Row<B>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row<B>] {
        &self.rows
    }

    /// The row on line `y`, if one exists.
    pub fn get(&self, y: i64) -> Option<&Row<B>> {
        usize::try_from(y).ok().and_then(|y| self.rows.get(y))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the window of `w` columns from `x` and `h` lines from `y`.
    ///
    /// Cells are extracted with [`Row::slice_into`]. A cell holding 0 is
    /// painted; a cell holding 1 is left blank. Lines without a row, including
    /// those above line 0, are left blank.
    pub fn render<S: Surface>(&self, x: i64, y: i64, w: usize, h: usize) -> S {
        self.paint(x, y, w, h, Row::slice_into)
    }

    /// Render a window as [`Automaton::render`] does, but extract cells with
    /// [`Row::window_into`] so the explicit segment of each row is drawn.
    pub fn render_window<S: Surface>(&self, x: i64, y: i64, w: usize, h: usize) -> S {
        self.paint(x, y, w, h, Row::window_into)
    }

    fn paint<S: Surface>(
        &self,
        x: i64,
        y: i64,
        w: usize,
        h: usize,
        extract: impl Fn(&Row<B>, i64, &mut [u8]),
    ) -> S {
        let mut surface = S::create(w, h);

        // Reused for every line of the window.
        let mut cells = vec![0; w];

        for j in 0..h {
            let Some(row) = y.checked_add_unsigned(j as u64).and_then(|y| self.get(y)) else {
                continue;
            };

            extract(row, x, &mut cells);

            for (i, _) in cells.iter().enumerate().filter(|(_, c)| **c == 0) {
                surface.paint(i, j);
            }
        }

        debug!(x, y, width = w, height = h, "rendered window");

        surface
    }
}
