//! Slice-based decoder implementation.
//!
//! Rows decoded here borrow their cells from the slice, so no payload is
//! copied.

use core::iter::FusedIterator;

use alloc::vec::Vec;
use thiserror::Error;

use crate::sans::{
    header::{HEADER_SIZE, RecordHeader, RecordHeaderError},
    row::Row,
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A record extends past the end of the slice.
    #[error("Record at byte {at} needs {needed} bytes, but only {available} remain.")]
    TruncatedRecord {
        at: usize,
        needed: u64,
        available: usize,
    },
    /// The stream ends partway through its final record.
    #[error("Stream of {len} bytes ends partway through record {index} (at byte {at}).")]
    TruncatedStream { index: usize, at: usize, len: usize },
    /// A record declares an empty row.
    #[error("Record at byte {at} declares an empty row.")]
    EmptyRow { at: usize },
}

/// Decode the record starting at byte `at` of a slice.
///
/// Returns the row, borrowing its cells from `r`, and the offset of the byte
/// following the record.
pub fn decode_row(r: &[u8], at: usize) -> Result<(Row<&[u8]>, usize), Error> {
    let available = r.len().saturating_sub(at);
    let truncated = |needed| Error::TruncatedRecord {
        at,
        needed,
        available,
    };

    let mut i = at;

    let header = take(r, &mut i).ok_or(truncated(HEADER_SIZE as u64))?;

    let state = RecordHeader.advance(header).map_err(|err| match err {
        RecordHeaderError::EmptyRow => Error::EmptyRow { at },
    })?;

    let needed = (HEADER_SIZE as u64).saturating_add(state.byte_length());

    let data = usize::try_from(state.byte_length())
        .ok()
        .and_then(|n| r.get(i..i.checked_add(n)?))
        .ok_or(truncated(needed))?;

    let (row, _) = state.advance(data).map_err(|_| truncated(needed))?;

    Ok((row, i + data.len()))
}

/// Lazily decode the records of a slice, in order.
///
/// The iterator ends after the last record, or after yielding the first
/// error.
pub fn rows(r: &[u8]) -> Rows<'_> {
    Rows {
        r,
        i: 0,
        index: 0,
        done: false,
    }
}

/// Decode every record of a slice, in order.
///
/// This method is also re-exported as `ecaview::avec::decode_slice`.
pub fn decode(r: &[u8]) -> Result<Vec<Row<&[u8]>>, Error> {
    let rows = rows(r).collect::<Result<Vec<_>, _>>()?;

    debug!(rows = rows.len(), bytes = r.len(), "decoded stream from slice");

    Ok(rows)
}

/// Iterator over the records of a slice. See [`rows`].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    r: &'a [u8],
    i: usize,
    index: usize,
    done: bool,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Result<Row<&'a [u8]>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.i >= self.r.len() {
            return None;
        }

        match decode_row(self.r, self.i) {
            Ok((row, next)) => {
                trace!(
                    index = self.index,
                    offset = row.offset(),
                    byte_length = row.byte_length(),
                    "decoded record"
                );

                self.i = next;
                self.index += 1;

                Some(Ok(row))
            }
            Err(err) => {
                self.done = true;

                Some(Err(match err {
                    Error::TruncatedRecord { at, .. } => Error::TruncatedStream {
                        index: self.index,
                        at,
                        len: self.r.len(),
                    },
                    err => err,
                }))
            }
        }
    }
}

impl FusedIterator for Rows<'_> {}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Option<[u8; N]> {
    let s = *i;
    *i = s.checked_add(N)?;

    r.get(s..*i)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn record(offset: i64, data: &[u8]) -> Vec<u8> {
        let mut r = Vec::new();
        r.extend_from_slice(&offset.to_be_bytes());
        r.extend_from_slice(&(data.len() as u64).to_be_bytes());
        r.extend_from_slice(data);
        r
    }

    #[test]
    fn decode_row_at_offset() {
        let mut r = record(5, &[0xAA]);
        r.extend(record(-9, &[0x0F, 0xF0, 0x01]));

        let (row, next) = decode_row(&r, 17).unwrap();
        assert_eq!(row.offset(), -9);
        assert_eq!(row.data(), &[0x0F, 0xF0, 0x01]);
        assert_eq!(next, 17 + 16 + 3);
        assert_eq!(next, r.len());
    }

    #[test]
    fn decode_row_borrows_payload() {
        let r = record(0, &[1, 2, 3]);
        let (row, _) = decode_row(&r, 0).unwrap();
        assert!(core::ptr::eq(row.data().as_ptr(), r[16..].as_ptr()));
    }

    #[test]
    fn truncated_header() {
        let r = record(1, &[0xFF]);
        assert_eq!(
            decode_row(&r[..10], 0).unwrap_err(),
            Error::TruncatedRecord {
                at: 0,
                needed: 16,
                available: 10
            }
        );
        assert_eq!(
            decode_row(&r, 100).unwrap_err(),
            Error::TruncatedRecord {
                at: 100,
                needed: 16,
                available: 0
            }
        );
    }

    #[test]
    fn truncated_payload() {
        let r = record(1, &[0xFF, 0x00, 0xFF]);
        assert_eq!(
            decode_row(&r[..18], 0).unwrap_err(),
            Error::TruncatedRecord {
                at: 0,
                needed: 19,
                available: 18
            }
        );
    }

    #[test]
    fn oversized_length_is_truncation() {
        let mut r = vec![0; 8];
        r.extend_from_slice(&u64::MAX.to_be_bytes());
        r.push(0xFF);
        assert!(matches!(
            decode_row(&r, 0),
            Err(Error::TruncatedRecord {
                needed: u64::MAX,
                available: 17,
                ..
            })
        ));
    }

    #[test]
    fn empty_row() {
        let r = record(3, &[]);
        assert_eq!(decode_row(&r, 0).unwrap_err(), Error::EmptyRow { at: 0 });
    }

    #[test]
    fn decode_empty_stream() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_stream_in_order() {
        let mut r = record(0, &[0x80]);
        r.extend(record(-1, &[0xC0]));
        r.extend(record(-2, &[0xA0, 0x00]));

        let rows = decode(&r).unwrap();
        let offsets: Vec<_> = rows.iter().map(|row| row.offset()).collect();
        assert_eq!(offsets, [0, -1, -2]);
        assert_eq!(rows[2].data(), &[0xA0, 0x00]);
    }

    #[test]
    fn partial_trailing_record() {
        let mut r = record(0, &[0x80]);
        let first = r.len();
        r.extend(record(-1, &[0xC0, 0x00]));
        r.pop();

        assert_eq!(
            decode(&r).unwrap_err(),
            Error::TruncatedStream {
                index: 1,
                at: first,
                len: r.len()
            }
        );
    }

    #[test]
    fn rows_stop_after_error() {
        let mut r = record(0, &[]);
        r.extend(record(1, &[0x01]));

        let mut it = rows(&r);
        assert_eq!(it.next(), Some(Err(Error::EmptyRow { at: 0 })));
        assert_eq!(it.next(), None);
    }
}
