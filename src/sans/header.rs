//! States processing record headers.

use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::big_endian::{I64, U64},
};

use super::data::RecordData;

/// Number of bytes in a record header.
pub const HEADER_SIZE: usize = 16;

/// An error advancing over a record header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordHeaderError {
    /// The record declares a payload of zero bytes.
    #[error("Record declares an empty row.")]
    EmptyRow,
}

/// State token to decode a record header.
#[derive(Debug)]
pub struct RecordHeader;

impl RecordHeader {
    /// Transition to another state by decoding a record header.
    ///
    /// Returns a successor state token, which holds the offset of the row and
    /// the number of payload bytes that follow.
    pub fn advance(self, r: [u8; HEADER_SIZE]) -> Result<RecordData, RecordHeaderError> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct Header {
            offset: I64,
            byte_length: U64,
        }

        let Header {
            offset,
            byte_length,
        } = zerocopy::transmute!(r);

        if byte_length.get() == 0 {
            Err(RecordHeaderError::EmptyRow)?;
        }

        Ok(RecordData {
            offset: offset.get(),
            byte_length: byte_length.get(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(offset: i64, byte_length: u64) -> [u8; HEADER_SIZE] {
        let mut r = [0; HEADER_SIZE];
        r[..8].copy_from_slice(&offset.to_be_bytes());
        r[8..].copy_from_slice(&byte_length.to_be_bytes());
        r
    }

    #[test]
    fn fields_are_big_endian() {
        let state = RecordHeader.advance(header(-3, 2)).unwrap();
        assert_eq!(state.offset(), -3);
        assert_eq!(state.byte_length(), 2);

        let r = [0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x00];
        let state = RecordHeader.advance(r).unwrap();
        assert_eq!(state.offset(), i64::MIN);
        assert_eq!(state.byte_length(), 256);
    }

    #[test]
    fn empty_row_is_rejected() {
        assert_eq!(
            RecordHeader.advance(header(7, 0)).unwrap_err(),
            RecordHeaderError::EmptyRow
        );
    }
}
