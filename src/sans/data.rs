//! States processing record payloads.

use thiserror::Error;

use super::{header::RecordHeader, row::Row};

/// An error advancing over a record payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordDataError {
    /// The supplied payload differs in length from the one declared.
    #[error("Expected a payload of {expected} bytes, found {found}.")]
    LengthMismatch { expected: u64, found: usize },
}

/// State token to decode the payload of a record.
#[derive(Debug)]
pub struct RecordData {
    pub(super) offset: i64,
    pub(super) byte_length: u64,
}

impl RecordData {
    /// The column of the first explicit cell in this record's row.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The number of payload bytes to supply to [`RecordData::advance`].
    pub fn byte_length(&self) -> u64 {
        self.byte_length
    }

    /// Transition to another state by taking ownership of a record payload.
    ///
    /// The payload is not copied: borrowing it from a larger buffer yields a
    /// zero-copy view.
    ///
    /// Returns the decoded row, and a successor state token.
    pub fn advance<B: AsRef<[u8]>>(self, data: B) -> Result<(Row<B>, RecordHeader), RecordDataError> {
        let found = data.as_ref().len();

        if found as u64 != self.byte_length {
            Err(RecordDataError::LengthMismatch {
                expected: self.byte_length,
                found,
            })?;
        }

        let row = Row {
            offset: self.offset,
            data,
        };

        Ok((row, RecordHeader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_becomes_row() {
        let state = RecordData {
            offset: -4,
            byte_length: 2,
        };
        let (row, _) = state.advance([0b1000_0000u8, 0b0000_0001]).unwrap();
        assert_eq!(row.offset(), -4);
        assert_eq!(row.data(), &[0b1000_0000, 0b0000_0001]);
    }

    #[test]
    fn short_payload_is_rejected() {
        let state = RecordData {
            offset: 0,
            byte_length: 3,
        };
        assert_eq!(
            state.advance([1u8, 2]).unwrap_err(),
            RecordDataError::LengthMismatch {
                expected: 3,
                found: 2
            }
        );
    }
}
