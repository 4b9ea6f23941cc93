//! Reader-based decoder implementation.
//!
//! Rows decoded here own their cells, as the bytes are not retained between
//! reads.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{self, Read},
    vec::Vec,
};

use thiserror::Error;

use crate::sans::{
    header::{HEADER_SIZE, RecordHeader, RecordHeaderError},
    row::Row,
};

use super::automaton::Automaton;

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The stream ends partway through its final record.
    #[error("Stream ends partway through record {index}.")]
    TruncatedStream { index: usize },
    /// A record declares an empty row.
    #[error("Record {index} declares an empty row.")]
    EmptyRow { index: usize },
}

/// Decode every record from a reader, in order, until it is exhausted.
///
/// This method is also re-exported as `ecaview::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read) -> Result<Vec<Row<Vec<u8>>>, Error> {
    let mut rows = Vec::new();
    let mut record_header = RecordHeader;

    loop {
        let index = rows.len();

        let mut header = [0; HEADER_SIZE];
        match fill(r, &mut header)? {
            0 => break,
            HEADER_SIZE => {}
            _ => Err(Error::TruncatedStream { index })?,
        }

        let state = record_header.advance(header).map_err(|err| match err {
            RecordHeaderError::EmptyRow => Error::EmptyRow { index },
        })?;

        // Bounded by the reader rather than the declared length, which may be
        // arbitrarily large.
        let mut data = Vec::new();
        r.by_ref().take(state.byte_length()).read_to_end(&mut data)?;

        let (row, successor) = state
            .advance(data)
            .map_err(|_| Error::TruncatedStream { index })?;

        trace!(
            index,
            offset = row.offset(),
            byte_length = row.byte_length(),
            "decoded record"
        );

        rows.push(row);
        record_header = successor;
    }

    debug!(rows = rows.len(), "decoded stream from reader");

    Ok(rows)
}

impl Automaton<Vec<u8>> {
    /// Decode an automaton from a reader, copying each row's cells.
    ///
    /// _Requires Cargo feature `std`._
    pub fn from_reader(r: &mut impl Read) -> Result<Self, Error> {
        decode(r).map(Self::new)
    }
}

/// Read into a buffer until it is full or the reader is exhausted, returning
/// the number of bytes read.
fn fill(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;

    while n < buf.len() {
        match r.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(k) => n += k,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }

    Ok(n)
}
