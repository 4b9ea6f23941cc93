//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over how
//! row records are read, for example when bytes arrive incrementally or the
//! stream is larger than memory. See [`crate::avec`] for implementations
//! covering common decoding patterns.
//!
//! # Format
//!
//! A stream is a sequence of records with no header, footer, or separator:
//!
//! ```text
//! record := offset:i64 byte_length:u64 data:[u8; byte_length]
//! stream := record*
//! ```
//!
//! Both header fields are big-endian. Cells are packed most significant bit
//! first, so bit 7 of the first byte is the leftmost cell of the segment.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once enough bytes are ready,
//! transition to another state by calling the token's `advance` method. This
//! will return a successor state token, along with any extracted data.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed. Some areas of the decoding process are not represented in the
//! finite-state machine and must be carefully written:
//!
//! - Reading bytes from the correct place in the stream, including buffering
//! as necessary.
//!
//! - Ending decoding once the stream is exhausted. The format carries no
//! record count, so the stream ends wherever the input does; input ending
//! partway through a record is truncated.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod data;
pub mod header;
pub mod row;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::RecordHeader;
