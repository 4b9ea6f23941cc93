#![no_std]

//! A windowed viewer for elementary cellular automaton histories.
//!
//! Each generation of an automaton's history is stored as a row: a bounded,
//! bit-packed explicit segment flanked on either side by an infinite run of
//! that segment's first or last bit. Ecaview decodes streams of such rows and
//! reconstructs arbitrary horizontal windows of them for display.
//!
//! Most users should begin with the [`Automaton`](avec::automaton::Automaton)
//! type and the decoders in the [`avec`] module. Applications needing finer
//! control over buffering (such as those reading rows from a socket) can drive
//! the finite-state machine in the [`sans`] module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder and PBM output (default).
//! - `tracing`: emit `tracing` events while decoding and rendering (default).

extern crate alloc;

#[macro_use]
mod log;

pub mod avec;
pub mod sans;
