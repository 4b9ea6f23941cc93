//! Convenience interfaces for common decoding and rendering patterns.
//!
//! The functions in this module are suited to decoding whole streams from
//! files and byte slices into an [`Automaton`], and rendering windows of it
//! onto a [`Surface`].
//!
//! ```
//! let bytes = std::fs::read("history.eca")?;
//! let automaton = Automaton::from_slice(&bytes)?;
//! let bitmap: Bitmap = automaton.render(-32, 0, 64, 32);
//! println!("{bitmap}");
//! ```

pub mod automaton;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
pub mod surface;

pub use automaton::Automaton;
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;
pub use surface::{Bitmap, Surface};
