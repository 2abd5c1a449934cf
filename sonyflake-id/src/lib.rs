//! the flake id type for sonyflake
//!
//! a [`Flake`] is the decomposed form of a 64 bit sonyflake id. it can be
//! built from its parts or from an integer and turned back into either. the
//! [`base64`] module holds the fixed width text rendering of an id.

pub mod error;
pub mod base64;

#[cfg(feature = "serde")]
pub mod serde_ext;
#[cfg(feature = "postgres")]
mod pg;

mod flake;

pub use error::{Error, Result};
pub use flake::Flake;
pub use base64::{to_base64, from_base64};
