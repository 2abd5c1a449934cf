//! shared pieces for the sonyflake crates
//!
//! [`layout`] holds the bit widths and time unit that every id is packed
//! with, [`traits`] holds the small set of traits used to work with
//! generators generically.

pub mod layout;
pub mod traits;
