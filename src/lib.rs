//! # Sonyflake
//!
//! a small library for generating 64 bit ids that sort by creation time.
//! each id is packed from a time slot, a sequence counter, and a machine id
//! so separate machines can create ids without talking to each other as long
//! as each one was given its own machine id.
//!
//! ```rust
//! use sonyflake::Generator;
//!
//! let gen = Generator::new(1)
//!     .expect("failed to create Generator");
//! let id = gen.next_id()
//!     .expect("failed to create id");
//!
//! println!("{} {}", id, sonyflake::to_base64(id));
//! ```
//!
//! creating a generator with a fixed start time and a checked machine id
//!
//! ```rust
//! use std::time::{SystemTime, Duration};
//!
//! use sonyflake::{Generator, Settings};
//!
//! // 2023/03/23 9:00:00, time slots will start from this date
//! let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1679587200);
//!
//! let gen = Generator::with_settings(Settings::new()
//!     .start_time(start)
//!     .machine_id(|| 7)
//!     .check_machine_id(|id| id < 100))
//!     .expect("failed to create Generator");
//!
//! let flake = gen.next_flake()
//!     .expect("failed to create id");
//!
//! assert_eq!(flake.machine_id(), 7);
//! println!("created at {:?}", gen.timestamp(&flake));
//! ```
//!
//! ## Layout
//!
//! | bits | segment | notes |
//! | ---: | :------ | :---- |
//! | 1 | unused | always 0, ids fit in an `i64` |
//! | 39 | time | 10 millisecond slots since the start time, about 174 years |
//! | 8 | sequence | 256 ids per slot |
//! | 16 | machine id | provided when the generator is created |
//!
//! ## Behavior
//!
//! [`Generator`] is thread safe. a single lock is held for the entire
//! `next_id` call. when all 256 sequence values of a slot are used the call
//! blocks the thread until the next slot starts so no id is ever repeated.
//! a clock that moves backwards is treated as the same slot and only shows up
//! as added waiting.
//!
//! with the `tokio` feature `nonblocking::AsyncGenerator` provides the same
//! behavior but suspends the task instead of blocking the thread.
//!
//! ## Errors
//!
//! creating a generator fails with
//! [`InvalidConfiguration`](crate::Error::InvalidConfiguration) if the start
//! time is in the future, no machine id was given, or the machine id check
//! rejected it. generating an id only fails with
//! [`TimeOverflow`](crate::Error::TimeOverflow) once every time slot has been
//! used.
//!
//! ## De/Serialize
//!
//! with the `serde` feature a [`Flake`] de/serializes to its `u64` value. see
//! `serde_ext` for string forms. the `postgres` feature stores a flake as
//! an `INT8`.

pub use sonyflake_core::{layout, traits};
pub use sonyflake_id::{Flake, to_base64, from_base64};
pub use sonyflake_gen::{Generator, Settings, Error, Misconfiguration, Result, wait};

#[cfg(feature = "serde")]
pub use sonyflake_id::serde_ext;
#[cfg(feature = "tokio")]
pub use sonyflake_gen::nonblocking;

/// id value types and their errors
pub mod id {
    pub use sonyflake_id::{Flake, Error, Result, base64};
}
