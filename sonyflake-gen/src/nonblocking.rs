//! generator for async contexts
//!
//! same behavior as [`Generator`](crate::Generator) except that running out
//! of sequence values suspends the calling task with
//! [`tokio::time::sleep`] instead of blocking the worker thread. the lock is
//! held across the sleep so calls are still fully serialized.
//!
//! ```rust
//! use sonyflake_gen::nonblocking::AsyncGenerator;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let gen = AsyncGenerator::new(1)
//!     .expect("failed to create AsyncGenerator");
//!
//! let id = gen.next_id().await
//!     .expect("failed to create id");
//!
//! println!("{}", id);
//! # }
//! ```

use std::time::SystemTime;

use sonyflake_id::Flake;
use tokio::sync::Mutex;

use crate::common::{self, Counts, Epoch, Reading};
use crate::error::Result;
use crate::settings::Settings;

/// task suspending sonyflake generator
///
/// shares the lock and wait behavior of [`Generator`](crate::Generator)
/// except the wait uses [`tokio::time::sleep`]. cannot be cloned, share it
/// with an [`Arc`](std::sync::Arc).
#[derive(Debug)]
pub struct AsyncGenerator {
    epoch: Epoch,
    counts: Mutex<Counts>,
}

impl AsyncGenerator {
    /// returns a new AsyncGenerator starting now with the given machine id
    pub fn new(machine_id: u16) -> Result<Self> {
        Self::with_settings(Settings::new().machine_id(move || machine_id))
    }

    /// returns a new AsyncGenerator. fails for the same reasons as
    /// [`Generator::with_settings`](crate::Generator::with_settings)
    pub fn with_settings(settings: Settings) -> Result<Self> {
        let epoch = settings.resolve(SystemTime::now())?;

        log::debug!(
            "created async generator. machine id: {} origin slot: {}",
            epoch.mid,
            epoch.origin
        );

        Ok(AsyncGenerator {
            epoch,
            counts: Mutex::new(Counts::new()),
        })
    }

    /// returns start time
    pub fn start_time(&self) -> &SystemTime {
        &self.epoch.start
    }

    /// returns machine id
    pub fn machine_id(&self) -> u16 {
        self.epoch.mid
    }

    /// the time of the slot the flake was created in
    pub fn timestamp(&self, flake: &Flake) -> Option<SystemTime> {
        self.epoch.timestamp(flake)
    }

    /// retrieves the next available id
    pub async fn next_id(&self) -> Result<u64> {
        self.next_flake().await.map(u64::from)
    }

    /// retrieves the next available id in its decomposed form
    ///
    /// the only error is [`TimeOverflow`](crate::Error::TimeOverflow) once
    /// every time slot has been used
    pub async fn next_flake(&self) -> Result<Flake> {
        let mut counts = self.counts.lock().await;
        let reading = Reading::now();

        if let Some(dur) = counts.advance(self.epoch.current_slot(&reading), reading.rem) {
            common::log_wait(&dur);

            tokio::time::sleep(dur).await;
        }

        counts.flake(self.epoch.mid).map_err(|err| {
            log::error!("async generator ran out of time slots. last slot: {}", counts.last_slot);

            err
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use sonyflake_core::layout;

    use super::*;
    use crate::error::{Error, Misconfiguration};

    fn past_generator() -> AsyncGenerator {
        AsyncGenerator::with_settings(Settings::new()
            .start_time(SystemTime::now() - Duration::from_secs(60))
            .machine_id(|| 3))
            .expect("failed to create AsyncGenerator")
    }

    #[tokio::test]
    async fn unique_ids() {
        let gen = past_generator();
        let mut unique_ids = HashSet::new();
        let total = layout::MAX_SEQUENCE as usize * 3;

        for _ in 0..total {
            let flake = gen.next_flake().await.expect("failed next_flake");

            assert_eq!(flake.machine_id(), 3);
            assert!(unique_ids.insert(flake), "duplicate flake {:?}", flake);
        }
    }

    #[tokio::test]
    async fn unique_ids_across_tasks() {
        let gen = Arc::new(past_generator());
        let mut handles = Vec::with_capacity(4);

        for _ in 0..handles.capacity() {
            let g = Arc::clone(&gen);

            handles.push(tokio::spawn(async move {
                let mut list = Vec::with_capacity(300);

                for _ in 0..list.capacity() {
                    list.push(g.next_id().await.expect("failed next_id"));
                }

                list
            }));
        }

        let mut unique_ids = HashSet::new();

        for handle in handles {
            for id in handle.await.expect("task panicked") {
                assert!(unique_ids.insert(id), "duplicate id {}", id);
            }
        }
    }

    #[tokio::test]
    async fn time_overflow() {
        let gen = past_generator();

        {
            let mut counts = gen.counts.lock().await;
            counts.last_slot = 1 << layout::BIT_LEN_TIME;
            counts.sequence = 0;
        }

        assert_eq!(gen.next_id().await, Err(Error::TimeOverflow));
    }

    #[test]
    fn missing_machine_id() {
        assert!(matches!(
            AsyncGenerator::with_settings(Settings::new()),
            Err(Error::InvalidConfiguration(Misconfiguration::NoMachineId))
        ));
    }
}
