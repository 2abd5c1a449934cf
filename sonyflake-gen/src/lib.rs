use std::time::SystemTime;

use parking_lot::Mutex;
use sonyflake_core::traits::IdGenerator;
use sonyflake_id::Flake;

pub mod error;
pub mod wait;
mod common;
mod settings;
#[cfg(feature = "tokio")]
pub mod nonblocking;

pub use error::{Error, Misconfiguration, Result};
pub use settings::Settings;

use common::{Counts, Epoch, Reading};

/// thread safe sonyflake generator
///
/// generates ids from the provided start time and machine id. the start
/// time can be anywhere between
/// [`UNIX_EPOCH`](std::time::SystemTime::UNIX_EPOCH) and now.
///
/// the last time slot and sequence are guarded by a single
/// [`Mutex`](parking_lot::Mutex) that is held for the entire call, including
/// any wait. if more than 256 ids are requested in a single 10 millisecond
/// slot the call that runs out of sequence values blocks until the next slot
/// starts. the wait is never longer than a slot unless the system clock has
/// moved backwards.
///
/// the generator cannot be cloned. share it with an
/// [`Arc`](std::sync::Arc) or by reference.
///
/// ```rust
/// use sonyflake_gen::Generator;
///
/// let gen = Generator::new(1)
///     .expect("failed to create Generator");
///
/// println!("start: {:?}", gen.start_time());
/// println!("machine id: {}", gen.machine_id());
///
/// let id = gen.next_id()
///     .expect("failed to create id");
///
/// println!("{} {}", id, sonyflake_id::to_base64(id));
/// ```
#[derive(Debug)]
pub struct Generator {
    epoch: Epoch,
    counts: Mutex<Counts>,
}

impl Generator {
    /// returns a new Generator starting now with the given machine id
    pub fn new(machine_id: u16) -> Result<Self> {
        Self::with_settings(Settings::new().machine_id(move || machine_id))
    }

    /// returns a new Generator
    ///
    /// will return an error if the start time is ahead of the current time
    /// or before the unix epoch, no machine id source was given, or the
    /// machine id check rejects the id
    pub fn with_settings(settings: Settings) -> Result<Self> {
        let epoch = settings.resolve(SystemTime::now())?;

        log::debug!(
            "created generator. machine id: {} origin slot: {}",
            epoch.mid,
            epoch.origin
        );

        Ok(Generator {
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
    ///
    /// only meaningful for flakes created by this generator or one with the
    /// same start time
    pub fn timestamp(&self, flake: &Flake) -> Option<SystemTime> {
        self.epoch.timestamp(flake)
    }

    /// retrieves the next available id
    pub fn next_id(&self) -> Result<u64> {
        self.next_flake().map(u64::from)
    }

    /// retrieves the next available id in its decomposed form
    ///
    /// the only error is [`TimeOverflow`](crate::Error::TimeOverflow) once
    /// every time slot has been used
    pub fn next_flake(&self) -> Result<Flake> {
        let mut counts = self.counts.lock();

        // read the clock only once the lock is held so the reading is not
        // older than the state it is compared against
        let reading = Reading::now();

        if let Some(dur) = counts.advance(self.epoch.current_slot(&reading), reading.rem) {
            common::log_wait(&dur);

            wait::block_duration(&dur);
        }

        counts.flake(self.epoch.mid).map_err(|err| {
            log::error!("generator ran out of time slots. last slot: {}", counts.last_slot);

            err
        })
    }
}

impl IdGenerator for Generator {
    type Error = Error;
    type Id = Flake;
    type Output = Result<Flake>;

    fn next_id(&self) -> Self::Output {
        Generator::next_flake(self)
    }
}
