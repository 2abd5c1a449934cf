use std::time::{Duration, SystemTime};

use sonyflake_core::layout::{self, TIME_UNIT_NANOS};
use sonyflake_id::Flake;

use crate::error;

/// a point in time split into whole time slots since the unix epoch and the
/// nanoseconds already spent in the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reading {
    pub slot: i64,
    pub rem: u64,
}

impl Reading {
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        let unit = TIME_UNIT_NANOS as u128;

        match time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(dur) => {
                let nanos = dur.as_nanos();

                Reading {
                    slot: (nanos / unit) as i64,
                    rem: (nanos % unit) as u64,
                }
            },
            Err(err) => {
                // the clock is before the unix epoch, round down to the
                // previous slot so the remainder stays positive
                let nanos = err.duration().as_nanos();
                let partial = nanos % unit;
                let slots = (nanos / unit) as i64 + (partial != 0) as i64;

                Reading {
                    slot: -slots,
                    rem: ((unit - partial) % unit) as u64,
                }
            }
        }
    }
}

/// values of a generator that do not change after it is created
#[derive(Debug, Clone, Copy)]
pub(crate) struct Epoch {
    pub start: SystemTime,
    /// time slot of `start` since the unix epoch
    pub origin: i64,
    pub mid: u16,
}

impl Epoch {
    /// time slot of the reading relative to the origin
    pub fn current_slot(&self, reading: &Reading) -> i64 {
        reading.slot - self.origin
    }

    /// wall clock time of the slot the flake was created in
    pub fn timestamp(&self, flake: &Flake) -> Option<SystemTime> {
        let slots = u64::try_from(self.origin).ok()?.checked_add(flake.time())?;
        let nanos = slots.checked_mul(TIME_UNIT_NANOS)?;

        SystemTime::UNIX_EPOCH.checked_add(Duration::from_nanos(nanos))
    }
}

/// mutable state of a generator. must always be updated as a single unit
#[derive(Debug)]
pub(crate) struct Counts {
    pub last_slot: i64,
    pub sequence: u16,
}

impl Counts {
    /// the sequence starts at max so the first call always resets it to 0
    pub fn new() -> Self {
        Counts {
            last_slot: 0,
            sequence: layout::MAX_SEQUENCE,
        }
    }

    /// moves to the current slot or increments the sequence of the last
    /// slot
    ///
    /// when the sequence wraps the last slot is pushed one ahead and the
    /// duration until the clock reaches that slot is returned. the caller
    /// must wait that long before handing out the id.
    pub fn advance(&mut self, current: i64, rem: u64) -> Option<Duration> {
        if self.last_slot < current {
            self.last_slot = current;
            self.sequence = 0;

            return None;
        }

        self.sequence = self.sequence.wrapping_add(1) & layout::MAX_SEQUENCE;

        if self.sequence != 0 {
            return None;
        }

        self.last_slot += 1;

        let overtime = (self.last_slot - current) as u64;
        let total = Duration::from_nanos(overtime.saturating_mul(TIME_UNIT_NANOS));

        // rem is from the reading taken before the wait. time spent since
        // then only makes the wait overshoot, never end early

        Some(total.saturating_sub(Duration::from_nanos(rem)))
    }

    /// packs the current state into a flake
    ///
    /// fails with TimeOverflow once the last slot no longer fits in the time
    /// segment. the state is not touched so every following call fails too
    pub fn flake(&self, mid: u16) -> error::Result<Flake> {
        let Ok(time) = u64::try_from(self.last_slot) else {
            return Err(error::Error::TimeOverflow);
        };

        if time > layout::MAX_TIME {
            return Err(error::Error::TimeOverflow);
        }

        Flake::from_parts(time, self.sequence, mid)
            .map_err(|_| error::Error::TimeOverflow)
    }
}

/// logs a sequence exhaustion wait. anything longer than a single slot
/// means the clock is behind the slots already handed out
pub(crate) fn log_wait(dur: &Duration) {
    if *dur > layout::TIME_UNIT {
        log::warn!(
            "clock is behind the last issued time slot, waiting {:?} for the next id",
            dur
        );
    } else {
        log::trace!("sequence exhausted, waiting {:?} for the next time slot", dur);
    }
}
