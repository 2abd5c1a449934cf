use std::fmt;
use std::time::SystemTime;

use crate::common::{Epoch, Reading};
use crate::error::{self, Misconfiguration};

type MachineIdSource = Box<dyn FnOnce() -> u16>;
type MachineIdCheck = Box<dyn FnOnce(u16) -> bool>;

/// configuration for creating a generator
///
/// every value is optional at this point. the start time defaults to the
/// time the generator is created, the machine id must be given and the check
/// is skipped when not set. the machine id source and check are called once
/// when the generator is created.
///
/// ```rust
/// use std::time::{SystemTime, Duration};
///
/// use sonyflake_gen::{Generator, Settings};
///
/// // 2023/03/23 9:00:00
/// let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1679587200);
///
/// let gen = Generator::with_settings(Settings::new()
///     .start_time(start)
///     .machine_id(|| 42)
///     .check_machine_id(|id| id != 0))
///     .expect("failed to create Generator");
///
/// assert_eq!(gen.machine_id(), 42);
/// ```
#[derive(Default)]
pub struct Settings {
    start_time: Option<SystemTime>,
    machine_id: Option<MachineIdSource>,
    check_machine_id: Option<MachineIdCheck>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// time that all time slots will be counted from. cannot be ahead of
    /// the current time
    pub fn start_time(mut self, start_time: SystemTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// where to get the machine id from
    pub fn machine_id<F>(mut self, source: F) -> Self
    where
        F: FnOnce() -> u16 + 'static
    {
        self.machine_id = Some(Box::new(source));
        self
    }

    /// validates the machine id retrieved from the source. returning false
    /// will fail the creation of the generator
    pub fn check_machine_id<F>(mut self, check: F) -> Self
    where
        F: FnOnce(u16) -> bool + 'static
    {
        self.check_machine_id = Some(Box::new(check));
        self
    }

    /// checks the settings against the given time and produces the fixed
    /// values of a generator
    pub(crate) fn resolve(self, now: SystemTime) -> error::Result<Epoch> {
        let start = self.start_time.unwrap_or(now);

        if start > now {
            return Err(Misconfiguration::StartTimeAhead.into());
        }

        if start < SystemTime::UNIX_EPOCH {
            return Err(Misconfiguration::StartTimeBeforeUnixEpoch.into());
        }

        let Some(source) = self.machine_id else {
            return Err(Misconfiguration::NoMachineId.into());
        };

        let mid = source();

        if let Some(check) = self.check_machine_id {
            if !check(mid) {
                return Err(Misconfiguration::MachineIdRejected(mid).into());
            }
        }

        Ok(Epoch {
            start,
            origin: Reading::from_system_time(start).slot,
            mid,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("start_time", &self.start_time)
            .field("machine_id", &self.machine_id.is_some())
            .field("check_machine_id", &self.check_machine_id.is_some())
            .finish()
    }
}
