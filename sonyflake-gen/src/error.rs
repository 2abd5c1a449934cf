/// possible errors for generators
///
/// a generator only fails in two ways. it is given a bad configuration when
/// created or it has used up every time slot the id layout can hold. a clock
/// moving backwards or too many ids being requested in a single slot is
/// handled by waiting and never shows up as an error.
///
/// ```rust
/// use std::time::{SystemTime, Duration};
///
/// use sonyflake_gen::{Generator, Settings, Error, Misconfiguration};
///
/// let an_hour_from_now = SystemTime::now() + Duration::from_secs(60 * 60);
///
/// let result = Generator::with_settings(Settings::new()
///     .start_time(an_hour_from_now)
///     .machine_id(|| 1));
///
/// match result {
///     Err(Error::InvalidConfiguration(Misconfiguration::StartTimeAhead)) => {
///         // pick a start time that is not in the future
///     },
///     Err(err) => println!("{}", err),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// the generator could not be created with the provided settings
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(Misconfiguration),

    /// the max possible time slot has been reached. the generator will not
    /// be able to produce another id
    #[error("time overflow")]
    TimeOverflow,
}

/// reason a set of [`Settings`](crate::Settings) was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Misconfiguration {
    /// the start time is after the current system time
    #[error("start time is ahead of the current time")]
    StartTimeAhead,

    /// the start time is before the unix epoch
    #[error("start time is before the unix epoch")]
    StartTimeBeforeUnixEpoch,

    /// no machine id source was provided
    #[error("no machine id provided")]
    NoMachineId,

    /// the machine id check returned false for the given id
    #[error("machine id {0} was rejected")]
    MachineIdRejected(u16),
}

impl From<Misconfiguration> for Error {
    fn from(reason: Misconfiguration) -> Error {
        Error::InvalidConfiguration(reason)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
