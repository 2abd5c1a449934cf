/// possible errors when working with flakes
///
/// since the errors are not very complex no additional information is
/// provided. the failing value is available where it was given to the call
/// that failed.
///
/// ```rust
/// use sonyflake_id::{Flake, Error};
///
/// match Flake::try_from(u64::MAX) {
///     Ok(flake) => println!("{}", flake),
///     Err(Error::InvalidId) => println!("sign bit is set"),
///     Err(err) => println!("{}", err),
/// }
/// ```
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// the provided integer has the sign bit set or is negative
    #[error("invalid id")]
    InvalidId,

    /// a provided time slot is greater than the max value
    #[error("time invalid")]
    TimeInvalid,

    /// a provided sequence is greater than the max value
    #[error("sequence invalid")]
    SequenceInvalid,

    /// the provided string is not an 11 character base64 id
    #[error("invalid base64 id")]
    InvalidBase64,
}

pub type Result<T> = std::result::Result<T, Error>;
