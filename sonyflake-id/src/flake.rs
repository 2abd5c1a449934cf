use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sonyflake_core::layout;
use sonyflake_core::traits;

use crate::error;

/// decomposed sonyflake id
///
/// the format is a 39 bit time slot, 8 bit sequence, and 16 bit machine id
/// with the sign bit left unused. see
/// [`layout`](sonyflake_core::layout) for the full breakdown.
///
/// # Time
///
/// the number of 10 millisecond slots that have passed since the epoch of
/// the generator that created the flake. the epoch is not stored in the
/// flake so converting the time back into a date requires the generator or
/// the epoch it was created with.
///
/// # Sequence
///
/// count of the flakes created by a generator in the same time slot. the
/// first flake of a slot always has a sequence of 0.
///
/// # Machine Id
///
/// the id that was provided to the generator when it was created.
///
/// ordering and hashing follow the numeric value of the id.
///
/// ```rust
/// use sonyflake_id::Flake;
///
/// let flake = Flake::from_parts(1, 1, 1)
///     .expect("invalid flake parts");
///
/// let id: u64 = flake.into();
/// println!("{}", id);
///
/// let and_back: Flake = id.try_into()
///     .expect("invalid u64 was provided");
/// assert_eq!(and_back, flake);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flake {
    time: u64,
    seq: u16,
    mid: u16,
}

impl Flake {
    /// generates a Flake from the provided parts
    ///
    /// [`TimeInvalid`](crate::error::Error::TimeInvalid) is returned if the
    /// time is greater than [`MAX_TIME`](sonyflake_core::layout::MAX_TIME) and
    /// [`SequenceInvalid`](crate::error::Error::SequenceInvalid) if the
    /// sequence is greater than
    /// [`MAX_SEQUENCE`](sonyflake_core::layout::MAX_SEQUENCE)
    pub fn from_parts(time: u64, seq: u16, mid: u16) -> error::Result<Self> {
        if time > layout::MAX_TIME {
            return Err(error::Error::TimeInvalid);
        }

        if seq > layout::MAX_SEQUENCE {
            return Err(error::Error::SequenceInvalid);
        }

        Ok(Flake { time, seq, mid })
    }

    /// splits the current Flake into its individual parts
    pub fn into_parts(self) -> (u64, u16, u16) {
        (self.time, self.seq, self.mid)
    }

    /// returns the time slot
    pub fn time(&self) -> u64 {
        self.time
    }

    /// returns the sequence
    pub fn sequence(&self) -> u16 {
        self.seq
    }

    /// returns the machine id
    pub fn machine_id(&self) -> u16 {
        self.mid
    }

    /// time that passed between the generator epoch and the flake slot
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.time * layout::TIME_UNIT_NANOS)
    }

    /// generates the unique id
    pub fn id(&self) -> u64 {
        (self.time << layout::TIME_SHIFT)
            | ((self.seq as u64) << layout::SEQUENCE_SHIFT)
            | self.mid as u64
    }

    /// renders the id as an 11 character base64 string. see
    /// [`to_base64`](crate::base64::to_base64)
    pub fn to_base64(&self) -> String {
        crate::base64::to_base64(self.id())
    }

    /// parses a Flake from an 11 character base64 string
    pub fn from_base64(src: &str) -> error::Result<Self> {
        Flake::try_from(crate::base64::from_base64(src)?)
    }
}

impl traits::Id for Flake {
    type BaseType = u64;

    fn id(&self) -> Self::BaseType {
        Flake::id(self)
    }
}

impl From<Flake> for u64 {
    #[inline(always)]
    fn from(flake: Flake) -> u64 {
        flake.id()
    }
}

impl From<&Flake> for u64 {
    #[inline(always)]
    fn from(flake: &Flake) -> u64 {
        flake.id()
    }
}

impl From<Flake> for i64 {
    #[inline(always)]
    fn from(flake: Flake) -> i64 {
        // sign bit is never set
        flake.id() as i64
    }
}

impl TryFrom<u64> for Flake {
    type Error = error::Error;

    /// integer must not have the sign bit set
    fn try_from(id: u64) -> Result<Self, Self::Error> {
        if id & layout::SIGN_MASK != 0 {
            return Err(error::Error::InvalidId);
        }

        Ok(Flake {
            time: (id & layout::TIME_MASK) >> layout::TIME_SHIFT,
            seq: ((id & layout::SEQUENCE_MASK) >> layout::SEQUENCE_SHIFT) as u16,
            mid: (id & layout::MACHINE_ID_MASK) as u16,
        })
    }
}

impl TryFrom<i64> for Flake {
    type Error = error::Error;

    /// integer must be greater than or equal to `0`
    fn try_from(id: i64) -> Result<Self, Self::Error> {
        if id < 0 {
            return Err(error::Error::InvalidId);
        }

        Flake::try_from(id as u64)
    }
}

impl FromStr for Flake {
    type Err = error::Error;

    /// parses the decimal form of an id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Ok(id) = s.parse::<u64>() else {
            return Err(error::Error::InvalidId);
        };

        Flake::try_from(id)
    }
}

impl fmt::Display for Flake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl fmt::Debug for Flake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();

        f.debug_struct("Flake")
            .field("id", &id)
            .field("time", &self.time)
            .field("seq", &self.seq)
            .field("mid", &self.mid)
            .finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::{de, ser};

    use super::Flake;

    impl ser::Serialize for Flake {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: ser::Serializer
        {
            serializer.serialize_u64(self.id())
        }
    }

    struct NumVisitor;

    impl<'de> de::Visitor<'de> for NumVisitor {
        type Value = Flake;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "integer from 0 to i64::MAX")
        }

        fn visit_i64<E>(self, i: i64) -> Result<Self::Value, E>
        where
            E: de::Error
        {
            let Ok(flake) = Flake::try_from(i) else {
                return Err(E::invalid_value(de::Unexpected::Signed(i), &self));
            };

            Ok(flake)
        }

        fn visit_u64<E>(self, u: u64) -> Result<Self::Value, E>
        where
            E: de::Error
        {
            let Ok(flake) = Flake::try_from(u) else {
                return Err(E::invalid_value(de::Unexpected::Unsigned(u), &self));
            };

            Ok(flake)
        }
    }

    impl<'de> de::Deserialize<'de> for Flake {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: de::Deserializer<'de>,
        {
            deserializer.deserialize_u64(NumVisitor)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn properly_shifted_integers() {
        let flake = Flake::from_parts(1, 1, 1).unwrap();

        let expected: u64 = 0b0_000000000000000000000000000000000000001_00000001_0000000000000001;

        assert_eq!(
            flake.id(),
            expected,
            "improperly formatted flake.\n{:064b}\n{:064b}\n{:#?}",
            expected,
            flake.id(),
            flake
        );
    }

    #[test]
    fn to_int_and_back() {
        let flake = Flake::from_parts(layout::MAX_TIME, layout::MAX_SEQUENCE, 42).unwrap();

        let to_int: u64 = (&flake).into();
        let to_flake: Flake = to_int.try_into().unwrap();

        assert_eq!(to_flake, flake);
        assert_eq!(to_flake.into_parts(), (layout::MAX_TIME, layout::MAX_SEQUENCE, 42));
    }

    #[test]
    fn invalid_parts() {
        assert_eq!(
            Flake::from_parts(layout::MAX_TIME + 1, 0, 0),
            Err(error::Error::TimeInvalid)
        );
        assert_eq!(
            Flake::from_parts(0, layout::MAX_SEQUENCE + 1, 0),
            Err(error::Error::SequenceInvalid)
        );
    }

    #[test]
    fn sign_bit_rejected() {
        assert_eq!(Flake::try_from(u64::MAX), Err(error::Error::InvalidId));
        assert_eq!(Flake::try_from(-1i64), Err(error::Error::InvalidId));
        assert!(Flake::try_from(i64::MAX).is_ok());
    }

    #[test]
    fn ordering_follows_id() {
        let a = Flake::from_parts(1, 255, u16::MAX).unwrap();
        let b = Flake::from_parts(2, 0, 0).unwrap();
        let c = Flake::from_parts(2, 1, 0).unwrap();

        assert!(a < b && b < c);
        assert!(a.id() < b.id() && b.id() < c.id());
    }

    #[test]
    fn elapsed_in_time_slots() {
        let flake = Flake::from_parts(150, 0, 0).unwrap();

        assert_eq!(flake.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn decimal_and_base64_strings() {
        let flake = Flake::from_parts(1, 1, 1).unwrap();

        assert_eq!(flake.to_string(), "16842753");
        assert_eq!("16842753".parse::<Flake>(), Ok(flake));
        assert_eq!("-1".parse::<Flake>(), Err(error::Error::InvalidId));

        let encoded = flake.to_base64();

        assert_eq!(Flake::from_base64(&encoded), Ok(flake));
        assert_eq!(Flake::from_base64("//////////8"), Err(error::Error::InvalidId));
    }

    #[cfg(feature = "serde")]
    mod serde_ext {
        use super::*;

        use serde_derive::{Serialize, Deserialize};

        #[derive(Serialize, Deserialize)]
        struct IdFlake {
            id: Flake,
        }

        #[test]
        fn to_int() {
            let obj = IdFlake {
                id: Flake::from_parts(1, 1, 1).unwrap(),
            };

            let json_string = serde_json::to_string(&obj)
                .expect("failed to create json string");

            assert_eq!(json_string, "{\"id\":16842753}", "invalid json string");
        }

        #[test]
        fn from_int() {
            let obj: IdFlake = serde_json::from_str("{\"id\":16842753}")
                .expect("failed to parse json string");

            assert_eq!(obj.id, Flake::from_parts(1, 1, 1).unwrap(), "invalid parsed id");
        }

        #[test]
        fn from_invalid_int() {
            assert!(serde_json::from_str::<IdFlake>("{\"id\":-1}").is_err());
            assert!(serde_json::from_str::<IdFlake>("{\"id\":18446744073709551615}").is_err());
        }
    }
}
