//! bit layout of a sonyflake id
//!
//! ```text
//!  0 - 111111111111111111111111111111111111111 - 11111111 - 1111111111111111
//!  |   |                                     |   |      |   |              |
//! 64  63                                    25  24     17  16              1
//!                                          time         |                  |
//!                                                sequence                  |
//!                                                                 machine id
//! ```
//!
//! the top bit is always 0 so an id can be stored as a non negative `i64`.
//! these values are fixed and must not change, ids generated elsewhere rely
//! on the exact layout.

use std::time::Duration;

/// bit length of the time slot segment
pub const BIT_LEN_TIME: u32 = 39;
/// bit length of the sequence segment
pub const BIT_LEN_SEQUENCE: u32 = 8;
/// bit length of the machine id segment
pub const BIT_LEN_MACHINE_ID: u32 = 63 - BIT_LEN_TIME - BIT_LEN_SEQUENCE;

/// nanoseconds in a single time slot (10 milliseconds)
pub const TIME_UNIT_NANOS: u64 = 10_000_000;
/// duration of a single time slot
pub const TIME_UNIT: Duration = Duration::from_nanos(TIME_UNIT_NANOS);

/// max value that a time slot can be. `(1 << BIT_LEN_TIME) - 1`
pub const MAX_TIME: u64 = (1 << BIT_LEN_TIME) - 1;
/// max value that a sequence can be. `(1 << BIT_LEN_SEQUENCE) - 1`
pub const MAX_SEQUENCE: u16 = (1 << BIT_LEN_SEQUENCE) - 1;
/// max value that a machine id can be. `(1 << BIT_LEN_MACHINE_ID) - 1`
pub const MAX_MACHINE_ID: u16 = ((1u32 << BIT_LEN_MACHINE_ID) - 1) as u16;

/// total bits to shift the time slot. `BIT_LEN_SEQUENCE + BIT_LEN_MACHINE_ID`
pub const TIME_SHIFT: u32 = BIT_LEN_SEQUENCE + BIT_LEN_MACHINE_ID;
/// total bits to shift the sequence. `BIT_LEN_MACHINE_ID`
pub const SEQUENCE_SHIFT: u32 = BIT_LEN_MACHINE_ID;

/// bit mask for the time slot. `MAX_TIME << TIME_SHIFT`
pub const TIME_MASK: u64 = MAX_TIME << TIME_SHIFT;
/// bit mask for the sequence. `MAX_SEQUENCE << SEQUENCE_SHIFT`
pub const SEQUENCE_MASK: u64 = (MAX_SEQUENCE as u64) << SEQUENCE_SHIFT;
/// bit mask for the machine id. `MAX_MACHINE_ID`
pub const MACHINE_ID_MASK: u64 = MAX_MACHINE_ID as u64;

/// the unused sign bit
pub const SIGN_MASK: u64 = 1 << 63;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn properly_calculated_consts() {
        let max_time: u64 = 0b111111111111111111111111111111111111111;
        let time_mask: u64 =       0b0_111111111111111111111111111111111111111_00000000_0000000000000000;
        let sequence_mask: u64 =   0b0_000000000000000000000000000000000000000_11111111_0000000000000000;
        let machine_id_mask: u64 = 0b0_000000000000000000000000000000000000000_00000000_1111111111111111;

        assert_eq!(BIT_LEN_MACHINE_ID, 16, "invalid machine id bit length");
        assert_eq!(MAX_TIME, max_time, "invalid max time");
        assert_eq!(MAX_SEQUENCE, 255, "invalid max sequence");
        assert_eq!(MAX_MACHINE_ID, u16::MAX, "invalid max machine id");

        assert_eq!(TIME_SHIFT, 24, "invalid time shift");
        assert_eq!(SEQUENCE_SHIFT, 16, "invalid sequence shift");

        assert_eq!(TIME_MASK, time_mask, "invalid time mask");
        assert_eq!(SEQUENCE_MASK, sequence_mask, "invalid sequence mask");
        assert_eq!(MACHINE_ID_MASK, machine_id_mask, "invalid machine id mask");

        assert_eq!(TIME_MASK | SEQUENCE_MASK | MACHINE_ID_MASK | SIGN_MASK, u64::MAX);
        assert_eq!(TIME_MASK & SEQUENCE_MASK & MACHINE_ID_MASK & SIGN_MASK, 0);
    }

    #[test]
    fn time_unit_is_ten_millis() {
        assert_eq!(TIME_UNIT, Duration::from_millis(10));
    }
}
