//! fixed width base64 rendering of ids
//!
//! an id is read six bits at a time starting from the most significant bit
//! using the standard base64 alphabet. 64 bits do not divide evenly so the
//! last character holds the 4 remaining low bits shifted up by 2. the output
//! is always 11 characters and no padding is added.
//!
//! ```rust
//! let id: u64 = 0;
//!
//! assert_eq!(sonyflake_id::to_base64(id), "AAAAAAAAAAA");
//! assert_eq!(sonyflake_id::from_base64("AAAAAAAAAAA"), Ok(0));
//! ```

use crate::error;

/// total characters in an encoded id
pub const ENCODED_LEN: usize = 11;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// low bits of the final character that never carry id data
const TAIL_PAD_MASK: u8 = 0b11;

fn char_value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// renders the id as 11 characters from `[A-Za-z0-9+/]`
pub fn to_base64(id: u64) -> String {
    let mut rtn = String::with_capacity(ENCODED_LEN);

    for group in 0..ENCODED_LEN {
        let index = if group == ENCODED_LEN - 1 {
            (id << 2) & 0x3f
        } else {
            (id >> (58 - group * 6)) & 0x3f
        };

        rtn.push(ALPHABET[index as usize] as char);
    }

    rtn
}

/// parses an id created by [`to_base64`]
///
/// the string must be exactly 11 characters of the alphabet and the final
/// character cannot have any of its unused low bits set
pub fn from_base64(src: &str) -> error::Result<u64> {
    let bytes = src.as_bytes();

    if bytes.len() != ENCODED_LEN {
        return Err(error::Error::InvalidBase64);
    }

    let mut id: u64 = 0;

    for (group, c) in bytes.iter().enumerate() {
        let Some(value) = char_value(*c) else {
            return Err(error::Error::InvalidBase64);
        };

        if group == ENCODED_LEN - 1 {
            if value & TAIL_PAD_MASK != 0 {
                return Err(error::Error::InvalidBase64);
            }

            id = (id << 4) | (value >> 2) as u64;
        } else {
            id = (id << 6) | value as u64;
        }
    }

    Ok(id)
}
