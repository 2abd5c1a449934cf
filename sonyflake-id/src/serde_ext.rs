//! additional serde options for de/serializing a flake
//!
//! provides modules for converting a flake to a string if something cannot
//! handle working with 64 bit integers (javascript). `string_id` uses the
//! decimal form of the id and `base64_id` uses the 11 character form from
//! [`to_base64`](crate::base64::to_base64).
//!
//! ```rust
//! use serde_derive::{Serialize, Deserialize};
//! use sonyflake_id::Flake;
//! use sonyflake_id::serde_ext::{string_id, base64_id};
//!
//! #[derive(Serialize, Deserialize)]
//! pub struct MyStruct {
//!     #[serde(with = "string_id")]
//!     id: Flake,
//!     #[serde(with = "base64_id")]
//!     parent: Flake,
//! }
//!
//! let my_struct = MyStruct {
//!     id: Flake::from_parts(1, 1, 1).unwrap(),
//!     parent: Flake::from_parts(1, 0, 1).unwrap(),
//! };
//!
//! let json_string = serde_json::to_string(&my_struct).unwrap();
//!
//! println!("{}", json_string);
//! ```

use std::fmt;

use serde::de;

use crate::Flake;

#[derive(Clone, Copy)]
enum Format {
    Decimal,
    Base64,
}

impl Format {
    fn parse(&self, s: &str) -> Option<Flake> {
        match self {
            Format::Decimal => s.parse().ok(),
            Format::Base64 => Flake::from_base64(s).ok(),
        }
    }

    fn render(&self, flake: &Flake) -> String {
        match self {
            Format::Decimal => flake.to_string(),
            Format::Base64 => flake.to_base64(),
        }
    }
}

/// visitor for deserializing a string to a flake
struct StrVisitor {
    format: Format,
}

impl<'de> de::Visitor<'de> for StrVisitor {
    type Value = Flake;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.format {
            Format::Decimal => write!(f, "non empty integer string within the valid range of a flake"),
            Format::Base64 => write!(f, "11 character base64 string of a flake"),
        }
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let Some(flake) = self.format.parse(s) else {
            return Err(E::invalid_value(de::Unexpected::Str(s), &self));
        };

        Ok(flake)
    }
}

struct OptionStrVisitor {
    format: Format,
}

impl<'de> de::Visitor<'de> for OptionStrVisitor {
    type Value = Option<Flake>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "optional flake string")
    }

    fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>
    {
        d.deserialize_str(StrVisitor {
            format: self.format
        }).map(Some)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        Ok(None)
    }
}

macro_rules! string_format_mods {
    ($name:ident, $option_name:ident, $format:expr, $doc:literal) => {
        #[doc = $doc]
        ///
        /// structured to be used in `#[serde(with = "...")]`
        pub mod $name {
            use serde::{ser, de};

            use crate::Flake;

            /// serializes a given flake to a string
            pub fn serialize<S>(flake: &Flake, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer
            {
                serializer.serialize_str($format.render(flake).as_str())
            }

            /// deserializes a given string to a flake
            pub fn deserialize<'de, D>(deserializer: D) -> Result<Flake, D::Error>
            where
                D: de::Deserializer<'de>
            {
                deserializer.deserialize_str(super::StrVisitor {
                    format: $format
                })
            }
        }

        #[doc = $doc]
        ///
        /// same as the non option version but handles a missing value
        pub mod $option_name {
            use serde::{ser, de};

            use crate::Flake;

            /// serializes a given optional flake to a string
            pub fn serialize<S>(flake: &Option<Flake>, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer
            {
                match flake {
                    Some(ref v) => serializer.serialize_some($format.render(v).as_str()),
                    None => serializer.serialize_none()
                }
            }

            /// deserializes a given optional string to a flake
            pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Flake>, D::Error>
            where
                D: de::Deserializer<'de>
            {
                deserializer.deserialize_option(super::OptionStrVisitor {
                    format: $format
                })
            }
        }
    };
}

string_format_mods!(
    string_id,
    option_string_id,
    super::Format::Decimal,
    "de/serializes a flake to a base 10 number string"
);

string_format_mods!(
    base64_id,
    option_base64_id,
    super::Format::Base64,
    "de/serializes a flake to an 11 character base64 string"
);

#[cfg(test)]
mod test {
    use serde_derive::{Serialize, Deserialize};

    use crate::Flake;
    use super::{string_id, option_string_id, base64_id, option_base64_id};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct StringJson {
        #[serde(with = "string_id")]
        id: Flake,
        #[serde(with = "option_string_id")]
        parent: Option<Flake>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Base64Json {
        #[serde(with = "base64_id")]
        id: Flake,
        #[serde(with = "option_base64_id")]
        parent: Option<Flake>,
    }

    fn flake() -> Flake {
        Flake::from_parts(1, 1, 1).unwrap()
    }

    #[test]
    fn to_string() {
        let obj = StringJson { id: flake(), parent: None };

        let json_string = serde_json::to_string(&obj)
            .expect("failed to create json string");

        assert_eq!(json_string, "{\"id\":\"16842753\",\"parent\":null}", "invalid json string");
    }

    #[test]
    fn from_string() {
        let obj: StringJson = serde_json::from_str("{\"id\":\"16842753\",\"parent\":\"16842753\"}")
            .expect("failed to parse json string");

        assert_eq!(obj, StringJson { id: flake(), parent: Some(flake()) });
    }

    #[test]
    fn from_invalid_string() {
        assert!(serde_json::from_str::<StringJson>("{\"id\":\"abc\",\"parent\":null}").is_err());
        assert!(serde_json::from_str::<StringJson>("{\"id\":\"-1\",\"parent\":null}").is_err());
    }

    #[test]
    fn base64_both_ways() {
        let obj = Base64Json { id: flake(), parent: Some(flake()) };
        let encoded = flake().to_base64();

        let json_string = serde_json::to_string(&obj)
            .expect("failed to create json string");

        assert_eq!(
            json_string,
            format!("{{\"id\":\"{}\",\"parent\":\"{}\"}}", encoded, encoded)
        );

        let parsed: Base64Json = serde_json::from_str(&json_string)
            .expect("failed to parse json string");

        assert_eq!(parsed, obj);
    }

    #[test]
    fn from_invalid_base64() {
        assert!(serde_json::from_str::<Base64Json>("{\"id\":\"AAAA\",\"parent\":null}").is_err());
    }
}
