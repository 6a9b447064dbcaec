//! Parsing of the string tags stored alongside player and clan records.

use thiserror::Error;

/// Error returned when a stored tag does not name a known variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} tag: '{value}'")]
pub struct ParseTagError {
    /// Which enumeration was being parsed ("rank", "division", ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseTagError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Implements `FromStr`, `Display` and string serde for a tag enum.
///
/// The serde representation is the same string `Display` produces, so
/// values round-trip through persisted documents unchanged.
macro_rules! string_tag {
    ($ty:ty, $kind:literal, { $($variant:path => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the stored tag for this value.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($variant => $text,)+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::tag::ParseTagError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($variant),)+
                    other => Err($crate::tag::ParseTagError::new($kind, other)),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_tag;
