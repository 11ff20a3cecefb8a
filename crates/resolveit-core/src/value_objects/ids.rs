//! Integer identifiers assigned by the store
//!
//! `ComplaintId` and `UserId` wrap the BIGSERIAL keys of their tables so the two
//! can never be swapped by accident. Both serialize as plain JSON numbers and
//! accept either a number or a numeric string when deserialized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefix of the public tracking code handed to complainants (`COMP42`)
pub const DISPLAY_CODE_PREFIX: &str = "COMP";

/// Error when parsing an identifier from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
    #[error("identifier must be positive")]
    NotPositive,
}

fn check_positive(value: i64) -> Result<i64, IdParseError> {
    if value <= 0 {
        return Err(IdParseError::NotPositive);
    }
    Ok(value)
}

fn parse_positive(s: &str) -> Result<i64, IdParseError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| IdParseError::InvalidFormat)
        .and_then(check_positive)
}

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Create an identifier from a raw key
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse a strictly positive identifier
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                parse_positive(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_i64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                use serde::de::{self, Visitor};

                struct IdVisitor;

                impl<'de> Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str($expecting)
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        check_positive(value).map($name).map_err(de::Error::custom)
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        let value = i64::try_from(value)
                            .map_err(|_| de::Error::custom("identifier out of range"))?;
                        check_positive(value).map($name).map_err(de::Error::custom)
                    }

                    fn visit_str<E>(self, value: &str) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        $name::parse(value).map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_any(IdVisitor)
            }
        }
    };
}

integer_id!(
    /// Identifier of a complaint row
    ComplaintId,
    "a string or integer complaint id"
);

integer_id!(
    /// Identifier of a registered user
    UserId,
    "a string or integer user id"
);

impl ComplaintId {
    /// Public tracking code, e.g. `COMP42`
    pub fn display_code(&self) -> String {
        format!("{DISPLAY_CODE_PREFIX}{}", self.0)
    }
}

/// Identifier accepted by the public tracking lookup
///
/// Either the raw numeric id (`42`) or the display code (`COMP42`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingIdentifier(ComplaintId);

impl TrackingIdentifier {
    /// Strip the display prefix if present and parse the remaining id
    pub fn parse(raw: &str) -> Result<Self, IdParseError> {
        let trimmed = raw.trim();
        let numeric = trimmed.strip_prefix(DISPLAY_CODE_PREFIX).unwrap_or(trimmed);
        ComplaintId::parse(numeric).map(Self)
    }

    /// The complaint this identifier refers to
    #[inline]
    pub fn complaint_id(self) -> ComplaintId {
        self.0
    }
}

/// Which bucket of complaints a submitter listing should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitterScope {
    /// Complaints filed by a specific user
    Submitter(UserId),
    /// Anonymous complaints that carry no submitter
    Anonymous,
}

impl SubmitterScope {
    /// Interpret the overloaded path parameter used by older clients
    ///
    /// `""`, `"0"` and `"null"` select the anonymous bucket, anything else must
    /// be a positive user id.
    pub fn from_legacy_param(raw: &str) -> Result<Self, IdParseError> {
        match raw.trim() {
            "" | "0" | "null" => Ok(Self::Anonymous),
            other => UserId::parse(other).map(Self::Submitter),
        }
    }
}
