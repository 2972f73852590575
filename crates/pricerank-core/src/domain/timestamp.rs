use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

const LOCAL_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const LOCAL_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const CALENDAR_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// Instant of a price observation, presented in the deployment's UTC offset.
///
/// Equality and ordering compare the underlying instant, so two values
/// in different offsets that denote the same moment are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriceTime(OffsetDateTime);

impl PriceTime {
    /// Build from milliseconds since the Unix epoch.
    pub fn from_unix_millis(millis: i64, offset: UtcOffset) -> Result<Self, ValidationError> {
        let out_of_range = || ValidationError::TimestampOutOfRange { value: millis };
        let utc = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map_err(|_| out_of_range())?;
        utc.checked_to_offset(offset)
            .map(Self)
            .ok_or_else(out_of_range)
    }

    /// Parse either an RFC3339 timestamp (converted to `offset`) or a local
    /// `YYYY-MM-DDTHH:MM[:SS]` datetime interpreted in `offset`.
    pub fn parse(input: &str, offset: UtcOffset) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = || ValidationError::InvalidDateTime {
            value: input.to_owned(),
        };

        if let Ok(parsed) = OffsetDateTime::parse(input, &Rfc3339) {
            return parsed.checked_to_offset(offset).map(Self).ok_or_else(invalid);
        }

        PrimitiveDateTime::parse(input, LOCAL_SECONDS)
            .or_else(|_| PrimitiveDateTime::parse(input, LOCAL_MINUTES))
            .map(|local| Self(local.assume_offset(offset)))
            .map_err(|_| invalid())
    }

    /// Calendar date in this timestamp's own offset.
    pub fn date(self) -> Date {
        self.0.date()
    }

    pub fn offset(self) -> UtcOffset {
        self.0.offset()
    }

    pub fn unix_millis(self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.unix_millis().to_string())
    }
}

impl Display for PriceTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for PriceTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for PriceTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        let parsed = OffsetDateTime::parse(&value, &Rfc3339).map_err(D::Error::custom)?;
        Ok(Self(parsed))
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    let input = input.trim();
    Date::parse(input, CALENDAR_DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Parse a `+HH:MM` / `-HH:MM` offset. `Z` and `UTC` are accepted for zero.
pub fn parse_offset(input: &str) -> Result<UtcOffset, ValidationError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("z") || input.eq_ignore_ascii_case("utc") {
        return Ok(UtcOffset::UTC);
    }
    UtcOffset::parse(input, OFFSET).map_err(|_| ValidationError::InvalidOffset {
        value: input.to_owned(),
    })
}
