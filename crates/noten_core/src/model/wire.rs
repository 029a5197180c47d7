//! Lenient field decoders shared by the persisted documents.
//!
//! # Invariants
//! - Enum kinds decode from either their variant index or their name; callers
//!   decide what an unknown token maps to.
//! - Calendar dates accept `YYYY-MM-DD` and full date-time strings; only the
//!   date part is kept.
//! - Timestamps without an offset are read as UTC.
//! - Explicit `null`s decode like absent fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt::Formatter;

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Raw enum token as found on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EnumToken {
    Index(u64),
    Name(String),
    /// Negative or fractional number.
    Unknown,
}

impl EnumToken {
    /// Whether the token names the variant at `index` called `name`
    /// (case-insensitive).
    pub(crate) fn is(&self, index: u64, name: &str) -> bool {
        match self {
            Self::Index(value) => *value == index,
            Self::Name(value) => value.trim().eq_ignore_ascii_case(name),
            Self::Unknown => false,
        }
    }
}

impl<'de> Deserialize<'de> for EnumToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EnumTokenVisitor)
    }
}

struct EnumTokenVisitor;

impl<'de> Visitor<'de> for EnumTokenVisitor {
    type Value = EnumToken;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a variant index or a variant name")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EnumToken::Index(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(u64::try_from(value).map_or(EnumToken::Unknown, EnumToken::Index))
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EnumToken::Unknown)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EnumToken::Name(value.to_string()))
    }
}

/// Treats an explicit JSON `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(de::Error::custom)
}

/// Optional calendar date; `null` and blank strings decode to `None`.
pub(crate) fn optional_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_calendar_date(&raw)
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(de::Error::custom)
}

fn parse_calendar_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_part = raw.trim().split(['T', ' ']).next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, CALENDAR_DATE_FORMAT)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
        })
}
