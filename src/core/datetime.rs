use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer};

/*-------------------------------------------------------------------------------------------------
  DateTime Format
-------------------------------------------------------------------------------------------------*/

// e.g. `2024-05-16T01:41:25.253014`, published without an offset and in UTC.
const IP_RANGES_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Deserialize the optional `creationDate` field. Values that cannot be parsed are treated as
/// absent so a cosmetic field never fails the whole document.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.and_then(|s| parse(&s)))
}

pub(crate) fn parse(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, IP_RANGES_DATETIME_FORMAT)
        .map(|naive_date_time| naive_date_time.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|date| date.with_timezone(&Utc)))
        .inspect_err(|error| warn!("Ignoring unparseable creationDate `{s}`: {error}"))
        .ok()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
