use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Run an expression and log how long it took at debug level.
#[macro_export]
macro_rules! timed {
  ($name:expr, $($tail:tt)*) => {
    {
      let now = std::time::Instant::now();
      let value = $($tail)*;
      log::debug!("Done  `{}` ({} ms)", $name, now.elapsed().as_millis());
      value
    }
  };
}

/// Accepts RFC 3339 timestamps as well as naive ones without offset,
/// which the server emits for columns stored without a time zone.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{}`", raw)))
}
