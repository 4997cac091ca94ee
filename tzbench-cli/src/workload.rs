//! Conversion Workload
//!
//! The one operation this tool measures: parse an RFC 3339 UTC
//! timestamp, shift it into an IANA timezone, and render it as text.
//! The runner receives this as an injected closure and stays agnostic
//! to the date library behind it.

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Render format for converted timestamps
const ZONED_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Resolve an IANA timezone name (e.g. "Asia/Kolkata") to a [`Tz`].
pub fn parse_zone(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone '{name}': {e}"))
}

/// Convert one UTC timestamp string into zoned text.
pub fn convert_to_zone(timestamp: &str, tz: Tz) -> anyhow::Result<String> {
    let utc: DateTime<Utc> = timestamp
        .parse()
        .with_context(|| format!("invalid UTC timestamp '{timestamp}'"))?;

    Ok(utc.with_timezone(&tz).format(ZONED_FORMAT).to_string())
}

/// Convert a whole batch, discarding the rendered strings.
///
/// This is the closure body handed to the runner; results pass through
/// `black_box` so the conversions cannot be optimized away.
pub fn convert_batch(batch: &[String], tz: Tz) -> anyhow::Result<()> {
    for ts in batch {
        std::hint::black_box(convert_to_zone(ts, tz)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_zone() {
        assert!(parse_zone("Asia/Kolkata").is_ok());
        assert!(parse_zone("UTC").is_ok());
        assert!(parse_zone("America/New_York").is_ok());
    }

    #[test]
    fn test_parse_unknown_zone_is_error() {
        let err = parse_zone("Mars/Olympus_Mons").unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_convert_applies_offset() {
        // Kolkata is UTC+05:30 year-round
        let out = convert_to_zone("2024-01-15T10:00:00Z", chrono_tz::Asia::Kolkata).unwrap();
        assert!(out.starts_with("2024-01-15 15:30:00"), "got {out}");
    }

    #[test]
    fn test_convert_crosses_date_boundary() {
        let out = convert_to_zone("2024-01-15T22:00:00Z", chrono_tz::Asia::Tokyo).unwrap();
        assert!(out.starts_with("2024-01-16 07:00:00"), "got {out}");
    }

    #[test]
    fn test_convert_rejects_garbage() {
        assert!(convert_to_zone("not-a-timestamp", chrono_tz::UTC).is_err());
    }

    #[test]
    fn test_convert_batch_fails_fast() {
        let batch = vec![
            "2024-01-15T10:00:00Z".to_string(),
            "garbage".to_string(),
            "2024-01-15T10:00:02Z".to_string(),
        ];
        assert!(convert_batch(&batch, chrono_tz::UTC).is_err());
    }
}
