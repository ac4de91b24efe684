// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Shown in place of a missing or unreadable timestamp.
pub const UNAVAILABLE: &str = "Non disponible";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a stored timestamp. Accepts RFC3339 and the zone-less
/// `YYYY-MM-DDTHH:MM:SS` form; zone-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format an optional timestamp the fr-FR way: `dd/mm/yyyy HH:MM`.
pub fn format_fr_datetime(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fr_datetime() {
        assert_eq!(
            format_fr_datetime(Some("2025-03-15T10:30:00")),
            "15/03/2025 10:30"
        );
        assert_eq!(
            format_fr_datetime(Some("2025-03-15T10:30:00Z")),
            "15/03/2025 10:30"
        );
        assert_eq!(format_fr_datetime(None), UNAVAILABLE);
        assert_eq!(format_fr_datetime(Some("yesterday")), UNAVAILABLE);
    }
}
