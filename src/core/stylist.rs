use crate::core::{depth, magnitude};
use crate::domain::model::{FeatureRecord, StyleDescriptor};
use chrono::{DateTime, Local, TimeZone};

pub const STROKE_COLOR: &str = "#000000";
pub const STROKE_WEIGHT: f64 = 0.5;
pub const FILL_OPACITY: f64 = 0.7;
pub const STROKE_OPACITY: f64 = 1.0;

const DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub fn style(record: &FeatureRecord) -> StyleDescriptor {
    StyleDescriptor {
        fill_color: depth::color_for_depth(record.depth_km).to_string(),
        stroke_color: STROKE_COLOR.to_string(),
        stroke_weight: STROKE_WEIGHT,
        radius: magnitude::scale(record.magnitude),
        fill_opacity: FILL_OPACITY,
        stroke_opacity: STROKE_OPACITY,
    }
}

/// Popup text in the host's local time zone.
pub fn describe(record: &FeatureRecord) -> String {
    describe_in(record, &Local)
}

/// Four lines: place, magnitude, depth and the event time rendered in `tz`.
pub fn describe_in<Tz>(record: &FeatureRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Location: {}\nMagnitude: {}\nDepth: {} km\nDate: {}",
        record.place,
        record.magnitude,
        record.depth_km,
        format_timestamp(record.timestamp_millis, tz)
    )
}

fn format_timestamp<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn record() -> FeatureRecord {
        FeatureRecord::new(10.0, 20.0, 95.0, 6.0, "X", 0)
    }

    #[test]
    fn test_style_deep_strong_quake() {
        let s = style(&record());
        assert_eq!(s.fill_color, "#ff5f65");
        assert_eq!(s.radius, 24.0);
        assert_eq!(s.stroke_color, "#000000");
        assert_eq!(s.stroke_weight, 0.5);
        assert_eq!(s.fill_opacity, 0.7);
        assert_eq!(s.stroke_opacity, 1.0);
    }

    #[test]
    fn test_describe_in_utc() {
        let text = describe_in(&record(), &Utc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Location: X",
                "Magnitude: 6",
                "Depth: 95 km",
                "Date: 1/1/1970, 12:00:00 AM",
            ]
        );
    }

    #[test]
    fn test_describe_respects_offset() {
        let mut r = record();
        r.timestamp_millis = 1_700_000_000_000;
        r.magnitude = 2.5;
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let text = describe_in(&r, &tokyo);
        assert!(text.contains("Magnitude: 2.5"));
        assert!(text.ends_with("Date: 11/15/2023, 7:13:20 AM"));
    }

    #[test]
    fn test_out_of_range_timestamp_falls_back_to_millis() {
        let mut r = record();
        r.timestamp_millis = i64::MAX;
        assert!(describe_in(&r, &Utc).ends_with(&format!("Date: {}", i64::MAX)));
    }

    #[test]
    fn test_describe_local_has_four_lines() {
        assert_eq!(describe(&record()).lines().count(), 4);
    }
}
