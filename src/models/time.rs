use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wall-clock time of day at minute granularity.
///
/// Parsed from "H:MM" or "HH:MM" text; the canonical form uses an unpadded
/// hour ("8:00", "14:50"), matching the daily grid labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Create a clock time from an hour and minute.
    pub fn new(hour: u16, minute: u16) -> Result<Self, String> {
        if hour > 23 {
            return Err(format!("Hour out of range: {}", hour));
        }
        if minute > 59 {
            return Err(format!("Minute out of range: {}", minute));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid time format: '{}' (expected H:MM)", s))?;
        let hour = hour.trim();
        let minute = minute.trim();
        if hour.is_empty() || minute.len() != 2 {
            return Err(format!("Invalid time format: '{}' (expected H:MM)", s));
        }
        let hour: u16 = hour
            .parse()
            .map_err(|_| format!("Invalid hour in '{}'", s))?;
        let minute: u16 = minute
            .parse()
            .map_err(|_| format!("Invalid minute in '{}'", s))?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// Half-open wall-clock interval [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeRange {
    /// Build a range, requiring `start` strictly before `end`.
    pub fn new(start: ClockTime, end: ClockTime) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Length of the range in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Check if this range overlaps another.
    ///
    /// Open-interval semantics: ranges that merely touch ("8:00-8:50" and
    /// "8:50-9:40") do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if a given instant lies inside this range (inclusive start,
    /// exclusive end).
    pub fn contains(&self, t: ClockTime) -> bool {
        self.start <= t && t < self.end
    }
}

/// The fixed ordered set of daily teaching windows.
///
/// Eight 50-minute windows from 8:00 to 16:50 with a midday break between
/// 13:00 and 14:00. Selection inputs are populated from this list.
pub const DAILY_TIME_GRID: [&str; 8] = [
    "8:00-8:50",
    "9:00-9:50",
    "10:00-10:50",
    "11:00-11:50",
    "12:00-12:50",
    "14:00-14:50",
    "15:00-15:50",
    "16:00-16:50",
];

#[cfg(test)]
mod tests {
    use super::{ClockTime, TimeRange, DAILY_TIME_GRID};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_unpadded_hour() {
        let time = t("8:00");
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 0);
    }

    #[test]
    fn test_parse_padded_hour() {
        let time = t("08:05");
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<ClockTime>().is_err());
        assert!("800".parse::<ClockTime>().is_err());
        assert!("8:0".parse::<ClockTime>().is_err());
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("8:61".parse::<ClockTime>().is_err());
        assert!("eight:00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(t("08:00").to_string(), "8:00");
        assert_eq!(t("14:05").to_string(), "14:05");
    }

    #[test]
    fn test_ordering() {
        assert!(t("8:00") < t("8:50"));
        assert!(t("12:50") < t("14:00"));
        assert_eq!(t("9:00"), t("09:00"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let time = t("14:50");
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"14:50\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
    }

    #[test]
    fn test_range_requires_positive_duration() {
        assert!(TimeRange::new(t("9:00"), t("9:50")).is_some());
        assert!(TimeRange::new(t("9:50"), t("9:00")).is_none());
        assert!(TimeRange::new(t("9:00"), t("9:00")).is_none());
    }

    #[test]
    fn test_overlap_detects_intersection() {
        let a = TimeRange::new(t("9:00"), t("9:50")).unwrap();
        let b = TimeRange::new(t("9:30"), t("10:20")).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_detects_containment() {
        let outer = TimeRange::new(t("8:00"), t("12:00")).unwrap();
        let inner = TimeRange::new(t("9:00"), t("9:50")).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_back_to_back_ranges_do_not_overlap() {
        let first = TimeRange::new(t("8:00"), t("8:50")).unwrap();
        let second = TimeRange::new(t("8:50"), t("9:40")).unwrap();
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_contains_half_open() {
        let range = TimeRange::new(t("9:00"), t("9:50")).unwrap();
        assert!(range.contains(t("9:00")));
        assert!(range.contains(t("9:49")));
        assert!(!range.contains(t("9:50")));
    }

    #[test]
    fn test_daily_grid_is_ordered_and_parseable() {
        let mut last_end: Option<ClockTime> = None;
        for window in DAILY_TIME_GRID {
            let (start, end) = window.split_once('-').unwrap();
            let start = t(start);
            let end = t(end);
            assert!(start < end);
            if let Some(prev) = last_end {
                assert!(prev < start);
            }
            last_end = Some(end);
        }
    }
}
