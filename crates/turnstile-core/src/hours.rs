//! Operating-hours gate: wall-clock "HH:MM" comparison at minute granularity.
//!
//! Organizations store their opening and closing times as "HH:MM" strings.
//! Check-in is permitted while `opening <= now <= closing` (inclusive at both
//! boundaries); auto-checkout fires only once `now` is strictly past closing.
//! Windows that cross midnight (`opening > closing`) are unsupported and
//! rejected at construction.

use std::fmt;

use crate::error::CoreError;

/// A time of day at minute granularity, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Parse a strict `"HH:MM"` string (zero-padded, 24-hour clock).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(CoreError::Validation(format!(
                "Invalid time of day '{s}': expected HH:MM"
            )));
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if digits.iter().any(|b| !b.is_ascii_digit()) {
            return Err(CoreError::Validation(format!(
                "Invalid time of day '{s}': expected HH:MM"
            )));
        }
        let hour = u16::from((bytes[0] - b'0') * 10 + (bytes[1] - b'0'));
        let minute = u16::from((bytes[3] - b'0') * 10 + (bytes[4] - b'0'));
        if hour > 23 || minute > 59 {
            return Err(CoreError::Validation(format!(
                "Invalid time of day '{s}': hour must be 00-23 and minute 00-59"
            )));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Build from hour/minute components already known to be in range
    /// (e.g. from a clock source that guarantees 0-23 / 0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        Self((hour.min(23) * 60 + minute.min(59)) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A same-day operating window with inclusive boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingHours {
    opening: TimeOfDay,
    closing: TimeOfDay,
}

impl OperatingHours {
    /// Build a window, rejecting `opening > closing`: windows that cross
    /// midnight are an unsupported configuration.
    pub fn new(opening: TimeOfDay, closing: TimeOfDay) -> Result<Self, CoreError> {
        if opening > closing {
            return Err(CoreError::Validation(format!(
                "Opening time {opening} is after closing time {closing}; \
                 windows crossing midnight are not supported"
            )));
        }
        Ok(Self { opening, closing })
    }

    /// Parse and validate both boundaries from `"HH:MM"` strings.
    pub fn from_strings(opening: &str, closing: &str) -> Result<Self, CoreError> {
        Self::new(TimeOfDay::parse(opening)?, TimeOfDay::parse(closing)?)
    }

    pub fn opening(&self) -> TimeOfDay {
        self.opening
    }

    pub fn closing(&self) -> TimeOfDay {
        self.closing
    }

    /// True iff `opening <= now <= closing`, inclusive at both ends.
    pub fn is_open(&self, now: TimeOfDay) -> bool {
        self.opening <= now && now <= self.closing
    }

    /// True iff `now` is strictly past closing. At exactly closing time the
    /// window has not yet elapsed and auto-checkout must not fire.
    pub fn is_past_closing(&self, now: TimeOfDay) -> bool {
        now > self.closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(t("00:00").minutes(), 0);
        assert_eq!(t("09:30").minutes(), 570);
        assert_eq!(t("23:59").minutes(), 1439);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["9:00", "09:0", "24:00", "09:60", "09-00", "", "ab:cd", "09:00 "] {
            assert!(TimeOfDay::parse(bad).is_err(), "should reject {bad:?}");
        }
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(t("09:05").to_string(), "09:05");
        assert_eq!(t("23:59").to_string(), "23:59");
    }

    #[test]
    fn test_is_open_inclusive_boundaries() {
        let hours = OperatingHours::from_strings("09:00", "17:00").unwrap();
        assert!(hours.is_open(t("09:00")));
        assert!(hours.is_open(t("17:00")));
        assert!(hours.is_open(t("12:30")));
        assert!(!hours.is_open(t("08:59")));
        assert!(!hours.is_open(t("17:01")));
    }

    #[test]
    fn test_past_closing_is_strict() {
        let hours = OperatingHours::from_strings("09:00", "17:00").unwrap();
        assert!(!hours.is_past_closing(t("17:00")));
        assert!(hours.is_past_closing(t("17:01")));
        assert!(!hours.is_past_closing(t("12:00")));
    }

    #[test]
    fn test_rejects_window_crossing_midnight() {
        assert!(OperatingHours::from_strings("22:00", "06:00").is_err());
    }

    #[test]
    fn test_zero_width_window() {
        let hours = OperatingHours::from_strings("12:00", "12:00").unwrap();
        assert!(hours.is_open(t("12:00")));
        assert!(!hours.is_open(t("12:01")));
    }

    #[test]
    fn test_from_hm_clamps_to_valid_range() {
        assert_eq!(TimeOfDay::from_hm(9, 30), t("09:30"));
        assert_eq!(TimeOfDay::from_hm(23, 59), t("23:59"));
    }
}
