//! Canonical race-time representation and display codec.
//!
//! Times are stored as integer milliseconds and rendered as `SS.hh` or
//! `M:SS.hh`. Parsing accepts one- or two-digit hundredths with different
//! meanings: a single digit is tenths (`"28.5"` is 28.50 s, not 28.05 s).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::ValidationError;

/// A swim time in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeMs(pub i32);

impl TimeMs {
    pub fn new(ms: i32) -> Self {
        TimeMs(ms)
    }

    /// Raw millisecond value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Render as `SS.hh` (under a minute) or `M:SS.hh`.
    ///
    /// Non-positive times render as `"0.00"`.
    pub fn format(&self) -> String {
        let ms = self.0;
        if ms <= 0 {
            return "0.00".to_string();
        }

        let total_seconds = ms / 1000;
        let hundredths = (ms % 1000) / 10;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes == 0 {
            format!("{seconds}.{hundredths:02}")
        } else {
            format!("{minutes}:{seconds:02}.{hundredths:02}")
        }
    }

    /// Parse a display-format time, e.g. `"28.45"`, `"1:05.32"`, `"16:42.18"`.
    ///
    /// Seconds and hundredths may be one or two digits; a single hundredths
    /// digit means tenths (`"5"` is `.50`). Seconds must be below 60 when a
    /// nonzero minutes component is present. The result must be positive.
    pub fn parse(input: &str) -> Result<TimeMs, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError::new("time", "time cannot be empty"));
        }

        let invalid_format = || {
            ValidationError::new("time", "invalid time format, expected SS.ss or MM:SS.ss")
        };

        let (minutes_part, rest) = match s.split_once(':') {
            Some((m, rest)) => (Some(m), rest),
            None => (None, s),
        };
        let (seconds_part, hundredths_part) = rest.split_once('.').ok_or_else(invalid_format)?;

        let minutes: i64 = match minutes_part {
            Some(m) => {
                if m.is_empty() || !m.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid_format());
                }
                m.parse().map_err(|_| {
                    ValidationError::new("time", "invalid minutes value")
                })?
            }
            None => 0,
        };

        if !(1..=2).contains(&seconds_part.len())
            || !seconds_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid_format());
        }
        let seconds: i64 = seconds_part
            .parse()
            .map_err(|_| ValidationError::new("time", "invalid seconds value"))?;

        if !(1..=2).contains(&hundredths_part.len())
            || !hundredths_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid_format());
        }
        let mut hundredths: i64 = hundredths_part
            .parse()
            .map_err(|_| ValidationError::new("time", "invalid hundredths value"))?;
        // A single digit means tenths: "5" is .50, not .05.
        if hundredths_part.len() == 1 {
            hundredths *= 10;
        }

        if seconds >= 60 && minutes > 0 {
            return Err(ValidationError::new(
                "time",
                "seconds must be less than 60 when minutes are present",
            ));
        }
        if hundredths > 99 {
            return Err(ValidationError::new(
                "time",
                "hundredths must be less than 100",
            ));
        }

        let total_ms = (minutes * 60 + seconds) * 1000 + hundredths * 10;
        if total_ms <= 0 {
            return Err(ValidationError::new("time", "time must be greater than zero"));
        }
        i32::try_from(total_ms)
            .map(TimeMs)
            .map_err(|_| ValidationError::new("time", "time is too large"))
    }

    /// Formatted signed difference against another time.
    ///
    /// Positive (`"+..."`) means `self` is slower than `other`.
    pub fn difference(&self, other: TimeMs) -> String {
        let diff = self.0 - other.0;
        if diff == 0 {
            return "0.00".to_string();
        }
        if diff < 0 {
            format!("-{}", TimeMs(-diff).format())
        } else {
            format!("+{}", TimeMs(diff).format())
        }
    }

    /// Percentage difference against another time.
    ///
    /// Positive means `self` is slower than `other`. Returns 0 when the
    /// reference time is 0.
    pub fn difference_percent(&self, other: TimeMs) -> f64 {
        if other.0 == 0 {
            return 0.0;
        }
        f64::from(self.0 - other.0) / f64::from(other.0) * 100.0
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<i32> for TimeMs {
    fn from(ms: i32) -> Self {
        TimeMs(ms)
    }
}
