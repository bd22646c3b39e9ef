//! Entity structs, identifier newtypes and validated input types.
//!
//! Entities are plain data: the storage layer produces them and the
//! service layer consumes them. Inputs carry the caller-supplied fields
//! and a `validate` method applying the domain rules; services call
//! `validate` before touching the repository so that nothing partial is
//! ever written.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::TimeMs;
use super::types::{CourseType, EventCode, Gender, ValidationError};

/// Swimmer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SwimmerId(pub i64);

/// Meet identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeetId(pub i64);

/// Time record identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeRecordId(pub i64);

/// Standard identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StandardId(pub i64);

macro_rules! id_impls {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                pub fn new(value: i64) -> Self {
                    $ty(value)
                }

                pub fn value(&self) -> i64 {
                    self.0
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<$ty> for i64 {
                fn from(id: $ty) -> Self {
                    id.0
                }
            }
        )+
    };
}

id_impls!(SwimmerId, MeetId, TimeRecordId, StandardId);

/// A swimmer profile.
///
/// `threshold_percent` is the "almost achieved" margin used by standards
/// comparison: a miss within this percentage of the standard time still
/// counts as close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swimmer {
    pub id: SwimmerId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub threshold_percent: f64,
}

/// Default "almost there" threshold percentage.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 3.0;

/// Input for creating or fully replacing a swimmer profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwimmerInput {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_percent: Option<f64>,
}

impl SwimmerInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "name is required"));
        }
        if self.name.len() > 255 {
            return Err(ValidationError::new(
                "name",
                "name must be at most 255 characters",
            ));
        }
        if let Some(threshold) = self.threshold_percent {
            validate_threshold(threshold)?;
        }
        Ok(())
    }

    /// The threshold to store, defaulting when not provided.
    pub fn threshold_or_default(&self) -> f64 {
        self.threshold_percent.unwrap_or(DEFAULT_THRESHOLD_PERCENT)
    }
}

/// Range check shared by swimmer input and per-request overrides.
pub fn validate_threshold(threshold: f64) -> Result<(), ValidationError> {
    if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
        return Err(ValidationError::new(
            "threshold_percent",
            "threshold_percent must be between 0 and 100",
        ));
    }
    Ok(())
}

/// A swim meet. Every time record belongs to one meet and inherits its
/// course type from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meet {
    pub id: MeetId,
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub course_type: CourseType,
}

impl Meet {
    /// Whether a date lies within the meet's range, inclusive on both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Input for creating or updating a meet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetInput {
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub start_date: NaiveDate,
    /// Defaults to `start_date` for single-day meets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub course_type: CourseType,
}

impl MeetInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "name is required"));
        }
        if self.name.len() > 255 {
            return Err(ValidationError::new(
                "name",
                "name must be at most 255 characters",
            ));
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::new("city", "city is required"));
        }
        if self.city.len() > 255 {
            return Err(ValidationError::new(
                "city",
                "city must be at most 255 characters",
            ));
        }
        if self.resolved_end_date() < self.start_date {
            return Err(ValidationError::new(
                "end_date",
                "end_date cannot be before start_date",
            ));
        }
        Ok(())
    }

    pub fn resolved_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }
}

/// A recorded race time. At most one record may exist per
/// (swimmer, meet, event); duplicates are rejected, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub id: TimeRecordId,
    pub swimmer_id: SwimmerId,
    pub meet_id: MeetId,
    pub event: EventCode,
    pub time_ms: TimeMs,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A time record joined with its meet, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWithMeet {
    pub record: TimeRecord,
    pub meet: Meet,
}

/// Input for creating or updating a single time record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeInput {
    pub meet_id: MeetId,
    pub event: EventCode,
    pub time_ms: TimeMs,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TimeInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_time_fields(self.time_ms, self.notes.as_deref())
    }
}

/// One entry of a batch ingestion request; the meet is shared by the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTimeInput {
    pub event: EventCode,
    pub time_ms: TimeMs,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BatchTimeInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_time_fields(self.time_ms, self.notes.as_deref())
    }
}

fn validate_time_fields(time_ms: TimeMs, notes: Option<&str>) -> Result<(), ValidationError> {
    if time_ms.value() <= 0 {
        return Err(ValidationError::new("time_ms", "time_ms must be positive"));
    }
    if notes.is_some_and(|n| n.len() > 1000) {
        return Err(ValidationError::new(
            "notes",
            "notes must be at most 1000 characters",
        ));
    }
    Ok(())
}

/// A named qualifying-time table, scoped to one course type and gender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standard {
    pub id: StandardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub course_type: CourseType,
    pub gender: Gender,
}

/// One qualifying time within a standard, keyed by (event, age group).
///
/// An `OPEN` entry doubles as the fallback for age groups without their
/// own entry during the main comparison lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardTime {
    pub event: EventCode,
    pub age_group: super::types::AgeGroup,
    pub time_ms: TimeMs,
}

/// Input for creating a standard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub course_type: CourseType,
    pub gender: Gender,
}

impl StandardInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "name is required"));
        }
        if self.name.len() > 255 {
            return Err(ValidationError::new(
                "name",
                "name must be at most 255 characters",
            ));
        }
        Ok(())
    }
}

/// Input for one qualifying time row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTimeInput {
    pub event: EventCode,
    pub age_group: super::types::AgeGroup,
    pub time_ms: TimeMs,
}

impl StandardTimeInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_ms.value() <= 0 {
            return Err(ValidationError::new(
                "time_ms",
                "time_ms must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::AgeGroup;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn swimmer_input() -> SwimmerInput {
        SwimmerInput {
            name: "Alex".to_string(),
            birth_date: date(2011, 4, 2),
            gender: Gender::Female,
            threshold_percent: None,
        }
    }

    #[test]
    fn swimmer_input_validation() {
        assert!(swimmer_input().validate().is_ok());
        assert_eq!(swimmer_input().threshold_or_default(), 3.0);

        let mut input = swimmer_input();
        input.name = "  ".to_string();
        assert!(input.validate().is_err());

        let mut input = swimmer_input();
        input.name = "x".repeat(256);
        assert!(input.validate().is_err());

        let mut input = swimmer_input();
        input.threshold_percent = Some(100.5);
        assert!(input.validate().is_err());

        let mut input = swimmer_input();
        input.threshold_percent = Some(-0.1);
        assert!(input.validate().is_err());

        let mut input = swimmer_input();
        input.threshold_percent = Some(0.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn meet_input_end_date_defaults_to_start() {
        let input = MeetInput {
            name: "Spring Invitational".to_string(),
            city: "Ottawa".to_string(),
            country: None,
            start_date: date(2024, 5, 10),
            end_date: None,
            course_type: CourseType::Course50m,
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.resolved_end_date(), date(2024, 5, 10));

        let backwards = MeetInput {
            end_date: Some(date(2024, 5, 9)),
            ..input
        };
        assert!(backwards.validate().is_err());
    }

    #[test]
    fn meet_contains_date_is_inclusive() {
        let meet = Meet {
            id: MeetId::new(1),
            name: "Test".to_string(),
            city: "Toronto".to_string(),
            country: None,
            start_date: date(2024, 5, 10),
            end_date: date(2024, 5, 12),
            course_type: CourseType::Course25m,
        };
        assert!(meet.contains_date(date(2024, 5, 10)));
        assert!(meet.contains_date(date(2024, 5, 12)));
        assert!(!meet.contains_date(date(2024, 5, 9)));
        assert!(!meet.contains_date(date(2024, 5, 13)));
    }

    #[test]
    fn time_input_validation() {
        let input = TimeInput {
            meet_id: MeetId::new(1),
            event: EventCode::Fr100,
            time_ms: TimeMs(65000),
            event_date: date(2024, 5, 10),
            notes: None,
        };
        assert!(input.validate().is_ok());

        let zero = TimeInput {
            time_ms: TimeMs(0),
            ..input.clone()
        };
        assert!(zero.validate().is_err());

        let long_notes = TimeInput {
            notes: Some("n".repeat(1001)),
            ..input
        };
        assert!(long_notes.validate().is_err());
    }

    #[test]
    fn standard_time_input_validation() {
        let input = StandardTimeInput {
            event: EventCode::Fr100,
            age_group: AgeGroup::Age13_14,
            time_ms: TimeMs(62000),
        };
        assert!(input.validate().is_ok());
        let bad = StandardTimeInput {
            time_ms: TimeMs(-10),
            ..input
        };
        assert!(bad.validate().is_err());
    }
}
