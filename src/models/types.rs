//! Closed enumerations for course types, genders, events and age groups.
//!
//! All of these are used as map keys and JSON values throughout the crate.
//! They are closed enums with `FromStr` validation so that a typo surfaces
//! as a [`ValidationError`] at the boundary instead of silently producing
//! "no match" downstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A domain validation failure, carrying the offending field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Pool length category. Times from different course types are never
/// compared to one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    #[serde(rename = "25m")]
    Course25m,
    #[serde(rename = "50m")]
    Course50m,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Course25m => "25m",
            CourseType::Course50m => "50m",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "25m" => Ok(CourseType::Course25m),
            "50m" => Ok(CourseType::Course50m),
            other => Err(ValidationError::new(
                "course_type",
                format!("course_type must be '25m' or '50m', got '{other}'"),
            )),
        }
    }
}

/// Swimmer gender, used to scope standards tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            other => Err(ValidationError::new(
                "gender",
                format!("gender must be 'female' or 'male', got '{other}'"),
            )),
        }
    }
}

/// Stroke categories for grouping events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(rename = "Individual Medley")]
    IndividualMedley,
}

impl Stroke {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::IndividualMedley => "Individual Medley",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard swimming event codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCode {
    #[serde(rename = "50FR")]
    Fr50,
    #[serde(rename = "100FR")]
    Fr100,
    #[serde(rename = "200FR")]
    Fr200,
    #[serde(rename = "400FR")]
    Fr400,
    #[serde(rename = "800FR")]
    Fr800,
    #[serde(rename = "1500FR")]
    Fr1500,
    #[serde(rename = "50BK")]
    Bk50,
    #[serde(rename = "100BK")]
    Bk100,
    #[serde(rename = "200BK")]
    Bk200,
    #[serde(rename = "50BR")]
    Br50,
    #[serde(rename = "100BR")]
    Br100,
    #[serde(rename = "200BR")]
    Br200,
    #[serde(rename = "50FL")]
    Fl50,
    #[serde(rename = "100FL")]
    Fl100,
    #[serde(rename = "200FL")]
    Fl200,
    #[serde(rename = "200IM")]
    Im200,
    #[serde(rename = "400IM")]
    Im400,
}

impl EventCode {
    /// All valid event codes, in canonical display order.
    pub const ALL: [EventCode; 17] = [
        EventCode::Fr50,
        EventCode::Fr100,
        EventCode::Fr200,
        EventCode::Fr400,
        EventCode::Fr800,
        EventCode::Fr1500,
        EventCode::Bk50,
        EventCode::Bk100,
        EventCode::Bk200,
        EventCode::Br50,
        EventCode::Br100,
        EventCode::Br200,
        EventCode::Fl50,
        EventCode::Fl100,
        EventCode::Fl200,
        EventCode::Im200,
        EventCode::Im400,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCode::Fr50 => "50FR",
            EventCode::Fr100 => "100FR",
            EventCode::Fr200 => "200FR",
            EventCode::Fr400 => "400FR",
            EventCode::Fr800 => "800FR",
            EventCode::Fr1500 => "1500FR",
            EventCode::Bk50 => "50BK",
            EventCode::Bk100 => "100BK",
            EventCode::Bk200 => "200BK",
            EventCode::Br50 => "50BR",
            EventCode::Br100 => "100BR",
            EventCode::Br200 => "200BR",
            EventCode::Fl50 => "50FL",
            EventCode::Fl100 => "100FL",
            EventCode::Fl200 => "200FL",
            EventCode::Im200 => "200IM",
            EventCode::Im400 => "400IM",
        }
    }

    /// Human-readable event name, e.g. "100m Freestyle".
    pub fn description(&self) -> String {
        let distance: &str = &self.as_str()[..self.as_str().len() - 2];
        format!("{distance}m {}", self.stroke())
    }

    /// The stroke this event is swum in.
    pub fn stroke(&self) -> Stroke {
        match self {
            EventCode::Fr50
            | EventCode::Fr100
            | EventCode::Fr200
            | EventCode::Fr400
            | EventCode::Fr800
            | EventCode::Fr1500 => Stroke::Freestyle,
            EventCode::Bk50 | EventCode::Bk100 | EventCode::Bk200 => Stroke::Backstroke,
            EventCode::Br50 | EventCode::Br100 | EventCode::Br200 => Stroke::Breaststroke,
            EventCode::Fl50 | EventCode::Fl100 | EventCode::Fl200 => Stroke::Butterfly,
            EventCode::Im200 | EventCode::Im400 => Stroke::IndividualMedley,
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCode::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new("event", format!("invalid event code: '{s}'"))
            })
    }
}

/// Competition age groups, ordered youngest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "10U")]
    Under10,
    #[serde(rename = "11-12")]
    Age11_12,
    #[serde(rename = "13-14")]
    Age13_14,
    #[serde(rename = "15-17")]
    Age15_17,
    #[serde(rename = "OPEN")]
    Open,
}

impl AgeGroup {
    /// All age groups, youngest to oldest.
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Under10,
        AgeGroup::Age11_12,
        AgeGroup::Age13_14,
        AgeGroup::Age15_17,
        AgeGroup::Open,
    ];

    /// The age group a swimmer of the given age competes in.
    pub fn from_age(age: i32) -> AgeGroup {
        match age {
            a if a <= 10 => AgeGroup::Under10,
            a if a <= 12 => AgeGroup::Age11_12,
            a if a <= 14 => AgeGroup::Age13_14,
            a if a <= 17 => AgeGroup::Age15_17,
            _ => AgeGroup::Open,
        }
    }

    /// The next-younger age group, or `None` for the youngest.
    ///
    /// A `None` here means "no neighbor to show", not an error.
    pub fn previous(&self) -> Option<AgeGroup> {
        match self {
            AgeGroup::Under10 => None,
            AgeGroup::Age11_12 => Some(AgeGroup::Under10),
            AgeGroup::Age13_14 => Some(AgeGroup::Age11_12),
            AgeGroup::Age15_17 => Some(AgeGroup::Age13_14),
            AgeGroup::Open => Some(AgeGroup::Age15_17),
        }
    }

    /// The next-older age group, or `None` for OPEN.
    pub fn next(&self) -> Option<AgeGroup> {
        match self {
            AgeGroup::Under10 => Some(AgeGroup::Age11_12),
            AgeGroup::Age11_12 => Some(AgeGroup::Age13_14),
            AgeGroup::Age13_14 => Some(AgeGroup::Age15_17),
            AgeGroup::Age15_17 => Some(AgeGroup::Open),
            AgeGroup::Open => None,
        }
    }

    /// Inclusive age bounds for the group.
    pub fn bounds(&self) -> (i32, i32) {
        match self {
            AgeGroup::Under10 => (0, 10),
            AgeGroup::Age11_12 => (11, 12),
            AgeGroup::Age13_14 => (13, 14),
            AgeGroup::Age15_17 => (15, 17),
            AgeGroup::Open => (18, 99),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Under10 => "10U",
            AgeGroup::Age11_12 => "11-12",
            AgeGroup::Age13_14 => "13-14",
            AgeGroup::Age15_17 => "15-17",
            AgeGroup::Open => "OPEN",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new("age_group", format!("invalid age group: '{s}'"))
            })
    }
}
