//! Domain models: enumerations, the time codec, age math and entities.

pub mod age;
pub mod records;
pub mod time;
pub mod types;

pub use age::{age_at_competition, age_at_date, age_group_at_competition};
pub use records::{
    BatchTimeInput, Meet, MeetId, MeetInput, Standard, StandardId, StandardInput, StandardTime,
    StandardTimeInput, Swimmer, SwimmerId, SwimmerInput, TimeInput, TimeRecord, TimeRecordId,
    TimeWithMeet, DEFAULT_THRESHOLD_PERCENT,
};
pub use time::TimeMs;
pub use types::{AgeGroup, CourseType, EventCode, Gender, Stroke, ValidationError};
