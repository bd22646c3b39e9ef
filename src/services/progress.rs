//! Time progression for one event, with running-best flags.
//!
//! Each point is flagged as a personal best relative to the swims *before*
//! it, not the global minimum: the first swim is always a best, and a
//! later swim is one only when it strictly improves on everything earlier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{SwimRepository, TimeFilter};
use crate::models::{
    CourseType, EventCode, MeetId, SwimmerId, TimeMs, TimeRecordId, TimeWithMeet,
};

use super::ServiceResult;

/// A single point of an event's time history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub id: TimeRecordId,
    pub meet_id: MeetId,
    pub time_ms: TimeMs,
    pub time_formatted: String,
    pub date: NaiveDate,
    pub meet_name: String,
    pub event: EventCode,
    pub is_personal_best: bool,
}

/// Chronological progress data for one swimmer/course/event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    pub swimmer_id: SwimmerId,
    pub event: EventCode,
    pub course_type: CourseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub data_points: Vec<ProgressPoint>,
}

/// Build date-ascending progress points with running-best flags.
///
/// `rows` may be unsorted; the date-range filter is inclusive on both ends.
pub fn progress_points(
    rows: &[TimeWithMeet],
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<ProgressPoint> {
    let mut rows: Vec<&TimeWithMeet> = rows
        .iter()
        .filter(|r| start_date.is_none_or(|s| r.record.event_date >= s))
        .filter(|r| end_date.is_none_or(|e| r.record.event_date <= e))
        .collect();
    rows.sort_by(|a, b| {
        a.record
            .event_date
            .cmp(&b.record.event_date)
            .then(a.record.id.cmp(&b.record.id))
    });

    let mut best_so_far: Option<TimeMs> = None;
    rows.into_iter()
        .map(|row| {
            let is_best = best_so_far.is_none_or(|best| row.record.time_ms < best);
            if is_best {
                best_so_far = Some(row.record.time_ms);
            }
            ProgressPoint {
                id: row.record.id,
                meet_id: row.record.meet_id,
                time_ms: row.record.time_ms,
                time_formatted: row.record.time_ms.format(),
                date: row.record.event_date,
                meet_name: row.meet.name.clone(),
                event: row.record.event,
                is_personal_best: is_best,
            }
        })
        .collect()
}

/// Load the time history for one event and flag running bests.
pub async fn progress_data<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    course_type: CourseType,
    event: EventCode,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ServiceResult<ProgressData> {
    let rows = repo
        .list_times(
            swimmer_id,
            &TimeFilter {
                course_type: Some(course_type),
                event: Some(event),
                meet_id: None,
            },
        )
        .await?;

    Ok(ProgressData {
        swimmer_id,
        event,
        course_type,
        start_date,
        end_date,
        data_points: progress_points(&rows, start_date, end_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meet, TimeRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(id: i64, ms: i32, day: u32) -> TimeWithMeet {
        TimeWithMeet {
            record: TimeRecord {
                id: TimeRecordId::new(id),
                swimmer_id: SwimmerId::new(1),
                meet_id: MeetId::new(1),
                event: EventCode::Fr50,
                time_ms: TimeMs(ms),
                event_date: date(2024, 3, day),
                notes: None,
            },
            meet: Meet {
                id: MeetId::new(1),
                name: "Club Meet".to_string(),
                city: "Ottawa".to_string(),
                country: None,
                start_date: date(2024, 3, 1),
                end_date: date(2024, 3, 31),
                course_type: CourseType::Course25m,
            },
        }
    }

    #[test]
    fn running_minimum_flags() {
        let rows = vec![
            row(1, 29200, 1),
            row(2, 28850, 5),
            row(3, 29000, 10),
            row(4, 28600, 15),
        ];
        let points = progress_points(&rows, None, None);
        let flags: Vec<bool> = points.iter().map(|p| p.is_personal_best).collect();
        assert_eq!(flags, [true, true, false, true]);
    }

    #[test]
    fn first_swim_is_always_a_best() {
        let points = progress_points(&[row(1, 45000, 3)], None, None);
        assert_eq!(points.len(), 1);
        assert!(points[0].is_personal_best);
    }

    #[test]
    fn equal_time_is_not_an_improvement() {
        let rows = vec![row(1, 29000, 1), row(2, 29000, 5)];
        let points = progress_points(&rows, None, None);
        let flags: Vec<bool> = points.iter().map(|p| p.is_personal_best).collect();
        assert_eq!(flags, [true, false]);
    }

    #[test]
    fn unsorted_input_is_ordered_by_date() {
        let rows = vec![row(3, 28000, 20), row(1, 30000, 1), row(2, 29000, 10)];
        let points = progress_points(&rows, None, None);
        let days: Vec<u32> = points.iter().map(|p| chrono::Datelike::day(&p.date)).collect();
        assert_eq!(days, [1, 10, 20]);
        let flags: Vec<bool> = points.iter().map(|p| p.is_personal_best).collect();
        assert_eq!(flags, [true, true, true]);
    }

    #[test]
    fn date_filter_is_inclusive_and_rebases_flags() {
        let rows = vec![
            row(1, 28000, 1), // fastest, but outside the window
            row(2, 29000, 10),
            row(3, 28500, 20),
            row(4, 30000, 25),
        ];
        let points = progress_points(&rows, Some(date(2024, 3, 10)), Some(date(2024, 3, 25)));
        assert_eq!(points.len(), 3);
        // Flags are relative to the filtered window's own history.
        let flags: Vec<bool> = points.iter().map(|p| p.is_personal_best).collect();
        assert_eq!(flags, [true, true, false]);
    }
}
