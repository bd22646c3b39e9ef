//! Personal best resolution.
//!
//! A personal best is never stored: it is always derived on demand as the
//! fastest recorded time per event within one course type.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{SwimRepository, TimeFilter};
use crate::models::{
    CourseType, EventCode, Stroke, SwimmerId, TimeMs, TimeRecordId, TimeWithMeet,
};

use super::ServiceResult;

/// A personal best time for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    pub event: EventCode,
    pub time_ms: TimeMs,
    pub time_formatted: String,
    pub time_id: TimeRecordId,
    pub meet_name: String,
    pub date: NaiveDate,
}

/// All personal bests for one course type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBestList {
    pub course_type: CourseType,
    pub personal_bests: Vec<PersonalBest>,
}

/// Resolve the fastest time per event from the given rows.
///
/// Rows from other course types are ignored. Ties keep the first row seen,
/// which for date-ordered input is the earliest swim; only the existence of
/// a best matters to callers, not which of two equal swims won.
pub fn best_by_event(
    rows: &[TimeWithMeet],
    course_type: CourseType,
) -> HashMap<EventCode, PersonalBest> {
    let mut bests: HashMap<EventCode, PersonalBest> = HashMap::new();
    for row in rows.iter().filter(|r| r.meet.course_type == course_type) {
        let candidate = &row.record;
        match bests.get(&candidate.event) {
            Some(existing) if existing.time_ms <= candidate.time_ms => {}
            _ => {
                bests.insert(
                    candidate.event,
                    PersonalBest {
                        event: candidate.event,
                        time_ms: candidate.time_ms,
                        time_formatted: candidate.time_ms.format(),
                        time_id: candidate.id,
                        meet_name: row.meet.name.clone(),
                        date: candidate.event_date,
                    },
                );
            }
        }
    }
    bests
}

/// Whether `candidate_ms` would be a personal best for the event.
///
/// True iff no *other* record (excluding `exclude`, used for in-place
/// update checks and for a freshly created record's own ID) is strictly
/// faster. With no prior record for the event, any time is a best.
pub fn is_personal_best(
    rows: &[TimeWithMeet],
    course_type: CourseType,
    event: EventCode,
    candidate_ms: TimeMs,
    exclude: Option<TimeRecordId>,
) -> bool {
    !rows.iter().any(|r| {
        r.meet.course_type == course_type
            && r.record.event == event
            && exclude != Some(r.record.id)
            && r.record.time_ms < candidate_ms
    })
}

/// Load a swimmer's personal bests for a course type, ordered by event.
pub async fn personal_bests<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    course_type: CourseType,
) -> ServiceResult<PersonalBestList> {
    let rows = repo
        .list_times(
            swimmer_id,
            &TimeFilter {
                course_type: Some(course_type),
                ..TimeFilter::default()
            },
        )
        .await?;

    let by_event = best_by_event(&rows, course_type);
    // Canonical event order for the output list.
    let personal_bests: Vec<PersonalBest> = EventCode::ALL
        .iter()
        .filter_map(|e| by_event.get(e).cloned())
        .collect();

    Ok(PersonalBestList {
        course_type,
        personal_bests,
    })
}

/// Personal bests grouped by stroke, for display.
pub async fn personal_bests_by_stroke<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    course_type: CourseType,
) -> ServiceResult<HashMap<Stroke, Vec<PersonalBest>>> {
    let list = personal_bests(repo, swimmer_id, course_type).await?;
    let mut by_stroke: HashMap<Stroke, Vec<PersonalBest>> = HashMap::new();
    for pb in list.personal_bests {
        by_stroke.entry(pb.event.stroke()).or_default().push(pb);
    }
    Ok(by_stroke)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meet, MeetId, SwimmerId, TimeRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(
        id: i64,
        event: EventCode,
        ms: i32,
        course_type: CourseType,
        day: u32,
    ) -> TimeWithMeet {
        TimeWithMeet {
            record: TimeRecord {
                id: TimeRecordId::new(id),
                swimmer_id: SwimmerId::new(1),
                meet_id: MeetId::new(1),
                event,
                time_ms: TimeMs(ms),
                event_date: date(2024, 5, day),
                notes: None,
            },
            meet: Meet {
                id: MeetId::new(1),
                name: "Club Meet".to_string(),
                city: "Ottawa".to_string(),
                country: None,
                start_date: date(2024, 5, 1),
                end_date: date(2024, 5, 31),
                course_type,
            },
        }
    }

    #[test]
    fn best_by_event_takes_minimum_per_event() {
        let rows = vec![
            row(1, EventCode::Fr100, 66000, CourseType::Course25m, 1),
            row(2, EventCode::Fr100, 65000, CourseType::Course25m, 2),
            row(3, EventCode::Fr100, 65500, CourseType::Course25m, 3),
            row(4, EventCode::Fr50, 30000, CourseType::Course25m, 2),
        ];
        let bests = best_by_event(&rows, CourseType::Course25m);
        assert_eq!(bests.len(), 2);
        assert_eq!(bests[&EventCode::Fr100].time_ms, TimeMs(65000));
        assert_eq!(bests[&EventCode::Fr100].time_id, TimeRecordId::new(2));
        assert_eq!(bests[&EventCode::Fr50].time_ms, TimeMs(30000));
    }

    #[test]
    fn best_by_event_ignores_other_course_types() {
        let rows = vec![
            row(1, EventCode::Fr100, 64000, CourseType::Course50m, 1),
            row(2, EventCode::Fr100, 65000, CourseType::Course25m, 2),
        ];
        let bests = best_by_event(&rows, CourseType::Course25m);
        assert_eq!(bests[&EventCode::Fr100].time_ms, TimeMs(65000));
    }

    #[test]
    fn best_by_event_tie_keeps_first_row() {
        let rows = vec![
            row(7, EventCode::Fr100, 65000, CourseType::Course25m, 1),
            row(8, EventCode::Fr100, 65000, CourseType::Course25m, 2),
        ];
        let bests = best_by_event(&rows, CourseType::Course25m);
        assert_eq!(bests[&EventCode::Fr100].time_id, TimeRecordId::new(7));
    }

    #[test]
    fn is_personal_best_respects_exclusion() {
        let rows = vec![row(1, EventCode::Fr100, 65000, CourseType::Course25m, 1)];

        // Slower than the existing 65.00 -> not a best.
        assert!(!is_personal_best(
            &rows,
            CourseType::Course25m,
            EventCode::Fr100,
            TimeMs(66000),
            Some(TimeRecordId::new(2)),
        ));
        // Faster -> best.
        assert!(is_personal_best(
            &rows,
            CourseType::Course25m,
            EventCode::Fr100,
            TimeMs(64000),
            Some(TimeRecordId::new(2)),
        ));
        // Excluding the only existing record makes any time a best.
        assert!(is_personal_best(
            &rows,
            CourseType::Course25m,
            EventCode::Fr100,
            TimeMs(90000),
            Some(TimeRecordId::new(1)),
        ));
    }

    #[test]
    fn is_personal_best_with_no_prior_records() {
        assert!(is_personal_best(
            &[],
            CourseType::Course25m,
            EventCode::Im400,
            TimeMs(400000),
            None,
        ));
    }

    #[test]
    fn equal_time_still_counts_as_best() {
        // Only strictly faster existing times disqualify a candidate.
        let rows = vec![row(1, EventCode::Fr100, 65000, CourseType::Course25m, 1)];
        assert!(is_personal_best(
            &rows,
            CourseType::Course25m,
            EventCode::Fr100,
            TimeMs(65000),
            None,
        ));
    }
}
