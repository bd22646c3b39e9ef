//! Time record operations: single create/update/delete and batch
//! ingestion with new-personal-best sequencing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::db::{SwimRepository, TimeFilter};
use crate::models::{
    BatchTimeInput, EventCode, Meet, MeetId, SwimmerId, TimeInput, TimeMs, TimeRecord,
    TimeRecordId, ValidationError,
};

use super::personal_best::{best_by_event, is_personal_best};
use super::{ServiceError, ServiceResult};

/// A created or loaded time record, annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedTime {
    pub id: TimeRecordId,
    pub meet_id: MeetId,
    pub event: EventCode,
    pub time_ms: TimeMs,
    pub time_formatted: String,
    pub event_date: chrono::NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_personal_best: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet: Option<Meet>,
}

impl RecordedTime {
    fn from_record(record: TimeRecord, is_personal_best: bool, meet: Option<Meet>) -> Self {
        Self {
            id: record.id,
            meet_id: record.meet_id,
            event: record.event,
            time_ms: record.time_ms,
            time_formatted: record.time_ms.format(),
            event_date: record.event_date,
            notes: record.notes,
            is_personal_best,
            meet,
        }
    }
}

/// Input for batch time creation: several events swum at one meet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub meet_id: MeetId,
    pub times: Vec<BatchTimeInput>,
}

/// Result of a batch creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub times: Vec<RecordedTime>,
    /// Events whose best time improved, deduplicated, in the order the
    /// improvement first appeared in the batch.
    pub new_personal_bests: Vec<EventCode>,
}

fn event_date_in_meet(meet: &Meet, input_event: EventCode, date: chrono::NaiveDate)
    -> Result<(), ValidationError> {
    if !meet.contains_date(date) {
        return Err(ValidationError::new(
            "event_date",
            format!(
                "event_date for {input_event} must be within meet dates ({} to {})",
                meet.start_date, meet.end_date
            ),
        ));
    }
    Ok(())
}

/// Record a single time.
///
/// Validates the input, the event date against the meet range and the
/// one-record-per-(meet, event) rule, then stores the record. The returned
/// record carries its personal-best flag, computed against all *prior*
/// times by excluding the record's own fresh ID.
pub async fn create_time<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    input: &TimeInput,
) -> ServiceResult<RecordedTime> {
    input.validate()?;

    let meet = repo.get_meet(input.meet_id).await?;
    event_date_in_meet(&meet, input.event, input.event_date)?;

    if repo.event_exists(swimmer_id, input.meet_id, input.event).await? {
        return Err(ServiceError::DuplicateEvent(input.event));
    }

    let record = repo.create_time(swimmer_id, input).await?;

    let rows = repo
        .list_times(
            swimmer_id,
            &TimeFilter {
                course_type: Some(meet.course_type),
                event: Some(input.event),
                meet_id: None,
            },
        )
        .await?;
    let is_pb = is_personal_best(
        &rows,
        meet.course_type,
        input.event,
        record.time_ms,
        Some(record.id),
    );

    Ok(RecordedTime::from_record(record, is_pb, Some(meet)))
}

/// Update an existing time record in place.
pub async fn update_time<R: SwimRepository>(
    repo: &R,
    id: TimeRecordId,
    input: &TimeInput,
) -> ServiceResult<RecordedTime> {
    input.validate()?;

    let meet = repo.get_meet(input.meet_id).await?;
    event_date_in_meet(&meet, input.event, input.event_date)?;

    let record = repo.update_time(id, input).await?;
    let rows = repo
        .list_times(
            record.swimmer_id,
            &TimeFilter {
                course_type: Some(meet.course_type),
                event: Some(input.event),
                meet_id: None,
            },
        )
        .await?;
    let is_pb = is_personal_best(
        &rows,
        meet.course_type,
        input.event,
        record.time_ms,
        Some(record.id),
    );

    Ok(RecordedTime::from_record(record, is_pb, Some(meet)))
}

/// Delete a time record.
pub async fn delete_time<R: SwimRepository>(repo: &R, id: TimeRecordId) -> ServiceResult<()> {
    // Surface NotFound before attempting the delete.
    repo.get_time(id).await?;
    repo.delete_time(id).await?;
    Ok(())
}

/// List a swimmer's times with optional filters, newest event date first.
pub async fn list_times<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    filter: &TimeFilter,
) -> ServiceResult<Vec<RecordedTime>> {
    let mut rows = repo.list_times(swimmer_id, filter).await?;
    rows.reverse();
    Ok(rows
        .into_iter()
        .map(|r| {
            let meet = r.meet;
            RecordedTime::from_record(r.record, false, Some(meet))
        })
        .collect())
}

/// Record a batch of times swum at one meet.
///
/// Validation is all-or-nothing: every entry is checked (shape, in-batch
/// event uniqueness, event dates inside the meet range, collisions with
/// already-stored times) before anything is written.
///
/// New-best sequencing runs over a working map seeded with the pre-batch
/// personal bests and updated as entries are processed in input order, so
/// each entry is compared against the best known at its own position, not
/// the pre-batch state.
pub async fn create_batch<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    input: &BatchInput,
) -> ServiceResult<BatchResult> {
    if input.times.is_empty() {
        return Err(ValidationError::new("times", "at least one time is required").into());
    }

    let mut seen = HashSet::new();
    for entry in &input.times {
        entry.validate()?;
        if !seen.insert(entry.event) {
            return Err(ServiceError::DuplicateEventInBatch(entry.event));
        }
    }

    let meet = repo.get_meet(input.meet_id).await?;
    for entry in &input.times {
        event_date_in_meet(&meet, entry.event, entry.event_date)?;
    }
    for entry in &input.times {
        if repo.event_exists(swimmer_id, input.meet_id, entry.event).await? {
            return Err(ServiceError::DuplicateEvent(entry.event));
        }
    }

    // Seed the working bests from the pre-batch state.
    let prior_rows = repo
        .list_times(
            swimmer_id,
            &TimeFilter {
                course_type: Some(meet.course_type),
                ..TimeFilter::default()
            },
        )
        .await?;
    let mut working_best: HashMap<EventCode, TimeMs> = best_by_event(&prior_rows, meet.course_type)
        .into_iter()
        .map(|(event, pb)| (event, pb.time_ms))
        .collect();

    let mut times = Vec::with_capacity(input.times.len());
    let mut new_personal_bests = Vec::new();

    for entry in &input.times {
        let created = repo
            .create_time(
                swimmer_id,
                &TimeInput {
                    meet_id: input.meet_id,
                    event: entry.event,
                    time_ms: entry.time_ms,
                    event_date: entry.event_date,
                    notes: entry.notes.clone(),
                },
            )
            .await;
        let record = match created {
            Ok(record) => record,
            Err(err) => {
                // Abort on the first storage failure, naming what did land.
                let stored: Vec<&str> =
                    times.iter().map(|t: &RecordedTime| t.event.as_str()).collect();
                log::warn!(
                    "batch aborted at event {}: {} ({} already stored: [{}])",
                    entry.event,
                    err,
                    stored.len(),
                    stored.join(", ")
                );
                return Err(err.into());
            }
        };

        let is_pb = working_best
            .get(&entry.event)
            .is_none_or(|&best| entry.time_ms < best);
        if is_pb {
            // Later entries compare against this one, not the pre-batch best.
            working_best.insert(entry.event, entry.time_ms);
            if !new_personal_bests.contains(&entry.event) {
                new_personal_bests.push(entry.event);
            }
        }

        times.push(RecordedTime::from_record(record, is_pb, None));
    }

    log::debug!(
        "batch for meet {}: {} times created, {} new bests",
        input.meet_id,
        times.len(),
        new_personal_bests.len()
    );

    Ok(BatchResult {
        times,
        new_personal_bests,
    })
}
