//! Standards comparison: personal bests against a qualifying-time table.
//!
//! The comparison always covers the full event list, not just events the
//! swimmer has swum, so the caller can render a complete table. The main
//! row for each event is matched against the swimmer's *current* age group
//! (where the swimmer stands today), with the standard's `OPEN` entry as a
//! fallback when the exact age group has no entry. Neighboring age groups
//! are looked up exactly, without the fallback, so that a synthetic target
//! is never presented as the next bracket's time.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{SwimRepository, TimeFilter};
use crate::models::records::validate_threshold;
use crate::models::{
    age_at_date, AgeGroup, CourseType, EventCode, Standard, StandardId, StandardTime, Swimmer,
    SwimmerId, TimeMs,
};

use super::personal_best::{best_by_event, PersonalBest};
use super::ServiceResult;

/// Outcome of comparing one event's personal best against a standard time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// Personal best meets or beats the standard time.
    Achieved,
    /// Within the "almost" threshold percentage above the standard.
    Almost,
    NotAchieved,
    /// The swimmer has no recorded time for the event.
    NoTime,
    /// The standard has no entry for the event at any applicable age group.
    NoStandard,
}

/// A single event's comparison row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventComparison {
    pub event: EventCode,
    pub status: ComparisonStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swimmer_time_ms: Option<TimeMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swimmer_time_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_time_ms: Option<TimeMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_time_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_ms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_percent: Option<f64>,
    /// Age group the standard time was actually matched under. May be
    /// `OPEN` when the swimmer's own group has no entry and the fallback
    /// applied.
    pub age_group: AgeGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_age_group: Option<AgeGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_standard_time_ms: Option<TimeMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_standard_time_formatted: Option<String>,
    pub prev_achieved: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_age_group: Option<AgeGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_standard_time_ms: Option<TimeMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_standard_time_formatted: Option<String>,
    pub next_achieved: bool,
}

/// Aggregate counts over all events of a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_events: usize,
    pub achieved: usize,
    pub almost: usize,
    pub not_achieved: usize,
    pub no_time: usize,
}

/// Full comparison of a swimmer's personal bests against one standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub standard_id: StandardId,
    pub standard_name: String,
    pub course_type: CourseType,
    pub swimmer_name: String,
    pub swimmer_age_group: AgeGroup,
    pub threshold_percent: f64,
    pub comparisons: Vec<EventComparison>,
    pub summary: ComparisonSummary,
}

/// Standard times indexed as event -> age group -> time.
type StandardTimeMap = HashMap<EventCode, HashMap<AgeGroup, TimeMs>>;

fn build_time_map(times: &[StandardTime]) -> StandardTimeMap {
    let mut map: StandardTimeMap = HashMap::new();
    for st in times {
        map.entry(st.event).or_default().insert(st.age_group, st.time_ms);
    }
    map
}

/// Exact-group lookup, then the `OPEN` fallback. Returns the time and the
/// age group actually used.
fn standard_time(
    map: &StandardTimeMap,
    event: EventCode,
    age_group: AgeGroup,
) -> Option<(TimeMs, AgeGroup)> {
    let event_times = map.get(&event)?;
    if let Some(&ms) = event_times.get(&age_group) {
        return Some((ms, age_group));
    }
    event_times
        .get(&AgeGroup::Open)
        .map(|&ms| (ms, AgeGroup::Open))
}

/// Exact-group lookup without fallback, for neighbor rows.
fn standard_time_exact(
    map: &StandardTimeMap,
    event: EventCode,
    age_group: AgeGroup,
) -> Option<TimeMs> {
    map.get(&event).and_then(|t| t.get(&age_group)).copied()
}

/// Compare a swimmer's personal bests against a standard.
///
/// Pure function over already-loaded data. `today` determines the
/// swimmer's current age group, which is used for every event row, not
/// the age group the swimmer was in when a given best was swum.
/// `threshold_override` replaces the swimmer's configured "almost"
/// threshold for this comparison only.
pub fn compare_standard(
    swimmer: &Swimmer,
    standard: &Standard,
    standard_times: &[StandardTime],
    personal_bests: &HashMap<EventCode, PersonalBest>,
    threshold_override: Option<f64>,
    today: NaiveDate,
) -> Result<ComparisonResult, crate::models::ValidationError> {
    let threshold = match threshold_override {
        Some(t) => {
            validate_threshold(t)?;
            t
        }
        None => swimmer.threshold_percent,
    };

    let times = build_time_map(standard_times);
    let current_group = AgeGroup::from_age(age_at_date(swimmer.birth_date, today));

    let mut comparisons = Vec::with_capacity(EventCode::ALL.len());
    let mut summary = ComparisonSummary::default();

    for event in EventCode::ALL {
        let mut comp = EventComparison {
            event,
            status: ComparisonStatus::NoTime,
            swimmer_time_ms: None,
            swimmer_time_formatted: None,
            standard_time_ms: None,
            standard_time_formatted: None,
            difference_ms: None,
            difference_formatted: None,
            difference_percent: None,
            age_group: current_group,
            meet_name: None,
            date: None,
            prev_age_group: None,
            prev_standard_time_ms: None,
            prev_standard_time_formatted: None,
            prev_achieved: false,
            next_age_group: None,
            next_standard_time_ms: None,
            next_standard_time_formatted: None,
            next_achieved: false,
        };

        let pb = personal_bests.get(&event);
        let matched = standard_time(&times, event, current_group);

        if let Some((std_ms, matched_group)) = matched {
            comp.age_group = matched_group;
            comp.standard_time_ms = Some(std_ms);
            comp.standard_time_formatted = Some(std_ms.format());
        }

        if let Some(pb) = pb {
            comp.swimmer_time_ms = Some(pb.time_ms);
            comp.swimmer_time_formatted = Some(pb.time_formatted.clone());
            comp.meet_name = Some(pb.meet_name.clone());
            comp.date = Some(pb.date);

            if let Some((std_ms, _)) = matched {
                let diff = pb.time_ms.value() - std_ms.value();
                let diff_percent = pb.time_ms.difference_percent(std_ms);
                comp.difference_ms = Some(diff);
                comp.difference_formatted = Some(pb.time_ms.difference(std_ms));
                comp.difference_percent = Some(diff_percent);

                comp.status = if diff <= 0 {
                    summary.achieved += 1;
                    ComparisonStatus::Achieved
                } else if diff_percent <= threshold {
                    summary.almost += 1;
                    ComparisonStatus::Almost
                } else {
                    summary.not_achieved += 1;
                    ComparisonStatus::NotAchieved
                };
            } else {
                comp.status = ComparisonStatus::NoStandard;
            }
        } else {
            comp.status = ComparisonStatus::NoTime;
            summary.no_time += 1;
        }

        // Neighboring age groups of the swimmer's current group, exact
        // lookup only. Reported whether or not the swimmer has a time, so
        // the caller can always show the adjacent targets.
        if let Some(prev_group) = current_group.previous() {
            if let Some(prev_ms) = standard_time_exact(&times, event, prev_group) {
                comp.prev_age_group = Some(prev_group);
                comp.prev_standard_time_ms = Some(prev_ms);
                comp.prev_standard_time_formatted = Some(prev_ms.format());
                comp.prev_achieved = pb.is_some_and(|pb| pb.time_ms <= prev_ms);
            }
        }
        if let Some(next_group) = current_group.next() {
            if let Some(next_ms) = standard_time_exact(&times, event, next_group) {
                comp.next_age_group = Some(next_group);
                comp.next_standard_time_ms = Some(next_ms);
                comp.next_standard_time_formatted = Some(next_ms.format());
                comp.next_achieved = pb.is_some_and(|pb| pb.time_ms <= next_ms);
            }
        }

        summary.total_events += 1;
        comparisons.push(comp);
    }

    Ok(ComparisonResult {
        standard_id: standard.id,
        standard_name: standard.name.clone(),
        course_type: standard.course_type,
        swimmer_name: swimmer.name.clone(),
        swimmer_age_group: current_group,
        threshold_percent: threshold,
        comparisons,
        summary,
    })
}

/// Load everything needed and compare a swimmer against a standard.
///
/// `today` is the reference date for the swimmer's current age group,
/// supplied by the caller so results are reproducible.
pub async fn compare<R: SwimRepository>(
    repo: &R,
    swimmer_id: SwimmerId,
    standard_id: StandardId,
    course_type: CourseType,
    threshold_override: Option<f64>,
    today: NaiveDate,
) -> ServiceResult<ComparisonResult> {
    let swimmer = repo.get_swimmer(swimmer_id).await?;
    let standard = repo.get_standard(standard_id).await?;
    let standard_times = repo.list_standard_times(standard_id).await?;

    let rows = repo
        .list_times(
            swimmer_id,
            &TimeFilter {
                course_type: Some(course_type),
                ..TimeFilter::default()
            },
        )
        .await?;
    let personal_bests = best_by_event(&rows, course_type);

    log::debug!(
        "comparing swimmer {} against standard '{}' ({} pb events)",
        swimmer_id,
        standard.name,
        personal_bests.len()
    );

    let result = compare_standard(
        &swimmer,
        &standard,
        &standard_times,
        &personal_bests,
        threshold_override,
        today,
    )?;
    Ok(result)
}
