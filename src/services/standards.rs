//! Qualifying-standard operations.

use serde::{Deserialize, Serialize};

use crate::db::SwimRepository;
use crate::models::{
    Standard, StandardId, StandardInput, StandardTimeInput, TimeMs, ValidationError,
};

use super::ServiceResult;

/// One qualifying time, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardTimeView {
    pub event: crate::models::EventCode,
    pub age_group: crate::models::AgeGroup,
    pub time_ms: TimeMs,
    pub time_formatted: String,
}

/// A standard together with all its qualifying times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardWithTimes {
    #[serde(flatten)]
    pub standard: Standard,
    pub times: Vec<StandardTimeView>,
}

/// Create a standard with its qualifying times, validated as a set.
///
/// A (event, age group) pair may appear only once in the table.
pub async fn import_standard<R: SwimRepository>(
    repo: &R,
    input: &StandardInput,
    times: &[StandardTimeInput],
) -> ServiceResult<Standard> {
    input.validate()?;
    let mut seen = std::collections::HashSet::new();
    for (idx, time) in times.iter().enumerate() {
        time.validate()?;
        if !seen.insert((time.event, time.age_group)) {
            return Err(ValidationError::new(
                "times",
                format!(
                    "times[{idx}]: duplicate entry for {} {}",
                    time.event, time.age_group
                ),
            )
            .into());
        }
    }
    Ok(repo.create_standard(input, times).await?)
}

/// Fetch a standard and its times.
pub async fn get_standard_with_times<R: SwimRepository>(
    repo: &R,
    id: StandardId,
) -> ServiceResult<StandardWithTimes> {
    let standard = repo.get_standard(id).await?;
    let times = repo
        .list_standard_times(id)
        .await?
        .into_iter()
        .map(|t| StandardTimeView {
            event: t.event,
            age_group: t.age_group,
            time_ms: t.time_ms,
            time_formatted: t.time_ms.format(),
        })
        .collect();
    Ok(StandardWithTimes { standard, times })
}

/// List all standards.
pub async fn list_standards<R: SwimRepository>(repo: &R) -> ServiceResult<Vec<Standard>> {
    Ok(repo.list_standards().await?)
}

/// Delete a standard and its times.
pub async fn delete_standard<R: SwimRepository>(repo: &R, id: StandardId) -> ServiceResult<()> {
    Ok(repo.delete_standard(id).await?)
}
