//! Swimmer profile operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::SwimRepository;
use crate::models::{age_at_date, AgeGroup, Gender, Swimmer, SwimmerId, SwimmerInput};

use super::ServiceResult;

/// A swimmer profile with display fields computed for a reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwimmerProfile {
    pub id: SwimmerId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub threshold_percent: f64,
    pub current_age: i32,
    pub current_age_group: AgeGroup,
}

impl SwimmerProfile {
    /// Build the display profile as of `today`.
    pub fn from_swimmer(swimmer: Swimmer, today: NaiveDate) -> Self {
        let current_age = age_at_date(swimmer.birth_date, today);
        Self {
            id: swimmer.id,
            name: swimmer.name,
            birth_date: swimmer.birth_date,
            gender: swimmer.gender,
            threshold_percent: swimmer.threshold_percent,
            current_age,
            current_age_group: AgeGroup::from_age(current_age),
        }
    }
}

/// Create a new swimmer profile.
pub async fn create_swimmer<R: SwimRepository>(
    repo: &R,
    input: &SwimmerInput,
    today: NaiveDate,
) -> ServiceResult<SwimmerProfile> {
    input.validate()?;
    let swimmer = repo.create_swimmer(input).await?;
    Ok(SwimmerProfile::from_swimmer(swimmer, today))
}

/// Fetch a swimmer profile.
pub async fn get_swimmer<R: SwimRepository>(
    repo: &R,
    id: SwimmerId,
    today: NaiveDate,
) -> ServiceResult<SwimmerProfile> {
    let swimmer = repo.get_swimmer(id).await?;
    Ok(SwimmerProfile::from_swimmer(swimmer, today))
}

/// Fully replace a swimmer profile.
pub async fn update_swimmer<R: SwimRepository>(
    repo: &R,
    id: SwimmerId,
    input: &SwimmerInput,
    today: NaiveDate,
) -> ServiceResult<SwimmerProfile> {
    input.validate()?;
    let swimmer = repo.update_swimmer(id, input).await?;
    Ok(SwimmerProfile::from_swimmer(swimmer, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn profile_computes_age_fields() {
        let swimmer = Swimmer {
            id: SwimmerId::new(1),
            name: "Alex".to_string(),
            birth_date: date(2011, 9, 1),
            gender: Gender::Male,
            threshold_percent: 3.0,
        };
        // Before the birthday: ordinary age 12, so the 11-12 bracket.
        let profile = SwimmerProfile::from_swimmer(swimmer.clone(), date(2024, 6, 1));
        assert_eq!(profile.current_age, 12);
        assert_eq!(profile.current_age_group, AgeGroup::Age11_12);
        // After it: 13, one bracket up.
        let profile = SwimmerProfile::from_swimmer(swimmer, date(2024, 10, 1));
        assert_eq!(profile.current_age, 13);
        assert_eq!(profile.current_age_group, AgeGroup::Age13_14);
    }
}
