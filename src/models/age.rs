//! Age calculations for competition eligibility.
//!
//! Two distinct notions of age exist and must not be conflated:
//!
//! - **Competition age** follows the federation rule: the swimmer's age as
//!   of December 31 of the meet's calendar year, regardless of the meet
//!   date itself.
//! - **Ordinary age** is the usual as-of-a-date age, used only for
//!   displaying how old the swimmer is right now.
//!
//! Standards matching uses the ordinary age of "today" to pick the current
//! age group; the Dec-31 rule applies when asking what bracket a meet
//! places the swimmer in.

use chrono::{Datelike, NaiveDate};

use super::types::AgeGroup;

/// Swimmer's age for a meet: age as of December 31 of the meet year.
pub fn age_at_competition(birth_date: NaiveDate, meet_date: NaiveDate) -> i32 {
    let mut age = meet_date.year() - birth_date.year();

    // Adjust if the birthday falls after Dec 31 of the competition year.
    // No calendar date can, but the guard keeps the rule explicit.
    if (birth_date.month(), birth_date.day()) > (12, 31) {
        age -= 1;
    }

    age
}

/// Ordinary age at a given date: year difference, minus one if the
/// birthday (by day of year) has not yet passed.
pub fn age_at_date(birth_date: NaiveDate, date: NaiveDate) -> i32 {
    let mut years = date.year() - birth_date.year();
    if date.ordinal() < birth_date.ordinal() {
        years -= 1;
    }
    years
}

/// Age group the swimmer competes in at the given meet.
pub fn age_group_at_competition(birth_date: NaiveDate, meet_date: NaiveDate) -> AgeGroup {
    AgeGroup::from_age(age_at_competition(birth_date, meet_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn competition_age_uses_year_end() {
        let birth = date(2012, 11, 20);
        // Meet in June 2024: the November birthday has not happened yet,
        // but competition age still counts the full year.
        assert_eq!(age_at_competition(birth, date(2024, 6, 15)), 12);
        // Ordinary age at the same meet date is one less.
        assert_eq!(age_at_date(birth, date(2024, 6, 15)), 11);
    }

    #[test]
    fn competition_age_ignores_meet_day_within_year() {
        let birth = date(2010, 3, 1);
        assert_eq!(age_at_competition(birth, date(2024, 1, 1)), 14);
        assert_eq!(age_at_competition(birth, date(2024, 12, 30)), 14);
    }

    #[test]
    fn ordinary_age_around_birthday() {
        let birth = date(2010, 6, 15);
        assert_eq!(age_at_date(birth, date(2024, 6, 14)), 13);
        assert_eq!(age_at_date(birth, date(2024, 6, 15)), 14);
        assert_eq!(age_at_date(birth, date(2024, 6, 16)), 14);
    }

    #[test]
    fn ordinary_age_on_exact_birthday_in_birth_year() {
        let birth = date(2010, 6, 15);
        assert_eq!(age_at_date(birth, birth), 0);
    }

    #[test]
    fn age_group_at_competition_composes() {
        // Born late 2011: competition age for a 2024 meet is 13 -> 13-14.
        let birth = date(2011, 12, 1);
        assert_eq!(
            age_group_at_competition(birth, date(2024, 2, 10)),
            AgeGroup::Age13_14
        );
    }

    #[test]
    fn age_groups_for_spread_of_birth_years() {
        let meet = date(2024, 7, 1);
        let cases = [
            (2015, AgeGroup::Under10),  // competition age 9
            (2013, AgeGroup::Age11_12), // 11
            (2011, AgeGroup::Age13_14), // 13
            (2008, AgeGroup::Age15_17), // 16
            (2005, AgeGroup::Open),     // 19
        ];
        for (birth_year, expected) in cases {
            let birth = date(birth_year, 5, 5);
            assert_eq!(
                age_group_at_competition(birth, meet),
                expected,
                "birth year {birth_year}"
            );
        }
    }
}
