//! Pins the JSON field shapes of the result structures the service layer
//! hands to callers.

use chrono::NaiveDate;

use swimstats::db::{LocalRepository, SwimRepository};
use swimstats::models::{
    AgeGroup, BatchTimeInput, CourseType, EventCode, Gender, MeetInput, StandardInput,
    StandardTimeInput, SwimmerInput, TimeMs,
};
use swimstats::services::{comparison, progress, standards, swimmer, times};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed(repo: &LocalRepository) -> (swimstats::models::SwimmerId, swimstats::models::MeetId) {
    let profile = swimmer::create_swimmer(
        repo,
        &SwimmerInput {
            name: "Alex Rivers".to_string(),
            birth_date: date(2011, 3, 15),
            gender: Gender::Female,
            threshold_percent: None,
        },
        date(2024, 6, 1),
    )
    .await
    .unwrap();
    let meet = repo
        .create_meet(&MeetInput {
            name: "Spring Open".to_string(),
            city: "Ottawa".to_string(),
            country: None,
            start_date: date(2024, 4, 12),
            end_date: Some(date(2024, 4, 14)),
            course_type: CourseType::Course25m,
        })
        .await
        .unwrap();
    (profile.id, meet.id)
}

#[tokio::test]
async fn comparison_result_serializes_with_expected_fields() {
    let repo = LocalRepository::new();
    let (swimmer_id, meet_id) = seed(&repo).await;

    times::create_batch(
        &repo,
        swimmer_id,
        &times::BatchInput {
            meet_id,
            times: vec![BatchTimeInput {
                event: EventCode::Fr100,
                time_ms: TimeMs(61000),
                event_date: date(2024, 4, 12),
                notes: None,
            }],
        },
    )
    .await
    .unwrap();

    let standard = standards::import_standard(
        &repo,
        &StandardInput {
            name: "Provincial AA".to_string(),
            description: None,
            course_type: CourseType::Course25m,
            gender: Gender::Female,
        },
        &[StandardTimeInput {
            event: EventCode::Fr100,
            age_group: AgeGroup::Age13_14,
            time_ms: TimeMs(60000),
        }],
    )
    .await
    .unwrap();

    let result = comparison::compare(
        &repo,
        swimmer_id,
        standard.id,
        CourseType::Course25m,
        None,
        date(2024, 6, 1),
    )
    .await
    .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["standard_name"], "Provincial AA");
    assert_eq!(value["course_type"], "25m");
    assert_eq!(value["swimmer_age_group"], "13-14");
    assert_eq!(value["threshold_percent"], 3.0);
    assert_eq!(value["summary"]["total_events"], 17);
    assert_eq!(value["summary"]["almost"], 1);

    let rows = value["comparisons"].as_array().unwrap();
    assert_eq!(rows.len(), 17);
    let fr100 = rows
        .iter()
        .find(|r| r["event"] == "100FR")
        .expect("100FR row present");
    assert_eq!(fr100["status"], "almost");
    assert_eq!(fr100["swimmer_time_ms"], 61000);
    assert_eq!(fr100["swimmer_time_formatted"], "1:01.00");
    assert_eq!(fr100["standard_time_ms"], 60000);
    assert_eq!(fr100["difference_ms"], 1000);
    assert_eq!(fr100["difference_formatted"], "+1.00");
    assert_eq!(fr100["age_group"], "13-14");
    // Absent optionals are omitted rather than serialized as null.
    assert!(fr100.get("next_age_group").is_none());

    let no_time = rows.iter().find(|r| r["event"] == "400IM").unwrap();
    assert_eq!(no_time["status"], "no_time");
    assert!(no_time.get("swimmer_time_ms").is_none());
}

#[tokio::test]
async fn progress_and_batch_results_serialize_with_expected_fields() {
    let repo = LocalRepository::new();
    let (swimmer_id, meet_id) = seed(&repo).await;

    let batch = times::create_batch(
        &repo,
        swimmer_id,
        &times::BatchInput {
            meet_id,
            times: vec![BatchTimeInput {
                event: EventCode::Fr50,
                time_ms: TimeMs(29200),
                event_date: date(2024, 4, 12),
                notes: Some("prelims".to_string()),
            }],
        },
    )
    .await
    .unwrap();

    let value = serde_json::to_value(&batch).unwrap();
    assert_eq!(value["new_personal_bests"][0], "50FR");
    assert_eq!(value["times"][0]["event"], "50FR");
    assert_eq!(value["times"][0]["time_formatted"], "29.20");
    assert_eq!(value["times"][0]["is_personal_best"], true);
    assert_eq!(value["times"][0]["notes"], "prelims");

    let data = progress::progress_data(
        &repo,
        swimmer_id,
        CourseType::Course25m,
        EventCode::Fr50,
        Some(date(2024, 1, 1)),
        None,
    )
    .await
    .unwrap();
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["event"], "50FR");
    assert_eq!(value["course_type"], "25m");
    assert_eq!(value["start_date"], "2024-01-01");
    assert!(value.get("end_date").is_none());
    assert_eq!(value["data_points"][0]["is_personal_best"], true);
    assert_eq!(value["data_points"][0]["meet_name"], "Spring Open");
    assert_eq!(value["data_points"][0]["date"], "2024-04-12");
}
