//! The aggregate document format is shared with earlier builds of the app,
//! so field names and defaults are load-bearing. These tests pin the wire
//! format independently of any CLI or TUI surface.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use lifeos::model::aggregate::Aggregate;
use lifeos::model::progress::Progress;
use lifeos::model::routine::RoutineCategory;
use lifeos::model::task::{Category, TaskType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn seeded_document_round_trips_byte_for_byte() {
    let agg = Aggregate::seeded(date(2026, 8, 7));
    let json = serde_json::to_string_pretty(&agg).unwrap();
    let back: Aggregate = serde_json::from_str(&json).unwrap();
    let json_again = serde_json::to_string_pretty(&back).unwrap();
    assert_eq!(json, json_again);
}

#[test]
fn document_written_by_the_web_build_parses() {
    // Shape produced by the original web client: string IDs, camelCase
    // fields, history keyed by date string, no progress or profile yet.
    let json = r#"{
        "tasks": [
            {
                "id": "1722430800000",
                "title": "Finish assignment",
                "category": "Learning",
                "startTime": "14:00",
                "endTime": "16:00",
                "completed": true,
                "date": "2024-08-01",
                "type": "one-off"
            }
        ],
        "routineHistory": {
            "2024-08-01": ["r1", "r4"]
        },
        "customRoutine": [
            {
                "id": "r1",
                "startTime": "07:00",
                "endTime": "07:30",
                "activity": "Morning Routine",
                "category": "Health"
            },
            {
                "id": "r4",
                "startTime": "13:00",
                "endTime": "17:00",
                "activity": "Afternoon Focus",
                "category": "Focus"
            }
        ]
    }"#;

    let agg: Aggregate = serde_json::from_str(json).unwrap();
    assert_eq!(agg.tasks.len(), 1);
    assert_eq!(agg.tasks[0].id, "1722430800000");
    assert_eq!(agg.tasks[0].category, Category::Learning);
    assert_eq!(agg.tasks[0].kind, TaskType::OneOff);
    assert!(agg.tasks[0].completed);
    assert_eq!(agg.tasks[0].date, date(2024, 8, 1));

    assert_eq!(
        agg.routine_completed_on(date(2024, 8, 1)),
        ["r1".to_string(), "r4".to_string()]
    );
    assert_eq!(agg.custom_routine[1].category, RoutineCategory::Focus);

    // Progress and profile default in
    assert_eq!(agg.progress, Progress { xp: 0, level: 1 });
    assert_eq!(agg.profile.name, "You");
}

#[test]
fn progress_fields_serialize_flat() {
    let mut agg = Aggregate::seeded(date(2026, 8, 7));
    agg.progress = Progress { xp: 40, level: 3 };

    let value = serde_json::to_value(&agg).unwrap();
    assert_eq!(value["xp"], 40);
    assert_eq!(value["level"], 3);
    // Not nested under a "progress" key
    assert!(value.get("progress").is_none());
}

#[test]
fn history_preserves_insertion_order() {
    let mut agg = Aggregate::seeded(date(2026, 8, 7));
    agg.routine_history.insert(date(2026, 8, 5), vec!["r2".into()]);
    agg.routine_history.insert(date(2026, 8, 1), vec!["r1".into()]);
    agg.routine_history.insert(date(2026, 8, 3), vec!["r3".into()]);

    let json = serde_json::to_string(&agg).unwrap();
    let back: Aggregate = serde_json::from_str(&json).unwrap();
    let keys: Vec<NaiveDate> = back.routine_history.keys().copied().collect();
    assert_eq!(
        keys,
        vec![date(2026, 8, 5), date(2026, 8, 1), date(2026, 8, 3)]
    );
}

#[test]
fn unknown_task_type_is_rejected_not_defaulted() {
    let json = r#"{
        "tasks": [{
            "id": "T-001",
            "title": "x",
            "category": "Work",
            "startTime": "09:00",
            "endTime": "10:00",
            "completed": false,
            "date": "2026-08-07",
            "type": "fortnightly"
        }]
    }"#;
    assert!(serde_json::from_str::<Aggregate>(json).is_err());
}
