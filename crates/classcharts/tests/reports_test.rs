//! End-to-end report assembly over a scripted API.

mod common;

use chrono::NaiveDate;
use classcharts::reports::homework::DisplayDate;
use classcharts::reports::{activity, detentions, homework, pupils, timetable, DateRange};
use classcharts::ClassChartsError;
use common::{logged_in, ok, ok_with_meta, ScriptedTransport};
use serde_json::json;
use tempfile::TempDir;

fn range() -> DateRange {
    DateRange::last_days(30, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()).unwrap()
}

#[test]
fn test_activity_follows_last_id_cursor() {
    let transport = ScriptedTransport::new()
        .respond(common::login_ok("sess-1"))
        .respond(ok(json!([{"id": 1, "score": 1}, {"id": 2, "score": 1}, {"id": 3, "score": -1}])))
        .respond(ok(json!([{"id": 4, "score": 1}, {"id": 5, "score": 2}])))
        .respond(ok(json!([])));
    let mut session = logged_in(&transport);

    let activities = activity::fetch(&mut session, 42, range()).unwrap();

    let ids: Vec<Option<u64>> = activities.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);

    let urls = transport.urls();
    assert_eq!(urls.len(), 4);
    assert!(urls[1].contains("/activity/42?from=2024-05-01&to=2024-05-31"));
    assert!(!urls[1].contains("last_id"));
    assert!(urls[2].ends_with("&last_id=3"));
    assert!(urls[3].ends_with("&last_id=5"));
}

#[test]
fn test_timetable_reads_each_listed_date() {
    let dates = json!({"timetable_dates": ["2024-05-06", "2024-05-07"]});
    let transport = ScriptedTransport::new()
        .respond(common::login_ok("sess-1"))
        .respond(ok_with_meta(json!([]), dates))
        .respond(ok_with_meta(
            json!([{"period_number": "1", "lesson_name": "Ma1", "teacher_name": "Mr A"}]),
            json!({"periods": [{"number": "1", "start_time": "08:50", "end_time": "09:50"}]}),
        ))
        .respond(ok_with_meta(
            json!([{"period_number": "2", "lesson_name": "En2", "date": "2024-05-07"}]),
            json!({"periods": []}),
        ));
    let mut session = logged_in(&transport);

    let anchor = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
    let days = timetable::fetch(&mut session, 42, anchor).unwrap();

    let urls = transport.urls();
    assert!(urls[1].ends_with("/timetable/42?date=2024-05-08"));
    assert!(urls[2].ends_with("/timetable/42?date=2024-05-06"));
    assert!(urls[3].ends_with("/timetable/42?date=2024-05-07"));

    let table = timetable::table(days);
    let body = table.body();
    assert_eq!(body[1][0], "2024-05-06");
    assert_eq!(body[1][6], "08:50");
    assert_eq!(body[2][2], "En2");
}

#[test]
fn test_detentions_saved_as_csv() {
    let transport = ScriptedTransport::new()
        .respond(common::login_ok("sess-1"))
        .respond(ok(json!([{
            "date": "2024-05-01", "time": "15:30", "length": 30, "location": "Hall",
            "lesson": null, "teacher": {"title": "Ms", "first_name": "Ada", "last_name": "Byron"},
            "detention_type": {"name": "Lunch"}, "notes": ""
        }])));
    let mut session = logged_in(&transport);
    let list = detentions::fetch(&mut session, 42).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(detentions::CSV_FILE);
    let mut out = Vec::new();
    detentions::write(&list, Some(&path), &mut out).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "Date,Time,Length,Location,Lesson,Type,Teacher,Notes\n\
         2024-05-01,15:30,30,Hall,N/A,Lunch,Ms Ada Byron,\n"
    );
    assert!(String::from_utf8(out).unwrap().contains("Detentions saved to"));
}

#[test]
fn test_homework_number_out_of_range() {
    let transport = ScriptedTransport::new()
        .respond(common::login_ok("sess-1"))
        .respond(ok(json!([
            {"title": "Essay", "homework_type": "Homework", "due_date": "2024-05-03"},
            {"title": "Trip form", "homework_type": "Other", "due_date": "2024-05-01"}
        ])));
    let mut session = logged_in(&transport);

    let list = homework::fetch(&mut session, 42, range(), DisplayDate::DueDate).unwrap();
    assert!(transport.urls()[1].contains("display_date=due_date"));

    let mut out = Vec::new();
    let err = homework::write(list, Some(2), &mut out).unwrap_err();
    assert!(matches!(err, ClassChartsError::Precondition { .. }));
    assert!(out.is_empty());
}

#[test]
fn test_pupils_listed_without_student_id() {
    let transport = ScriptedTransport::new()
        .respond(common::login_ok("sess-1"))
        .respond(ok(json!([
            {"id": 11, "first_name": "Ada", "last_name": "Lovelace", "school_name": "Hill"},
            {"id": 12, "first_name": "Alan", "last_name": "Turing", "school_name": "Hill"}
        ])));
    let mut session = logged_in(&transport);

    let all = pupils::fetch(&mut session).unwrap();
    assert!(transport.urls()[1].ends_with("/pupils"));

    let chosen = pupils::select(all, Some(2), |_| panic!("no prompt expected")).unwrap();
    assert_eq!(chosen.id, 12);
}
