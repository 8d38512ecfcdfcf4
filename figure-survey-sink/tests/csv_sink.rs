//! End-to-end: survey flow and user study form writing to a CSV file.

use std::fs;

use chrono::{Local, TimeZone};
use figure_survey::{
    Checkboxes, Choice, Phase, Satisfaction, Session, SurveyDefinition, UserStudyForm,
};
use figure_survey_sink::CsvFileSink;

#[test]
fn test_two_sessions_append_to_one_file() {
    let tmp = tempfile::tempdir().unwrap();
    let sink = CsvFileSink::new(tmp.path().join("responses"), "visual.csv");
    let at = Local.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

    for (name, choice) in [("Alice", Choice::A), ("Bob", Choice::F)] {
        let mut session = Session::new(SurveyDefinition::new(1));
        let mut boxes = Checkboxes::default();
        boxes.set(choice, true);
        session.set_checkboxes(boxes).unwrap();
        session.set_name(name).unwrap();
        session.open_review().unwrap();
        session.confirm_at(&sink, &at).unwrap();
        assert_eq!(session.phase(), Phase::Submitted);
    }

    let contents = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(
        contents,
        "timestamp,name,q1\n\
         2025-06-02T10:00:00.000000,Alice,A\n\
         2025-06-02T10:00:00.000000,Bob,F\n"
    );
}

#[test]
fn test_user_study_row() {
    let tmp = tempfile::tempdir().unwrap();
    let sink = CsvFileSink::new(tmp.path(), "study.csv");
    let form = UserStudyForm {
        name: "Carol".to_string(),
        age: 41,
        satisfaction: Satisfaction::Dissatisfied,
        feedback: "Too long, honestly".to_string(),
    };
    let at = Local.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

    form.submit_at(&sink, &at).unwrap();

    let contents = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(
        contents,
        "timestamp,name,age,satisfaction,feedback\n\
         2025-06-02 10:00:00,Carol,41,Dissatisfied,\"Too long, honestly\"\n"
    );
}
