//! Integration tests for figure-survey

use chrono::{Local, TimeZone};
use figure_survey::{
    Checkboxes, Choice, Phase, Proceed, Response, Session, SinkError, SurveyDefinition,
    SurveyError, TestSink, ValidationError,
};

fn boxes(choices: &[Choice], none: bool) -> Checkboxes {
    let mut boxes = Checkboxes::default();
    for choice in choices {
        boxes.set(*choice, true);
    }
    boxes.set_none(none);
    boxes
}

/// q1 = {A, C}, q2 = None of the above, name "Alice".
fn alice_session() -> Session {
    let mut session = Session::new(SurveyDefinition::new(2));
    session
        .set_checkboxes(boxes(&[Choice::A, Choice::C], false))
        .unwrap();
    assert!(matches!(session.proceed().unwrap(), Proceed::Advanced(_)));
    session.set_checkboxes(boxes(&[], true)).unwrap();
    session.set_name("Alice").unwrap();
    session
}

#[test]
fn test_two_question_submission() {
    let mut session = alice_session();
    assert!(session.can_submit());

    session.open_review().unwrap();
    let lines: Vec<String> = session
        .review_lines()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        lines,
        vec!["✅ Question 1: A, C", "✅ Question 2: None of the above"]
    );

    let sink = TestSink::new();
    let at = Local.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
    session.confirm_at(&sink, &at).unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].row(),
        vec![
            "2025-06-02T10:00:00.000000",
            "Alice",
            "A,C",
            "None of the above"
        ]
    );
    assert_eq!(session.phase(), Phase::Submitted);
    assert!(session.responses().is_empty());
}

#[test]
fn test_conflicting_selection_blocks_proceed() {
    let mut session = Session::new(SurveyDefinition::new(2));
    session.set_checkboxes(boxes(&[Choice::A], true)).unwrap();
    let stored = session.response(session.current()).clone();

    let err = session.proceed().unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cannot select both A–F and 'None of the above'."
    );
    assert_eq!(session.current().number(), 1);
    assert_eq!(session.response(session.current()), &stored);
}

#[test]
fn test_auth_failure_keeps_session_for_retry() {
    let mut session = alice_session();
    session.open_review().unwrap();
    let sink = TestSink::new().with_failure(SinkError::Auth(
        "invalid_grant: account not found".to_string(),
    ));

    let err = session.confirm(&sink).unwrap_err();

    assert!(matches!(err, SurveyError::Sink(_)));
    assert!(err.to_string().contains("AuthError"));
    assert_eq!(session.phase(), Phase::Reviewing);
    assert_eq!(session.completion().completed, 2);
    assert!(sink.records().is_empty());

    // Retry from the still-open dialog.
    session.confirm(&sink).unwrap();
    assert_eq!(sink.records().len(), 1);
    assert_eq!(session.phase(), Phase::Submitted);
}

#[test]
fn test_gate_truth_table() {
    for answered in [false, true] {
        for name in ["", "  ", "Alice"] {
            let mut session = Session::new(SurveyDefinition::new(1));
            if answered {
                session.set_checkboxes(boxes(&[Choice::E], false)).unwrap();
            }
            session.set_name(name).unwrap();
            let expected = answered && !name.trim().is_empty();
            assert_eq!(session.can_submit(), expected, "{answered} {name:?}");
            assert_eq!(session.open_review().is_ok(), expected);
        }
    }
}

#[test]
fn test_complete_iff_non_empty() {
    let mut session = Session::new(SurveyDefinition::new(1));
    let cases = [
        (boxes(&[], false), false),
        (boxes(&[Choice::F], false), true),
        (boxes(&[], true), true),
        (boxes(&[Choice::B, Choice::D], false), true),
    ];
    for (state, complete) in cases {
        session.set_checkboxes(state).unwrap();
        let response = session.response(session.current());
        assert_eq!(response.is_complete(), complete);
        assert_eq!(response.is_complete(), !response.labels().is_empty());
    }
}

#[test]
fn test_navigation_keeps_answers() {
    let mut session = Session::new(SurveyDefinition::new(3));
    session.set_checkboxes(boxes(&[Choice::B], false)).unwrap();
    session.navigate(3).unwrap();
    session.navigate(1).unwrap();

    assert_eq!(
        session.response(session.current()),
        &Response::choices([Choice::B])
    );
    assert!(session.checkboxes(session.current()).is_checked(Choice::B));
}

#[test]
fn test_incomplete_submission_is_a_validation_error() {
    let mut session = Session::new(SurveyDefinition::new(2));
    session.set_name("Alice").unwrap();
    let err = session.open_review().unwrap_err();
    assert!(matches!(
        err,
        SurveyError::Validation(ValidationError::Incomplete {
            completed: 0,
            total: 2
        })
    ));
    assert_eq!(session.phase(), Phase::Editing);
}
