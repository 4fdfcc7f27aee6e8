use super::*;

#[test]
fn parse_session_id_accepts_positive_integers() {
    assert_eq!(parse_session_id(Some("42")), Some(42));
    assert_eq!(parse_session_id(Some(" 7 ")), Some(7));
}

#[test]
fn parse_session_id_rejects_missing_and_malformed() {
    assert_eq!(parse_session_id(None), None);
    assert_eq!(parse_session_id(Some("")), None);
    assert_eq!(parse_session_id(Some("abc")), None);
    assert_eq!(parse_session_id(Some("0")), None);
    assert_eq!(parse_session_id(Some("-3")), None);
}

#[test]
fn teacher_label_covers_each_slot_state() {
    let teacher = Teacher {
        id: 1,
        first_name: "Margot".into(),
        last_name: "Delahaye".into(),
        created_at: None,
        updated_at: None,
    };
    assert_eq!(teacher_label(Some(&Ok(teacher))), "Margot Delahaye");
    assert_eq!(teacher_label(Some(&Err(ApiError::Unavailable))), "Unknown teacher");
    assert_eq!(teacher_label(None), "");
}
