use super::*;

// =============================================================
// Route mode
// =============================================================

#[test]
fn form_mode_from_route() {
    assert_eq!(FormMode::from_route(false, None), Some(FormMode::Create));
    assert_eq!(FormMode::from_route(true, Some("12")), Some(FormMode::Update(12)));
    assert_eq!(FormMode::from_route(true, Some("twelve")), None);
    assert_eq!(FormMode::from_route(true, None), None);
}

#[test]
fn form_mode_labels() {
    assert_eq!(FormMode::Create.success_notice(), "Session created !");
    assert_eq!(FormMode::Update(1).success_notice(), "Session updated !");
    assert_eq!(FormMode::Update(1).title(), "Update session");
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_session_form_builds_payload() {
    assert_eq!(
        validate_session_form(" Morning flow ", "2026-11-02", "3", " Gentle start "),
        Ok(SessionForm {
            name: "Morning flow".to_owned(),
            date: "2026-11-02".to_owned(),
            teacher_id: 3,
            description: "Gentle start".to_owned(),
        })
    );
}

#[test]
fn validate_session_form_requires_every_field() {
    let missing = "All fields are required.";
    assert_eq!(validate_session_form("", "2026-11-02", "3", "d"), Err(missing));
    assert_eq!(validate_session_form("n", " ", "3", "d"), Err(missing));
    assert_eq!(validate_session_form("n", "2026-11-02", "", "d"), Err(missing));
    assert_eq!(validate_session_form("n", "2026-11-02", "3", "  "), Err(missing));
}

#[test]
fn validate_session_form_rejects_bad_date_and_teacher() {
    assert_eq!(validate_session_form("n", "tomorrow", "3", "d"), Err("Date is not valid."));
    assert_eq!(validate_session_form("n", "2026-11-02", "x", "d"), Err("Select a teacher."));
}

#[test]
fn validate_session_form_caps_description_length() {
    let at_limit = "d".repeat(DESCRIPTION_MAX_CHARS);
    let over_limit = "d".repeat(DESCRIPTION_MAX_CHARS + 1);
    assert!(validate_session_form("n", "2026-11-02", "3", &at_limit).is_ok());
    assert_eq!(
        validate_session_form("n", "2026-11-02", "3", &over_limit),
        Err("Description must be at most 2000 characters.")
    );
}
