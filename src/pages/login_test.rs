use super::*;

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  yoga@studio.com ", "test!1234"),
        Ok(LoginRequest { email: "yoga@studio.com".to_owned(), password: "test!1234".to_owned() })
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("yoga@studio.com", ""), Err("Enter both email and password."));
}

#[test]
fn validate_login_input_keeps_password_whitespace() {
    let request = validate_login_input("a@b.co", " pw ").expect("both fields present");
    assert_eq!(request.password, " pw ");
}
