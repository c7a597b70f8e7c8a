use super::*;

#[test]
fn validate_login_trims_email_and_keeps_password() {
    assert_eq!(
        validate_login("  trader@example.com ", " s3cret "),
        Ok(("trader@example.com".to_owned(), " s3cret ".to_owned()))
    );
}

#[test]
fn validate_login_requires_both_fields() {
    assert_eq!(validate_login("", "pw"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_login("a@b.com", "   "), Err(MISSING_CREDENTIALS));
}

#[test]
fn login_success_message_prefers_server_text() {
    assert_eq!(login_success_message(Some("Welcome back")), "Welcome back");
    assert_eq!(login_success_message(Some("  ")), "Login successful!");
    assert_eq!(login_success_message(None), "Login successful!");
}
