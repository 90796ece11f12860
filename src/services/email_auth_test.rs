use super::*;
use crate::services::mailer::test_helpers::RecordingMailer;

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.com "), Some("user@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn normalize_code_accepts_upper_and_normalizes() {
    let code = generate_access_code();
    assert_eq!(normalize_code(&code), Some(code.clone()));
    assert_eq!(normalize_code("abc234"), Some("ABC234".to_owned()));
}

#[test]
fn normalize_code_rejects_bad_shapes() {
    assert_eq!(normalize_code("abc23"), None);
    assert_eq!(normalize_code("abc2345"), None);
    assert_eq!(normalize_code("ABC1I0"), None);
    assert_eq!(normalize_code("ABC23!"), None);
}

#[test]
fn generate_access_code_shape() {
    let code = generate_access_code();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|c| CODE_ALPHABET.contains(&c)));
}

#[test]
fn hash_access_code_is_stable_hex() {
    let a = hash_access_code("ABC234");
    assert_eq!(a, hash_access_code("ABC234"));
    assert_ne!(a, hash_access_code("ABC235"));
    assert_eq!(a.len(), 64);
}

#[test]
fn name_from_email_uses_local_part() {
    assert_eq!(name_from_email("kim@example.com"), "kim");
    assert_eq!(name_from_email("@example.com"), "user");
}

#[test]
fn render_template_injects_email_and_code() {
    let html = render_email_auth_template("user@example.com", "ABC234");
    assert!(html.contains("user@example.com"));
    assert!(html.contains("ABC234"));
    assert!(!html.contains("{{EMAIL}}"));
    assert!(!html.contains("{{CODE}}"));
}

#[test]
fn access_code_email_targets_single_recipient() {
    let email = access_code_email("user@example.com", "ABC234");
    assert_eq!(email.to, vec!["user@example.com".to_owned()]);
    assert!(email.text.contains("ABC234"));
    assert!(email.html.is_some_and(|html| html.contains("ABC234")));
}

#[tokio::test]
async fn send_access_code_email_goes_through_mailer() {
    let mailer = RecordingMailer::default();
    send_access_code_email(&mailer, "user@example.com", "ABC234").await.unwrap();
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, ACCESS_CODE_SUBJECT);
}

#[tokio::test]
async fn send_access_code_email_maps_delivery_failure() {
    let mailer = RecordingMailer::failing();
    let err = send_access_code_email(&mailer, "user@example.com", "ABC234").await.unwrap_err();
    assert!(matches!(err, EmailAuthError::EmailDelivery(msg) if msg.contains("boom")));
}
