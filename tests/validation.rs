use serde_json::{json, Map, Value};

use survibe::catalog::CourseId;
use survibe::models::FormKind;
use survibe::submission::fields::{self, ValidationError, APPLICATION, INQUIRY};
use survibe::submission::parser;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn detects_form_variant_by_course_key() {
    assert_eq!(
        fields::detect(&object(json!({ "name": "A", "course": "prompt-basics" }))),
        FormKind::Application
    );
    assert_eq!(
        fields::detect(&object(json!({ "name": "A", "subject": "x" }))),
        FormKind::Inquiry
    );
}

#[test]
fn inquiry_normalises_fields() {
    let raw = object(json!({
        "name": "田中太郎",
        "email": "tanaka@example.com",
        "subject": "",
        "message": "詳細を教えてください",
        "website": "ignored",
    }));

    let submission = fields::validate(&INQUIRY, &raw).unwrap();
    assert_eq!(submission.form, FormKind::Inquiry);
    assert_eq!(submission.name, "田中太郎");
    assert_eq!(submission.subject, None);
    assert_eq!(submission.course, None);
    assert_eq!(submission.message, "詳細を教えてください");
}

#[test]
fn inquiry_does_not_check_email_format() {
    let raw = object(json!({ "name": "A", "email": "whatever", "message": "m" }));
    assert!(fields::validate(&INQUIRY, &raw).is_ok());
}

#[test]
fn missing_fields_are_reported_before_constraints() {
    let raw = object(json!({ "email": "bad", "course": "prompt-basics" }));

    let err = fields::validate(&APPLICATION, &raw).unwrap_err();
    assert!(matches!(err, ValidationError::MissingRequiredField { .. }));
    assert_eq!(err.fields(), vec!["name"]);
    assert_eq!(err.message(), "お名前は必須です");
}

#[test]
fn application_name_limit_counts_characters() {
    let ok = object(json!({
        "name": "名".repeat(100),
        "email": "a@example.com",
        "course": "prompt-basics",
    }));
    assert!(fields::validate(&APPLICATION, &ok).is_ok());

    let too_long = object(json!({
        "name": "名".repeat(101),
        "email": "a@example.com",
        "course": "prompt-basics",
    }));
    let err = fields::validate(&APPLICATION, &too_long).unwrap_err();
    assert_eq!(err.message(), "お名前は100文字以内で入力してください");
}

#[test]
fn application_collects_every_violation() {
    let raw = object(json!({
        "name": "A",
        "email": "nope",
        "course": "cooking",
        "message": 42,
    }));

    let err = fields::validate(&APPLICATION, &raw).unwrap_err();
    assert!(matches!(err, ValidationError::FieldConstraintViolation { .. }));
    assert_eq!(err.fields(), vec!["email", "course", "message"]);
    assert!(err.to_string().starts_with("field-constraint-violation"));
}

#[test]
fn application_resolves_course_id() {
    let raw = object(json!({
        "name": "A",
        "email": "a@example.com",
        "course": "ai-development",
        "subject": "dropped",
    }));

    let submission = fields::validate(&APPLICATION, &raw).unwrap();
    assert_eq!(submission.course, Some(CourseId::AiDevelopment));
    assert_eq!(submission.subject, None);
    assert_eq!(submission.message, "");
}

#[test]
fn email_pattern() {
    for ok in ["a@example.com", "first.last+tag@mail.example.co.jp", "x_y@a-b.io"] {
        assert!(fields::is_email(ok), "{ok}");
    }
    for bad in ["", "plain", "a@b", ".a@example.com", "a..b@example.com", "a@example.c", "a b@example.com"] {
        assert!(!fields::is_email(bad), "{bad}");
    }
}

#[test]
fn parser_accepts_json_and_forms() {
    let json = parser::parse_body(Some("application/json"), br#"{"name":"A"}"#).unwrap();
    assert_eq!(json["name"], "A");

    let form = parser::parse_body(
        Some("application/x-www-form-urlencoded"),
        b"name=%E7%94%B0%E4%B8%AD&message=a+b",
    )
    .unwrap();
    assert_eq!(form["name"], "田中");
    assert_eq!(form["message"], "a b");

    // No content type falls back to JSON
    assert!(parser::parse_body(None, br#"{"name":"A"}"#).is_ok());
}

#[test]
fn parser_rejects_non_objects() {
    assert!(parser::parse_body(Some("application/json"), b"not json").is_err());
    assert!(parser::parse_body(Some("application/json"), b"[1,2]").is_err());
    assert!(parser::parse_body(Some("multipart/form-data; boundary=x"), b"").is_err());
}
