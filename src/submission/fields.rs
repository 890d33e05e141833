use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{COURSE_IDS, CourseId};
use crate::models::{FormKind, NewSubmission};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

const NOT_TEXT: &str = "入力形式が正しくありません";

/// A check applied to a present, textual field value.
#[derive(Debug)]
pub enum Constraint {
    Email { message: &'static str },
    MaxChars { limit: usize, message: &'static str },
    OneOf { allowed: &'static [&'static str], message: &'static str },
}

impl Constraint {
    /// Returns the rejection reason when `value` does not satisfy the constraint.
    fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Constraint::Email { message } => (!is_email(value)).then_some(*message),
            Constraint::MaxChars { limit, message } => {
                (value.chars().count() > *limit).then_some(*message)
            }
            Constraint::OneOf { allowed, message } => {
                (!allowed.iter().any(|a| *a == value)).then_some(*message)
            }
        }
    }
}

#[derive(Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub required_message: &'static str,
    pub constraints: &'static [Constraint],
}

#[derive(Debug)]
pub struct FormSchema {
    pub kind: FormKind,
    /// Reported instead of the per-field message when any required field is missing.
    pub missing_message: Option<&'static str>,
    pub fields: &'static [FieldRule],
}

pub static INQUIRY: FormSchema = FormSchema {
    kind: FormKind::Inquiry,
    missing_message: Some("必須項目が未入力です。"),
    fields: &[
        FieldRule {
            name: "name",
            required: true,
            required_message: "お名前は必須です",
            constraints: &[],
        },
        FieldRule {
            name: "email",
            required: true,
            required_message: "メールアドレスは必須です",
            constraints: &[],
        },
        FieldRule {
            name: "subject",
            required: false,
            required_message: "",
            constraints: &[],
        },
        FieldRule {
            name: "message",
            required: true,
            required_message: "お問合せ内容は必須です",
            constraints: &[],
        },
    ],
};

pub static APPLICATION: FormSchema = FormSchema {
    kind: FormKind::Application,
    missing_message: None,
    fields: &[
        FieldRule {
            name: "name",
            required: true,
            required_message: "お名前は必須です",
            constraints: &[Constraint::MaxChars {
                limit: 100,
                message: "お名前は100文字以内で入力してください",
            }],
        },
        FieldRule {
            name: "email",
            required: true,
            required_message: "有効なメールアドレスを入力してください",
            constraints: &[Constraint::Email {
                message: "有効なメールアドレスを入力してください",
            }],
        },
        FieldRule {
            name: "course",
            required: true,
            required_message: "コースを選択してください",
            constraints: &[Constraint::OneOf {
                allowed: COURSE_IDS,
                message: "コースを選択してください",
            }],
        },
        FieldRule {
            name: "message",
            required: false,
            required_message: "",
            constraints: &[Constraint::MaxChars {
                limit: 1000,
                message: "メッセージは1000文字以内で入力してください",
            }],
        },
    ],
};

pub fn schema_for(kind: FormKind) -> &'static FormSchema {
    match kind {
        FormKind::Inquiry => &INQUIRY,
        FormKind::Application => &APPLICATION,
    }
}

/// Bodies carrying a `course` key are applications, everything else is an inquiry.
pub fn detect(raw: &Map<String, Value>) -> FormKind {
    if raw.contains_key("course") {
        FormKind::Application
    } else {
        FormKind::Inquiry
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingRequiredField {
        message: &'static str,
        violations: Vec<FieldViolation>,
    },
    FieldConstraintViolation { violations: Vec<FieldViolation> },
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { message, .. } => *message,
            ValidationError::FieldConstraintViolation { violations } => violations
                .first()
                .map(|v| v.reason)
                .unwrap_or(NOT_TEXT),
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationError::MissingRequiredField { violations, .. }
            | ValidationError::FieldConstraintViolation { violations } => violations,
        }
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.violations().iter().map(|v| v.field).collect()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRequiredField { .. } => {
                write!(f, "missing-required-field: {}", self.fields().join(", "))
            }
            ValidationError::FieldConstraintViolation { violations } => {
                write!(f, "field-constraint-violation:")?;
                for v in violations {
                    write!(f, " {} ({})", v.field, v.reason)?;
                }
                Ok(())
            }
        }
    }
}

enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    NotText,
}

fn field_value<'a>(raw: &'a Map<String, Value>, name: &str) -> FieldValue<'a> {
    match raw.get(name) {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(Value::String(s)) if s.is_empty() => FieldValue::Missing,
        Some(Value::String(s)) => FieldValue::Text(s),
        Some(_) => FieldValue::NotText,
    }
}

/// Check `raw` against `schema`. Pure; unknown keys are ignored.
///
/// Required fields are checked first. Constraints only run once every
/// required field is present.
pub fn validate(
    schema: &FormSchema,
    raw: &Map<String, Value>,
) -> Result<NewSubmission, ValidationError> {
    let missing: Vec<FieldViolation> = schema
        .fields
        .iter()
        .filter(|rule| rule.required)
        .filter(|rule| matches!(field_value(raw, rule.name), FieldValue::Missing))
        .map(|rule| FieldViolation {
            field: rule.name,
            reason: rule.required_message,
        })
        .collect();

    if let Some(first) = missing.first() {
        return Err(ValidationError::MissingRequiredField {
            message: schema.missing_message.unwrap_or(first.reason),
            violations: missing,
        });
    }

    let mut violations = Vec::new();
    for rule in schema.fields {
        match field_value(raw, rule.name) {
            FieldValue::Missing => {}
            FieldValue::NotText => violations.push(FieldViolation {
                field: rule.name,
                reason: NOT_TEXT,
            }),
            FieldValue::Text(value) => {
                if let Some(reason) = rule.constraints.iter().find_map(|c| c.check(value)) {
                    violations.push(FieldViolation {
                        field: rule.name,
                        reason,
                    });
                }
            }
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError::FieldConstraintViolation { violations });
    }

    let has = |name: &str| schema.fields.iter().any(|rule| rule.name == name);
    let text = |name: &str| match field_value(raw, name) {
        FieldValue::Text(s) if has(name) => Some(s.to_string()),
        _ => None,
    };

    Ok(NewSubmission {
        form: schema.kind,
        name: text("name").unwrap_or_default(),
        email: text("email").unwrap_or_default(),
        subject: text("subject"),
        course: text("course").as_deref().and_then(CourseId::parse),
        message: text("message").unwrap_or_default(),
    })
}

/// Mirrors the address check the contact form runs in the browser.
pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}
