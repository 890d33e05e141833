use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CourseId;

/// Which contact form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Free-form question with an optional subject and a required message.
    Inquiry,
    /// Course application with an optional message.
    Application,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Inquiry => "inquiry",
            FormKind::Application => "application",
        }
    }
}

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub form: FormKind,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub course: Option<CourseId>,
    /// Empty when the form left the message out.
    pub message: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub form: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub course: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn form_kind(&self) -> FormKind {
        match self.form.as_str() {
            "application" => FormKind::Application,
            _ => FormKind::Inquiry,
        }
    }

    pub fn course_id(&self) -> Option<CourseId> {
        self.course.as_deref().and_then(CourseId::parse)
    }
}
