use crate::catalog;
use crate::models::{FormKind, Submission};

const NO_SUBJECT: &str = "件名なし";
const NO_MESSAGE: &str = "(なし)";

/// Subject line and both bodies of an administrator notification.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub fn render_submission(submission: &Submission) -> RenderedEmail {
    match submission.form_kind() {
        FormKind::Inquiry => render_inquiry(submission),
        FormKind::Application => render_application(submission),
    }
}

fn render_inquiry(submission: &Submission) -> RenderedEmail {
    let subject_line = submission.subject.as_deref().unwrap_or(NO_SUBJECT);

    let text = format!(
        "名前: {name}\nメールアドレス: {email}\n件名: {subject_line}\n\n本文:\n{message}\n",
        name = submission.name,
        email = submission.email,
        message = submission.message,
    );

    let html = layout(&format!(
        r#"    <p>ウェブサイトから新しいお問合せがありました。</p>
    <ul>
        <li><strong>名前:</strong> {name}</li>
        <li><strong>メールアドレス:</strong> {email}</li>
        <li><strong>件名:</strong> {subject}</li>
    </ul>
    <p><strong>本文:</strong><br>{message}</p>"#,
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        subject = escape_html(subject_line),
        message = html_paragraph(&submission.message),
    ));

    RenderedEmail {
        subject: format!("[お問合せ] {subject_line}"),
        text,
        html,
    }
}

fn render_application(submission: &Submission) -> RenderedEmail {
    let course = course_label(submission);
    let message = if submission.message.is_empty() {
        NO_MESSAGE
    } else {
        submission.message.as_str()
    };

    let text = format!(
        "名前: {name}\nメールアドレス: {email}\nコース: {course}\n\nメッセージ:\n{message}\n",
        name = submission.name,
        email = submission.email,
    );

    let html = layout(&format!(
        r#"    <p>ウェブサイトから新しい受講申し込みがありました。</p>
    <ul>
        <li><strong>名前:</strong> {name}</li>
        <li><strong>メールアドレス:</strong> {email}</li>
        <li><strong>コース:</strong> {course}</li>
    </ul>
    <p><strong>メッセージ:</strong><br>{message}</p>"#,
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        course = escape_html(&course),
        message = html_paragraph(message),
    ));

    RenderedEmail {
        subject: format!("[お申込み] {course}"),
        text,
        html,
    }
}

// Falls back to the raw identifier; the catalog is not consulted for integrity.
fn course_label(submission: &Submission) -> String {
    match submission.course_id().and_then(catalog::find) {
        Some(course) => course.title.to_string(),
        None => submission.course.clone().unwrap_or_default(),
    }
}

fn layout(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
{content}
</body>
</html>"#
    )
}

/// Escape user text and turn line breaks into `<br>`.
pub fn html_paragraph(text: &str) -> String {
    escape_html(text)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
