use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, submission: &NewSubmission) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions (form, name, email, subject, course, message)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(submission.form.as_str())
    .bind(&submission.name)
    .bind(&submission.email)
    .bind(submission.subject.as_deref())
    .bind(submission.course.map(|c| c.as_str()))
    .bind(&submission.message)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
