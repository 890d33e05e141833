use sqlx::postgres::PgPoolOptions;

use survibe::catalog::CourseId;
use survibe::models::{FormKind, NewSubmission};
use survibe::store::{PgSubmissionStore, SubmissionStore};

/// Needs a reachable Postgres: `DATABASE_URL=... cargo test -- --ignored`.
#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn store_assigns_id_and_timestamp() {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let store = PgSubmissionStore::new(pool);
    let new_submission = NewSubmission {
        form: FormKind::Application,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        subject: None,
        course: Some(CourseId::PromptBasics),
        message: String::new(),
    };

    let first = store.insert(&new_submission).await.unwrap();
    let second = store.insert(&new_submission).await.unwrap();
    assert_ne!(first.id, second.id);
    assert!(second.created_at >= first.created_at);

    let found = store.find(first.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Alice");
    assert_eq!(found.course.as_deref(), Some("prompt-basics"));
    assert_eq!(found.form_kind(), FormKind::Application);

    sqlx::query("DELETE FROM submissions WHERE id = ANY($1)")
        .bind(vec![first.id, second.id])
        .execute(store.pool())
        .await
        .unwrap();
}
