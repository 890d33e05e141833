#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use survibe::config::Config;
use survibe::email::templates::{self, RenderedEmail};
use survibe::email::{Notifier, NotifyError};
use survibe::models::{NewSubmission, Submission};
use survibe::store::{StoreError, SubmissionStore};

/// Build a config from key/value pairs; everything else takes its default.
pub fn config_from(pairs: &[(&str, &str)]) -> Result<Config, String> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
}

/// In-memory store that assigns ids and timestamps the way the database does.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Submission>>,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn records(&self) -> Vec<Submission> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::from("store unavailable"));
        }

        let record = Submission {
            id: Uuid::now_v7(),
            form: submission.form.as_str().to_string(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            subject: submission.subject.clone(),
            course: submission.course.map(|c| c.as_str().to_string()),
            message: submission.message.clone(),
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Submission>, StoreError> {
        Ok(self.records().into_iter().find(|r| r.id == id))
    }
}

/// Records rendered notifications instead of sending them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<RenderedEmail>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn sent(&self) -> Vec<RenderedEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::from("authentication rejected"));
        }
        self.sent
            .lock()
            .unwrap()
            .push(templates::render_submission(submission));
        Ok(())
    }
}

/// A running test server backed by in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post a JSON contact submission, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post a form-urlencoded contact submission, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_with(MemoryStore::default(), RecordingNotifier::default(), &[]).await
}

pub async fn spawn_with(
    store: MemoryStore,
    notifier: RecordingNotifier,
    env: &[(&str, &str)],
) -> TestApp {
    let mut pairs = vec![
        ("DATABASE_URL", "postgres://unused/survibe"),
        ("SURVIBE_LOG_LEVEL", "warn"),
    ];
    pairs.extend_from_slice(env);
    let config = config_from(&pairs).expect("test config");

    let store = Arc::new(store);
    let notifier = Arc::new(notifier);
    let app = survibe::build_app(config, store.clone(), notifier.clone());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        notifier,
    }
}
