use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::{FormKind, Submission};
use crate::state::SharedState;

use super::fields;

pub struct PipelineResult {
    pub kind: FormKind,
    pub submission: Submission,
}

/// Validate, persist, then notify. Strictly in that order, nothing retried.
///
/// A store failure stops the run before any email goes out. A notification
/// failure is reported as an error but the stored record stays.
pub async fn run(
    state: &SharedState,
    kind: FormKind,
    raw: &Map<String, Value>,
) -> Result<PipelineResult, AppError> {
    let new_submission = fields::validate(fields::schema_for(kind), raw)?;

    let submission = state.store.insert(&new_submission).await?;
    tracing::info!(
        "Stored {} submission {} at {}",
        kind.as_str(),
        submission.id,
        submission.created_at
    );

    if let Err(e) = state.notifier.notify(&submission).await {
        tracing::warn!(
            "Submission {} stored but administrator was not notified",
            submission.id
        );
        return Err(e.into());
    }

    tracing::info!("Administrator notified of submission {}", submission.id);

    Ok(PipelineResult { kind, submission })
}
