//! Submission digests for recognising replayed advances.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::StageSubmission;
use crate::models::Stage;

#[derive(Serialize)]
struct CommitPayload<'a> {
    encounter_id: &'a str,
    stage: Stage,
    submission: &'a StageSubmission,
}

/// SHA-256 of the canonical JSON of (encounter id, stage, submission).
pub(crate) fn submission_digest(
    encounter_id: &str,
    stage: Stage,
    submission: &StageSubmission,
) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(&CommitPayload {
        encounter_id,
        stage,
        submission,
    })?;
    Ok(hash_data(payload.as_bytes()))
}

/// Hash data using SHA-256, hex encoded.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}
