use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

use crate::keyed::KeyedStore;

/// Failures raised by the host-side stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no draft stored for application `{0}`")]
    UnknownApplication(String),
    #[error("security answer does not match")]
    AccessDenied,
}

/// Stored draft: a value bag sealed behind a hashed security answer.
#[derive(Debug, Clone, Serialize)]
pub struct DraftRecord {
    pub application_id: String,
    pub security_question: String,
    pub answer_hash: String,
    pub answers: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Draft persistence keyed by application id. The security answer is hashed
/// on save and verified on resume; the plain answer is never stored.
pub struct DraftVault {
    store: Arc<dyn KeyedStore<DraftRecord>>,
}

impl DraftVault {
    pub fn new(store: Arc<dyn KeyedStore<DraftRecord>>) -> Self {
        Self { store }
    }

    /// Saves or replaces the draft for an application.
    pub fn save(
        &self,
        application_id: &str,
        security_question: &str,
        security_answer: &str,
        answers: Value,
    ) -> DraftRecord {
        let record = DraftRecord {
            application_id: application_id.to_string(),
            security_question: security_question.to_string(),
            answer_hash: hash_answer(security_answer),
            answers,
            updated_at: OffsetDateTime::now_utc(),
        };
        self.store.put(application_id, record.clone());
        debug!(application_id, "draft saved");
        record
    }

    /// The stored security question, without releasing the answers.
    pub fn security_question(&self, application_id: &str) -> Result<String, StoreError> {
        self.store
            .get(application_id)
            .map(|record| record.security_question)
            .ok_or_else(|| StoreError::UnknownApplication(application_id.to_string()))
    }

    /// Releases the draft when the security answer matches the stored hash.
    pub fn resume(
        &self,
        application_id: &str,
        security_answer: &str,
    ) -> Result<DraftRecord, StoreError> {
        let record = self
            .store
            .get(application_id)
            .ok_or_else(|| StoreError::UnknownApplication(application_id.to_string()))?;
        if record.answer_hash != hash_answer(security_answer) {
            debug!(application_id, "draft access denied");
            return Err(StoreError::AccessDenied);
        }
        Ok(record)
    }
}

/// Lowercase hex SHA-256 digest of a security answer.
pub fn hash_answer(answer: &str) -> String {
    Sha256::digest(answer.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
