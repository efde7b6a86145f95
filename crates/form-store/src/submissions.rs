use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::keyed::KeyedStore;

/// A recorded submission and its confirmation number.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub confirmation_number: String,
    pub application_id: String,
    pub answers: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

/// Submission log keyed by confirmation number.
pub struct SubmissionLog {
    store: Arc<dyn KeyedStore<SubmissionRecord>>,
}

impl SubmissionLog {
    pub fn new(store: Arc<dyn KeyedStore<SubmissionRecord>>) -> Self {
        Self { store }
    }

    /// Records a submission and issues its uppercase confirmation number.
    pub fn record(&self, application_id: &str, answers: Value) -> SubmissionRecord {
        let confirmation_number = Uuid::new_v4().to_string().to_uppercase();
        let record = SubmissionRecord {
            confirmation_number: confirmation_number.clone(),
            application_id: application_id.to_string(),
            answers,
            submitted_at: OffsetDateTime::now_utc(),
        };
        self.store.put(&confirmation_number, record.clone());
        info!(application_id, confirmation_number, "submission recorded");
        record
    }

    pub fn find(&self, confirmation_number: &str) -> Option<SubmissionRecord> {
        self.store.get(confirmation_number)
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyed::MemoryStore;
    use serde_json::json;

    fn log() -> SubmissionLog {
        SubmissionLog::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn recorded_submissions_round_trip_by_confirmation_number() {
        let log = log();
        let record = log.record("APP-1", json!({"name": "Ana"}));

        let found = log.find(&record.confirmation_number).unwrap();
        assert_eq!(found.application_id, "APP-1");
        assert_eq!(found.answers, json!({"name": "Ana"}));
    }

    #[test]
    fn confirmation_numbers_are_distinct_and_uppercase() {
        let log = log();
        let first = log.record("APP-1", json!({}));
        let second = log.record("APP-1", json!({}));

        assert_ne!(first.confirmation_number, second.confirmation_number);
        assert_eq!(
            first.confirmation_number,
            first.confirmation_number.to_uppercase()
        );
        assert_eq!(log.count(), 2);
    }

    #[test]
    fn unknown_confirmation_numbers_find_nothing() {
        assert!(log().find("MISSING").is_none());
    }
}
