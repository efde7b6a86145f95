use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use form_spec::{CompiledForm, FormSchema, SchemaError, ValidationReport, compile_form};

use crate::rate_limit::{RateDecision, RateLimiter};
use crate::submissions::{SubmissionLog, SubmissionRecord};

/// What happened to one submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted(SubmissionRecord),
    Rejected(ValidationReport),
    Throttled { reset_in: Duration },
}

/// Throttles, validates, and records submissions against a single form.
pub struct SubmissionPipeline {
    validator: CompiledForm,
    limiter: RateLimiter,
    log: SubmissionLog,
}

impl SubmissionPipeline {
    /// Compiles the form once so every submission reuses the same validator.
    pub fn new(
        form: &FormSchema,
        limiter: RateLimiter,
        log: SubmissionLog,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            validator: compile_form(form)?,
            limiter,
            log,
        })
    }

    /// Runs one answer set through the pipeline. The limiter counts every
    /// attempt, valid or not, keyed by the caller's client key.
    pub fn submit(&self, application_id: &str, client_key: &str, answers: &Value) -> SubmitOutcome {
        if let RateDecision::Limited { reset_in } = self.limiter.check(client_key) {
            warn!(client_key, "submission throttled");
            return SubmitOutcome::Throttled { reset_in };
        }

        let report = self.validator.validate(answers);
        if !report.valid {
            return SubmitOutcome::Rejected(report);
        }

        SubmitOutcome::Accepted(self.log.record(application_id, answers.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyed::{KeyedStore, MemoryStore};
    use crate::rate_limit::RateLimitConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn sample_form() -> FormSchema {
        serde_json::from_value(json!({
            "title": "Visa application",
            "steps": [{
                "id": "applicant",
                "title": "Applicant",
                "fields": [
                    {"id": "full_name", "type": "text", "label": "Full name", "required": true}
                ]
            }]
        }))
        .unwrap()
    }

    fn pipeline(limit: u32) -> (SubmissionPipeline, Arc<MemoryStore<SubmissionRecord>>) {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(RateLimitConfig {
            limit,
            window: Duration::from_secs(60),
        });
        let pipeline =
            SubmissionPipeline::new(&sample_form(), limiter, SubmissionLog::new(store.clone()))
                .unwrap();
        (pipeline, store)
    }

    #[test]
    fn valid_answers_are_recorded_with_a_confirmation_number() {
        let (pipeline, store) = pipeline(5);

        let SubmitOutcome::Accepted(record) =
            pipeline.submit("APP-1", "client-a", &json!({"full_name": "Ana"}))
        else {
            panic!("expected acceptance");
        };
        assert_eq!(record.application_id, "APP-1");
        assert!(store.get(&record.confirmation_number).is_some());
    }

    #[test]
    fn invalid_answers_are_rejected_and_nothing_is_recorded() {
        let (pipeline, store) = pipeline(5);

        let SubmitOutcome::Rejected(report) = pipeline.submit("APP-1", "client-a", &json!({}))
        else {
            panic!("expected rejection");
        };
        assert_eq!(report.errors[0].field, "full_name");
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn attempts_past_the_limit_are_throttled() {
        let (pipeline, store) = pipeline(1);

        assert!(matches!(
            pipeline.submit("APP-1", "client-a", &json!({"full_name": "Ana"})),
            SubmitOutcome::Accepted(_)
        ));
        assert!(matches!(
            pipeline.submit("APP-1", "client-a", &json!({"full_name": "Ana"})),
            SubmitOutcome::Throttled { .. }
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejected_attempts_still_consume_the_budget() {
        let (pipeline, _) = pipeline(1);

        assert!(matches!(
            pipeline.submit("APP-1", "client-a", &json!({})),
            SubmitOutcome::Rejected(_)
        ));
        assert!(matches!(
            pipeline.submit("APP-1", "client-a", &json!({"full_name": "Ana"})),
            SubmitOutcome::Throttled { .. }
        ));
    }
}
