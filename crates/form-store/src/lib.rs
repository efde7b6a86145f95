#![allow(missing_docs)]

pub mod drafts;
pub mod keyed;
pub mod rate_limit;
pub mod submissions;
pub mod submit;

pub use drafts::{DraftRecord, DraftVault, StoreError, hash_answer};
pub use keyed::{KeyedStore, MemoryStore};
pub use rate_limit::{RateDecision, RateLimitConfig, RateLimiter};
pub use submissions::{SubmissionLog, SubmissionRecord};
pub use submit::{SubmissionPipeline, SubmitOutcome};
