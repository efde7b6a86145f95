use serde_json::Value;

use crate::answers::ValueBag;
use crate::spec::field::FieldCondition;

/// Returns true when every condition holds against the bag.
///
/// An empty list is always satisfied. A lookup that misses, or a stored value
/// that is not a string, never matches an expected value, so unanswered
/// upstream fields leave dependent conditions unsatisfied instead of erroring.
pub fn satisfies(conditions: &[FieldCondition], values: &ValueBag) -> bool {
    conditions.iter().all(|condition| {
        values
            .get(&condition.field_id)
            .and_then(Value::as_str)
            .is_some_and(|stored| stored == condition.equals)
    })
}
