use std::fmt::Debug;

use tracing::debug;

/// Logs `value` at debug level, prefixed by `label` unless it is empty, and
/// returns it unchanged.
pub fn trace_id<T: Debug>(label: &str, value: T) -> T {
    if label.is_empty() {
        debug!(target: "recur::trace", "{:?}", value);
    } else {
        debug!(target: "recur::trace", "{}: {:?}", label, value);
    }
    value
}
