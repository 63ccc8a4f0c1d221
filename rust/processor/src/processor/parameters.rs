//! Reduces a block's automation to one value per parameter.

use kpp_component::events::{ParamValueQueue, ParameterChanges};
use kpp_component::parameters::Store;

use crate::registry::Registry;

/// The value a queue settles on for this block, if any.
///
/// Only the last delivered point matters since processing never splits a block.
fn settled_value(queue: &dyn ParamValueQueue) -> Option<f32> {
    #[allow(clippy::cast_possible_truncation)]
    queue.last_point().map(|point| point.value as f32)
}

/// Apply the last point of every queue to `store`, and tell `listeners`.
///
/// Queues that can't be read, unknown ids, and out of range values are
/// skipped. Returns whether any stored value changed.
pub(super) fn apply_changes(
    changes: &dyn ParameterChanges,
    store: &mut Store,
    listeners: &Registry,
) -> bool {
    let mut changed = false;
    for index in 0..changes.parameter_count() {
        let Some(queue) = changes.parameter_data(index) else {
            continue;
        };
        let Some(value) = settled_value(queue) else {
            continue;
        };
        let id = queue.parameter_id();
        if let Ok(did_change) = store.set_normalized(id, value) {
            changed |= did_change;
            if let Some(display) = store.display_value(id) {
                listeners.notify(id, display);
            }
        }
    }
    changed
}
