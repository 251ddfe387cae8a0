//! Label Set Reconciliation
//!
//! Pure set arithmetic over an issue's label IDs. Given the current set and
//! the requested add/remove sets, computes the effective deltas and the final
//! set. Removals apply before additions, so a label named in both requests
//! ends up present (add wins). Re-applying the same request against the
//! updated set is a no-op.

use std::collections::BTreeSet;

/// Outcome of reconciling requested label changes against a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDelta {
    /// Requested additions not already present
    pub effective_add: BTreeSet<String>,
    /// Requested removals actually present
    pub effective_remove: BTreeSet<String>,
    /// `(current - to_remove) ∪ to_add`
    pub final_set: BTreeSet<String>,
}

impl LabelDelta {
    /// True when applying this delta would change nothing.
    pub fn is_noop(&self) -> bool {
        self.effective_add.is_empty() && self.effective_remove.is_empty()
    }
}

/// Reconcile requested add/remove sets against the current label set.
///
/// Deterministic for any iteration order of the inputs; never mutates
/// `current`. Empty requests are legal and yield `final_set == current`.
pub fn reconcile(
    current: &BTreeSet<String>,
    to_add: &BTreeSet<String>,
    to_remove: &BTreeSet<String>,
) -> LabelDelta {
    let effective_add: BTreeSet<String> = to_add.difference(current).cloned().collect();
    let effective_remove: BTreeSet<String> = to_remove.intersection(current).cloned().collect();

    let mut final_set: BTreeSet<String> = current.difference(to_remove).cloned().collect();
    final_set.extend(to_add.iter().cloned());

    LabelDelta {
        effective_add,
        effective_remove,
        final_set,
    }
}
