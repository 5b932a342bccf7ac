// ============================================================
// Layer 4 — Class Balancer
// ============================================================
// Boundary windows are rare: with window_size=56 and step=4 most
// windows of real text contain no sentence ending at all. Trained
// on the raw distribution, the binary model collapses into always
// answering "no boundary".
//
// precompute() inspects the sample set once and produces the
// balancing plan the batch stream later applies:
//   - which class is the larger one
//   - how many of its members to drop so both classes match
//   - the total example count N after dropping
//
// N is what the trainer divides by batch_size to get the step
// count, so the plan is computed before training starts and
// never changes mid-run.
//
// Balancing is used for the binary model only — the multiclass
// model keeps the raw distribution (balance=false), matching how
// the two heads are trained upstream.

use crate::domain::window::WindowSample;

/// Class-balancing metadata for one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancePlan {
    /// True if the boundary class is the larger one
    pub larger_class: bool,

    /// How many samples of the larger class to drop
    pub remove_items: usize,

    /// Total example count N after dropping
    pub total: usize,
}

/// Compute the balancing plan for a sample set.
///
/// With `balance` off the plan is a no-op: nothing is removed and
/// N is simply the sample count.
pub fn precompute(samples: &[WindowSample], balance: bool) -> BalancePlan {
    let positives = samples.iter().filter(|s| s.is_boundary()).count();
    let negatives = samples.len() - positives;

    if !balance {
        return BalancePlan {
            larger_class: positives >= negatives,
            remove_items: 0,
            total:        samples.len(),
        };
    }

    let larger_class = positives > negatives;
    let remove_items = positives.abs_diff(negatives);
    let total        = samples.len() - remove_items;

    tracing::info!(
        "Balance plan: {} boundary / {} non-boundary, dropping {} from the larger class (N={})",
        positives, negatives, remove_items, total
    );

    BalancePlan { larger_class, remove_items, total }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample(boundary: bool) -> WindowSample {
        WindowSample::new(vec![97; 4], vec![if boundary { 1.0 } else { 0.0 }])
    }

    #[test]
    fn test_remove_items_is_class_difference() {
        let mut samples = vec![sample(true), sample(true)];
        samples.extend((0..5).map(|_| sample(false)));

        let plan = precompute(&samples, true);
        assert!(!plan.larger_class); // non-boundary is larger
        assert_eq!(plan.remove_items, 3);
        assert_eq!(plan.total, 4);
    }

    #[test]
    fn test_balanced_total_counts_both_classes_equally() {
        let samples = vec![sample(true), sample(false), sample(false)];
        let plan    = precompute(&samples, true);
        // 1 boundary + 1 non-boundary survive
        assert_eq!(plan.total, 2);
    }

    #[test]
    fn test_no_balance_is_a_noop() {
        let samples = vec![sample(true), sample(false), sample(false)];
        let plan    = precompute(&samples, false);
        assert_eq!(plan.remove_items, 0);
        assert_eq!(plan.total, 3);
    }

    #[test]
    fn test_already_balanced() {
        let samples = vec![sample(true), sample(false)];
        let plan    = precompute(&samples, true);
        assert_eq!(plan.remove_items, 0);
        assert_eq!(plan.total, 2);
    }

    #[test]
    fn test_empty_sample_set() {
        let plan = precompute(&[], true);
        assert_eq!(plan.remove_items, 0);
        assert_eq!(plan.total, 0);
    }
}
