// ============================================================
// Layer 4 — Held-Out Splitter
// ============================================================
// Carves the held-out evaluation set off the window pool BEFORE
// class balancing runs. The held-out set keeps the natural class
// distribution — evaluation should reflect real text, where
// boundary windows are rare — while the training side is
// balanced separately.
//
// Shuffling first matters: windows arrive in document order, and
// adjacent windows overlap heavily (step 4, size 56). Splitting
// without shuffling would hold out the tail of the last document
// only.
//
// Reference: rand crate documentation (SliceRandom)

use rand::seq::SliceRandom;

/// Randomly shuffle `samples` and carve off the held-out tail.
///
/// # Arguments
/// * `samples`           - All available samples (consumed)
/// * `held_out_fraction` - Proportion held out, e.g. 0.1 = 10%
///
/// # Returns
/// A tuple (train_samples, held_out_samples)
pub fn split_held_out<T>(mut samples: Vec<T>, held_out_fraction: f64) -> (Vec<T>, Vec<T>) {
    let mut rng = rand::thread_rng();
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let held     = ((total as f64) * held_out_fraction).round() as usize;
    let held     = held.min(total);
    let held_out = samples.split_off(total - held);

    tracing::debug!(
        "Held-out split: {} training, {} held out",
        samples.len(),
        held_out.len(),
    );

    (samples, held_out)
}
