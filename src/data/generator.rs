// ============================================================
// Layer 4 — Training Batch Stream
// ============================================================
// The trainer consumes batches from an effectively infinite,
// restartable sequence: it asks for exactly N / batch_size
// batches per epoch, for `epochs` epochs, and the stream must
// never run dry. Internally the stream owns the balanced sample
// pool, hands out `batch_size` samples at a time, and reshuffles
// every time it wraps around the pool.
//
// The balancing plan from `balance::precompute` is applied once
// at construction: the required number of larger-class samples
// is dropped (after a shuffle, so the drop is random), and the
// survivors become the pool.
//
// Reference: rand crate documentation (SliceRandom)

use rand::seq::SliceRandom;

use crate::data::balance::BalancePlan;
use crate::domain::window::WindowSample;

pub struct WindowBatchStream {
    samples:    Vec<WindowSample>,
    batch_size: usize,
    cursor:     usize,
    served:     usize,
}

impl WindowBatchStream {
    /// Build the stream: apply the balancing plan, then shuffle.
    pub fn new(mut samples: Vec<WindowSample>, plan: &BalancePlan, batch_size: usize) -> Self {
        let mut rng = rand::thread_rng();

        if plan.remove_items > 0 {
            // Shuffle first so the dropped samples are a random
            // subset of the larger class, not a prefix.
            samples.shuffle(&mut rng);

            let mut to_remove = plan.remove_items;
            samples.retain(|s| {
                if to_remove > 0 && s.is_boundary() == plan.larger_class {
                    to_remove -= 1;
                    false
                } else {
                    true
                }
            });
        }

        samples.shuffle(&mut rng);

        tracing::debug!(
            "Batch stream ready: {} samples, batch_size {}",
            samples.len(),
            batch_size
        );

        Self { samples, batch_size, cursor: 0, served: 0 }
    }

    /// Total example count N in the balanced pool.
    pub fn total(&self) -> usize {
        self.samples.len()
    }

    /// How many batches have been handed out so far.
    pub fn batches_served(&self) -> usize {
        self.served
    }

    /// Produce the next `batch_size` samples, wrapping and
    /// reshuffling when the pool is exhausted. An empty pool
    /// yields an empty batch.
    pub fn next_batch(&mut self) -> Vec<WindowSample> {
        let mut batch = Vec::with_capacity(self.batch_size);
        self.served += 1;

        if self.samples.is_empty() {
            return batch;
        }

        for _ in 0..self.batch_size {
            if self.cursor >= self.samples.len() {
                self.samples.shuffle(&mut rand::thread_rng());
                self.cursor = 0;
            }
            batch.push(self.samples[self.cursor].clone());
            self.cursor += 1;
        }

        batch
    }
}

/// The stream is a lazy infinite sequence of batches.
impl Iterator for WindowBatchStream {
    type Item = Vec<WindowSample>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_batch())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::balance::precompute;

    fn sample(boundary: bool) -> WindowSample {
        WindowSample::new(vec![97; 4], vec![if boundary { 1.0 } else { 0.0 }])
    }

    #[test]
    fn test_balancing_drops_larger_class() {
        let mut samples = vec![sample(true); 3];
        samples.extend(std::iter::repeat(sample(false)).take(10));

        let plan   = precompute(&samples, true);
        let stream = WindowBatchStream::new(samples, &plan, 2);

        assert_eq!(stream.total(), 6);
    }

    #[test]
    fn test_batches_have_requested_size() {
        let samples = vec![sample(true), sample(false), sample(true)];
        let plan    = precompute(&samples, false);
        let mut s   = WindowBatchStream::new(samples, &plan, 2);

        assert_eq!(s.next_batch().len(), 2);
        // Wraps around the 3-sample pool without running dry
        assert_eq!(s.next_batch().len(), 2);
        assert_eq!(s.next_batch().len(), 2);
    }

    #[test]
    fn test_stream_is_effectively_infinite() {
        let samples = vec![sample(true), sample(false)];
        let plan    = precompute(&samples, false);
        let s       = WindowBatchStream::new(samples, &plan, 2);

        assert_eq!(s.take(100).count(), 100);
    }

    #[test]
    fn test_empty_pool_yields_empty_batches() {
        let plan  = precompute(&[], false);
        let mut s = WindowBatchStream::new(Vec::new(), &plan, 4);
        assert!(s.next_batch().is_empty());
    }
}
