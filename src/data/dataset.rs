use burn::data::dataset::Dataset;

use crate::domain::window::WindowSample;

/// In-memory dataset over window samples — used for the held-out
/// evaluation path, where every sample is visited exactly once.
pub struct WindowDataset {
    samples: Vec<WindowSample>,
}

impl WindowDataset {
    pub fn new(samples: Vec<WindowSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<WindowSample> for WindowDataset {
    fn get(&self, index: usize) -> Option<WindowSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
