// ============================================================
// Layer 4 — Window Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<WindowSample>
// into tensors.
//
// How batching works here:
//   Input:  Vec of N WindowSamples, each with `window_size` chars
//           and a target vector of length 1 or `window_size`
//   Output: WindowBatch with an Int tensor [N, window_size] and a
//           Float tensor [N, target_dim]
//
//   We flatten all character codes into one long Vec, then
//   reshape — every sample already has identical length, so no
//   padding is needed.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::window::WindowSample;

// ─── WindowBatch ──────────────────────────────────────────────────────────────
/// A batch of window samples ready for the model forward pass.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct WindowBatch<B: Backend> {
    /// Character codes — shape: [batch_size, window_size]
    pub windows: Tensor<B, 2, Int>,

    /// Target vectors — shape: [batch_size, 1] for binary,
    /// [batch_size, window_size] for multiclass
    pub targets: Tensor<B, 2>,
}

// ─── WindowBatcher ────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created in the right place.
#[derive(Clone, Debug)]
pub struct WindowBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WindowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<WindowSample, WindowBatch<B>> for WindowBatcher<B> {
    /// Convert a Vec of WindowSamples into a single WindowBatch.
    fn batch(&self, items: Vec<WindowSample>) -> WindowBatch<B> {
        let batch_size  = items.len();
        // Every sample has the same window and target lengths
        let window_size = items[0].chars.len();
        let target_dim  = items[0].targets.len();

        // ── Flatten character codes ───────────────────────────────────────────
        // Vec<Vec<u8>> → Vec<i32> (Burn uses i32 for Int tensors)
        let chars_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.chars.iter().map(|&c| c as i32))
            .collect();

        // ── Flatten targets ───────────────────────────────────────────────────
        let targets_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.targets.iter().copied())
            .collect();

        // ── Create tensors ────────────────────────────────────────────────────
        let windows = Tensor::<B, 1, Int>::from_ints(
            chars_flat.as_slice(), &self.device
        ).reshape([batch_size, window_size]);

        let targets = Tensor::<B, 1>::from_floats(
            targets_flat.as_slice(), &self.device
        ).reshape([batch_size, target_dim]);

        WindowBatch { windows, targets }
    }
}
