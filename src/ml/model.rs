use burn::{
    nn::{
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
};

use crate::domain::window::ClassMode;

/// The character vocabulary is fixed: 7-bit codes only.
/// The preprocessor guarantees no input ever exceeds this.
pub const VOCAB_SIZE: usize = 128;

/// Recurrent width of the multiclass head. Deliberately
/// independent of the configured `lstm_size`, which applies to
/// the binary head only.
pub const MULTICLASS_LSTM_SIZE: usize = 2000;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ModelConfig {
    pub window_size:    usize,
    pub embedding_size: usize,
    pub lstm_size:      usize,
    /// Applied to both the LSTM's input and its final hidden state
    #[config(default = 0.2)]
    pub dropout:        f64,
}

impl ModelConfig {
    /// Build a classifier for the given mode. The mode is chosen
    /// once, before training starts, and baked into the model.
    pub fn init<B: Backend>(&self, mode: ClassMode, device: &B::Device) -> WindowClassifier<B> {
        match mode {
            ClassMode::Binary     => self.init_binary(device),
            ClassMode::Multiclass => self.init_multiclass(device),
        }
    }

    /// Binary variant: one sigmoid output, recurrent width from config.
    /// Prints the architecture diagram as a diagnostic side effect.
    pub fn init_binary<B: Backend>(&self, device: &B::Device) -> WindowClassifier<B> {
        println!("Building model...");
        let model = self.build(self.lstm_size, 1, false, device);
        println!("{} {} {}", "-".repeat(20), "Binary Model", "-".repeat(20));
        println!("{}", model.describe());
        model
    }

    /// Multiclass variant: `window_size` sigmoid outputs, recurrent
    /// width pinned at MULTICLASS_LSTM_SIZE.
    pub fn init_multiclass<B: Backend>(&self, device: &B::Device) -> WindowClassifier<B> {
        println!("Building model...");
        let model = self.build(MULTICLASS_LSTM_SIZE, self.window_size, true, device);
        println!("{}", model.describe());
        model
    }

    fn build<B: Backend>(
        &self,
        hidden_size: usize,
        output_dim:  usize,
        multiclass:  bool,
        device:      &B::Device,
    ) -> WindowClassifier<B> {
        let embedding = EmbeddingConfig::new(VOCAB_SIZE, self.embedding_size).init(device);
        let lstm      = LstmConfig::new(self.embedding_size, hidden_size, true).init(device);
        let head      = LinearConfig::new(hidden_size, output_dim).init(device);
        let dropout   = DropoutConfig::new(self.dropout).init();

        WindowClassifier {
            embedding,
            input_dropout: dropout.clone(),
            lstm,
            recurrent_dropout: dropout,
            head,
            window_size: self.window_size,
            embedding_size: self.embedding_size,
            hidden_size,
            output_dim,
            dropout_rate: self.dropout,
            multiclass,
        }
    }
}

/// The stage-1 window classifier.
///
/// Maps a batch of character windows [batch, window_size] to
/// boundary probabilities: [batch, 1] (binary) or
/// [batch, window_size] (multiclass).
#[derive(Module, Debug)]
pub struct WindowClassifier<B: Backend> {
    pub embedding:         Embedding<B>,
    pub input_dropout:     Dropout,
    pub lstm:              Lstm<B>,
    pub recurrent_dropout: Dropout,
    pub head:              Linear<B>,
    pub window_size:       usize,
    pub embedding_size:    usize,
    pub hidden_size:       usize,
    pub output_dim:        usize,
    pub dropout_rate:      f64,
    pub multiclass:        bool,
}

impl<B: Backend> WindowClassifier<B> {
    /// windows: [batch, window_size] Int → probabilities [batch, output_dim]
    pub fn forward(&self, windows: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, window_size] = windows.dims();

        let embedded = self.embedding.forward(windows);          // [batch, win, emb]
        let embedded = self.input_dropout.forward(embedded);

        // The LSTM output carries the hidden state at every step;
        // the classifier only reads the last one.
        let (hidden_seq, _state) = self.lstm.forward(embedded, None);
        let last = hidden_seq
            .slice([0..batch_size, window_size - 1..window_size, 0..self.hidden_size])
            .reshape([batch_size, self.hidden_size]);
        let last = self.recurrent_dropout.forward(last);

        let logits = self.head.forward(last);                    // [batch, output_dim]
        burn::tensor::activation::sigmoid(logits)
    }

    /// Training loss over sigmoid probabilities.
    ///
    /// Binary: mean binary cross-entropy against the {0,1} scalar.
    /// Multiclass: mean categorical cross-entropy against the
    /// per-position target vector.
    pub fn loss(&self, probs: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        // Clamp away from 0 and 1 so the logs stay finite
        let eps   = 1e-7;
        let probs = probs.clamp(eps, 1.0 - eps);

        let per_example = if self.multiclass {
            // CCE = -Σ t·log(p)
            (targets * probs.log()).neg()
        } else {
            // BCE = -(t·log(p) + (1-t)·log(1-p))
            let one_minus_t = targets.ones_like() - targets.clone();
            let one_minus_p = probs.ones_like() - probs.clone();
            (targets * probs.log() + one_minus_t * one_minus_p.log()).neg()
        };

        per_example.sum_dim(1).mean()
    }

    /// Count of correctly classified samples in a batch.
    ///
    /// Binary accuracy thresholds the probability at 0.5.
    /// Categorical accuracy compares argmax positions.
    pub fn num_correct(&self, probs: Tensor<B, 2>, targets: Tensor<B, 2>) -> usize {
        let correct: i64 = if self.multiclass {
            // argmax(1) returns [batch, 1] — flatten to [batch]
            // before comparing
            let predicted = probs.argmax(1).flatten::<1>(0, 1);
            let expected  = targets.argmax(1).flatten::<1>(0, 1);
            predicted.equal(expected).int().sum().into_scalar().elem::<i64>()
        } else {
            let predicted = probs.greater_elem(0.5);
            let expected  = targets.greater_elem(0.5);
            predicted.equal(expected).int().sum().into_scalar().elem::<i64>()
        };

        correct as usize
    }

    /// Human-readable architecture diagram, printed at build time
    /// for diagnostics.
    pub fn describe(&self) -> String {
        let embedding_params = VOCAB_SIZE * self.embedding_size;
        // 4 gates, each with input, recurrent, and bias weights
        let lstm_params = 4 * self.hidden_size * (self.embedding_size + self.hidden_size + 1);
        let head_params = self.hidden_size * self.output_dim + self.output_dim;

        let mut out = String::new();
        out.push_str(&format!(
            "Input              ({})                 \n",
            self.window_size
        ));
        out.push_str(&format!(
            "Embedding          ({} -> {})           params: {}\n",
            VOCAB_SIZE, self.embedding_size, embedding_params
        ));
        out.push_str(&format!("Dropout            ({})\n", self.dropout_rate));
        out.push_str(&format!(
            "LSTM               ({} -> {})           params: {}\n",
            self.embedding_size, self.hidden_size, lstm_params
        ));
        out.push_str(&format!("Dropout            ({})\n", self.dropout_rate));
        out.push_str(&format!(
            "Dense, sigmoid     ({} -> {})           params: {}\n",
            self.hidden_size, self.output_dim, head_params
        ));
        out
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn tiny_config() -> ModelConfig {
        ModelConfig::new(8, 4, 3)
    }

    fn batch_of(windows: usize) -> Tensor<TestBackend, 2, Int> {
        let device = Default::default();
        let flat: Vec<i32> = (0..windows * 8).map(|i| (i % 128) as i32).collect();
        Tensor::<TestBackend, 1, Int>::from_ints(flat.as_slice(), &device)
            .reshape([windows, 8])
    }

    #[test]
    fn test_binary_output_shape() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(ClassMode::Binary, &device);

        let probs = model.forward(batch_of(2));
        assert_eq!(probs.dims(), [2, 1]);
    }

    #[test]
    fn test_multiclass_output_shape() {
        let device = Default::default();
        // build() directly so the test doesn't allocate the full
        // 2000-wide production LSTM
        let model  = tiny_config().build::<TestBackend>(3, 8, true, &device);

        let probs = model.forward(batch_of(2));
        assert_eq!(probs.dims(), [2, 8]);
    }

    #[test]
    fn test_multiclass_width_is_pinned() {
        assert_eq!(MULTICLASS_LSTM_SIZE, 2000);
    }

    #[test]
    fn test_probabilities_are_bounded() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(ClassMode::Binary, &device);

        let values: Vec<f32> = model
            .forward(batch_of(4))
            .into_data()
            .to_vec()
            .unwrap();
        assert!(values.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_binary_loss_is_finite_at_extremes() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(ClassMode::Binary, &device);

        // Exact 0.0 and 1.0 probabilities must not produce inf/NaN
        let probs   = Tensor::<TestBackend, 1>::from_floats([0.0, 1.0], &device).reshape([2, 1]);
        let targets = Tensor::<TestBackend, 1>::from_floats([1.0, 0.0], &device).reshape([2, 1]);
        let loss: f64 = model.loss(probs, targets).into_scalar().elem::<f64>();
        assert!(loss.is_finite());
    }

    #[test]
    fn test_binary_num_correct() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(ClassMode::Binary, &device);

        let probs   = Tensor::<TestBackend, 1>::from_floats([0.9, 0.2, 0.7], &device).reshape([3, 1]);
        let targets = Tensor::<TestBackend, 1>::from_floats([1.0, 0.0, 0.0], &device).reshape([3, 1]);
        assert_eq!(model.num_correct(probs, targets), 2);
    }

    #[test]
    fn test_multiclass_num_correct() {
        let device = Default::default();
        let model  = tiny_config().build::<TestBackend>(3, 4, true, &device);

        // Prediction peaks at position 1; target marks position 1 → correct
        let probs = Tensor::<TestBackend, 1>::from_floats(
            [0.1, 0.8, 0.1, 0.0,   0.7, 0.1, 0.1, 0.1], &device,
        ).reshape([2, 4]);
        let targets = Tensor::<TestBackend, 1>::from_floats(
            [0.0, 1.0, 0.0, 0.0,   0.0, 0.0, 1.0, 0.0], &device,
        ).reshape([2, 4]);
        assert_eq!(model.num_correct(probs, targets), 1);
    }

    #[test]
    fn test_describe_mentions_every_layer() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(ClassMode::Binary, &device);
        let diagram = model.describe();

        assert!(diagram.contains("Embedding"));
        assert!(diagram.contains("LSTM"));
        assert!(diagram.contains("Dropout"));
        assert!(diagram.contains("Dense"));
    }
}
