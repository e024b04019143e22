//! A single-hidden-layer autoencoder trained via backpropagation.

use crate::activator::Activator;
use crate::error::Result;
use crate::logging::Logging;
use crate::matrix::Mat;

/// An autoencoder: a network trained to reconstruct its own input through a
/// lower-dimensional hidden representation.
///
/// Weights and biases are initialized uniformly in `[-1, 1]` and updated
/// online, after every training example. Exploding gradients are not guarded
/// against; an unbounded learning rate can drive the weights to NaN.
#[derive(Debug)]
pub struct Autoencoder {
    input_size: usize,
    hidden_size: usize,
    activator: Activator,
    encode_weights: Mat,
    decode_weights: Mat,
    bias_hidden: Mat,
    bias_output: Mat,
    logging: Logging,
}

impl Autoencoder {
    /// Creates a new, untrained autoencoder.
    ///
    /// Arguments:
    ///  * `input_size` - the length of the input and reconstruction vectors.
    ///  * `hidden_size` - the length of the hidden (latent) representation.
    pub fn new(input_size: usize, hidden_size: usize) -> Self {
        Autoencoder {
            input_size,
            hidden_size,
            activator: Activator::Sigmoid,
            encode_weights: Mat::random(input_size, hidden_size, 1.0),
            decode_weights: Mat::random(hidden_size, input_size, 1.0),
            bias_hidden: Mat::random(1, hidden_size, 1.0),
            bias_output: Mat::random(1, input_size, 1.0),
            logging: Logging::Completion,
        }
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Trains against the reconstruction error of each example for a fixed
    /// number of epochs.
    ///
    /// Examples are visited in the given order every epoch, and weights are
    /// updated after each one, so the next example in the same epoch already
    /// sees the updated weights. There is no shuffling, no early stopping,
    /// and no convergence check.
    ///
    /// Returns the mean squared error over the final epoch. The mean is
    /// taken over the example count, so an empty example set yields NaN.
    pub fn train(
        &mut self,
        examples: &[Vec<f64>],
        learning_rate: f64,
        epochs: usize,
    ) -> Result<f64> {
        let mut mean_error = 0.0;
        for epoch in 1..=epochs {
            let mut total_error = 0.0;
            for example in examples {
                let x = Mat::from_row(example);
                let (hidden, output) = self.forward(&x)?;

                // The reconstruction error carries the update sign, so every
                // update below is additive.
                let error = x.sub(&output)?;
                total_error += error.sum_of_squares();

                let output_gradient =
                    error.hadamard(&output.map(|y| self.activator.fprime(y)))?;
                let decode_delta = hidden.transpose().dot(&output_gradient)?;

                let hidden_error =
                    output_gradient.dot(&self.decode_weights.transpose())?;
                let hidden_gradient = hidden_error
                    .hadamard(&hidden.map(|y| self.activator.fprime(y)))?;
                let encode_delta = x.transpose().dot(&hidden_gradient)?;

                self.decode_weights =
                    self.decode_weights.add(&decode_delta.scale(learning_rate))?;
                self.encode_weights =
                    self.encode_weights.add(&encode_delta.scale(learning_rate))?;
                self.bias_output =
                    self.bias_output.add(&output_gradient.scale(learning_rate))?;
                self.bias_hidden =
                    self.bias_hidden.add(&hidden_gradient.scale(learning_rate))?;
            }
            mean_error = total_error / examples.len() as f64;
            self.logging.epoch(epoch, mean_error);
        }
        self.logging.completion(epochs, mean_error);
        Ok(mean_error)
    }

    /// Returns the mean squared reconstruction error over `examples` without
    /// touching the weights. An empty example set yields NaN.
    pub fn calculate_error(&self, examples: &[Vec<f64>]) -> Result<f64> {
        let mut total_error = 0.0;
        for example in examples {
            let x = Mat::from_row(example);
            let (_, output) = self.forward(&x)?;
            total_error += x.sub(&output)?.sum_of_squares();
        }
        Ok(total_error / examples.len() as f64)
    }

    /// Computes the hidden representation for `input`.
    pub fn encode(&self, input: &[f64]) -> Result<Vec<f64>> {
        let hidden = Mat::from_row(input)
            .dot(&self.encode_weights)?
            .add(&self.bias_hidden)?
            .map(|v| self.activator.f(v));
        Ok(hidden.row(0).to_vec())
    }

    /// Reconstructs an input-space vector from a hidden representation.
    pub fn decode(&self, encoded: &[f64]) -> Result<Vec<f64>> {
        let output = Mat::from_row(encoded)
            .dot(&self.decode_weights)?
            .add(&self.bias_output)?
            .map(|v| self.activator.f(v));
        Ok(output.row(0).to_vec())
    }

    /// Runs a full reconstruction: `decode(encode(input))`.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.decode(&self.encode(input)?)
    }

    /// Runs the forward pass for one example given as a `1 × input_size` row
    /// matrix, returning the hidden activation and the reconstruction.
    fn forward(&self, x: &Mat) -> Result<(Mat, Mat)> {
        let hidden = x
            .dot(&self.encode_weights)?
            .add(&self.bias_hidden)?
            .map(|v| self.activator.f(v));
        let output = hidden
            .dot(&self.decode_weights)?
            .add(&self.bias_output)?
            .map(|v| self.activator.f(v));
        Ok((hidden, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn xnor_parity_set() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
        ]
    }

    #[test]
    fn training_decreases_error() {
        let examples = xnor_parity_set();
        let mut autoencoder = Autoencoder::new(3, 2).logging(Logging::Silent);
        let first_epoch = autoencoder.train(&examples, 0.2, 1).unwrap();
        let last_epoch = autoencoder.train(&examples, 0.2, 999).unwrap();
        assert!(
            last_epoch < first_epoch,
            "error did not decrease: {} -> {}",
            first_epoch,
            last_epoch
        );
    }

    #[test]
    fn converges_on_parity_set() {
        let examples = xnor_parity_set();
        let mut autoencoder = Autoencoder::new(3, 2).logging(Logging::Silent);
        autoencoder.train(&examples, 0.2, 10_000).unwrap();

        let output = autoencoder.predict(&[1.0, 1.0, 1.0]).unwrap();
        for (i, &y) in output.iter().enumerate() {
            assert!(
                (y - 1.0).abs() < 0.15,
                "component {} did not converge: {}",
                i,
                y
            );
        }
    }

    #[test]
    fn encode_decode_shapes() {
        let autoencoder = Autoencoder::new(10, 3);
        let input = vec![0.5; 10];
        let encoded = autoencoder.encode(&input).unwrap();
        assert_eq!(encoded.len(), 3);
        let decoded = autoencoder.decode(&encoded).unwrap();
        assert_eq!(decoded.len(), 10);
        assert_eq!(autoencoder.predict(&input).unwrap().len(), 10);
    }

    #[test]
    fn wrong_input_length_fails() {
        let mut autoencoder = Autoencoder::new(4, 2).logging(Logging::Silent);
        assert!(matches!(
            autoencoder.encode(&[0.0; 3]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            autoencoder.decode(&[0.0; 3]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            autoencoder.train(&[vec![0.0; 5]], 0.1, 1),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn accessors_report_configured_sizes() {
        let autoencoder = Autoencoder::new(7, 3);
        assert_eq!(autoencoder.input_size(), 7);
        assert_eq!(autoencoder.hidden_size(), 3);
    }

    #[test]
    fn empty_example_set_yields_nan() {
        let mut autoencoder = Autoencoder::new(3, 2).logging(Logging::Silent);
        assert!(autoencoder.train(&[], 0.1, 1).unwrap().is_nan());
        assert!(autoencoder.calculate_error(&[]).unwrap().is_nan());
    }

    #[test]
    fn calculate_error_does_not_train() {
        let examples = xnor_parity_set();
        let autoencoder = Autoencoder::new(3, 2);
        let before = autoencoder.calculate_error(&examples).unwrap();
        let after = autoencoder.calculate_error(&examples).unwrap();
        assert_eq!(before, after);
    }
}
