//! Deep reconstruction via stacked autoencoders.

use crate::autoencoder::Autoencoder;
use crate::error::Result;
use crate::logging::Logging;
use crate::matrix::Mat;

/// The input and output sizes of one layer in a stack.
///
/// Each entry's `output_size` must equal the next entry's `input_size`. The
/// chain is not validated at construction; a mismatched configuration
/// surfaces as a dimension error once training reaches the first mismatched
/// layer.
#[derive(Copy, Clone, Debug)]
pub struct LayerConfig {
    pub input_size: usize,
    pub output_size: usize,
}

/// An ordered stack of [`Autoencoder`]s trained with greedy layer-wise
/// pretraining: each layer learns to reconstruct the hidden output of the
/// layer below it.
#[derive(Debug)]
pub struct StackedAutoencoder {
    layers: Vec<Autoencoder>,
    logging: Logging,
}

impl StackedAutoencoder {
    /// Creates a stack with one independently initialized autoencoder per
    /// config entry.
    pub fn new(layers: &[LayerConfig]) -> Self {
        StackedAutoencoder {
            layers: layers
                .iter()
                .map(|config| {
                    Autoencoder::new(config.input_size, config.output_size)
                })
                .collect(),
            logging: Logging::Completion,
        }
    }

    /// Sets the type of logging to be emitted during training, for the stack
    /// and every layer in it.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self.layers = self
            .layers
            .into_iter()
            .map(|layer| layer.logging(logging))
            .collect();
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Trains each layer to completion in order, then re-encodes the example
    /// set through it to produce the next layer's training set.
    ///
    /// Strictly sequential: a layer never starts training before the previous
    /// one has run all its epochs, and earlier layers are never revisited.
    pub fn train(
        &mut self,
        examples: &[Vec<f64>],
        learning_rate: f64,
        epochs: usize,
    ) -> Result<()> {
        let count = self.layers.len();
        let mut layer_input = examples.to_vec();
        for (index, layer) in self.layers.iter_mut().enumerate() {
            self.logging.layer(index + 1, count);
            layer.train(&layer_input, learning_rate, epochs)?;

            let mut encoded = Vec::with_capacity(layer_input.len());
            for example in &layer_input {
                encoded.push(layer.encode(example)?);
            }
            layer_input = encoded;
        }
        Ok(())
    }

    /// Mean squared error between each example and its full-stack
    /// reconstruction. An empty example set yields NaN.
    pub fn calculate_error(&self, examples: &[Vec<f64>]) -> Result<f64> {
        let mut total_error = 0.0;
        for example in examples {
            let output = self.predict(example)?;
            let error = Mat::from_row(example).sub(&Mat::from_row(&output))?;
            total_error += error.sum_of_squares();
        }
        Ok(total_error / examples.len() as f64)
    }

    /// Encodes `input` layer by layer, returning every intermediate hidden
    /// representation in order. The last element is the deepest feature
    /// vector.
    pub fn encode(&self, input: &[f64]) -> Result<Vec<Vec<f64>>> {
        let mut current = input.to_vec();
        let mut encoded = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            current = layer.encode(&current)?;
            encoded.push(current.clone());
        }
        Ok(encoded)
    }

    /// Decodes from the deepest feature vector (the last element of an
    /// [`encode`](Self::encode) sequence) back to the original input space,
    /// applying each layer's decode in reverse order.
    pub fn decode(&self, encoded: &[Vec<f64>]) -> Result<Vec<f64>> {
        let mut current = encoded.last().cloned().unwrap_or_default();
        for layer in self.layers.iter().rev() {
            current = layer.decode(&current)?;
        }
        Ok(current)
    }

    /// Runs a full reconstruction through the stack.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.decode(&self.encode(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn chained_encode_decode_shapes() {
        let stack = StackedAutoencoder::new(&[
            LayerConfig {
                input_size: 8,
                output_size: 4,
            },
            LayerConfig {
                input_size: 4,
                output_size: 2,
            },
        ]);

        let input = vec![0.5; 8];
        let encoded = stack.encode(&input).unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[0].len(), 4);
        assert_eq!(encoded[1].len(), 2);

        let decoded = stack.decode(&encoded).unwrap();
        assert_eq!(decoded.len(), 8);
        assert_eq!(stack.predict(&input).unwrap().len(), 8);
    }

    #[test]
    fn greedy_training_decreases_error() {
        let examples = vec![
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        ];
        let mut stack = StackedAutoencoder::new(&[
            LayerConfig {
                input_size: 8,
                output_size: 4,
            },
            LayerConfig {
                input_size: 4,
                output_size: 3,
            },
        ])
        .logging(Logging::Silent);

        let before = stack.calculate_error(&examples).unwrap();
        stack.train(&examples, 0.1, 2000).unwrap();
        let after = stack.calculate_error(&examples).unwrap();
        assert!(
            after < before,
            "error did not decrease: {} -> {}",
            before,
            after
        );
    }

    #[test]
    fn mismatched_chain_fails_during_training() {
        // The second layer expects 5 inputs but the first layer produces 4;
        // the mismatch is only detected once training reaches it.
        let mut stack = StackedAutoencoder::new(&[
            LayerConfig {
                input_size: 8,
                output_size: 4,
            },
            LayerConfig {
                input_size: 5,
                output_size: 2,
            },
        ])
        .logging(Logging::Silent);

        let examples = vec![vec![0.5; 8]];
        assert!(matches!(
            stack.train(&examples, 0.1, 1),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_stack_produces_empty_vectors() {
        let stack = StackedAutoencoder::new(&[]);
        let input = vec![0.25, 0.75];
        assert!(stack.encode(&input).unwrap().is_empty());
        assert!(stack.decode(&[]).unwrap().is_empty());
    }
}
