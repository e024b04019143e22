//! Autoencoder neural networks trained via manual backpropagation.
//!
//! The crate implements the numeric core from first principles: a dense
//! matrix engine, a single-hidden-layer [autoencoder]
//! (https://en.wikipedia.org/wiki/Autoencoder) with hand-derived gradients
//! for the sigmoid + squared-error combination, and a stacked variant
//! trained with greedy layer-wise pretraining. A small BMP codec and pixel
//! transforms turn images into the normalized feature vectors the networks
//! consume.
//!
//! # Example
//!
//! Let's teach an autoencoder to reconstruct a parity-check code through a
//! two-unit bottleneck:
//!
//! ```
//! use autoenkoder::autoencoder::Autoencoder;
//! use autoenkoder::logging::Logging;
//!
//! let examples = vec![
//!     vec![0.0, 0.0, 1.0],
//!     vec![0.0, 1.0, 0.0],
//!     vec![1.0, 0.0, 0.0],
//!     vec![1.0, 1.0, 1.0],
//! ];
//!
//! let mut autoencoder = Autoencoder::new(3, 2).logging(Logging::Silent);
//! let untrained = autoencoder.calculate_error(&examples).unwrap();
//! autoencoder.train(&examples, 0.2, 2000).unwrap();
//! let trained = autoencoder.calculate_error(&examples).unwrap();
//! assert!(trained < untrained);
//!
//! // The latent representation is two values per example.
//! assert_eq!(autoencoder.encode(&[1.0, 1.0, 1.0]).unwrap().len(), 2);
//! ```

pub mod activator;
pub mod autoencoder;
pub mod bitmap;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod pixels;
pub mod stacked;

pub use crate::error::{Error, Result};
