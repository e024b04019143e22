//! Progress reporting during training.

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug)]
pub enum Logging {
    /// No logs will be printed
    Silent,
    /// A summary will be printed at completion
    Completion,
    /// A summary will be printed after every `n` training epochs
    Epochs(usize),
}

impl Logging {
    /// Performs logging at the current `epoch` of training.
    pub(crate) fn epoch(&self, epoch: usize, mean_error: f64) {
        if let Logging::Epochs(freq) = self {
            if *freq > 0 && epoch % freq == 0 {
                println!("Epoch {}:\tMSE={}", epoch, mean_error);
            }
        }
    }

    /// Performs logging at the end of training.
    pub(crate) fn completion(&self, epochs: usize, mean_error: f64) {
        if let Logging::Silent = self {
            return;
        }
        println!("Training completed after {} epochs.", epochs);
        println!("Final MSE: {}", mean_error);
    }

    /// Announces the start of one layer's pretraining.
    pub(crate) fn layer(&self, index: usize, count: usize) {
        if let Logging::Silent = self {
            return;
        }
        println!("Training layer {}/{}", index, count);
    }
}
