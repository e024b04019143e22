//! Activation function types.

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
#[derive(Copy, Clone, Debug)]
pub enum Activator {
    /// Logistic sigmoid function
    Sigmoid,
}

impl Activator {
    /// Evaluates `f(x)` for the selected activation function.
    pub fn f(&self, x: f64) -> f64 {
        match self {
            Activator::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Evaluates the derivative `f'(x)`, where `x = f^{-1}(y)`.
    ///
    /// Note that this function takes in the *output* of the activation
    /// function, rather than the input. This is an optimization that means we
    /// don't have to store the intermediate results before activation.
    pub fn fprime(&self, y: f64) -> f64 {
        match self {
            Activator::Sigmoid => y * (1.0 - y),
        }
    }
}
