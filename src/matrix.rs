use crate::error::{Error, Result};

use itertools::izip;
use rand::distributions::{Distribution, Uniform};

/// A dense matrix of `f64` values.
///
/// Operations are value-like: they return freshly allocated matrices and
/// never mutate their operands. Binary operations check shape compatibility
/// up front and fail with [`Error::DimensionMismatch`] before touching any
/// data.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Mat {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns a matrix with every entry drawn uniformly from
    /// `[-range, range]`.
    pub fn random(rows: usize, cols: usize, range: f64) -> Self {
        let mut rng = rand::thread_rng();
        let distribution = Uniform::new_inclusive(-range, range);
        let data = (0..rows * cols)
            .map(|_| distribution.sample(&mut rng))
            .collect();
        Mat { rows, cols, data }
    }

    /// Wraps a vector as a `1 × n` row matrix.
    pub fn from_row(values: &[f64]) -> Self {
        Mat {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Standard matrix product, summed over the shared dimension.
    ///
    /// Requires `self.cols == other.rows`; the result is
    /// `self.rows × other.cols`.
    pub fn dot(&self, other: &Mat) -> Result<Mat> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                op: "dot",
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let mut result = Mat::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.data[i * self.cols + k];
                for j in 0..other.cols {
                    result.data[i * other.cols + j] +=
                        lhs * other.data[k * other.cols + j];
                }
            }
        }
        Ok(result)
    }

    pub fn transpose(&self) -> Mat {
        let mut result = Mat::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        result
    }

    pub fn add(&self, other: &Mat) -> Result<Mat> {
        self.elementwise(other, "add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Mat) -> Result<Mat> {
        self.elementwise(other, "sub", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard(&self, other: &Mat) -> Result<Mat> {
        self.elementwise(other, "hadamard", |a, b| a * b)
    }

    pub fn scale(&self, scalar: f64) -> Mat {
        self.map(|v| v * scalar)
    }

    /// Applies `f` to every entry, preserving the shape.
    pub fn map<F>(&self, f: F) -> Mat
    where
        F: Fn(f64) -> f64,
    {
        Mat {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().map(|&v| v * v).sum()
    }

    fn elementwise<F>(&self, other: &Mat, op: &'static str, f: F) -> Result<Mat>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let data = izip!(&self.data, &other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Mat {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}
