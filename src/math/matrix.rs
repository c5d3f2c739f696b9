use rand::prelude::*;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::{Add, Sub, Mul};

use crate::error::SvmError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Uniform entries in [-1, 1), reproducible for a given seed.
    pub fn random_seeded(rows: usize, cols: usize, seed: u64) -> Matrix {
        Matrix::fill_uniform(rows, cols, &mut StdRng::seed_from_u64(seed))
    }

    fn fill_uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }

        }

        res
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Entries drawn from N(0, std_dev²), reproducible for a given seed.
    ///
    /// Linear classifiers are usually started from small weights,
    /// e.g. `Matrix::randn_seeded(d, c, 1e-4, seed)`.
    pub fn randn_seeded(rows: usize, cols: usize, std_dev: f64, seed: u64) -> Matrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(&mut rng) * std_dev;
            }
        }
        res
    }

    /// Builds a matrix from row vectors with an explicit column count.
    ///
    /// The column count is passed separately so that `0 × cols` matrices
    /// keep their width. Ragged rows are rejected.
    pub fn from_rows(data: Vec<Vec<f64>>, cols: usize) -> Result<Matrix, SvmError> {
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(SvmError::InvalidShape(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        Ok(Matrix { rows: data.len(), cols, data })
    }

    /// Infallible constructor for literal, non-empty, rectangular data.
    ///
    /// # Panics
    /// Panics if `data` is empty or ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data[0].len();
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows must all have the same length"
        );
        Matrix {
            rows: data.len(),
            cols,
            data
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Sum of all squared entries (squared Frobenius norm).
    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().flatten().map(|x| x * x).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }

    /// Largest absolute entry; 0.0 for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().flatten().fold(0.0, |acc: f64, x| acc.max(x.abs()))
    }

    /// Row-vector · matrix product: `v (1 × rows) · self (rows × cols)`.
    pub fn vec_mul(&self, v: &[f64]) -> Result<Vec<f64>, SvmError> {
        if v.len() != self.rows {
            return Err(SvmError::InvalidShape(format!(
                "cannot multiply vector of length {} by {}x{} matrix",
                v.len(),
                self.rows,
                self.cols
            )));
        }
        let mut out = vec![0.0; self.cols];
        for (k, &vk) in v.iter().enumerate() {
            for (o, w) in out.iter_mut().zip(self.data[k].iter()) {
                *o += vk * w;
            }
        }
        Ok(out)
    }

    /// Checked matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, SvmError> {
        if self.cols != rhs.rows {
            return Err(SvmError::InvalidShape(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )));
        }
        let data = self.data
            .iter()
            .map(|row| rhs.vec_mul(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Matrix { rows: self.rows, cols: rhs.cols, data })
    }

    /// Places `copies` copies of the matrix side by side: `rows × (cols * copies)`.
    ///
    /// Column `k * cols + c` of the result is column `c` of copy `k`.
    pub fn tile_cols(&self, copies: usize) -> Matrix {
        let data = self.data
            .iter()
            .map(|row| {
                let mut tiled = Vec::with_capacity(row.len() * copies);
                for _ in 0..copies {
                    tiled.extend_from_slice(row);
                }
                tiled
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols * copies, data }
    }

    fn check_same_shape(&self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        self.check_same_shape(&rhs);

        let mut res = self;

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] += rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        self.check_same_shape(&rhs);

        let mut res = self;

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] -= rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.matmul(&rhs) {
            Ok(res) => res,
            Err(_) => panic!("Matrices are of incorrect sizes"),
        }
    }
}
