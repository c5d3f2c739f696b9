use crate::error::SvmError;
use crate::math::matrix::Matrix;

/// Dense row-major rank-3 tensor.
///
/// Only the operations the batched finite-difference path needs: building
/// from a matrix with an explicit reshape, axis permutation, and indexed
/// access. Every reshape checks its element count.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor3 {
    dims: [usize; 3],
    data: Vec<f64>,
}

impl Tensor3 {
    /// Reinterprets a `rows × cols` matrix as a tensor of shape `dims`
    /// (row-major, like `numpy.reshape`).
    pub fn reshape_matrix(m: &Matrix, dims: [usize; 3]) -> Result<Tensor3, SvmError> {
        let expected = dims[0] * dims[1] * dims[2];
        if m.rows * m.cols != expected {
            return Err(SvmError::InvalidShape(format!(
                "cannot reshape {}x{} matrix into {:?}",
                m.rows, m.cols, dims
            )));
        }
        let data: Vec<f64> = m.data.iter().flatten().copied().collect();
        Ok(Tensor3 { dims, data })
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn get(&self, a: usize, b: usize, c: usize) -> f64 {
        self.data[self.offset(a, b, c)]
    }

    /// Contiguous innermost row `[a, b, ..]`.
    pub fn lane(&self, a: usize, b: usize) -> &[f64] {
        let start = self.offset(a, b, 0);
        &self.data[start..start + self.dims[2]]
    }

    /// Sum of squares over the sub-matrix `[a, .., ..]`.
    pub fn slab_sum_of_squares(&self, a: usize) -> f64 {
        let len = self.dims[1] * self.dims[2];
        let start = a * len;
        self.data[start..start + len].iter().map(|v| v * v).sum()
    }

    /// Reorders axes: axis `i` of the result is axis `order[i]` of `self`.
    pub fn permute(&self, order: [usize; 3]) -> Result<Tensor3, SvmError> {
        let mut seen = [false; 3];
        for &axis in &order {
            if axis > 2 || seen[axis] {
                return Err(SvmError::InvalidShape(format!(
                    "{:?} is not a permutation of the axes (0, 1, 2)",
                    order
                )));
            }
            seen[axis] = true;
        }

        let dims = [self.dims[order[0]], self.dims[order[1]], self.dims[order[2]]];
        let mut out = Tensor3 { dims, data: vec![0.0; self.data.len()] };
        let mut src = [0usize; 3];
        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    src[order[0]] = i;
                    src[order[1]] = j;
                    src[order[2]] = k;
                    let value = self.get(src[0], src[1], src[2]);
                    let dst = out.offset(i, j, k);
                    out.data[dst] = value;
                }
            }
        }
        Ok(out)
    }

    /// Asserts the tensor has exactly `dims`.
    pub fn expect_dims(&self, dims: [usize; 3]) -> Result<(), SvmError> {
        if self.dims != dims {
            return Err(SvmError::InvalidShape(format!(
                "expected tensor of shape {:?}, got {:?}",
                dims, self.dims
            )));
        }
        Ok(())
    }

    fn offset(&self, a: usize, b: usize, c: usize) -> usize {
        (a * self.dims[1] + b) * self.dims[2] + c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshape_is_row_major() {
        let m = Matrix::from_data(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0, 7.0],
        ]);
        let t = Tensor3::reshape_matrix(&m, [2, 2, 2]).unwrap();
        assert_eq!(t.get(0, 1, 0), 2.0);
        assert_eq!(t.get(1, 0, 1), 5.0);
        assert_eq!(t.get(1, 1, 1), 7.0);
    }

    #[test]
    fn reshape_rejects_wrong_element_count() {
        let m = Matrix::zeros(2, 3);
        assert!(matches!(
            Tensor3::reshape_matrix(&m, [2, 2, 2]),
            Err(SvmError::InvalidShape(_))
        ));
    }

    #[test]
    fn permute_swaps_leading_axes() {
        let m = Matrix::from_data(vec![
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![6.0, 7.0, 8.0, 9.0, 10.0, 11.0],
        ]);
        // (2, 3, 2) -> (3, 2, 2)
        let t = Tensor3::reshape_matrix(&m, [2, 3, 2]).unwrap();
        let p = t.permute([1, 0, 2]).unwrap();
        p.expect_dims([3, 2, 2]).unwrap();
        for a in 0..2 {
            for b in 0..3 {
                for c in 0..2 {
                    assert_eq!(p.get(b, a, c), t.get(a, b, c));
                }
            }
        }
    }

    #[test]
    fn lanes_and_slabs() {
        let m = Matrix::from_data(vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.0, 0.0, 1.0, 1.0],
        ]);
        let t = Tensor3::reshape_matrix(&m, [2, 2, 2]).unwrap();
        assert_eq!(t.lane(0, 1), &[3.0, 4.0]);
        assert_eq!(t.lane(1, 0), &[0.0, 0.0]);
        assert_eq!(t.slab_sum_of_squares(0), 30.0);
        assert_eq!(t.slab_sum_of_squares(1), 2.0);
    }

    #[test]
    fn permute_rejects_repeated_axis() {
        let t = Tensor3::reshape_matrix(&Matrix::zeros(1, 8), [2, 2, 2]).unwrap();
        assert!(t.permute([0, 0, 2]).is_err());
        assert!(t.expect_dims([2, 2, 3]).is_err());
    }
}
