//! Square integer matrices and the cache-tiled multiply kernel.

use rand::Rng;

/// Square row-major matrix of `i32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    dim: usize,
    data: Vec<i32>,
}

impl Matrix {
    /// All-zero matrix of side `dim`.
    pub fn zeros(dim: usize) -> Self {
        Matrix {
            dim,
            data: vec![0; dim * dim],
        }
    }

    /// Matrix of side `dim` filled with random entries in `0..10`.
    pub fn random<R: Rng>(dim: usize, rng: &mut R) -> Self {
        let data = (0..dim * dim).map(|_| rng.random_range(0..10)).collect();
        Matrix { dim, data }
    }

    /// Build a matrix from row-major entries.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != dim * dim`.
    pub fn from_rows(dim: usize, data: Vec<i32>) -> Self {
        assert_eq!(data.len(), dim * dim, "need dim*dim row-major entries");
        Matrix { dim, data }
    }

    /// Matrix side length.
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at row `i`, column `j`.
    pub fn at(&self, i: usize, j: usize) -> i32 {
        self.data[i * self.dim + j]
    }

    /// Cache-tiled product `self * other`.
    ///
    /// Walks the (row, column, reduction) iteration space in cubic blocks of
    /// side `tile_size`, clipping boundary blocks at the matrix edge, and
    /// accumulates each block's partial dot products through a local sum.
    /// The result equals [`naive_mul`](Matrix::naive_mul) for every tile
    /// size; tiling changes only the traversal order.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ or `tile_size` is 0.
    pub fn tiled_mul(&self, other: &Matrix, tile_size: usize) -> Matrix {
        assert_eq!(self.dim, other.dim, "matrix dimensions must match");
        assert!(tile_size > 0, "tile size must be > 0");
        let n = self.dim;
        let mut out = Matrix::zeros(n);
        for ii in (0..n).step_by(tile_size) {
            let i_end = (ii + tile_size).min(n);
            for jj in (0..n).step_by(tile_size) {
                let j_end = (jj + tile_size).min(n);
                for kk in (0..n).step_by(tile_size) {
                    let k_end = (kk + tile_size).min(n);
                    for i in ii..i_end {
                        for j in jj..j_end {
                            let mut sum = 0;
                            for k in kk..k_end {
                                sum += self.data[i * n + k] * other.data[k * n + j];
                            }
                            out.data[i * n + j] += sum;
                        }
                    }
                }
            }
        }
        out
    }

    /// Textbook triple-loop product, the correctness baseline for
    /// [`tiled_mul`](Matrix::tiled_mul). Use it in tests and benches, not on
    /// hot paths.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn naive_mul(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.dim, other.dim, "matrix dimensions must match");
        let n = self.dim;
        let mut out = Matrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0;
                for k in 0..n {
                    sum += self.data[i * n + k] * other.data[k * n + j];
                }
                out.data[i * n + j] = sum;
            }
        }
        out
    }
}

/// One unit of work: a pair of equal-dimension matrices awaiting
/// multiplication. Immutable once created; consumed by exactly one thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Left operand.
    pub a: Matrix,
    /// Right operand.
    pub b: Matrix,
}

impl WorkItem {
    /// Fresh work item holding two random matrices of side `dim`.
    pub fn random<R: Rng>(dim: usize, rng: &mut R) -> Self {
        WorkItem {
            a: Matrix::random(dim, rng),
            b: Matrix::random(dim, rng),
        }
    }

    /// Multiply the pair with the given tile size.
    pub fn process(&self, tile_size: usize) -> Matrix {
        self.a.tiled_mul(&self.b, tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_2x2_product() {
        let a = Matrix::from_rows(2, vec![1, 2, 3, 4]);
        let b = Matrix::from_rows(2, vec![5, 6, 7, 8]);
        let expected = Matrix::from_rows(2, vec![19, 22, 43, 50]);
        assert_eq!(a.naive_mul(&b), expected);
        assert_eq!(a.tiled_mul(&b, 1), expected);
        assert_eq!(a.tiled_mul(&b, 2), expected);
        assert_eq!(a.tiled_mul(&b, 8), expected);
    }

    #[test]
    fn identity_is_neutral() {
        let mut rng = rand::rng();
        let a = Matrix::random(6, &mut rng);
        let mut identity = Matrix::zeros(6);
        for i in 0..6 {
            identity.data[i * 6 + i] = 1;
        }
        assert_eq!(a.tiled_mul(&identity, 4), a);
        assert_eq!(identity.tiled_mul(&a, 4), a);
    }

    #[test]
    fn boundary_tiles_are_clipped() {
        // 5 is not divisible by 2, 3, or 4; the last block in each
        // dimension is partial.
        let mut rng = rand::rng();
        let a = Matrix::random(5, &mut rng);
        let b = Matrix::random(5, &mut rng);
        let expected = a.naive_mul(&b);
        for tile in [1, 2, 3, 4, 5, 7] {
            assert_eq!(a.tiled_mul(&b, tile), expected, "tile size {tile}");
        }
    }

    #[test]
    fn random_item_has_small_entries() {
        let mut rng = rand::rng();
        let item = WorkItem::random(4, &mut rng);
        for i in 0..4 {
            for j in 0..4 {
                assert!((0..10).contains(&item.a.at(i, j)));
                assert!((0..10).contains(&item.b.at(i, j)));
            }
        }
    }
}
