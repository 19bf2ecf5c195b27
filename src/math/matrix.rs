use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

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

    /// Uniform samples in `[low, high)` drawn from the supplied generator,
    /// so a seeded run initializes the same weights every time.
    pub fn random_range<R: Rng + ?Sized>(rows: usize, cols: usize, low: f64, high: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = low + rng.gen::<f64>() * (high - low);
            }
        }

        res
    }

    /// A `1 x n` row vector.
    pub fn from_row(row: Vec<f64>) -> Matrix {
        Matrix { rows: 1, cols: row.len(), data: vec![row] }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |r| r.len()),
            data
        }
    }

    /// First row as a slice; layer activations are always `1 x n`.
    pub fn row(&self) -> &[f64] {
        self.data.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// `data` really holds `rows` rows of `cols` values each.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|r| r.len() == self.cols)
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
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.rows, other.rows);
        assert_eq!(self.cols, other.cols);
        let data = self.data.iter().zip(other.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
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
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

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
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

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
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res =  Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn product_of_row_and_matrix() {
        let row = Matrix::from_row(vec![1.0, 2.0]);
        let m = Matrix::from_data(vec![vec![1.0, 0.0, 2.0], vec![3.0, 1.0, 0.0]]);
        let p = row * m;
        assert_eq!(p.rows, 1);
        assert_eq!(p.row(), &[7.0, 2.0, 2.0]);
    }

    #[test]
    fn random_range_stays_in_bounds_and_is_reproducible() {
        let a = Matrix::random_range(4, 5, -0.7, 0.7, &mut StdRng::seed_from_u64(7));
        let b = Matrix::random_range(4, 5, -0.7, 0.7, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.data.iter().flatten().all(|&x| (-0.7..0.7).contains(&x)));
    }

    #[test]
    fn shape_must_match_data() {
        assert!(Matrix::zeros(2, 3).is_well_formed());
        assert!(!Matrix { rows: 2, cols: 1, data: vec![vec![0.0]] }.is_well_formed());
        assert!(!Matrix { rows: 2, cols: 2, data: vec![vec![0.0, 1.0], vec![2.0]] }.is_well_formed());
    }

    #[test]
    fn hadamard_and_transpose() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let h = a.hadamard(&a.transpose());
        assert_eq!(h.data, vec![vec![1.0, 6.0], vec![6.0, 16.0]]);
    }
}
