use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

/// Dense row-major matrix of `f64`.
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

    /// Samples every entry independently from Uniform[low, high].
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, low: f64, high: f64, rng: &mut R) -> Matrix {
        let dist = Uniform::new_inclusive(low, high);
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = dist.sample(rng);
            }
        }

        res
    }

    /// Builds a matrix from row vectors. Panics if the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            panic!("Matrix rows must all have the same length")
        }
        Matrix {
            rows: data.len(),
            cols,
            data
        }
    }

    /// Like `from_data`, but keeps the column count for an empty row list.
    pub fn from_rows(rows: Vec<Vec<f64>>, cols: usize) -> Matrix {
        if rows.is_empty() {
            return Matrix::zeros(0, cols);
        }
        Matrix::from_data(rows)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
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
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        self.assert_same_shape(rhs);
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(rhs.data.iter())
                .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect())
                .collect(),
        }
    }

    /// Matrix product `self @ rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.rows {
            panic!(
                "Matrices are of incorrect sizes: ({}x{}) @ ({}x{})",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for k in 0..self.cols {
                let lhs = self.data[i][k];
                for j in 0..res.cols {
                    res.data[i][j] += lhs * rhs.data[k][j];
                }
            }
        }

        res
    }

    /// Prepends a column of ones (the bias input).
    pub fn with_bias_column(&self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols + 1,
            data: self.data.iter()
                .map(|row| std::iter::once(1.0).chain(row.iter().copied()).collect())
                .collect(),
        }
    }

    /// Drops column 0.
    pub fn without_first_column(&self) -> Matrix {
        if self.cols == 0 {
            panic!("Cannot drop the first column of a matrix with no columns")
        }
        Matrix {
            rows: self.rows,
            cols: self.cols - 1,
            data: self.data.iter().map(|row| row[1..].to_vec()).collect(),
        }
    }

    /// Copies row `i` out as a 1×cols matrix.
    pub fn row(&self, i: usize) -> Matrix {
        Matrix {
            rows: 1,
            cols: self.cols,
            data: vec![self.data[i].clone()],
        }
    }

    pub fn sum_rows(&self) -> Vec<f64> {
        self.data.iter().map(|row| row.iter().sum()).collect()
    }

    /// Index of the largest entry of each row; ties resolve to the lowest index.
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.data.iter()
            .map(|row| {
                let mut best = 0;
                for (j, &v) in row.iter().enumerate() {
                    if v > row[best] {
                        best = j;
                    }
                }
                best
            })
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|row| row.iter().all(|x| x.is_finite()))
    }

    fn assert_same_shape(&self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!(
                "Matrices are of incorrect sizes: ({}x{}) vs ({}x{})",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_same_shape(rhs);

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        self.assert_same_shape(rhs);

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        self.dot(rhs)
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        self.dot(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dot_matches_hand_product() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = Matrix::from_data(vec![vec![5.0], vec![6.0]]);
        let c = &a * &b;
        assert_eq!(c.data, vec![vec![17.0], vec![39.0]]);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn dot_panics_on_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        let _ = a.dot(&b);
    }

    #[test]
    fn bias_column_round_trips() {
        let m = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0, 1.0]]);
        let with_bias = m.with_bias_column();
        assert_eq!(with_bias.shape(), (2, 3));
        assert_eq!(with_bias.data[1], vec![1.0, 1.0, 1.0]);
        assert_eq!(with_bias.without_first_column(), m);
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        let m = Matrix::from_data(vec![vec![0.2, 0.5, 0.5], vec![0.9, 0.05, 0.05]]);
        assert_eq!(m.argmax_rows(), vec![1, 0]);
    }

    #[test]
    fn uniform_stays_in_range_and_is_seeded() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = Matrix::uniform(4, 5, -0.1, 0.1, &mut rng_a);
        let b = Matrix::uniform(4, 5, -0.1, 0.1, &mut rng_b);
        assert_eq!(a, b);
        assert!(a.data.iter().flatten().all(|&x| (-0.1..=0.1).contains(&x)));
    }

    #[test]
    fn from_rows_keeps_width_when_empty() {
        let m = Matrix::from_rows(vec![], 4);
        assert_eq!(m.shape(), (0, 4));
    }
}
