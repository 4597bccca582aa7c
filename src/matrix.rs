use num_traits::{Float, Num, PrimInt, Zero};
use smallvec::{SmallVec, smallvec};
use snafu::ensure;

use crate::{DimensionMismatchSnafu, NotSquareSnafu, SeifertError};

// Seifert matrices of interesting pretzels are small; avoid allocating for them.
type MatrixVec<T> = SmallVec<[T; 16]>;

/// A dense, row-major matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: MatrixVec<T>,
}

impl<T: Copy> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: smallvec![value; rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self
    where
        T: Zero,
    {
        Self::filled(rows, cols, T::zero())
    }

    /// Build a matrix from row-major data.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, SeifertError> {
        ensure!(
            data.len() == rows * cols,
            DimensionMismatchSnafu {
                lhs: (rows, cols),
                rhs: (1, data.len()),
            }
        );
        Ok(Self {
            rows,
            cols,
            data: data.iter().copied().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        let mut data = MatrixVec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self[(i, j)]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Apply `f` to every entry, e.g. to promote an integer matrix to floating point.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        assert!(r1 < self.rows && r2 < self.rows, "Row index out of bounds");
        for j in 0..self.cols {
            self.data.swap(r1 * self.cols + j, r2 * self.cols + j);
        }
    }

    pub fn swap_cols(&mut self, c1: usize, c2: usize) {
        assert!(c1 < self.cols && c2 < self.cols, "Column index out of bounds");
        for i in 0..self.rows {
            self.data.swap(i * self.cols + c1, i * self.cols + c2);
        }
    }

    /// Remove row `r`. Removing the last row leaves a 0x0 matrix.
    ///
    /// # Panics
    /// Panics if `r` is out of bounds.
    pub fn remove_row(&mut self, r: usize) {
        assert!(r < self.rows, "Row index out of bounds");
        self.data.drain(r * self.cols..(r + 1) * self.cols);
        self.rows -= 1;
        if self.rows == 0 {
            self.cols = 0;
        }
    }

    /// Remove column `c`. Removing the last column leaves a 0x0 matrix.
    ///
    /// # Panics
    /// Panics if `c` is out of bounds.
    pub fn remove_col(&mut self, c: usize) {
        assert!(c < self.cols, "Column index out of bounds");
        let cols = self.cols;
        let mut idx = 0;
        self.data.retain(|_| {
            let keep = idx % cols != c;
            idx += 1;
            keep
        });
        self.cols -= 1;
        if self.cols == 0 {
            self.rows = 0;
        }
    }

    /// Entry-wise sum. Both matrices must have the same shape.
    pub fn add(&self, rhs: &Self) -> Result<Self, SeifertError>
    where
        T: std::ops::Add<Output = T>,
    {
        ensure!(
            self.rows == rhs.rows && self.cols == rhs.cols,
            DimensionMismatchSnafu {
                lhs: (self.rows, self.cols),
                rhs: (rhs.rows, rhs.cols),
            }
        );
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| a + b)
                .collect(),
        })
    }

    pub fn scale(&self, x: T) -> Self
    where
        T: std::ops::Mul<Output = T>,
    {
        self.map(|a| a * x)
    }
}

impl<T: Float> Matrix<T> {
    /// Gaussian elimination to row-echelon form with partial pivoting.
    ///
    /// For each column the row with the largest magnitude entry among the remaining rows is
    /// chosen as pivot. Columns that are zero below the current row are skipped without
    /// advancing the row. With `unit_diagonal`, every pivot row is scaled so the pivot is one.
    ///
    /// Returns the echelon form and the number of row swaps performed, which determines the
    /// sign of the determinant.
    pub fn gauss(&self, unit_diagonal: bool) -> (Self, usize) {
        let mut m = self.clone();
        let mut swaps = 0;

        let mut i = 0;
        for j in 0..m.cols {
            if i >= m.rows {
                break;
            }

            let mut max_i = i;
            for k in i + 1..m.rows {
                if m[(k, j)].abs() > m[(max_i, j)].abs() {
                    max_i = k;
                }
            }

            // Nothing to eliminate in this column.
            if m[(max_i, j)].is_zero() {
                continue;
            }

            if max_i != i {
                m.swap_rows(i, max_i);
                swaps += 1;
            }

            let divisor = m[(i, j)];
            if unit_diagonal {
                m[(i, j)] = T::one();
                for l in j + 1..m.cols {
                    m[(i, l)] = m[(i, l)] / divisor;
                }
                for k in i + 1..m.rows {
                    let factor = m[(k, j)];
                    for l in 0..m.cols {
                        m[(k, l)] = m[(k, l)] - factor * m[(i, l)];
                    }
                }
            } else {
                for k in i + 1..m.rows {
                    let factor = m[(k, j)] / divisor;
                    for l in 0..m.cols {
                        m[(k, l)] = m[(k, l)] - factor * m[(i, l)];
                    }
                }
            }

            i += 1;
        }

        (m, swaps)
    }

    /// Reduced row-echelon form, by back substitution on the unit-diagonal echelon form.
    ///
    /// Rows are processed from the last to the first. This assumes the pivot of row `r` sits in
    /// column `r`, which holds for the augmented systems of a non-singular square matrix.
    pub fn gauss_jordan(&self) -> Self {
        let (mut m, _) = self.gauss(true);
        if m.rows == 0 {
            return m;
        }

        for ri in (0..m.rows - 1).rev() {
            for rj in (ri + 1..m.rows).rev() {
                let factor = m[(ri, rj)];
                for l in 0..m.cols {
                    m[(ri, l)] = m[(ri, l)] - factor * m[(rj, l)];
                }
            }
        }
        m
    }
}

impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.rows && j < self.cols, "Matrix index out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(i < self.rows && j < self.cols, "Matrix index out of bounds");
        &mut self.data[i * self.cols + j]
    }
}

impl<T: Copy + std::ops::Mul<Output = T>> std::ops::Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.scale(rhs)
    }
}

#[cfg(test)]
impl<T: approx::AbsDiffEq + Copy> approx::AbsDiffEq for Matrix<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

/// A matrix with as many rows as columns.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix<T>(Matrix<T>);

impl<T: Copy> SquareMatrix<T> {
    pub fn zeros(dim: usize) -> Self
    where
        T: Zero,
    {
        Self(Matrix::zeros(dim, dim))
    }

    pub fn dim(&self) -> usize {
        self.0.rows
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> SquareMatrix<U> {
        SquareMatrix(self.0.map(f))
    }

    /// Remove row and column `i` together, keeping the matrix square.
    pub fn remove_row_col(&mut self, i: usize) {
        self.0.remove_row(i);
        if self.0.cols > 0 {
            self.0.remove_col(i);
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, SeifertError>
    where
        T: std::ops::Add<Output = T>,
    {
        Ok(Self(self.0.add(&rhs.0)?))
    }

    pub fn scale(&self, x: T) -> Self
    where
        T: std::ops::Mul<Output = T>,
    {
        Self(self.0.scale(x))
    }
}

impl<T: Float> SquareMatrix<T> {
    /// Determinant via Gaussian elimination without unit scaling: the product of the diagonal,
    /// negated for an odd number of row swaps. The determinant of the 0x0 matrix is one.
    pub fn determinant(&self) -> T {
        let (gaussed, swaps) = self.0.gauss(false);
        let det = (0..self.dim()).fold(T::one(), |det, i| det * gaussed[(i, i)]);
        if swaps % 2 == 1 { -det } else { det }
    }
}

impl<T: PrimInt> SquareMatrix<T> {
    /// Exact determinant by fraction-free (Bareiss) elimination. Every division is exact, and
    /// every intermediate value is a minor of the matrix.
    ///
    /// Returns `None` if an intermediate value overflows `T`.
    pub fn checked_determinant(&self) -> Option<T> {
        let n = self.dim();
        let mut a = self.0.clone();
        let mut negate = false;
        let mut prev = T::one();

        for k in 0..n {
            if a[(k, k)].is_zero() {
                match (k + 1..n).find(|&r| !a[(r, k)].is_zero()) {
                    Some(r) => {
                        a.swap_rows(k, r);
                        negate = !negate;
                    }
                    None => return Some(T::zero()),
                }
            }

            let pivot = a[(k, k)];
            for i in k + 1..n {
                for j in k + 1..n {
                    let cross = a[(i, k)].checked_mul(&a[(k, j)])?;
                    let x = a[(i, j)].checked_mul(&pivot)?.checked_sub(&cross)?;
                    a[(i, j)] = x.checked_div(&prev)?;
                }
            }
            prev = pivot;
        }

        let det = if n == 0 { T::one() } else { a[(n - 1, n - 1)] };
        if negate { T::zero().checked_sub(&det) } else { Some(det) }
    }
}

impl<T> TryFrom<Matrix<T>> for SquareMatrix<T> {
    type Error = SeifertError;

    fn try_from(m: Matrix<T>) -> Result<Self, Self::Error> {
        ensure!(
            m.rows == m.cols,
            NotSquareSnafu {
                rows: m.rows,
                cols: m.cols,
            }
        );
        Ok(Self(m))
    }
}

impl<T> std::ops::Deref for SquareMatrix<T> {
    type Target = Matrix<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for SquareMatrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.0[index]
    }
}

/// The `points.len() x n` matrix whose entry `(i, j)` is `points[i]^j`.
pub fn vandermonde<T: Num + Copy>(n: usize, points: &[T]) -> Matrix<T> {
    let mut result = Matrix::zeros(points.len(), n);
    for (i, &x) in points.iter().enumerate() {
        for j in 0..n {
            result[(i, j)] = num_traits::pow(x, j);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assertables::{assert_err, assert_ok};
    use pretty_assertions as pa;

    use super::*;

    fn sample() -> Matrix<f64> {
        Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 9.0, 8.0, 7.0]).unwrap()
    }

    #[test]
    fn construct() {
        let m = Matrix::<f32>::zeros(2, 3);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m[(0, 0)], 0.0);
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn construct_wrong_length() {
        assert_err!(Matrix::from_row_slice(2, 2, &[1, 2, 3]));
    }

    #[test]
    fn transpose() {
        let m = sample();
        let mt = m.transpose();
        assert_eq!(mt.rows(), 3);
        assert_eq!(mt.cols(), 2);
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m[(i, j)], mt[(j, i)]);
            }
        }
    }

    #[test]
    fn remove() {
        let mut m = sample();

        m.remove_col(1);
        assert_eq!((m.rows(), m.cols()), (2, 2));
        pa::assert_eq!(m.row(0), &[1.0, 3.0]);
        pa::assert_eq!(m.row(1), &[9.0, 7.0]);

        m.remove_row(0);
        assert_eq!((m.rows(), m.cols()), (1, 2));
        pa::assert_eq!(m.row(0), &[9.0, 7.0]);

        m.remove_row(0);
        assert_eq!((m.rows(), m.cols()), (0, 0));
    }

    #[test]
    fn remove_row_col_down_to_empty() {
        let mut m = SquareMatrix::<i64>::zeros(2);
        m[(1, 0)] = 5;
        m.remove_row_col(1);
        assert_eq!(m.dim(), 1);
        m.remove_row_col(0);
        assert_eq!(m.dim(), 0);
        assert_eq!(m.cols(), 0);
    }

    #[test]
    fn swap() {
        let mut m = sample();
        m.swap_rows(0, 1);
        pa::assert_eq!(m.row(0), &[9.0, 8.0, 7.0]);
        m.swap_cols(0, 2);
        pa::assert_eq!(m.row(0), &[7.0, 8.0, 9.0]);
        pa::assert_eq!(m.row(1), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn add_and_scale() {
        let m = sample();
        let sum = assert_ok!(m.add(&(&m * 2.0)));
        pa::assert_eq!(sum.row(1), &[27.0, 24.0, 21.0]);
        assert_err!(m.add(&m.transpose()));
    }

    #[test]
    fn square_from_non_square() {
        assert_err!(SquareMatrix::try_from(sample()));
        let sq = assert_ok!(SquareMatrix::try_from(Matrix::<i64>::zeros(3, 3)));
        assert_eq!(sq.dim(), 3);
    }

    #[test]
    fn vandermonde_ints() {
        let m = vandermonde(3, &[2, 3]);
        pa::assert_eq!(m.row(0), &[1, 2, 4]);
        pa::assert_eq!(m.row(1), &[1, 3, 9]);
    }

    #[test]
    fn determinant() {
        let m = Matrix::from_row_slice(2, 2, &[2.0f32, 7.0, -3.0, -1.0]).unwrap();
        let m = SquareMatrix::try_from(m).unwrap();
        assert_abs_diff_eq!(m.determinant(), 19.0);
    }

    #[test]
    fn determinant_with_swaps() {
        // Needs a row swap in the first column.
        let m = Matrix::from_row_slice(3, 3, &[0.0, 1.0, 2.0, 1.0, 0.0, 3.0, 4.0, -3.0, 8.0])
            .unwrap();
        let m = SquareMatrix::try_from(m).unwrap();
        assert_abs_diff_eq!(m.determinant(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn determinant_singular_and_empty() {
        let m = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]).unwrap();
        let m = SquareMatrix::try_from(m).unwrap();
        assert_abs_diff_eq!(m.determinant(), 0.0);

        assert_abs_diff_eq!(SquareMatrix::<f64>::zeros(0).determinant(), 1.0);
    }

    #[test]
    fn checked_determinant() {
        let m = Matrix::from_row_slice(2, 2, &[2i64, 7, -3, -1]).unwrap();
        assert_eq!(SquareMatrix::try_from(m).unwrap().checked_determinant(), Some(19));

        // Zero pivot in the first column forces a swap.
        let m = Matrix::from_row_slice(3, 3, &[0i64, 1, 2, 1, 0, 3, 4, -3, 8]).unwrap();
        assert_eq!(SquareMatrix::try_from(m).unwrap().checked_determinant(), Some(-2));

        let m = Matrix::from_row_slice(2, 2, &[1i64, 2, 2, 4]).unwrap();
        assert_eq!(SquareMatrix::try_from(m).unwrap().checked_determinant(), Some(0));

        assert_eq!(SquareMatrix::<i64>::zeros(0).checked_determinant(), Some(1));
    }

    #[test]
    fn checked_determinant_overflow() {
        let m = Matrix::from_row_slice(2, 2, &[i64::MAX, 0, 0, 2]).unwrap();
        assert_eq!(SquareMatrix::try_from(m).unwrap().checked_determinant(), None);
    }

    #[test]
    fn gauss_skips_zero_columns() {
        let m = Matrix::from_row_slice(2, 3, &[0.0, 2.0, 4.0, 0.0, 1.0, 1.0]).unwrap();
        let (echelon, swaps) = m.gauss(true);
        assert_eq!(swaps, 0);
        let expected = Matrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 0.0, 0.0, 1.0]).unwrap();
        assert_abs_diff_eq!(echelon, expected);
    }

    #[test]
    fn gauss_jordan_elimination() {
        // The textbook example from https://en.wikipedia.org/wiki/Gaussian_elimination
        let m = Matrix::from_row_slice(
            3,
            4,
            &[
                2.0, 1.0, -1.0, 8.0, //
                -3.0, -1.0, 2.0, -11.0, //
                -2.0, 1.0, 2.0, -3.0,
            ],
        )
        .unwrap();

        let mgj = m.gauss_jordan();

        let expected = Matrix::from_row_slice(
            3,
            4,
            &[
                1.0, 0.0, 0.0, 2.0, //
                0.0, 1.0, 0.0, 3.0, //
                0.0, 0.0, 1.0, -1.0,
            ],
        )
        .unwrap();
        assert_abs_diff_eq!(mgj, expected, epsilon = 1e-12);
    }
}
