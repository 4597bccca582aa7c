use crate::{PrecisionLossSnafu, SeifertError, SquareMatrix, vandermonde};

/// Distance from the nearest integer beyond which a solved coefficient is logged. Such
/// coefficients may still round correctly; `verify_interpolation` decides.
const ROUNDING_TOLERANCE: f64 = 1e-6;

/// Alexander polynomial coefficients of the Seifert matrix `sm`, starting at degree zero.
///
/// The polynomial `p(t) = det(M - t Mᵀ)` has degree at most `d = sm.dim()`. We evaluate it at
/// the `d + 1` points `0, 1, ..., d`, augment the Vandermonde matrix of those points with the
/// values, and solve by Gauss-Jordan elimination.
///
/// Row `d - i` of the solution is reported as the coefficient of degree `i`, i.e. the result is
/// `t^d p(1/t)`. This represents the same invariant, since the Alexander polynomial is only
/// defined up to multiplication by `±t^k` and is symmetric in that sense.
///
/// Even though all inputs are integers, the elimination runs in floating point and the result
/// is rounded to the nearest integer. Vandermonde systems over `0..=d` are badly conditioned:
/// for the `(2, n)` torus knots the rounded coefficients are correct up to dimension 13 and
/// wrong from dimension 14 on. The rounded polynomial is therefore checked against exact
/// integer determinants at every sample point, and `PrecisionLoss` is returned when they
/// disagree or the exact check overflows.
pub fn alexander_polynomial(sm: &SquareMatrix<i64>) -> Result<Vec<i64>, SeifertError> {
    let d = sm.dim();

    let points = (0..=d).map(|t| t as f64).collect::<Vec<_>>();
    let mut augmented = vandermonde(d + 2, &points);

    let last_col = augmented.cols() - 1;
    let m = sm.map(|x| x as f64);
    let mt = m.transpose();
    for (i, &t) in points.iter().enumerate() {
        let value = m.add(&mt.scale(-t))?.determinant();
        log::debug!("p({}) = {}", t, value);
        augmented[(i, last_col)] = value;
    }

    let solution = augmented.gauss_jordan();

    let coeffs = (0..=d)
        .map(|i| {
            let exact = solution[(d - i, last_col)];
            let rounded = exact.round();
            if (exact - rounded).abs() > ROUNDING_TOLERANCE {
                log::debug!(
                    "Alexander coefficient of degree {} is {}, not close to an integer",
                    i,
                    exact
                );
            }
            rounded as i64
        })
        .collect::<Vec<_>>();

    verify_interpolation(sm, &coeffs)?;
    Ok(coeffs)
}

/// Check that the reported coefficients reproduce `det(M - t Mᵀ)` exactly at `t = 0..=d`.
///
/// The reported list is `t^d p(1/t)`, so read forwards it is `p` from the highest degree down,
/// which is the order Horner's scheme consumes.
fn verify_interpolation(sm: &SquareMatrix<i64>, coeffs: &[i64]) -> Result<(), SeifertError> {
    let d = sm.dim();
    let m = sm.map(i128::from);
    let mt = m.transpose();

    for t in 0..=d as i128 {
        let expected = m.add(&mt.scale(-t))?.checked_determinant();
        let actual = coeffs
            .iter()
            .try_fold(0i128, |acc, &c| acc.checked_mul(t)?.checked_add(i128::from(c)));
        if expected.is_none() || expected != actual {
            log::warn!(
                "Interpolated Alexander polynomial gives {:?} at t = {}, determinant is {:?}",
                actual,
                t,
                expected
            );
            return PrecisionLossSnafu { dim: d }.fail();
        }
    }
    Ok(())
}
