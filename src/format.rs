use std::fmt::{self, Write as _};

use crate::Matrix;

/// Render a polynomial in the indeterminate `sym`, given its coefficients starting at degree
/// zero, highest degree first.
///
/// Zero terms are skipped, unit coefficients are elided (`t`, `-t^2`), and the sign of every
/// term after the first becomes the separator: `t^2 - 2 * t + 3`. The zero polynomial renders
/// as `0`.
pub fn polynomial_to_string(sym: &str, coeffs: &[i64]) -> String {
    let mut result = String::new();

    for (deg, &c) in coeffs.iter().enumerate().rev() {
        if c == 0 {
            continue;
        }

        let magnitude = if result.is_empty() {
            if c < 0 {
                result.push('-');
            }
            c.unsigned_abs()
        } else {
            result.push_str(if c < 0 { " - " } else { " + " });
            c.unsigned_abs()
        };

        // Writing to a String cannot fail.
        let _ = match deg {
            0 => write!(result, "{magnitude}"),
            1 if magnitude == 1 => write!(result, "{sym}"),
            1 => write!(result, "{magnitude} * {sym}"),
            _ if magnitude == 1 => write!(result, "{sym}^{deg}"),
            _ => write!(result, "{magnitude} * {sym}^{deg}"),
        };
    }

    if result.is_empty() {
        result.push('0');
    }
    result
}

impl<T: Copy + fmt::Display> fmt::Display for Matrix<T> {
    /// One line per row, `| a b |`, with entries right-aligned to the widest one. The empty
    /// matrix renders as `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows() == 0 {
            return f.write_str("[]");
        }

        let width = (0..self.rows())
            .flat_map(|i| self.row(i).iter().map(|x| x.to_string().len()))
            .max()
            .unwrap_or(0);

        for i in 0..self.rows() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_char('|')?;
            for x in self.row(i) {
                write!(f, " {:>width$}", x.to_string())?;
            }
            f.write_str(" |")?;
        }
        Ok(())
    }
}

/// Single-line rendering of a matrix, e.g. `[[1, 0], [0, 1]]`.
pub struct InlineMatrix<'a, T>(&'a Matrix<T>);

impl<T> Matrix<T> {
    pub fn inline(&self) -> InlineMatrix<'_, T> {
        InlineMatrix(self)
    }
}

impl<T: Copy + fmt::Display> fmt::Display for InlineMatrix<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        f.write_char('[')?;
        for i in 0..m.rows() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_char('[')?;
            for (j, x) in m.row(i).iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{x}")?;
            }
            f.write_char(']')?;
        }
        f.write_char(']')
    }
}
