//! Topological invariants of links given as braids or pretzels.
//!
//! A pretzel is an ordered word of twists over numbered strands. From such a word we compute
//! the number of link components, a Seifert matrix, the genus of the Seifert surface and the
//! Alexander polynomial. See <http://www.maths.ed.ac.uk/~jcollins/SeifertMatrix/> for the
//! construction.
//!
//! ```rust
//! use seifert::{AlexanderPolynomial, analyse_one, parse_pretzel};
//!
//! let trefoil = parse_pretzel("AAA").unwrap();
//! let invariants = analyse_one(&trefoil).unwrap();
//! assert_eq!(invariants.components, 1);
//! assert_eq!(invariants.genus, 1);
//! assert_eq!(
//!     invariants.alexander,
//!     AlexanderPolynomial::Coefficients(vec![1, -1, 1])
//! );
//! ```

mod alexander;
mod analysis;
mod format;
mod matrix;
mod parse;
mod pretzel;
mod seifert;
mod simplify;
mod structure;

#[cfg(test)]
mod test_utils;

pub use alexander::*;
pub use analysis::*;
pub use format::*;
pub use matrix::*;
pub use parse::{MAX_STRAND, parse_pretzel};
pub use pretzel::*;
pub use seifert::*;
pub use simplify::{simplify, simplify_fully};
pub use structure::*;

use snafu::prelude::*;

#[derive(Debug, Snafu)]
pub enum SeifertError {
    #[snafu(display(
        "Matrix dimension mismatch: {}x{} vs. {}x{}",
        lhs.0,
        lhs.1,
        rhs.0,
        rhs.1
    ))]
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[snafu(display("Cannot build a square matrix from a {}x{} matrix", rows, cols))]
    NotSquare { rows: usize, cols: usize },

    #[snafu(display("Contract violation (bug in library or inconsistent input): {}", message))]
    ContractViolation { message: String },

    #[snafu(display("Input is neither braid nor pretzel notation: '{}'", input))]
    UnrecognisedNotation { input: String },

    #[snafu(display("Strand number 0 is not allowed in braid notation"))]
    ZeroStrand,

    #[snafu(display("Twist count must be odd: strand {} has count {}", strand, count))]
    EvenTwist { strand: usize, count: i64 },

    #[snafu(display("Number out of range: '{}'", text))]
    NumberOutOfRange { text: String },

    #[snafu(display(
        "Alexander polynomial of a {}x{} Seifert matrix cannot be interpolated exactly in floating point",
        dim,
        dim
    ))]
    PrecisionLoss { dim: usize },
}
