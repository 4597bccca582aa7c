use snafu::ensure;

use crate::{ContractViolationSnafu, SeifertError, SquareMatrix, Twist};

/// For each twist except the last, the 1-based index of the next twist on the same strand, or
/// 0 if there is none.
///
/// Each non-zero entry is a generator of the first homology of the Seifert surface: the loop
/// that runs through a twist and its successor on the same strand.
pub fn compute_homology(pr: &[Twist]) -> Vec<usize> {
    let n = pr.len().saturating_sub(1);
    (0..n)
        .map(|i| {
            pr[i + 1..]
                .iter()
                .position(|tw| tw.strand == pr[i].strand)
                .map_or(0, |offset| i + offset + 2)
        })
        .collect()
}

/// The Seifert matrix of the surface built from the pretzel, indexed by homology generators.
///
/// All divisions are exact integer divisions: twist counts of a consistent pretzel are odd, so
/// both `count ± 1` and the sum of two counts are even.
///
/// Returns a `ContractViolation` if the case analysis meets a configuration that cannot arise
/// from a consistent homology vector.
pub fn compute_seifert_matrix(pr: &[Twist]) -> Result<SquareMatrix<i64>, SeifertError> {
    let homology = compute_homology(pr);
    let n = homology.len();
    let mut m = SquareMatrix::zeros(n);

    for i in 0..n {
        if homology[i] == 0 {
            continue;
        }
        for j in i..n {
            if homology[j] == 0 {
                continue;
            }

            let (ti, tj) = (pr[i], pr[j]);
            if i == j {
                let partner = pr[homology[i] - 1];
                m[(i, i)] = -(i64::from(ti.count) + i64::from(partner.count)) / 2;
            } else if homology[i] > homology[j] || homology[i] < j + 1 {
                // Disjoint or nested loops do not link.
            } else if homology[i] == j + 1 {
                // Loop j starts where loop i ends.
                m[(i, j)] = (i64::from(tj.count) - 1) / 2;
                m[(j, i)] = (i64::from(tj.count) + 1) / 2;
            } else if ti.strand.abs_diff(tj.strand) > 1 {
                // Loops on distant strands do not link.
            } else if ti.strand == tj.strand + 1 {
                m[(j, i)] = -1;
            } else if ti.strand + 1 == tj.strand {
                m[(i, j)] = 1;
            } else {
                return ContractViolationSnafu {
                    message: format!(
                        "unexpected Seifert configuration at ({i}, {j}): twists {ti} and {tj}, \
                         homology {} and {}",
                        homology[i], homology[j]
                    ),
                }
                .fail();
            }
        }
    }

    // Prune from the back so the remaining indices stay valid.
    for i in (0..n).rev() {
        if homology[i] == 0 {
            m.remove_row_col(i);
        }
    }
    Ok(m)
}

/// Genus of a Seifert surface with `k` connected components, Seifert matrix dimension `dim`,
/// bounding a link with `components` components.
///
/// There are several equivalent expressions for the genus, see Corollary 2.7 and Equation (3)
/// in the paper:
///
/// ```text
///    g = k - (s - c   + n) / 2  // s = number of Seifert circles, c = number of crossings
///      = k - (k - dim + n) / 2  // using dim = rk H_1 = k - (s - c)
///      = (k + dim - n) / 2
/// ```
///
/// where `n` is the number of link components. The numerator must be even and non-negative.
pub fn genus(k: usize, dim: usize, components: usize) -> Result<usize, SeifertError> {
    let numerator = (k + dim).checked_sub(components);
    ensure!(
        numerator.is_some_and(|x| x % 2 == 0),
        ContractViolationSnafu {
            message: format!(
                "genus numerator k + dim - components = {k} + {dim} - {components} is not a \
                 non-negative even number"
            ),
        }
    );
    Ok(numerator.unwrap_or_default() / 2)
}
