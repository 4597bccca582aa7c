use crate::{
    Pretzel, SeifertError, SquareMatrix, Twist, alexander_polynomial, compute_seifert_matrix,
    count_permutation_cycles, genus, group_pretzel_components, make_subpretzel, missing_strands,
    partition_twists, simplify, strand_permutations,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Simplify the pretzel, and then each of its components, before computing invariants.
    pub simplify: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlexanderPolynomial {
    /// Coefficients starting at degree zero.
    Coefficients(Vec<i64>),

    /// The Seifert surface is disconnected, so the link is splittable and the polynomial
    /// vanishes. Pretzels are split into their connected groups before analysis, so this only
    /// shows up when [`analyse_one`] is called on a whole multi-group pretzel.
    Splittable,

    /// Floating-point interpolation could not reproduce the polynomial exactly, which happens
    /// for Seifert matrices of dimension 14 and up. See [`alexander_polynomial`].
    Inexact,
}

/// Invariants of the link represented by a single pretzel.
#[derive(Clone, Debug, PartialEq)]
pub struct Invariants {
    pub seifert_matrix: SquareMatrix<i64>,

    /// Number of link components.
    pub components: usize,

    /// Number of connected components of the Seifert surface.
    pub surface_components: usize,

    /// Genus of the Seifert surface.
    pub genus: usize,

    pub alexander: AlexanderPolynomial,
}

impl Invariants {
    pub fn is_knot(&self) -> bool {
        self.components == 1
    }
}

/// One connected group of a pretzel together with its invariants.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentAnalysis {
    /// The group's twists as they appear in the partitioned input.
    pub twists: Pretzel,

    /// The group shifted to start at strand 1, after simplification if any.
    pub pretzel: Pretzel,

    /// Whether simplification changed the shifted group.
    pub simplified: bool,

    pub invariants: Invariants,
}

/// The result of [`analyse_pretzel`].
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub options: AnalysisOptions,

    /// Whether simplification changed the pretzel as a whole.
    pub simplified: bool,

    /// The (possibly simplified) input, rearranged so each connected group is contiguous.
    pub partitioned: Pretzel,

    /// One entry per connected group, in strand order.
    pub components: Vec<ComponentAnalysis>,
}

impl Analysis {
    /// Whether the pretzel is a disjoint union of more than one sub-pretzel.
    pub fn is_split(&self) -> bool {
        self.components.len() > 1
    }
}

/// Compute all invariants of a single pretzel.
///
/// Usually this is called on one connected group at a time, but it works equally on a
/// multi-group pretzel: the genus is additive and the Seifert matrix block-additive under
/// disjoint unions. The Alexander polynomial is only computed when the Seifert surface is
/// connected.
pub fn analyse_one(pr: &[Twist]) -> Result<Invariants, SeifertError> {
    let seifert_matrix = compute_seifert_matrix(pr)?;
    let components = count_permutation_cycles(&strand_permutations(pr));
    let surface_components = missing_strands(pr).len() + 1;
    let genus = genus(surface_components, seifert_matrix.dim(), components)?;

    let alexander = if surface_components > 1 {
        AlexanderPolynomial::Splittable
    } else {
        match alexander_polynomial(&seifert_matrix) {
            Ok(coeffs) => AlexanderPolynomial::Coefficients(coeffs),
            Err(SeifertError::PrecisionLoss { .. }) => AlexanderPolynomial::Inexact,
            Err(e) => return Err(e),
        }
    };

    Ok(Invariants {
        seifert_matrix,
        components,
        surface_components,
        genus,
        alexander,
    })
}

/// Split a pretzel into its connected groups and analyse each one.
///
/// With `options.simplify`, the whole pretzel is simplified once before splitting, and each
/// shifted group is simplified once more before analysis.
pub fn analyse_pretzel(
    mut pr: Pretzel,
    options: &AnalysisOptions,
) -> Result<Analysis, SeifertError> {
    let simplified = options.simplify && simplify(&mut pr);

    let missing = missing_strands(&pr);
    partition_twists(&missing, &mut pr);

    let components = group_pretzel_components(&missing, &pr)
        .into_iter()
        .map(|group| -> Result<ComponentAnalysis, SeifertError> {
            let mut sub = make_subpretzel(group);
            let simplified = options.simplify && simplify(&mut sub);
            let invariants = analyse_one(&sub)?;
            log::info!(
                "Component {}: {} link component(s), genus {}",
                sub,
                invariants.components,
                invariants.genus
            );
            Ok(ComponentAnalysis {
                twists: Pretzel::from(group),
                pretzel: sub,
                simplified,
                invariants,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Analysis {
        options: *options,
        simplified,
        partitioned: pr,
        components,
    })
}
