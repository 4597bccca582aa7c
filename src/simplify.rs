//! Simplification of pretzel words by braid relations.
//!
//! Three rewrite rules are applied, each until it makes no further progress, in this order:
//!
//! 1. Cancel a simple crossing against its inverse further along the word. The inverse either
//!    commutes into place directly, or is produced next to the crossing by Yang–Baxter moves.
//! 2. Commute adjacent twists on distant strands so that lower strands come first.
//! 3. Trim lone twists on the lowest or highest strand (Markov destabilisation), using a
//!    Yang–Baxter move to isolate an extreme strand that occurs exactly twice.
//!
//! Commutation, Yang–Baxter moves and trimming preserve the represented link. Cancellation
//! preserves it too, except when it removes the last twists on the lowest or highest strand:
//! that strand then carries an unlinked unknot component which is dropped along with it. For
//! example `σ₁⁻¹σ₁`, a two-component unlink, simplifies to the empty word, a single unknot.

use smallvec::SmallVec;

use crate::{Pretzel, Twist, pretzel::TwistVec};

/// Bound on nested Yang–Baxter productions while searching for a cancelling twist.
const MAX_YB_DEPTH: usize = 32;

/// Run each rewrite rule to exhaustion once. Returns whether anything changed.
///
/// This is a single pass: trimming can expose new cancellations, so call [`simplify_fully`] (or
/// call this until it returns `false`) for a fixed point.
pub fn simplify(pr: &mut Pretzel) -> bool {
    let tw = &mut pr.twists;
    let mut progress = false;

    while cancel_inverses(tw) {
        progress = true;
    }
    while commute_distant(tw) {
        progress = true;
    }
    while trim_lone_twists(tw) {
        progress = true;
    }

    progress
}

/// Simplify until no rule makes progress. Returns whether anything changed.
pub fn simplify_fully(pr: &mut Pretzel) -> bool {
    let mut progress = false;
    while simplify(pr) {
        progress = true;
    }
    progress
}

/// Yang–Baxter compatibility of `x^a y^b x^c` (all magnitudes one).
///
/// `x y x = y x y` holds for equal signs; the mixed forms such as `x y x⁻¹ = y⁻¹ x y` require
/// the middle sign to agree with one of the outer ones.
fn yb_compatible(a: i32, b: i32, c: i32) -> bool {
    b == a || b == c
}

/// Rewrite the triple `x^a y^b x^c` at `k` into `y^c x^b y^a`.
fn yang_baxter(tw: &mut TwistVec, k: usize) {
    let (a, b, c) = (tw[k], tw[k + 1], tw[k + 2]);
    tw[k] = Twist::new(b.strand, c.count);
    tw[k + 1] = Twist::new(a.strand, b.count);
    tw[k + 2] = Twist::new(b.strand, a.count);
}

fn cancel_inverses(tw: &mut TwistVec) -> bool {
    for i in 0..tw.len() {
        let crossing = tw[i];
        if !crossing.is_crossing() {
            continue;
        }
        if let Some(j) = find_distant(tw, i + 1, crossing.inverse(), 0) {
            log::debug!("Cancelling {:?} at {} against {}", crossing, i, j);
            tw.remove(j);
            tw.remove(i);
            return true;
        }
    }
    false
}

/// Find `target` at or after `from` such that every twist in between commutes with it.
///
/// If a non-commuting twist is in the way, try to turn it into `target` by Yang–Baxter moves.
/// On success the word may have been rewritten after `from`, and the returned position holds
/// `target`. On failure the word is unchanged.
fn find_distant(tw: &mut TwistVec, from: usize, target: Twist, depth: usize) -> Option<usize> {
    for k in from..tw.len() {
        if tw[k] == target {
            return Some(k);
        }
        if !tw[k].commutes_with(target.strand) {
            return produce_via_yb(tw, k, target, depth);
        }
    }
    None
}

/// Rewrite the word so that position `k` holds `target`, via one Yang–Baxter move on a triple
/// starting at `k`.
fn produce_via_yb(tw: &mut TwistVec, k: usize, target: Twist, depth: usize) -> Option<usize> {
    if depth >= MAX_YB_DEPTH {
        log::trace!("Yang-Baxter search too deep at {}", k);
        return None;
    }

    let (m, q) = find_yb_triple(tw, k, target, depth)?;

    // Everything between k and q commutes with the middle and last twists; gather the triple.
    let third = tw.remove(q);
    let middle = tw.remove(m);
    tw.insert(k + 1, middle);
    tw.insert(k + 2, third);
    yang_baxter(tw, k);

    log::trace!("Produced {:?} at {} by Yang-Baxter", target, k);
    debug_assert_eq!(tw[k], target);
    Some(k)
}

/// Locate the rest of a triple `x^a y^b x^c` whose Yang–Baxter image starts with `target`.
///
/// `tw[k]` is the first element `x^a`, and `target` lies on the neighbouring strand `y`. The
/// middle `y^b` is the first twist after `k` that does not commute with both strands, and the
/// last `x^c` (with `c` the target's count) is searched for recursively, so it may itself be
/// produced by a nested move. Returns the positions of the middle and last element.
fn find_yb_triple(
    tw: &mut TwistVec,
    k: usize,
    target: Twist,
    depth: usize,
) -> Option<(usize, usize)> {
    let first = tw[k];
    if !first.is_crossing() || first.strand.abs_diff(target.strand) != 1 {
        return None;
    }

    let m = (k + 1..tw.len())
        .find(|&i| !(tw[i].commutes_with(target.strand) && tw[i].commutes_with(first.strand)))?;
    let middle = tw[m];
    if middle.strand != target.strand || !middle.is_crossing() {
        return None;
    }
    if !yb_compatible(first.count, middle.count, target.count) {
        return None;
    }

    let third = Twist::new(first.strand, target.count);
    let q = find_distant(tw, m + 1, third, depth + 1)?;
    Some((m, q))
}

fn commute_distant(tw: &mut TwistVec) -> bool {
    match tw.windows(2).position(|w| w[0].strand > w[1].strand + 1) {
        Some(i) => {
            tw.swap(i, i + 1);
            log::trace!("Commuted twists at {} and {}", i, i + 1);
            true
        }
        None => false,
    }
}

fn trim_lone_twists(tw: &mut TwistVec) -> bool {
    let Some(lowest) = tw.iter().map(|t| t.strand).min() else {
        return false;
    };
    let highest = tw.iter().map(|t| t.strand).max().unwrap_or(lowest);

    let low_positions = positions_of(tw, lowest);
    let high_positions = positions_of(tw, highest);

    if let [p] = low_positions[..] {
        // The strands above shift down to close the gap left by the removed strand.
        log::debug!("Trimming lone lowest twist {:?}", tw[p]);
        tw.remove(p);
        for t in tw.iter_mut() {
            t.strand -= 1;
        }
        return true;
    }

    if let [p] = high_positions[..] {
        log::debug!("Trimming lone highest twist {:?}", tw[p]);
        tw.remove(p);
        return true;
    }

    if let [p, q] = low_positions[..] {
        if isolate_extreme(tw, p, q, lowest + 1) {
            return true;
        }
    }

    if let [p, q] = high_positions[..] {
        if isolate_extreme(tw, p, q, highest - 1) {
            return true;
        }
    }

    false
}

fn positions_of(tw: &[Twist], strand: usize) -> SmallVec<[usize; 4]> {
    tw.iter()
        .enumerate()
        .filter(|(_, t)| t.strand == strand)
        .map(|(i, _)| i)
        .collect()
}

/// Turn the two occurrences `s^a ... s^c` of an extreme strand at `p < q` into a single one.
///
/// Requires exactly one twist `t^b` on the neighbouring strand between them. Everything else in
/// between commutes with `s`, so the outer twists slide next to it and the triple is rewritten
/// to `t^c s^b t^a`.
fn isolate_extreme(tw: &mut TwistVec, p: usize, q: usize, neighbour: usize) -> bool {
    let (first, last) = (tw[p], tw[q]);
    if !first.is_crossing() || !last.is_crossing() {
        return false;
    }

    let between = positions_of(&tw[p + 1..q], neighbour);
    let [offset] = between[..] else {
        return false;
    };
    let m = p + 1 + offset;
    let middle = tw[m];
    if !middle.is_crossing() || !yb_compatible(first.count, middle.count, last.count) {
        return false;
    }

    log::debug!(
        "Isolating extreme strand {} by Yang-Baxter around {}",
        first.strand,
        m
    );
    tw.remove(q);
    tw.remove(p);
    let m = m - 1;
    tw[m] = Twist::new(neighbour, last.count);
    tw.insert(m + 1, Twist::new(first.strand, middle.count));
    tw.insert(m + 2, Twist::new(neighbour, first.count));
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions as pa;

    use super::*;
    use crate::{
        compute_seifert_matrix, count_permutation_cycles, genus, missing_strands,
        strand_permutations,
    };

    fn components(pr: &Pretzel) -> usize {
        count_permutation_cycles(&strand_permutations(pr))
    }

    fn seifert_genus(pr: &Pretzel) -> usize {
        let m = compute_seifert_matrix(pr).unwrap();
        genus(missing_strands(pr).len() + 1, m.dim(), components(pr)).unwrap()
    }

    #[test]
    fn yang_baxter_and_cancel() {
        crate::test_utils::init_test_logger();

        //                        d        C       D       B       C       B
        let mut pr = Pretzel::from([(4, -1), (3, 1), (4, 1), (2, 1), (3, 1), (2, 1)]);
        // => dDCDBC (YB twice) => CDBC (cancel inverses) => BB (trim)
        assert!(simplify(&mut pr));
        pa::assert_eq!(pr, Pretzel::from([(2, 1), (2, 1)]));
    }

    #[test]
    fn trim_pretzel_twists() {
        let mut pr = Pretzel::from([(2, 3), (3, 1), (4, -5), (3, 1), (3, 1)]);
        assert!(simplify(&mut pr));
        pa::assert_eq!(pr, Pretzel::from([(2, 1), (2, 1), (2, 1)]));
    }

    #[test]
    fn isolate_highest_strand() {
        let mut pr = Pretzel::from([(1, 1), (2, -1), (1, 1), (3, -1), (2, -1), (3, -1)]);
        assert!(simplify(&mut pr));
        pa::assert_eq!(
            pr,
            Pretzel::from([(1, 1), (2, -1), (1, 1), (2, -1), (2, -1)])
        );
    }

    #[test]
    fn isolate_lowest_strand() {
        let mut pr = Pretzel::from([(1, 1), (2, 1), (1, 1), (3, 1), (3, 1)]);
        let before = components(&pr);
        // => BABCC (YB on the lowest strand) => AABB (trim lone lowest)
        assert!(simplify(&mut pr));
        pa::assert_eq!(pr, Pretzel::from([(1, 1), (1, 1), (2, 1), (2, 1)]));
        assert_eq!(components(&pr), before);
    }

    #[test]
    fn cancellation_drops_unlinked_strand() {
        let mut pr = Pretzel::from([(1, -1), (1, 1)]);
        assert_eq!(components(&pr), 2);
        assert!(simplify(&mut pr));
        pa::assert_eq!(pr, Pretzel::new());
        assert_eq!(components(&pr), 1);
    }

    #[test]
    fn figure_eight_does_not_simplify() {
        let mut pr = Pretzel::from([(1, 1), (2, -1), (1, 1), (2, -1)]);
        let expected = pr.clone();
        assert!(!simplify(&mut pr));
        pa::assert_eq!(pr, expected);
    }

    #[test]
    fn large_twists_are_not_cancelled() {
        let mut pr = Pretzel::from([(1, 3), (1, -3)]);
        let expected = pr.clone();
        assert!(!simplify(&mut pr));
        pa::assert_eq!(pr, expected);
    }

    #[test]
    fn direct_cancellation() {
        let mut pr = Pretzel::from([(1, 1), (3, 1), (1, -1), (3, 1), (3, 1), (3, 1)]);
        assert!(simplify(&mut pr));
        pa::assert_eq!(pr, Pretzel::from([(3, 1), (3, 1), (3, 1), (3, 1)]));
    }

    #[test]
    fn commute_orders_distant_strands() {
        let mut tw: TwistVec = Pretzel::from([(3, 1), (1, 1), (5, 1), (3, 1)]).twists;
        assert!(commute_distant(&mut tw));
        pa::assert_eq!(
            Pretzel { twists: tw.clone() },
            Pretzel::from([(1, 1), (3, 1), (5, 1), (3, 1)])
        );
        assert!(commute_distant(&mut tw));
        assert!(!commute_distant(&mut tw));
        pa::assert_eq!(
            Pretzel { twists: tw },
            Pretzel::from([(1, 1), (3, 1), (3, 1), (5, 1)])
        );
    }

    #[test]
    fn yb_signs() {
        assert!(yb_compatible(1, 1, 1));
        assert!(yb_compatible(-1, -1, -1));
        assert!(yb_compatible(1, 1, -1));
        assert!(yb_compatible(-1, 1, 1));
        assert!(!yb_compatible(1, -1, 1));
        assert!(!yb_compatible(-1, 1, -1));
    }

    #[test]
    fn empty_and_single_twist() {
        let mut pr = Pretzel::new();
        assert!(!simplify(&mut pr));

        let mut pr = Pretzel::from([(1, 3)]);
        assert!(simplify(&mut pr));
        pa::assert_eq!(pr, Pretzel::new());
    }

    #[test]
    fn idempotent_at_fixed_point() {
        let pretzels = [
            Pretzel::from([(4, -1), (3, 1), (4, 1), (2, 1), (3, 1), (2, 1)]),
            Pretzel::from([(2, 3), (3, 1), (4, -5), (3, 1), (3, 1)]),
            Pretzel::from([(1, 1), (2, -1), (1, 1), (3, -1), (2, -1), (3, -1)]),
            Pretzel::from([(1, 1), (3, 5), (2, -1), (1, 1), (3, 1), (2, 3)]),
        ];
        for mut pr in pretzels {
            simplify_fully(&mut pr);
            let fixed = pr.clone();
            assert!(!simplify(&mut pr), "pretzel {pr}");
            pa::assert_eq!(pr, fixed);
        }
    }

    #[test]
    fn preserves_link_components() {
        let pretzels = [
            Pretzel::from([(4, -1), (3, 1), (4, 1), (2, 1), (3, 1), (2, 1)]),
            Pretzel::from([(2, 3), (3, 1), (4, -5), (3, 1), (3, 1)]),
            Pretzel::from([(1, 1), (2, -1), (1, 1), (3, -1), (2, -1), (3, -1)]),
            Pretzel::from([(1, 1), (3, 1), (1, -1), (3, 1), (3, 1), (3, 1)]),
        ];
        for pr in pretzels {
            let mut simplified = pr.clone();
            simplify_fully(&mut simplified);
            assert_eq!(components(&pr), components(&simplified), "pretzel {pr}");
        }
    }

    #[test]
    fn preserves_genus_without_cancellation() {
        // Cancelling a crossing pair lowers the genus of the canonical surface, so only
        // commutation, Yang-Baxter and trimming are checked here.
        let pretzels = [
            Pretzel::from([(2, 3), (3, 1), (4, -5), (3, 1), (3, 1)]),
            Pretzel::from([(1, 1), (2, -1), (1, 1), (3, -1), (2, -1), (3, -1)]),
        ];
        for pr in pretzels {
            let mut simplified = pr.clone();
            simplify(&mut simplified);
            assert_eq!(seifert_genus(&pr), seifert_genus(&simplified), "pretzel {pr}");
        }
    }
}
