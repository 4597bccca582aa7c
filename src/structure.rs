use crate::{Pretzel, Twist};

/// The largest occurring strand number plus one; this is the number of strands in the pretzel.
///
/// E.g. the simple pretzel `[(1, 1)]` has two strands. The empty pretzel has one.
pub fn number_of_strands(pr: &[Twist]) -> usize {
    pr.iter().map(|tw| tw.strand).max().map_or(1, |max| max + 1)
}

/// Strand numbers in `1..number_of_strands(pr)` that no twist starts on, in ascending order.
///
/// Strands on either side of a missing strand never interact, so a non-empty result means the
/// pretzel is a disjoint union of independent sub-pretzels.
pub fn missing_strands(pr: &[Twist]) -> Vec<usize> {
    let mut present = vec![false; number_of_strands(pr)];
    for tw in pr {
        present[tw.strand] = true;
    }
    (1..present.len()).filter(|&n| !present[n]).collect()
}

/// Stably rearrange the pretzel so that the twists of each connected group are contiguous.
///
/// For each missing strand `m` in turn, the twists below `m` are moved in front of the ones
/// above it, keeping their relative order.
///
/// `missing` must be sorted ascending and consistent with `pr`, e.g. as returned by
/// [`missing_strands`].
pub fn partition_twists(missing: &[usize], pr: &mut Pretzel) {
    // A stable sort on the group number is the composition of the stable partitions.
    pr.twists
        .sort_by_key(|tw| missing.partition_point(|&m| m < tw.strand));
}

/// Split a pretzel that has been arranged by [`partition_twists`] into its connected groups.
///
/// There are always `missing.len() + 1` groups. A group is empty when two adjacent strands are
/// both missing; it then stands for a single unlinked unknot.
pub fn group_pretzel_components<'a>(missing: &[usize], pr: &'a [Twist]) -> Vec<&'a [Twist]> {
    let mut groups = Vec::with_capacity(missing.len() + 1);
    let mut rest = pr;
    for &m in missing {
        let (group, tail) = rest.split_at(rest.partition_point(|tw| tw.strand < m));
        groups.push(group);
        rest = tail;
    }
    groups.push(rest);
    groups
}

/// Copy a connected group of twists into a self-contained pretzel whose lowest strand is 1.
///
/// The offset is taken from the minimum strand in the range rather than the first twist, since
/// a group need not start on its lowest strand.
pub fn make_subpretzel(range: &[Twist]) -> Pretzel {
    let Some(offset) = range.iter().map(|tw| tw.strand - 1).min() else {
        return Pretzel::new();
    };
    range
        .iter()
        .map(|tw| Twist::new(tw.strand - offset, tw.count))
        .collect()
}

/// Where each incoming strand exits the pretzel.
///
/// Entry `i` of the result is the exit position of incoming strand `i + 1`. We follow each
/// strand through the word: a twist on the strand's current position moves it up by one, a
/// twist on the position just below moves it down by one. Since twist counts are odd, a twist
/// always swaps its two strands.
pub fn strand_permutations(pr: &[Twist]) -> Vec<usize> {
    (1..=number_of_strands(pr))
        .map(|n| {
            pr.iter().fold(n, |pos, tw| {
                if tw.strand == pos {
                    pos + 1
                } else if tw.strand + 1 == pos {
                    pos - 1
                } else {
                    pos
                }
            })
        })
        .collect()
}

/// Number of cycles of a 1-based permutation.
pub fn count_permutation_cycles(perm: &[usize]) -> usize {
    let mut visited = vec![false; perm.len()];
    let mut cycles = 0;
    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = perm[i] - 1;
        }
    }
    cycles
}
