use fmtastic::{Subscript, Superscript};
use smallvec::SmallVec;

/// A single twist of strand `strand` around strand `strand + 1`.
///
/// A positive count starts with an over-crossing, a negative count with an under-crossing. The
/// magnitude is the number of half twists and must be odd for a consistent pretzel, since a
/// strand has to exit on the opposite side from where it entered.
///
/// ```text
///                                                  1 ___   ___
///                                                       \ /
///                                                        \
/// 1 ___   ___         1 ___   ___                       / \
///      \ /                 \ /                          \ /
///       \                   /                            \
/// 2 ___/ \___         2 ___/ \___                       / \
///                                                       \ /
///                                                        \
///                                                  2 ___/ \___
///
///    (1, +1)             (1, -1)                      (1, +3)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Twist {
    /// 1-based strand number.
    pub strand: usize,

    /// Signed number of half twists.
    pub count: i32,
}

impl Twist {
    pub fn new(strand: usize, count: i32) -> Self {
        Self { strand, count }
    }

    /// A simple over- or under-crossing, i.e. a braid generator.
    pub fn is_crossing(&self) -> bool {
        self.count.abs() == 1
    }

    /// The twist that cancels this one.
    pub fn inverse(&self) -> Self {
        Self::new(self.strand, -self.count)
    }

    /// Two twists commute when their strands are at least two apart.
    pub fn commutes_with(&self, strand: usize) -> bool {
        self.strand.abs_diff(strand) >= 2
    }
}

impl From<(usize, i32)> for Twist {
    fn from((strand, count): (usize, i32)) -> Self {
        Self::new(strand, count)
    }
}

impl core::fmt::Debug for Twist {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "σ{}", Subscript(self.strand))?;
        if self.count != 1 {
            write!(f, "{}", Superscript(self.count))?;
        }
        Ok(())
    }
}

impl core::fmt::Display for Twist {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.strand, self.count)
    }
}

// Most interesting pretzels are short words, keep them off the heap.
pub(crate) type TwistVec = SmallVec<[Twist; 16]>;

/// An ordered word of twists representing a link diagram.
///
/// The order is the order of crossings along the diagram, so two pretzels with the same twists
/// in a different order are in general different links.
///
/// The pretzel is a generalisation of the braid representation: a braid is a pretzel where
/// every twist is a simple crossing. Every link has a braid representation, but a pretzel can
/// be much more compact.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Pretzel {
    pub(crate) twists: TwistVec,
}

impl Pretzel {
    pub fn new() -> Self {
        Self {
            twists: SmallVec::new(),
        }
    }

    pub fn from_twists(twists: impl IntoIterator<Item = Twist>) -> Self {
        Self {
            twists: twists.into_iter().collect(),
        }
    }

    pub fn twists(&self) -> &[Twist] {
        &self.twists
    }

    /// Whether every twist is a simple crossing.
    pub fn is_braid(&self) -> bool {
        self.twists.iter().all(Twist::is_crossing)
    }
}

impl std::ops::Deref for Pretzel {
    type Target = [Twist];

    fn deref(&self) -> &Self::Target {
        &self.twists
    }
}

impl FromIterator<Twist> for Pretzel {
    fn from_iter<I: IntoIterator<Item = Twist>>(iter: I) -> Self {
        Self::from_twists(iter)
    }
}

impl<const N: usize> From<[(usize, i32); N]> for Pretzel {
    fn from(twists: [(usize, i32); N]) -> Self {
        twists.into_iter().map(Twist::from).collect()
    }
}

impl From<&[Twist]> for Pretzel {
    fn from(twists: &[Twist]) -> Self {
        Self::from_twists(twists.iter().copied())
    }
}

impl core::fmt::Debug for Pretzel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.twists.iter()).finish()
    }
}

impl core::fmt::Display for Pretzel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;
        for (i, twist) in self.twists.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{twist}")?;
        }
        write!(f, "]")
    }
}
