//! Moment selection and results.
//!
//! A [`MomentSelector`] names which of mean, variance, skew and (excess)
//! kurtosis to compute; [`Moments`] holds exactly those, always iterated in
//! the order m, v, s, k.

use std::fmt;
use std::str::FromStr;

use crate::error::StatsError;

/// One of the four summary moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MomentKind {
    Mean,
    Variance,
    Skew,
    /// Excess kurtosis (0 for the normal distribution).
    Kurtosis,
}

impl MomentKind {
    /// All kinds in their canonical order.
    pub const ALL: [MomentKind; 4] = [
        MomentKind::Mean,
        MomentKind::Variance,
        MomentKind::Skew,
        MomentKind::Kurtosis,
    ];

    /// Single-letter code: `m`, `v`, `s` or `k`.
    pub fn code(self) -> char {
        match self {
            MomentKind::Mean => 'm',
            MomentKind::Variance => 'v',
            MomentKind::Skew => 's',
            MomentKind::Kurtosis => 'k',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for MomentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MomentKind::Mean => "mean",
            MomentKind::Variance => "variance",
            MomentKind::Skew => "skew",
            MomentKind::Kurtosis => "kurtosis",
        };
        f.write_str(name)
    }
}

/// Set of requested moment kinds.
///
/// The default selector is mean and variance. Selectors parse from the
/// letter codes in any order, e.g. `"kvm"`.
///
/// # Examples
/// ```
/// use u_statkit::distributions::{MomentKind, MomentSelector};
/// let sel: MomentSelector = "sm".parse().unwrap();
/// assert!(sel.contains(MomentKind::Skew));
/// assert!(!sel.contains(MomentKind::Variance));
/// assert_eq!(MomentSelector::default(), MomentSelector::MEAN_VARIANCE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MomentSelector {
    bits: u8,
}

impl MomentSelector {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const MEAN_VARIANCE: Self = Self { bits: 0b0011 };
    pub const ALL: Self = Self { bits: 0b1111 };

    /// Selector containing a single kind.
    pub fn only(kind: MomentKind) -> Self {
        Self::EMPTY.with(kind)
    }

    /// Adds `kind` to the selection.
    pub fn with(self, kind: MomentKind) -> Self {
        Self {
            bits: self.bits | kind.bit(),
        }
    }

    pub fn contains(self, kind: MomentKind) -> bool {
        self.bits & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Selected kinds in canonical order.
    pub fn kinds(self) -> impl Iterator<Item = MomentKind> {
        MomentKind::ALL
            .into_iter()
            .filter(move |&kind| self.contains(kind))
    }
}

impl Default for MomentSelector {
    fn default() -> Self {
        Self::MEAN_VARIANCE
    }
}

impl FromIterator<MomentKind> for MomentSelector {
    fn from_iter<I: IntoIterator<Item = MomentKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl FromStr for MomentSelector {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| {
                MomentKind::from_code(c).ok_or_else(|| {
                    StatsError::invalid_argument(
                        "selector",
                        format!("unknown moment code '{c}', expected one of m, v, s, k"),
                    )
                })
            })
            .collect()
    }
}

/// Computed moments, holding only the requested kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    values: [Option<f64>; 4],
}

impl Moments {
    /// Evaluates `formula` once for every kind in `selector`.
    pub fn compute<F>(selector: MomentSelector, mut formula: F) -> Self
    where
        F: FnMut(MomentKind) -> f64,
    {
        let mut values = [None; 4];
        for kind in selector.kinds() {
            values[kind as usize] = Some(formula(kind));
        }
        Self { values }
    }

    pub fn get(&self, kind: MomentKind) -> Option<f64> {
        self.values[kind as usize]
    }

    pub fn mean(&self) -> Option<f64> {
        self.get(MomentKind::Mean)
    }

    pub fn variance(&self) -> Option<f64> {
        self.get(MomentKind::Variance)
    }

    pub fn skew(&self) -> Option<f64> {
        self.get(MomentKind::Skew)
    }

    pub fn kurtosis(&self) -> Option<f64> {
        self.get(MomentKind::Kurtosis)
    }

    /// Requested moments in the order m, v, s, k.
    pub fn iter(&self) -> impl Iterator<Item = (MomentKind, f64)> + '_ {
        MomentKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|value| (kind, value)))
    }

    pub fn len(&self) -> usize {
        self.values.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
