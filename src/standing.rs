//! Derived standings: danger tiers and leader highlighting.

use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::options::GameOptions;

/// How close a player is to elimination, based on the live total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DangerTier {
    /// Below the warning threshold.
    Normal,
    /// At or above the warning threshold.
    Warning,
    /// At or above the danger threshold.
    Danger,
    /// At or above the elimination threshold.
    Eliminated,
}

impl DangerTier {
    /// Classifies a total against the configured thresholds.
    #[must_use]
    pub const fn from_total(total: u32, options: &GameOptions) -> Self {
        if total >= options.elimination_threshold {
            Self::Eliminated
        } else if total >= options.danger_threshold {
            Self::Danger
        } else if total >= options.warning_threshold {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Players tied for the lowest and highest totals after the last closed round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    /// Players tied for the lowest total.
    pub leaders: BTreeSet<usize>,
    /// Players tied for the highest total.
    pub at_risk: BTreeSet<usize>,
}

impl Highlights {
    /// Creates empty highlighting.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            leaders: BTreeSet::new(),
            at_risk: BTreeSet::new(),
        }
    }

    /// Computes highlights from `(player, total)` pairs of active players.
    ///
    /// Fewer than two players, or all totals equal, yields no highlighting.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::Highlights;
    ///
    /// let highlights = Highlights::from_totals([(0, 40), (1, 10), (2, 40)]);
    /// assert_eq!(highlights.leaders.into_iter().collect::<Vec<_>>(), [1]);
    /// assert_eq!(highlights.at_risk.into_iter().collect::<Vec<_>>(), [0, 2]);
    /// ```
    #[must_use]
    pub fn from_totals<I>(totals: I) -> Self
    where
        I: IntoIterator<Item = (usize, u32)>,
        I::IntoIter: Clone,
    {
        let totals = totals.into_iter();
        let (Some(min), Some(max)) = (
            totals.clone().map(|(_, total)| total).min(),
            totals.clone().map(|(_, total)| total).max(),
        ) else {
            return Self::default();
        };

        if totals.clone().count() < 2 || min == max {
            return Self::default();
        }

        Self {
            leaders: totals
                .clone()
                .filter(|&(_, total)| total == min)
                .map(|(player, _)| player)
                .collect(),
            at_risk: totals
                .filter(|&(_, total)| total == max)
                .map(|(player, _)| player)
                .collect(),
        }
    }

    /// Returns whether no player is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty() && self.at_risk.is_empty()
    }
}
