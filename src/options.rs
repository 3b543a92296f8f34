//! Ledger configuration options.

/// What happens to active players who have no score when a round closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum MissingScorePolicy {
    /// Refuse to close the round until every active player has a score.
    #[default]
    Reject,
    /// Fill missing scores with the given penalty and close the round.
    ///
    /// The winner count is checked before filling; the filled round is then
    /// range-checked like any other.
    Penalty(u8),
}

impl MissingScorePolicy {
    /// The penalty conventionally used when auto-filling.
    pub const DEFAULT_PENALTY: u8 = 20;

    /// Auto-fill with [`Self::DEFAULT_PENALTY`].
    #[must_use]
    pub const fn penalty() -> Self {
        Self::Penalty(Self::DEFAULT_PENALTY)
    }
}

/// Configuration options for a score ledger.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use rummy_score::{GameOptions, MissingScorePolicy};
///
/// let options = GameOptions::default()
///     .with_elimination_threshold(300)
///     .with_missing_scores(MissingScorePolicy::penalty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Locked total at which a player is out.
    pub elimination_threshold: u32,
    /// Live total at which a player enters the warning tier.
    pub warning_threshold: u32,
    /// Live total at which a player enters the danger tier.
    pub danger_threshold: u32,
    /// Handling of missing scores when closing a round.
    pub missing_scores: MissingScorePolicy,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            elimination_threshold: 250,
            warning_threshold: 200,
            danger_threshold: 230,
            missing_scores: MissingScorePolicy::Reject,
        }
    }
}

impl GameOptions {
    /// Sets the elimination threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::GameOptions;
    ///
    /// let options = GameOptions::default().with_elimination_threshold(500);
    /// assert_eq!(options.elimination_threshold, 500);
    /// ```
    #[must_use]
    pub const fn with_elimination_threshold(mut self, threshold: u32) -> Self {
        self.elimination_threshold = threshold;
        self
    }

    /// Sets the warning threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::GameOptions;
    ///
    /// let options = GameOptions::default().with_warning_threshold(150);
    /// assert_eq!(options.warning_threshold, 150);
    /// ```
    #[must_use]
    pub const fn with_warning_threshold(mut self, threshold: u32) -> Self {
        self.warning_threshold = threshold;
        self
    }

    /// Sets the danger threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::GameOptions;
    ///
    /// let options = GameOptions::default().with_danger_threshold(240);
    /// assert_eq!(options.danger_threshold, 240);
    /// ```
    #[must_use]
    pub const fn with_danger_threshold(mut self, threshold: u32) -> Self {
        self.danger_threshold = threshold;
        self
    }

    /// Sets the missing-score policy.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::{GameOptions, MissingScorePolicy};
    ///
    /// let options = GameOptions::default().with_missing_scores(MissingScorePolicy::Penalty(25));
    /// assert_eq!(options.missing_scores, MissingScorePolicy::Penalty(25));
    /// ```
    #[must_use]
    pub const fn with_missing_scores(mut self, policy: MissingScorePolicy) -> Self {
        self.missing_scores = policy;
        self
    }
}
