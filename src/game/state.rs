//! Game lifecycle types.

use alloc::vec::Vec;

/// Lifecycle state of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// No players bound yet.
    #[default]
    Setup,
    /// Rounds are being played.
    InProgress,
    /// Fewer than two players remain. Scores can still be inspected and edited.
    GameOver,
}

/// What happened when a round was closed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundOutcome {
    /// 1-based number of the round that was closed, if any.
    pub closed_round: Option<usize>,
    /// 1-based number of the round now open for input.
    pub open_round: usize,
    /// Players eliminated by the closed round.
    pub eliminated: Vec<usize>,
    /// Whether fewer than two players remain.
    pub game_over: bool,
}
