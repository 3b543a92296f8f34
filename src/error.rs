//! Error types for ledger operations.

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

/// Errors that can occur when starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// A player name is empty (position is 1-based).
    #[error("Please enter name for Player {position}")]
    EmptyName {
        /// 1-based position of the offending name.
        position: usize,
    },
    /// Fewer than two players were given.
    #[error("at least two players are required")]
    TooFewPlayers,
    /// A game is already in progress.
    #[error("a game is already in progress")]
    InvalidState,
}

/// Errors that can occur when recording a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Another player already holds the winner mark for this round.
    #[error("Only one player can win each round!")]
    Conflict {
        /// Index of the player already marked as winner.
        winner: usize,
    },
    /// The value is not an integer in the accepted range.
    #[error("Enter a number between 2-80 or R for winner")]
    OutOfRange,
    /// The edit would clear a closed round's cell or unmark its winner.
    #[error("Closed rounds keep their winner and need a score for every player")]
    ClosedRound,
    /// The player is eliminated and cannot receive scores.
    #[error("player is eliminated")]
    Eliminated,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Round not found.
    #[error("round not found")]
    RoundNotFound,
    /// No game is in progress.
    #[error("no game in progress")]
    InvalidState,
}

/// Category of a round-close failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Active players without a score.
    MissingScores,
    /// Zero or several winners.
    WrongWinnerCount,
    /// Numeric scores outside the accepted range.
    OutOfRange,
    /// At most one active player remains.
    GameOver,
    /// No game is in progress.
    InvalidState,
}

/// Errors that can occur when closing a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundCloseError {
    /// Active players have not entered a score.
    #[error("Please enter scores for: {}", join_names(.names))]
    MissingScores {
        /// Names of the players missing a score.
        names: Vec<String>,
    },
    /// The round does not have exactly one winner.
    #[error("{}", winner_count_message(.found))]
    WrongWinnerCount {
        /// Number of winner marks found among active players.
        found: usize,
    },
    /// Numeric scores are outside the accepted range.
    #[error("Invalid scores for: {}. Use 2-80 or R for winner.", join_names(.names))]
    OutOfRange {
        /// Names of the players with invalid scores.
        names: Vec<String>,
    },
    /// At most one active player remains.
    #[error("Game Over! Only one player remaining or all players eliminated.")]
    GameOver,
    /// No game is in progress.
    #[error("no game in progress")]
    InvalidState,
}

fn join_names(names: &[String]) -> String {
    names.join(", ")
}

const fn winner_count_message(found: &usize) -> &'static str {
    if *found == 0 {
        "Every round must have exactly one winner."
    } else {
        "Only one player can win each round."
    }
}

impl RoundCloseError {
    /// Returns the failure category.
    #[must_use]
    pub const fn reason(&self) -> CloseReason {
        match self {
            Self::MissingScores { .. } => CloseReason::MissingScores,
            Self::WrongWinnerCount { .. } => CloseReason::WrongWinnerCount,
            Self::OutOfRange { .. } => CloseReason::OutOfRange,
            Self::GameOver => CloseReason::GameOver,
            Self::InvalidState => CloseReason::InvalidState,
        }
    }
}

/// Errors that can occur when restoring a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A player name is empty.
    #[error("player name is empty")]
    EmptyName,
    /// The number of score rows differs from the number of players.
    #[error("score rows do not match the player list")]
    PlayerMismatch,
    /// Score rows have different lengths.
    #[error("score rows have different lengths")]
    RaggedRounds,
    /// The round counter does not match the recorded rounds.
    #[error("round counter does not match the recorded rounds")]
    RoundMismatch,
    /// A closed round holds points outside the accepted range.
    #[error("closed round holds an invalid score")]
    InvalidScore,
    /// A highlight refers to a player that does not exist.
    #[error("highlight refers to an unknown player")]
    UnknownHighlight,
}

/// Errors that can occur in the JSON file store.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the file failed.
    #[error("snapshot file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file does not hold a valid snapshot.
    #[error("snapshot file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur in a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum SessionError<E> {
    /// Starting the game failed.
    #[error(transparent)]
    Start(#[from] StartError),
    /// Recording a score failed.
    #[error(transparent)]
    Score(#[from] ScoreError),
    /// Closing the round failed.
    #[error(transparent)]
    Round(#[from] RoundCloseError),
    /// The stored snapshot was rejected.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// The snapshot store failed.
    #[error("snapshot store failed: {0}")]
    Store(E),
}
