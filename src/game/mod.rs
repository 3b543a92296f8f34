//! Score ledger and round flow.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{SnapshotError, StartError};
use crate::notice::{Notice, Notifier, Severity};
use crate::options::GameOptions;
use crate::score::Score;
use crate::snapshot::Snapshot;
use crate::standing::{DangerTier, Highlights};

mod round;
mod scoring;
pub mod state;

pub use state::{GameState, RoundOutcome};

/// Sums the points of a run of score cells.
///
/// Every total the ledger reports goes through here.
fn sum_points(cells: &[Score]) -> u32 {
    cells.iter().map(|score| score.points()).sum()
}

/// A score ledger for one elimination game.
///
/// The ledger owns the players, one score row per player and the round
/// counter. Totals, tiers, elimination and highlighting are derived from the
/// rows on demand. Use [`GameOptions`] to configure thresholds and how missing
/// scores are handled when a round closes.
#[derive(Debug, Clone)]
pub struct Game {
    /// Game options.
    pub options: GameOptions,
    /// Current lifecycle state.
    state: GameState,
    /// Player names in seat order.
    players: Vec<String>,
    /// Score rows (`player` -> one cell per round), always the same length.
    scores: Vec<Vec<Score>>,
    /// Round counter, one more than the number of recorded rounds.
    current_round: usize,
    /// Highlighting from the last closed round.
    highlights: Highlights,
    /// Notices not yet dispatched.
    notices: Vec<Notice>,
}

impl Game {
    /// Creates an empty ledger waiting for players.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::{Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default());
    /// assert_eq!(game.state(), GameState::Setup);
    /// ```
    #[must_use]
    pub const fn new(options: GameOptions) -> Self {
        Self {
            options,
            state: GameState::Setup,
            players: Vec::new(),
            scores: Vec::new(),
            current_round: 1,
            highlights: Highlights::new(),
            notices: Vec::new(),
        }
    }

    /// Binds the players and opens round 1.
    ///
    /// Names are trimmed. Player indices follow the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if a game is already running, a name is empty, or
    /// fewer than two names are given.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::{Game, GameOptions};
    ///
    /// let mut game = Game::new(GameOptions::default());
    /// game.start_game(["Ada", "Bo"]).unwrap();
    /// assert_eq!(game.round_number(), 1);
    /// ```
    pub fn start_game<I, S>(&mut self, names: I) -> Result<(), StartError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.state != GameState::Setup {
            return Err(StartError::InvalidState);
        }

        let names: Vec<String> = names
            .into_iter()
            .map(|name| String::from(name.as_ref().trim()))
            .collect();

        if let Some(index) = names.iter().position(String::is_empty) {
            let err = StartError::EmptyName { position: index + 1 };
            self.push_notice(format!("{err}"), Severity::Warning);
            return Err(err);
        }

        if names.len() < 2 {
            return Err(StartError::TooFewPlayers);
        }

        log::info!("starting game with {} players", names.len());

        self.scores = alloc::vec![Vec::new(); names.len()];
        self.players = names;
        self.current_round = 1;
        self.highlights = Highlights::default();
        self.state = GameState::InProgress;

        self.open_next_round(None);
        self.push_notice("Game started!", Severity::Success);

        Ok(())
    }

    /// Discards the current game and returns to setup.
    ///
    /// Undispatched notices are dropped as well.
    pub fn new_game(&mut self) {
        log::info!("discarding game after {} rounds", self.round_count());
        *self = Self::new(self.options);
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the player names in seat order.
    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Returns the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the name of the specified player.
    #[must_use]
    pub fn player_name(&self, player: usize) -> Option<&str> {
        self.players.get(player).map(String::as_str)
    }

    /// Returns the raw round counter.
    ///
    /// The counter starts at 1 and is incremented every time a round is
    /// opened, so while a game runs it is one more than [`Self::round_count`].
    #[must_use]
    pub const fn current_round(&self) -> usize {
        self.current_round
    }

    /// Returns the 1-based number of the round open for input (0 before start).
    #[must_use]
    pub const fn round_number(&self) -> usize {
        self.current_round - 1
    }

    /// Returns the 0-based index of the round open for input.
    #[must_use]
    pub const fn open_round(&self) -> Option<usize> {
        self.current_round.checked_sub(2)
    }

    /// Returns the number of recorded rounds, including the open one.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.scores.first().map_or(0, Vec::len)
    }

    /// Returns the score row of the specified player.
    #[must_use]
    pub fn scores(&self, player: usize) -> Option<&[Score]> {
        self.scores.get(player).map(Vec::as_slice)
    }

    /// Returns the score of a player in a round.
    #[must_use]
    pub fn score(&self, round: usize, player: usize) -> Option<Score> {
        self.scores.get(player)?.get(round).copied()
    }

    /// Returns the live total of a player, including the open round.
    #[must_use]
    pub fn total(&self, player: usize) -> Option<u32> {
        self.scores.get(player).map(|row| sum_points(row))
    }

    /// Returns the locked total of a player, counting closed rounds only.
    #[must_use]
    pub fn locked_total(&self, player: usize) -> Option<u32> {
        let end = self.open_round().unwrap_or(0);
        self.scores
            .get(player)
            .map(|row| sum_points(&row[..end.min(row.len())]))
    }

    /// Returns how many rounds the player has won.
    #[must_use]
    pub fn winner_count(&self, player: usize) -> Option<usize> {
        self.scores
            .get(player)
            .map(|row| row.iter().filter(|score| score.is_winner()).count())
    }

    /// Returns the danger tier of a player, based on the live total.
    #[must_use]
    pub fn tier(&self, player: usize) -> Option<DangerTier> {
        self.total(player)
            .map(|total| DangerTier::from_total(total, &self.options))
    }

    /// Returns whether the player is out of the game.
    ///
    /// Only closed rounds count, so a score entered in the open round never
    /// eliminates a player before the round is closed.
    #[must_use]
    pub fn is_eliminated(&self, player: usize) -> bool {
        self.locked_total(player)
            .is_some_and(|total| total >= self.options.elimination_threshold)
    }

    /// Returns the indices of players still in the game.
    pub fn active_players(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        (0..self.players.len()).filter(|&player| !self.is_eliminated(player))
    }

    /// Returns the player holding the winner mark in a round, if any.
    #[must_use]
    pub fn round_winner(&self, round: usize) -> Option<usize> {
        self.scores
            .iter()
            .position(|row| row.get(round).is_some_and(|score| score.is_winner()))
    }

    /// Returns the highlighting computed when the last round closed.
    #[must_use]
    pub const fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Returns notices that have not been dispatched yet.
    #[must_use]
    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Removes and returns all pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        core::mem::take(&mut self.notices)
    }

    /// Delivers all pending notices, oldest first.
    pub fn dispatch<N: Notifier + ?Sized>(&mut self, notifier: &mut N) {
        for notice in self.take_notices() {
            notifier.notify(&notice.message, notice.severity);
        }
    }

    /// Copies the stored state into a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            players: self.players.clone(),
            scores: self.scores.clone(),
            current_round: self.current_round,
            highlights: self.highlights.clone(),
        }
    }

    /// Restores a ledger from a snapshot.
    ///
    /// A snapshot without players yields a ledger in setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is internally inconsistent.
    pub fn from_snapshot(snapshot: Snapshot, options: GameOptions) -> Result<Self, SnapshotError> {
        let mut game = Self::new(options);
        if snapshot.is_blank() {
            if !snapshot.scores.is_empty() {
                return Err(SnapshotError::PlayerMismatch);
            }
            return Ok(game);
        }

        if snapshot.scores.len() != snapshot.players.len() {
            return Err(SnapshotError::PlayerMismatch);
        }
        if snapshot.players.iter().any(|name| name.trim().is_empty()) {
            return Err(SnapshotError::EmptyName);
        }

        let rounds = snapshot.scores.first().map_or(0, Vec::len);
        if snapshot.scores.iter().any(|row| row.len() != rounds) {
            return Err(SnapshotError::RaggedRounds);
        }
        if snapshot.current_round != rounds + 1 {
            return Err(SnapshotError::RoundMismatch);
        }
        let closed = rounds.saturating_sub(1);
        if snapshot
            .scores
            .iter()
            .any(|row| row[..closed].iter().any(|score| score.is_out_of_range()))
        {
            return Err(SnapshotError::InvalidScore);
        }

        let highlights = &snapshot.highlights;
        if highlights
            .leaders
            .iter()
            .chain(&highlights.at_risk)
            .any(|&player| player >= snapshot.players.len())
        {
            return Err(SnapshotError::UnknownHighlight);
        }

        game.players = snapshot.players;
        game.scores = snapshot.scores;
        game.current_round = snapshot.current_round;
        game.highlights = snapshot.highlights;
        game.state = if game.active_players().count() < 2 {
            GameState::GameOver
        } else {
            GameState::InProgress
        };

        log::info!(
            "restored game with {} players at round {}",
            game.player_count(),
            game.round_number()
        );

        Ok(game)
    }

    fn push_notice(&mut self, message: impl Into<String>, severity: Severity) {
        self.notices.push(Notice::new(message, severity));
    }

    /// Moves to [`GameState::GameOver`] once fewer than two players remain.
    fn refresh_state(&mut self) {
        if self.state != GameState::InProgress {
            return;
        }
        let remaining: Vec<usize> = self.active_players().collect();
        if remaining.len() >= 2 {
            return;
        }

        self.state = GameState::GameOver;
        let message = match remaining.as_slice() {
            [last] => format!("Game over! {} wins.", self.players[*last]),
            _ => String::from("Game over! All players eliminated."),
        };
        log::info!("{message}");
        self.push_notice(message, Severity::Info);
    }
}
