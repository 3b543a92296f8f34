use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::RoundCloseError;
use crate::notice::Severity;
use crate::options::MissingScorePolicy;
use crate::score::Score;
use crate::standing::Highlights;

use super::{Game, GameState, RoundOutcome};

impl Game {
    /// Closes the round just played and opens the next one.
    ///
    /// The open round is validated first; on failure nothing changes and the
    /// round stays open for correction. On success the next round is opened,
    /// newly eliminated players are reported and highlighting is recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error if no game is running, or if the open round:
    /// - is being played by one player or fewer (game over)
    /// - has active players without a score (with [`MissingScorePolicy::Reject`])
    /// - does not have exactly one winner among active players
    /// - contains numeric scores outside 2-80
    pub fn add_round(&mut self) -> Result<RoundOutcome, RoundCloseError> {
        if self.state == GameState::Setup {
            return Err(RoundCloseError::InvalidState);
        }

        let closed = match self.open_round() {
            Some(round) => {
                let column = self.validate_round(round).inspect_err(|err| {
                    log::warn!("round {} rejected: {err}", round + 1);
                    self.push_notice(format!("{err}"), Severity::Danger);
                })?;
                for (row, score) in self.scores.iter_mut().zip(column) {
                    row[round] = score;
                }
                Some(round)
            }
            None => None,
        };

        Ok(self.open_next_round(closed))
    }

    /// Checks a round and returns its cells as they should be committed.
    fn validate_round(&self, round: usize) -> Result<Vec<Score>, RoundCloseError> {
        let active: Vec<usize> = self.active_players().collect();
        if active.len() <= 1 {
            return Err(RoundCloseError::GameOver);
        }

        let mut column: Vec<Score> = self
            .scores
            .iter()
            .map(|row| row.get(round).copied().unwrap_or_default())
            .collect();

        // Eliminated players never carry a score forward.
        for (player, score) in column.iter_mut().enumerate() {
            if !active.contains(&player) {
                *score = Score::Empty;
            }
        }

        let missing: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&player| column[player].is_empty())
            .collect();

        match self.options.missing_scores {
            MissingScorePolicy::Reject => {
                if !missing.is_empty() {
                    return Err(RoundCloseError::MissingScores {
                        names: self.names_of(&missing),
                    });
                }
                Self::check_winner_count(&column, &active)?;
            }
            MissingScorePolicy::Penalty(points) => {
                Self::check_winner_count(&column, &active)?;
                for &player in &missing {
                    column[player] = Score::Points(points);
                }
            }
        }

        let invalid: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&player| column[player].is_out_of_range())
            .collect();
        if !invalid.is_empty() {
            return Err(RoundCloseError::OutOfRange {
                names: self.names_of(&invalid),
            });
        }

        Ok(column)
    }

    fn check_winner_count(column: &[Score], active: &[usize]) -> Result<(), RoundCloseError> {
        let found = active
            .iter()
            .filter(|&&player| column[player].is_winner())
            .count();
        if found == 1 {
            Ok(())
        } else {
            Err(RoundCloseError::WrongWinnerCount { found })
        }
    }

    fn names_of(&self, players: &[usize]) -> Vec<String> {
        players
            .iter()
            .filter_map(|&player| self.players.get(player).cloned())
            .collect()
    }

    /// Appends an empty round for every player and settles the closed one.
    pub(super) fn open_next_round(&mut self, closed: Option<usize>) -> RoundOutcome {
        let was_eliminated: Vec<bool> = (0..self.players.len())
            .map(|player| self.is_eliminated(player))
            .collect();

        for row in &mut self.scores {
            row.push(Score::Empty);
        }
        self.current_round += 1;

        if let Some(round) = closed {
            log::info!("round {} closed", round + 1);
            self.push_notice(
                format!("Round {} completed! Starting new round.", round + 1),
                Severity::Success,
            );
        }

        let eliminated: Vec<usize> = (0..self.players.len())
            .filter(|&player| !was_eliminated[player] && self.is_eliminated(player))
            .collect();
        for &player in &eliminated {
            let total = self.total(player).unwrap_or_default();
            log::info!("{} eliminated with {total} points", self.players[player]);
            self.push_notice(
                format!("{} is eliminated with {total} points!", self.players[player]),
                Severity::Danger,
            );
        }

        self.highlights = Highlights::from_totals(
            self.active_players()
                .map(|player| (player, self.total(player).unwrap_or_default())),
        );

        let game_over = self.active_players().count() < 2;
        self.refresh_state();

        RoundOutcome {
            closed_round: closed.map(|round| round + 1),
            open_round: self.round_number(),
            eliminated,
            game_over,
        }
    }
}
