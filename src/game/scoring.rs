use alloc::format;

use crate::error::ScoreError;
use crate::notice::Severity;
use crate::score::Score;
use crate::standing::DangerTier;

use super::{Game, GameState};

impl Game {
    /// Records a player's score for a round from raw input.
    ///
    /// The input is trimmed and case-insensitive: an empty string clears the
    /// cell, `R` marks the round winner and anything else must be an integer
    /// between 2 and 80. Closed rounds can be corrected too, but their cells
    /// cannot be cleared and their winner stays fixed. Returns the score now
    /// stored in the cell.
    ///
    /// A correction that pushes a player's locked total over the threshold
    /// eliminates them at once and clears their cell in the open round.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No game has been started
    /// - The player or round does not exist
    /// - The player is eliminated
    /// - The input is not a valid score
    /// - Another player already won this round
    /// - The edit would clear a closed cell or unmark a closed round's winner
    pub fn set_score(&mut self, round: usize, player: usize, raw: &str) -> Result<Score, ScoreError> {
        if self.state == GameState::Setup {
            return Err(ScoreError::InvalidState);
        }
        if player >= self.players.len() {
            return Err(ScoreError::PlayerNotFound);
        }
        if round >= self.round_count() {
            return Err(ScoreError::RoundNotFound);
        }
        if self.is_eliminated(player) {
            return Err(ScoreError::Eliminated);
        }

        let score = Score::parse(raw).inspect_err(|err| {
            self.push_notice(format!("{err}"), Severity::Warning);
        })?;

        let closed = self.open_round().is_some_and(|open| round < open);
        if closed
            && (score.is_empty() || (self.scores[player][round].is_winner() && !score.is_winner()))
        {
            let err = ScoreError::ClosedRound;
            self.push_notice(format!("{err}"), Severity::Warning);
            return Err(err);
        }

        if score.is_winner() {
            // Eliminated players no longer compete for the open round.
            let holder = if closed {
                self.round_winner(round)
            } else {
                self.active_players()
                    .find(|&other| self.scores[other][round].is_winner())
            };
            if let Some(winner) = holder.filter(|&winner| winner != player) {
                let err = ScoreError::Conflict { winner };
                self.push_notice(format!("{err}"), Severity::Warning);
                return Err(err);
            }
        }

        let tier_before = self.tier(player).unwrap_or(DangerTier::Normal);
        self.scores[player][round] = score;
        log::debug!(
            "round {} {}: {score:?}",
            round + 1,
            self.players[player]
        );

        // An eliminating correction also drops the player from the open round.
        if let Some(open) = self
            .open_round()
            .filter(|_| closed && self.is_eliminated(player))
        {
            self.scores[player][open] = Score::Empty;
        }

        self.announce_tier_change(round, player, tier_before);
        self.refresh_state();

        Ok(score)
    }

    fn announce_tier_change(&mut self, round: usize, player: usize, before: DangerTier) {
        let total = self.total(player).unwrap_or_default();
        let after = DangerTier::from_total(total, &self.options);
        let name = &self.players[player];

        // Corrections to closed rounds can eliminate straight away.
        if self.is_eliminated(player) {
            let message = format!("{name} is eliminated with {total} points!");
            log::info!("{name} eliminated by a correction to round {}", round + 1);
            self.push_notice(message, Severity::Danger);
            return;
        }

        if after <= before {
            return;
        }

        let message = match after {
            DangerTier::Eliminated => {
                format!("{name} will be eliminated after this round ({total} points)!")
            }
            DangerTier::Warning | DangerTier::Danger => {
                format!("{name} is in the danger zone ({total} points)")
            }
            DangerTier::Normal => return,
        };
        self.push_notice(message, Severity::Warning);
    }
}
