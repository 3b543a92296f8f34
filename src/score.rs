//! Score cells and raw input parsing.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScoreError;

/// Lowest accepted numeric score.
pub const MIN_POINTS: u8 = 2;

/// Highest accepted numeric score.
pub const MAX_POINTS: u8 = 80;

/// Text that marks the round winner.
pub const WINNER_MARK: &str = "R";

/// A single player's entry for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Score {
    /// Nothing entered yet.
    #[default]
    Empty,
    /// The player won the round; counts as zero.
    Winner,
    /// Penalty points for the round.
    Points(u8),
}

impl Score {
    /// Parses raw user input into a score.
    ///
    /// Input is trimmed and case-insensitive. An empty string clears the
    /// cell, `R` marks the winner and anything else must be an integer
    /// between [`MIN_POINTS`] and [`MAX_POINTS`].
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::OutOfRange`] if the input is neither empty, the
    /// winner mark nor an integer in range.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy_score::Score;
    ///
    /// assert_eq!(Score::parse(" r "), Ok(Score::Winner));
    /// assert_eq!(Score::parse("25"), Ok(Score::Points(25)));
    /// assert_eq!(Score::parse(""), Ok(Score::Empty));
    /// assert!(Score::parse("85").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ScoreError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(Self::Empty);
        }
        if value.eq_ignore_ascii_case(WINNER_MARK) {
            return Ok(Self::Winner);
        }

        let points: i64 = value.parse().map_err(|_| ScoreError::OutOfRange)?;
        u8::try_from(points)
            .ok()
            .filter(|points| (MIN_POINTS..=MAX_POINTS).contains(points))
            .map(Self::Points)
            .ok_or(ScoreError::OutOfRange)
    }

    /// Returns the points this cell adds to a total.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Points(points) => points as u32,
            Self::Empty | Self::Winner => 0,
        }
    }

    /// Returns whether nothing has been entered.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns whether this cell marks the round winner.
    #[must_use]
    pub const fn is_winner(self) -> bool {
        matches!(self, Self::Winner)
    }

    /// Returns whether a numeric cell lies outside the accepted range.
    #[must_use]
    pub const fn is_out_of_range(self) -> bool {
        match self {
            Self::Points(points) => points < MIN_POINTS || points > MAX_POINTS,
            Self::Empty | Self::Winner => false,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Winner => f.write_str(WINNER_MARK),
            Self::Points(points) => write!(f, "{points}"),
        }
    }
}

// Cells are stored as `null`, `"R"` or a bare integer.
impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Winner => serializer.serialize_str(WINNER_MARK),
            Self::Points(points) => serializer.serialize_u8(*points),
        }
    }
}

struct ScoreVisitor;

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = Score;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, \"R\" or an integer score")
    }

    fn visit_none<E: de::Error>(self) -> Result<Score, E> {
        Ok(Score::Empty)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Score, E> {
        Ok(Score::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Score, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Score, E> {
        if value.eq_ignore_ascii_case(WINNER_MARK) {
            Ok(Score::Winner)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Score, E> {
        u8::try_from(value)
            .map(Score::Points)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Score, E> {
        u8::try_from(value)
            .map(Score::Points)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(ScoreVisitor)
    }
}
