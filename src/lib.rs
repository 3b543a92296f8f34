//! A score ledger for Rummy-style elimination games with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that records per-round scores, closes
//! rounds with validation, and derives totals, danger tiers, elimination and
//! leader highlighting. Persistence and user notification are left to the
//! caller through [`SnapshotStore`] and [`Notifier`].
//!
//! # Example
//!
//! ```
//! use rummy_score::{Game, GameOptions};
//!
//! let mut game = Game::new(GameOptions::default());
//! game.start_game(["Ada", "Bo", "Cy"]).unwrap();
//!
//! game.set_score(0, 0, "20").unwrap();
//! game.set_score(0, 1, "R").unwrap();
//! game.set_score(0, 2, "25").unwrap();
//! game.add_round().unwrap();
//!
//! assert_eq!(game.total(2), Some(25));
//! assert_eq!(game.round_number(), 2);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod error;
pub mod game;
pub mod notice;
pub mod options;
pub mod score;
pub mod session;
pub mod snapshot;
pub mod standing;

// Re-export main types
#[cfg(feature = "std")]
pub use error::StoreError;
pub use error::{CloseReason, RoundCloseError, ScoreError, SessionError, SnapshotError, StartError};
pub use game::{Game, GameState, RoundOutcome};
pub use notice::{Notice, Notifier, Severity};
pub use options::{GameOptions, MissingScorePolicy};
pub use score::{MAX_POINTS, MIN_POINTS, Score, WINNER_MARK};
pub use session::Session;
#[cfg(feature = "std")]
pub use snapshot::JsonFileStore;
pub use snapshot::{MemoryStore, Snapshot, SnapshotStore};
pub use standing::{DangerTier, Highlights};
