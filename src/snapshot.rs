//! Serializable snapshots of the ledger and the stores that keep them.

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::score::Score;
use crate::standing::Highlights;

/// A plain copy of everything the ledger stores.
///
/// Derived values (totals, tiers, elimination) are not included; they are
/// recomputed from `scores`. Highlights are kept so a restored game shows
/// the same leaders as before.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Player names in seat order.
    pub players: Vec<String>,
    /// One score row per player, all the same length.
    pub scores: Vec<Vec<Score>>,
    /// Round counter; one more than the number of recorded rounds once started.
    pub current_round: usize,
    /// Highlighting from the last closed round.
    #[serde(default)]
    pub highlights: Highlights,
}

impl Snapshot {
    /// Returns whether the snapshot describes no game at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.players.is_empty()
    }
}

/// Whole-snapshot persistence.
pub trait SnapshotStore {
    /// Error returned by the store.
    type Error;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// Returns the stored snapshot, or `None` if there is none.
    ///
    /// A stored snapshot without players is reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be read.
    fn load(&mut self) -> Result<Option<Snapshot>, Self::Error>;

    /// Removes the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be removed.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Keeps the snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { snapshot: None }
    }

    /// Returns the stored snapshot without filtering blank ones.
    #[must_use]
    pub const fn get(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

impl SnapshotStore for MemoryStore {
    type Error = Infallible;

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Infallible> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Snapshot>, Infallible> {
        Ok(self.snapshot.clone().filter(|snapshot| !snapshot.is_blank()))
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::JsonFileStore;

#[cfg(feature = "std")]
mod file {
    use std::fs;
    use std::io::{self, BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    use super::{Snapshot, SnapshotStore};
    use crate::error::StoreError;

    /// Keeps the snapshot as a JSON file.
    ///
    /// Saves go through a sibling temporary file that is renamed into place,
    /// so a reader never sees a half-written snapshot.
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        /// Creates a store backed by `path`. The file need not exist yet.
        #[must_use]
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Returns the backing file path.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut name = self.path.file_name().unwrap_or_default().to_os_string();
            name.push(".tmp");
            self.path.with_file_name(name)
        }
    }

    impl SnapshotStore for JsonFileStore {
        type Error = StoreError;

        fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
            let temp = self.temp_path();
            let mut writer = BufWriter::new(fs::File::create(&temp)?);
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
            drop(writer);
            fs::rename(&temp, &self.path)?;
            log::debug!("saved snapshot to {}", self.path.display());
            Ok(())
        }

        fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
            let file = match fs::File::open(&self.path) {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(err.into()),
            };
            let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
            log::debug!("loaded snapshot from {}", self.path.display());
            Ok(Some(snapshot).filter(|snapshot| !snapshot.is_blank()))
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            }
        }
    }
}
