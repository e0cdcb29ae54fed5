use crate::dates;
use crate::errors::{StorageError, TrackerError};
use crate::models::{Connect, Dataset, DayPatch, DayRecord, ReadBook};
use crate::stats::{self, MonthRollup, YearlyStats};
use crate::storage::Storage;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

pub(crate) const DAYS_KEY: &str = "days";
pub(crate) const CONTACTS_KEY: &str = "contacts";

/// The tracker core behind a storage port. Queries re-read the port on
/// every call; nothing is cached between operations. Commands read the
/// full document, apply one change, and write the full document back.
pub struct Tracker<S: Storage> {
    storage: S,
}

impl<S: Storage> Tracker<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads a document, masking a malformed one as empty. Losing a corrupt
    /// document beats refusing to start.
    pub(crate) fn read_doc<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.storage.read(key) {
            Some(value) => match serde_json::from_value(value) {
                Ok(doc) => doc,
                Err(err) => {
                    error!("malformed `{key}` document, treating as empty: {err}");
                    T::default()
                }
            },
            None => T::default(),
        }
    }

    pub(crate) fn write_doc<T: Serialize>(&mut self, key: &str, doc: &T) -> Result<(), TrackerError> {
        let value = serde_json::to_value(doc).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.storage.write(key, &value)?;
        Ok(())
    }

    pub fn dataset(&self) -> Dataset {
        self.read_doc(DAYS_KEY)
    }

    /// Fully resolved record for `date`. Absent or partial stored data is
    /// filled with defaults; nothing is written back.
    pub fn get_day(&self, date: NaiveDate) -> DayRecord {
        match self.dataset().remove(&dates::date_key(date)) {
            Some(stored) => DayRecord::from_stored(date, stored),
            None => DayRecord::default_for(date),
        }
    }

    /// Applies a shallow patch to `date` and persists the whole dataset.
    /// Rejects a completed book with an empty title and a connect entry
    /// with an empty name before anything is written.
    pub fn update_day(&mut self, date: NaiveDate, patch: DayPatch) -> Result<DayRecord, TrackerError> {
        if let Some(ReadBook::Done(book)) = &patch.read_book {
            if book.title.trim().is_empty() {
                return Err(TrackerError::EmptyBookTitle);
            }
        }
        if let Some(Connect::Name(name)) = &patch.connect {
            if name.trim().is_empty() {
                return Err(TrackerError::EmptyContactName);
            }
        }

        let mut dataset = self.dataset();
        let key = dates::date_key(date);
        let mut day = match dataset.remove(&key) {
            Some(stored) => DayRecord::from_stored(date, stored),
            None => DayRecord::default_for(date),
        };
        patch.apply(&mut day);
        dataset.insert(key, day.to_stored());
        self.write_doc(DAYS_KEY, &dataset)?;
        Ok(day)
    }

    pub fn increment_walks(&mut self, date: NaiveDate) -> Result<DayRecord, TrackerError> {
        let walks = self.get_day(date).walks.saturating_add(1);
        self.update_day(
            date,
            DayPatch {
                walks: Some(walks),
                ..DayPatch::default()
            },
        )
    }

    /// Floors at zero; decrementing an empty counter changes nothing.
    pub fn decrement_walks(&mut self, date: NaiveDate) -> Result<DayRecord, TrackerError> {
        let walks = self.get_day(date).walks.saturating_sub(1);
        self.update_day(
            date,
            DayPatch {
                walks: Some(walks),
                ..DayPatch::default()
            },
        )
    }

    /// Wipes both documents. Irreversible; confirmation is the caller's job.
    pub fn clear_all(&mut self) -> Result<(), TrackerError> {
        self.storage.delete(DAYS_KEY)?;
        self.storage.delete(CONTACTS_KEY)?;
        Ok(())
    }

    pub fn yearly_stats(&self, year: i32) -> YearlyStats {
        stats::yearly_stats_at(Local::now().date_naive(), year, &self.dataset())
    }

    pub fn month_rollup(&self, year: i32, month: u32) -> MonthRollup {
        stats::month_rollup_at(Local::now().date_naive(), year, month, &self.dataset())
    }
}
