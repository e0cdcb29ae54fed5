pub mod connections;
pub mod dates;
pub mod days;
pub mod errors;
pub mod models;
pub mod scoring;
pub mod stats;
pub mod storage;

pub use connections::{SUGGESTION_COUNT, suggest};
pub use days::Tracker;
pub use errors::{StorageError, TrackerError};
pub use models::{
    BookCompletion, Connect, Contact, Dataset, DayPatch, DayRecord, DayType, ReadBook, Reflection,
    StoredDay,
};
pub use scoring::{DayScore, Tier, daily_score, tier_for};
pub use stats::{MonthRollup, YearlyStats, month_rollup, reflection_percent, yearly_stats};
pub use storage::{FileStore, MemoryStore, Storage, resolve_data_dir};
