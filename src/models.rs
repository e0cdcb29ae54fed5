use crate::dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Governs which habits count toward the score and the attainable maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Work,
    Play,
}

impl DayType {
    /// Default for a date with no stored override: weekends are play days.
    pub fn for_date(date: NaiveDate) -> Self {
        if dates::is_weekend(date) {
            DayType::Play
        } else {
            DayType::Work
        }
    }
}

/// End-of-day sentiment rating. `Na` means "not answered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reflection {
    #[default]
    Na,
    Pos,
    Neu,
    Neg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCompletion {
    pub title: String,
    pub rating: f64,
}

/// The `read_book` field as stored: `false` (not finished), a completed
/// book, or a legacy bare `true` from records that predate book details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadBook {
    Flag(bool),
    Done(BookCompletion),
}

impl Default for ReadBook {
    fn default() -> Self {
        ReadBook::Flag(false)
    }
}

impl ReadBook {
    pub fn is_completed(&self) -> bool {
        !matches!(self, ReadBook::Flag(false))
    }
}

/// The `connect` field as stored: `false`, a contact name, or a legacy
/// bare `true` with the name lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Connect {
    Flag(bool),
    Name(String),
}

impl Default for Connect {
    fn default() -> Self {
        Connect::Flag(false)
    }
}

impl Connect {
    pub fn is_set(&self) -> bool {
        !matches!(self, Connect::Flag(false))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Connect::Name(name) => Some(name),
            Connect::Flag(_) => None,
        }
    }
}

/// A day as it sits in storage. Every field defaults so records written by
/// earlier schema generations deserialize without migration; `day_type`
/// stays unset until a write pins it, deriving from the weekend rule
/// until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_type: Option<DayType>,
    #[serde(default)]
    pub no_fast_food: bool,
    #[serde(default)]
    pub low_social_media: bool,
    #[serde(default)]
    pub duolingo: bool,
    #[serde(default)]
    pub reading_pages: bool,
    #[serde(default)]
    pub creativity: bool,
    #[serde(default)]
    pub inbox_review: bool,
    #[serde(default)]
    pub calendar_review: bool,
    #[serde(default)]
    pub exercise_break: bool,
    #[serde(default)]
    pub walks: u32,
    #[serde(default)]
    pub read_book: ReadBook,
    #[serde(default)]
    pub connect: Connect,
    #[serde(default)]
    pub happy: Reflection,
    #[serde(default)]
    pub healthy: Reflection,
    #[serde(default)]
    pub accomplished: Reflection,
}

/// A fully resolved day: every field has a value, `day_type` included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day_type: DayType,
    pub no_fast_food: bool,
    pub low_social_media: bool,
    pub duolingo: bool,
    pub reading_pages: bool,
    pub creativity: bool,
    pub inbox_review: bool,
    pub calendar_review: bool,
    pub exercise_break: bool,
    pub walks: u32,
    pub read_book: ReadBook,
    pub connect: Connect,
    pub happy: Reflection,
    pub healthy: Reflection,
    pub accomplished: Reflection,
}

impl DayRecord {
    pub fn default_for(date: NaiveDate) -> Self {
        Self::from_stored(date, StoredDay::default())
    }

    pub fn from_stored(date: NaiveDate, stored: StoredDay) -> Self {
        Self {
            day_type: stored.day_type.unwrap_or_else(|| DayType::for_date(date)),
            no_fast_food: stored.no_fast_food,
            low_social_media: stored.low_social_media,
            duolingo: stored.duolingo,
            reading_pages: stored.reading_pages,
            creativity: stored.creativity,
            inbox_review: stored.inbox_review,
            calendar_review: stored.calendar_review,
            exercise_break: stored.exercise_break,
            walks: stored.walks,
            read_book: stored.read_book,
            connect: stored.connect,
            happy: stored.happy,
            healthy: stored.healthy,
            accomplished: stored.accomplished,
        }
    }

    pub fn to_stored(&self) -> StoredDay {
        StoredDay {
            day_type: Some(self.day_type),
            no_fast_food: self.no_fast_food,
            low_social_media: self.low_social_media,
            duolingo: self.duolingo,
            reading_pages: self.reading_pages,
            creativity: self.creativity,
            inbox_review: self.inbox_review,
            calendar_review: self.calendar_review,
            exercise_break: self.exercise_break,
            walks: self.walks,
            read_book: self.read_book.clone(),
            connect: self.connect.clone(),
            happy: self.happy,
            healthy: self.healthy,
            accomplished: self.accomplished,
        }
    }

    /// True iff all three reflections were answered. Recomputed, never stored.
    pub fn reflection_complete(&self) -> bool {
        self.happy != Reflection::Na
            && self.healthy != Reflection::Na
            && self.accomplished != Reflection::Na
    }
}

/// Partial update to a day. Only the set fields change; tri-state values
/// (`read_book`, `connect`) are replaced wholesale, never merged inside.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayPatch {
    pub day_type: Option<DayType>,
    pub no_fast_food: Option<bool>,
    pub low_social_media: Option<bool>,
    pub duolingo: Option<bool>,
    pub reading_pages: Option<bool>,
    pub creativity: Option<bool>,
    pub inbox_review: Option<bool>,
    pub calendar_review: Option<bool>,
    pub exercise_break: Option<bool>,
    pub walks: Option<u32>,
    pub read_book: Option<ReadBook>,
    pub connect: Option<Connect>,
    pub happy: Option<Reflection>,
    pub healthy: Option<Reflection>,
    pub accomplished: Option<Reflection>,
}

impl DayPatch {
    pub fn apply(self, day: &mut DayRecord) {
        if let Some(value) = self.day_type {
            day.day_type = value;
        }
        if let Some(value) = self.no_fast_food {
            day.no_fast_food = value;
        }
        if let Some(value) = self.low_social_media {
            day.low_social_media = value;
        }
        if let Some(value) = self.duolingo {
            day.duolingo = value;
        }
        if let Some(value) = self.reading_pages {
            day.reading_pages = value;
        }
        if let Some(value) = self.creativity {
            day.creativity = value;
        }
        if let Some(value) = self.inbox_review {
            day.inbox_review = value;
        }
        if let Some(value) = self.calendar_review {
            day.calendar_review = value;
        }
        if let Some(value) = self.exercise_break {
            day.exercise_break = value;
        }
        if let Some(value) = self.walks {
            day.walks = value;
        }
        if let Some(value) = self.read_book {
            day.read_book = value;
        }
        if let Some(value) = self.connect {
            day.connect = value;
        }
        if let Some(value) = self.happy {
            day.happy = value;
        }
        if let Some(value) = self.healthy {
            day.healthy = value;
        }
        if let Some(value) = self.accomplished {
            day.accomplished = value;
        }
    }
}

/// The whole date -> day mapping, persisted as one document.
pub type Dataset = BTreeMap<String, StoredDay>;

/// A person in the connections ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub last_contact: Option<String>,
    #[serde(default)]
    pub history: BTreeSet<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_contact: None,
            history: BTreeSet::new(),
        }
    }
}
