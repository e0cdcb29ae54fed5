use crate::dates;
use crate::models::{Connect, Dataset, DayRecord, ReadBook, Reflection};
use crate::scoring::{self, Tier};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Title substituted for legacy `read_book: true` records that predate
/// book details.
const UNKNOWN_BOOK_TITLE: &str = "Unknown Book";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookEntry {
    pub date: String,
    pub title: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReflectionTally {
    pub pos: u32,
    pub neu: u32,
    pub neg: u32,
    pub na: u32,
}

impl ReflectionTally {
    fn record(&mut self, reflection: Reflection) {
        match reflection {
            Reflection::Pos => self.pos += 1,
            Reflection::Neu => self.neu += 1,
            Reflection::Neg => self.neg += 1,
            Reflection::Na => self.na += 1,
        }
    }
}

/// Share of `valid_days` in a reflection state, in percent. The denominator
/// is floored at 1 so a year with no elapsed days reads as all zeros.
pub fn reflection_percent(count: u32, valid_days: u32) -> f64 {
    f64::from(count) / f64::from(valid_days.max(1)) * 100.0
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct YearlyStats {
    pub perfect_days: u32,
    pub total_walks: u32,
    pub books: Vec<BookEntry>,
    pub book_count: u32,
    pub total_rating: f64,
    pub average_rating: f64,
    pub total_connections: u32,
    pub connection_counts: BTreeMap<String, u32>,
    pub happy: ReflectionTally,
    pub healthy: ReflectionTally,
    pub accomplished: ReflectionTally,
    /// Stored days of the year on or before today; the denominator for
    /// reflection percentages.
    pub valid_days: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthRollup {
    pub score_sum: u32,
    pub max_sum: u32,
}

impl MonthRollup {
    pub fn percent(&self) -> f64 {
        f64::from(self.score_sum) / f64::from(self.max_sum.max(1)) * 100.0
    }
}

pub fn yearly_stats(year: i32, data: &Dataset) -> YearlyStats {
    yearly_stats_at(Local::now().date_naive(), year, data)
}

/// Single pass over every stored day of `year`. Reflection tallies and
/// `valid_days` only look at dates on or before `today`; the rest of the
/// summary covers the whole year.
pub fn yearly_stats_at(today: NaiveDate, year: i32, data: &Dataset) -> YearlyStats {
    let mut stats = YearlyStats::default();

    for (key, stored) in data {
        let Some(date) = dates::parse_key(key) else {
            continue;
        };
        if date.year() != year {
            continue;
        }

        let day = DayRecord::from_stored(date, stored.clone());
        let score = scoring::daily_score(&day);
        if score.tier == Tier::Gold {
            stats.perfect_days += 1;
        }
        stats.total_walks += day.walks;

        match &day.read_book {
            ReadBook::Done(book) => stats.books.push(BookEntry {
                date: key.clone(),
                title: book.title.clone(),
                rating: book.rating,
            }),
            ReadBook::Flag(true) => stats.books.push(BookEntry {
                date: key.clone(),
                title: UNKNOWN_BOOK_TITLE.to_string(),
                rating: 0.0,
            }),
            ReadBook::Flag(false) => {}
        }

        match &day.connect {
            Connect::Name(name) => {
                stats.total_connections += 1;
                *stats.connection_counts.entry(name.clone()).or_default() += 1;
            }
            Connect::Flag(true) => stats.total_connections += 1,
            Connect::Flag(false) => {}
        }

        if date <= today {
            stats.valid_days += 1;
            stats.happy.record(day.happy);
            stats.healthy.record(day.healthy);
            stats.accomplished.record(day.accomplished);
        }
    }

    stats.books.sort_by(|a, b| b.date.cmp(&a.date));
    stats.book_count = stats.books.len() as u32;
    stats.total_rating = stats.books.iter().map(|book| book.rating).sum();
    stats.average_rating = if stats.books.is_empty() {
        0.0
    } else {
        stats.total_rating / f64::from(stats.book_count)
    };

    stats
}

pub fn month_rollup(year: i32, month: u32, data: &Dataset) -> MonthRollup {
    month_rollup_at(Local::now().date_naive(), year, month, data)
}

/// Sums score and attainable maximum over every day of the month up to
/// `today`, counting unstored days too: a skipped day contributes 0 points
/// against its full weekday- or weekend-derived maximum, so skipping drags
/// the monthly percentage down instead of vanishing from it.
pub fn month_rollup_at(today: NaiveDate, year: i32, month: u32, data: &Dataset) -> MonthRollup {
    let mut rollup = MonthRollup::default();

    for day_of_month in 1..=dates::days_in_month(year, month) {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day_of_month) else {
            continue;
        };
        if date > today {
            break;
        }
        let day = match data.get(&dates::date_key(date)) {
            Some(stored) => DayRecord::from_stored(date, stored.clone()),
            None => DayRecord::default_for(date),
        };
        let score = scoring::daily_score(&day);
        rollup.score_sum += u32::from(score.score);
        rollup.max_sum += u32::from(score.max_score);
    }

    rollup
}
