use crate::models::{DayRecord, DayType};
use serde::Serialize;

pub const WORK_MAX_SCORE: u8 = 10;
pub const PLAY_MAX_SCORE: u8 = 7;

/// Status bucket for a day. Earlier schema generations also had a gray
/// bucket for single-point days; the current rules fold it into red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Gold,
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayScore {
    pub score: u8,
    pub max_score: u8,
    pub tier: Tier,
}

/// Scores a resolved day. Pure: same record, same score.
///
/// Base habits count on any day; the three office habits (inbox, calendar,
/// exercise break) only count on work days; answering all three
/// reflections is worth one more point. Book completion details never
/// affect the score, only the flags' truthiness does.
pub fn daily_score(day: &DayRecord) -> DayScore {
    let base = [
        day.no_fast_food,
        day.reading_pages,
        day.duolingo,
        day.creativity,
        day.connect.is_set(),
        day.low_social_media,
    ];
    let mut score = base.iter().filter(|&&done| done).count() as u8;

    if day.day_type == DayType::Work {
        let office = [day.inbox_review, day.calendar_review, day.exercise_break];
        score += office.iter().filter(|&&done| done).count() as u8;
    }

    if day.reflection_complete() {
        score += 1;
    }

    let max_score = match day.day_type {
        DayType::Work => WORK_MAX_SCORE,
        DayType::Play => PLAY_MAX_SCORE,
    };

    DayScore {
        score,
        max_score,
        tier: tier_for(score, max_score, day.day_type),
    }
}

pub fn tier_for(score: u8, max_score: u8, day_type: DayType) -> Tier {
    if score == max_score {
        return Tier::Gold;
    }
    let (green_at, yellow_at) = match day_type {
        DayType::Work => (7, 4),
        DayType::Play => (5, 3),
    };
    if score >= green_at {
        Tier::Green
    } else if score >= yellow_at {
        Tier::Yellow
    } else {
        Tier::Red
    }
}
