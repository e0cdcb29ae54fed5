use chrono::NaiveDate;
use habitlog::{
    BookCompletion, Connect, DayPatch, DayType, FileStore, ReadBook, Reflection, Tier, Tracker,
    daily_score,
};
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn file_tracker(dir: &std::path::Path) -> Tracker<FileStore> {
    Tracker::new(FileStore::open(dir).unwrap())
}

#[test]
fn full_day_lifecycle_over_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let monday = date(2026, 3, 16);

    {
        let mut tracker = file_tracker(dir.path());
        tracker
            .update_day(
                monday,
                DayPatch {
                    no_fast_food: Some(true),
                    duolingo: Some(true),
                    inbox_review: Some(true),
                    walks: Some(2),
                    read_book: Some(ReadBook::Done(BookCompletion {
                        title: "Piranesi".into(),
                        rating: 4.5,
                    })),
                    happy: Some(Reflection::Pos),
                    healthy: Some(Reflection::Pos),
                    accomplished: Some(Reflection::Neu),
                    ..DayPatch::default()
                },
            )
            .unwrap();
        tracker.log_connection("Sarah", monday).unwrap();
        tracker
            .update_day(
                monday,
                DayPatch {
                    connect: Some(Connect::Name("Sarah".into())),
                    ..DayPatch::default()
                },
            )
            .unwrap();
    }

    // A fresh tracker over the same directory sees the persisted state.
    let mut tracker = file_tracker(dir.path());
    let day = tracker.get_day(monday);
    assert_eq!(day.day_type, DayType::Work);
    assert!(day.no_fast_food);
    assert_eq!(day.walks, 2);
    assert_eq!(day.connect, Connect::Name("Sarah".into()));

    // no_fast_food + duolingo + connect + inbox + reflections = 5.
    let score = daily_score(&day);
    assert_eq!(score.score, 5);
    assert_eq!(score.max_score, 10);
    assert_eq!(score.tier, Tier::Yellow);

    let stats = tracker.yearly_stats(2026);
    assert_eq!(stats.book_count, 1);
    assert_eq!(stats.books[0].title, "Piranesi");
    assert_eq!(stats.total_walks, 2);
    assert_eq!(stats.connection_counts.get("Sarah"), Some(&1));

    let connections = tracker.get_connections().unwrap();
    let sarah = connections.iter().find(|c| c.name == "Sarah").unwrap();
    assert_eq!(sarah.last_contact.as_deref(), Some("2026-03-16"));
}

#[test]
fn corrupt_documents_degrade_to_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("days.json"), b"{{{{").unwrap();
    fs::write(dir.path().join("contacts.json"), b"not json either").unwrap();

    let mut tracker = file_tracker(dir.path());
    let saturday = date(2026, 3, 14);
    let day = tracker.get_day(saturday);
    assert_eq!(day.day_type, DayType::Play);
    assert_eq!(daily_score(&day).score, 0);

    // The ledger re-seeds and the tracker keeps working.
    assert!(!tracker.get_connections().unwrap().is_empty());
    tracker
        .update_day(
            saturday,
            DayPatch {
                creativity: Some(true),
                ..DayPatch::default()
            },
        )
        .unwrap();
    assert!(tracker.get_day(saturday).creativity);
}

#[test]
fn clear_all_wipes_the_data_directory_documents() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = file_tracker(dir.path());
    tracker
        .update_day(
            date(2026, 3, 16),
            DayPatch {
                duolingo: Some(true),
                ..DayPatch::default()
            },
        )
        .unwrap();
    tracker.log_connection("Ben", date(2026, 3, 16)).unwrap();

    tracker.clear_all().unwrap();
    assert!(!dir.path().join("days.json").exists());
    assert!(!dir.path().join("contacts.json").exists());
    assert!(tracker.dataset().is_empty());

    // First access after the wipe re-seeds the roster.
    let reseeded = tracker.get_connections().unwrap();
    assert!(reseeded.iter().all(|c| c.history.is_empty()));
}

#[test]
fn suggestions_draw_from_the_persisted_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = file_tracker(dir.path());
    let picks = tracker.suggested_connections().unwrap();
    assert!(!picks.is_empty());
    assert!(picks.len() <= habitlog::SUGGESTION_COUNT);

    let ledger = tracker.get_connections().unwrap();
    for pick in &picks {
        assert!(ledger.iter().any(|c| c.name == pick.name));
    }
}
