use crate::dates;
use crate::days::{CONTACTS_KEY, Tracker};
use crate::errors::TrackerError;
use crate::models::Contact;
use crate::storage::Storage;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Roster seeded into an empty ledger on first access.
const INITIAL_ROSTER: &[&str] = &[
    "Mom",
    "Dad",
    "Grandma",
    "Aunt Lisa",
    "Ben",
    "Sarah",
    "Jake",
    "Emily",
    "Chris",
    "Priya",
    "Marco",
    "Tom",
];

/// How many of the most-overdue contacts feed the suggestion draw.
pub const OVERDUE_POOL: usize = 10;
/// How many suggestions a draw produces.
pub const SUGGESTION_COUNT: usize = 5;

impl<S: Storage> Tracker<S> {
    /// The full ledger. An empty ledger is seeded from the initial roster
    /// and persisted; once at least one contact exists it never re-seeds.
    pub fn get_connections(&mut self) -> Result<Vec<Contact>, TrackerError> {
        let contacts: Vec<Contact> = self.read_doc(CONTACTS_KEY);
        if !contacts.is_empty() {
            return Ok(contacts);
        }
        let seeded: Vec<Contact> = INITIAL_ROSTER.iter().map(|name| Contact::new(*name)).collect();
        self.write_doc(CONTACTS_KEY, &seeded)?;
        Ok(seeded)
    }

    /// Records a connection with `name` on `date`, creating the contact on
    /// first mention. Idempotent per date in `history`; `last_contact`
    /// always becomes the just-logged date (most-recently-logged
    /// semantics, matching how the feature has always behaved).
    pub fn log_connection(&mut self, name: &str, date: NaiveDate) -> Result<Vec<Contact>, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyContactName);
        }

        let mut contacts = self.get_connections()?;
        let key = dates::date_key(date);
        match contacts.iter_mut().find(|contact| contact.name == name) {
            Some(contact) => {
                contact.history.insert(key.clone());
                contact.last_contact = Some(key);
            }
            None => {
                let mut contact = Contact::new(name);
                contact.history.insert(key.clone());
                contact.last_contact = Some(key);
                contacts.push(contact);
            }
        }
        self.write_doc(CONTACTS_KEY, &contacts)?;
        Ok(contacts)
    }

    /// Undoes a logged connection. `last_contact` falls back to the latest
    /// remaining history entry, or to never-contacted when none remain.
    /// Unknown contacts and dates are a no-op.
    pub fn revert_connection(&mut self, name: &str, date: NaiveDate) -> Result<Vec<Contact>, TrackerError> {
        let mut contacts: Vec<Contact> = self.read_doc(CONTACTS_KEY);
        let key = dates::date_key(date);
        if let Some(contact) = contacts.iter_mut().find(|contact| contact.name == name.trim()) {
            if contact.history.remove(&key) {
                contact.last_contact = contact.history.iter().next_back().cloned();
                self.write_doc(CONTACTS_KEY, &contacts)?;
            }
        }
        Ok(contacts)
    }

    /// Random sample of overdue contacts, seeding the ledger if needed.
    pub fn suggested_connections(&mut self) -> Result<Vec<Contact>, TrackerError> {
        let contacts = self.get_connections()?;
        Ok(suggest(&contacts, &mut rand::rng()))
    }
}

/// Draws up to five contacts, uniformly without replacement, from the ten
/// with the oldest `last_contact` (never-contacted first). The randomness
/// keeps the suggestions from being the same five names every time while
/// still favoring neglected people.
pub fn suggest<R: Rng + ?Sized>(contacts: &[Contact], rng: &mut R) -> Vec<Contact> {
    let mut ranked: Vec<&Contact> = contacts.iter().collect();
    ranked.sort_by(|a, b| a.last_contact.cmp(&b.last_contact));
    ranked.truncate(OVERDUE_POOL);
    ranked
        .choose_multiple(rng, SUGGESTION_COUNT)
        .map(|&contact| contact.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::new(MemoryStore::new())
    }

    #[test]
    fn empty_ledger_seeds_once() {
        let mut t = tracker();
        let seeded = t.get_connections().unwrap();
        assert_eq!(seeded.len(), INITIAL_ROSTER.len());
        assert!(seeded.iter().all(|c| c.last_contact.is_none() && c.history.is_empty()));

        // A later call sees the persisted ledger, not a fresh seed.
        t.log_connection("Sarah", date(2026, 2, 1)).unwrap();
        let again = t.get_connections().unwrap();
        let sarah = again.iter().find(|c| c.name == "Sarah").unwrap();
        assert_eq!(sarah.last_contact.as_deref(), Some("2026-02-01"));
    }

    #[test]
    fn logging_creates_unknown_contacts() {
        let mut t = tracker();
        let contacts = t.log_connection("Robin", date(2026, 2, 1)).unwrap();
        let robin = contacts.iter().find(|c| c.name == "Robin").unwrap();
        assert_eq!(robin.last_contact.as_deref(), Some("2026-02-01"));
        assert!(robin.history.contains("2026-02-01"));
    }

    #[test]
    fn logging_is_idempotent_per_date() {
        let mut t = tracker();
        t.log_connection("Ben", date(2026, 2, 1)).unwrap();
        let contacts = t.log_connection("Ben", date(2026, 2, 1)).unwrap();
        let ben = contacts.iter().find(|c| c.name == "Ben").unwrap();
        assert_eq!(ben.history.len(), 1);
    }

    #[test]
    fn last_contact_is_most_recently_logged_not_max() {
        let mut t = tracker();
        t.log_connection("Ben", date(2026, 3, 1)).unwrap();
        let contacts = t.log_connection("Ben", date(2026, 2, 1)).unwrap();
        let ben = contacts.iter().find(|c| c.name == "Ben").unwrap();
        assert_eq!(ben.last_contact.as_deref(), Some("2026-02-01"));
        assert_eq!(ben.history.len(), 2);
    }

    #[test]
    fn log_then_revert_round_trips() {
        let mut t = tracker();
        t.log_connection("Emily", date(2026, 2, 1)).unwrap();
        let before = t.get_connections().unwrap();

        t.log_connection("Emily", date(2026, 3, 1)).unwrap();
        let after = t.revert_connection("Emily", date(2026, 3, 1)).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn revert_recomputes_last_contact_from_history_max() {
        let mut t = tracker();
        t.log_connection("Emily", date(2026, 3, 1)).unwrap();
        t.log_connection("Emily", date(2026, 1, 15)).unwrap();
        let contacts = t.revert_connection("Emily", date(2026, 1, 15)).unwrap();
        let emily = contacts.iter().find(|c| c.name == "Emily").unwrap();
        assert_eq!(emily.last_contact.as_deref(), Some("2026-03-01"));
    }

    #[test]
    fn revert_to_empty_history_clears_last_contact() {
        let mut t = tracker();
        t.log_connection("Emily", date(2026, 3, 1)).unwrap();
        let contacts = t.revert_connection("Emily", date(2026, 3, 1)).unwrap();
        let emily = contacts.iter().find(|c| c.name == "Emily").unwrap();
        assert_eq!(emily.last_contact, None);
        assert!(emily.history.is_empty());
    }

    #[test]
    fn revert_of_unknown_contact_or_date_is_a_no_op() {
        let mut t = tracker();
        t.log_connection("Emily", date(2026, 3, 1)).unwrap();
        let before = t.get_connections().unwrap();
        assert_eq!(t.revert_connection("Nobody", date(2026, 3, 1)).unwrap(), before);
        assert_eq!(t.revert_connection("Emily", date(2026, 4, 1)).unwrap(), before);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut t = tracker();
        let err = t.log_connection("  ", date(2026, 3, 1)).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyContactName));
    }

    #[test]
    fn suggestions_come_from_the_overdue_pool() {
        let mut contacts: Vec<Contact> = (0..20)
            .map(|i| {
                let mut contact = Contact::new(format!("person-{i:02}"));
                contact.last_contact = Some(format!("2026-01-{:02}", i + 1));
                contact
            })
            .collect();
        // Two never-contacted people must rank most overdue.
        contacts.push(Contact::new("fresh-a"));
        contacts.push(Contact::new("fresh-b"));

        let mut rng = StdRng::seed_from_u64(7);
        let picks = suggest(&contacts, &mut rng);
        assert_eq!(picks.len(), SUGGESTION_COUNT);

        // Pool: the two never-contacted plus the eight oldest dates.
        for pick in &picks {
            let in_pool = pick.last_contact.is_none()
                || pick.last_contact.as_deref() < Some("2026-01-09");
            assert!(in_pool, "{} outside overdue pool", pick.name);
        }

        // Distinct picks.
        let mut names: Vec<_> = picks.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), picks.len());
    }

    #[test]
    fn suggestions_cap_at_available_contacts() {
        let contacts = vec![Contact::new("only-one")];
        let mut rng = StdRng::seed_from_u64(1);
        let picks = suggest(&contacts, &mut rng);
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn seeded_rng_makes_the_draw_deterministic() {
        let contacts: Vec<Contact> = (0..12).map(|i| Contact::new(format!("p{i}"))).collect();
        let a = suggest(&contacts, &mut StdRng::seed_from_u64(42));
        let b = suggest(&contacts, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
