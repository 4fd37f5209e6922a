use crate::domain::model::Record;
use parking_lot::RwLock;
use std::sync::Arc;

/// Ordered, append-only collection of records.
///
/// Every operation takes the same lock, so a query result is a consistent
/// point-in-time snapshot and `count` never sees a half-finished `add`.
/// Duplicate emails are kept; lookups resolve them first-inserted-wins.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Vec<Arc<Record>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, record: Record) {
        self.records.write().push(Arc::new(record));
    }

    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// 依 email 精確比對（大小寫敏感），回傳最早加入的那一筆
    pub fn find_by_key(&self, email: &str) -> Option<Arc<Record>> {
        self.records
            .read()
            .iter()
            .find(|record| record.email() == email)
            .cloned()
    }

    /// Returns a new vector of the matching records in insertion order.
    pub fn filter_by<P>(&self, predicate: P) -> Vec<Arc<Record>>
    where
        P: Fn(&Record) -> bool,
    {
        self.records
            .read()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub fn adults(&self) -> Vec<Arc<Record>> {
        self.filter_by(Record::is_adult)
    }
}

impl Extend<Record> for RecordStore {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut store = RecordStore::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ages(records: &[Arc<Record>]) -> Vec<Option<u32>> {
        records.iter().map(|record| record.age()).collect()
    }

    #[test]
    fn test_add_and_find() {
        let store = RecordStore::new();
        store.add(Record::with_age("Eve", "eve@example.com", 30));

        assert_eq!(store.count(), 1);
        let found = store.find_by_key("eve@example.com").unwrap();
        assert_eq!(found.name(), "Eve");
    }

    #[test]
    fn test_find_on_empty_store() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert!(store.find_by_key("anyone@example.com").is_none());
        assert!(store.find_by_key("").is_none());
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let store = RecordStore::new();
        store.add(Record::new("Eve", "eve@example.com"));
        assert!(store.find_by_key("EVE@example.com").is_none());
    }

    #[test]
    fn test_adults_excludes_minors_and_unknown() {
        let store: RecordStore = vec![
            Record::with_age("Bob", "bob@example.com", 25),
            Record::with_age("Charlie", "charlie@example.com", 15),
            Record::new("Dana", "dana@example.com"),
        ]
        .into_iter()
        .collect();

        let adults = store.adults();
        assert_eq!(adults.len(), 1);
        assert_eq!(adults[0].name(), "Bob");
    }

    #[test]
    fn test_duplicate_emails_first_wins() {
        let store = RecordStore::new();
        store.add(Record::with_age("A1", "a@x", 30));
        store.add(Record::with_age("B", "b@x", 10));
        store.add(Record::with_age("A2", "a@x", 99));

        assert_eq!(store.count(), 3);
        assert_eq!(store.find_by_key("a@x").unwrap().age(), Some(30));
        assert_eq!(ages(&store.adults()), vec![Some(30), Some(99)]);
    }

    #[test]
    fn test_filter_result_is_a_snapshot() {
        let store = RecordStore::new();
        store.add(Record::with_age("A", "a@x", 40));

        let snapshot = store.filter_by(|_| true);
        store.add(Record::with_age("B", "b@x", 50));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.filter_by(|_| true).len(), 2);
    }

    #[test]
    fn test_concurrent_adds_are_all_counted() {
        let store = Arc::new(RecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store.add(Record::new(format!("T{}", t), format!("{}-{}@x", t, i)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.count(), 800);
    }

    proptest! {
        #[test]
        fn prop_count_and_order_follow_adds(raw_ages in proptest::collection::vec(proptest::option::of(0u32..120), 0..50)) {
            let store = RecordStore::new();
            for (i, age) in raw_ages.iter().enumerate() {
                let email = format!("user{}@example.com", i);
                match age {
                    Some(age) => store.add(Record::with_age("User", email, *age)),
                    None => store.add(Record::new("User", email)),
                }
            }

            prop_assert_eq!(store.count(), raw_ages.len());
            let all = store.filter_by(|_| true);
            let emails: Vec<String> = all.iter().map(|r| r.email().to_string()).collect();
            let expected: Vec<String> = (0..raw_ages.len()).map(|i| format!("user{}@example.com", i)).collect();
            prop_assert_eq!(emails, expected);
            prop_assert_eq!(ages(&all), raw_ages);
        }

        #[test]
        fn prop_lookup_returns_first_duplicate(first in 0u32..120, second in 0u32..120) {
            let store = RecordStore::new();
            store.add(Record::with_age("First", "dup@example.com", first));
            store.add(Record::with_age("Second", "dup@example.com", second));

            let found = store.find_by_key("dup@example.com").unwrap();
            prop_assert_eq!(found.name(), "First");
            prop_assert_eq!(found.age(), Some(first));
        }
    }
}
