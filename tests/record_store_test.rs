use record_query::{mean, QueryError, Record, RecordStore};
use std::sync::Arc;

fn ages(records: &[Arc<Record>]) -> Vec<Option<u32>> {
    records.iter().map(|r| r.age()).collect()
}

/// 重複 email：先加入者優先，成年人依加入順序回傳
#[test]
fn test_duplicate_email_scenario() {
    let store = RecordStore::new();
    store.add(Record::with_age("First", "a@x", 30));
    store.add(Record::with_age("Kid", "b@x", 10));
    store.add(Record::with_age("Second", "a@x", 99));

    assert_eq!(store.count(), 3);
    assert_eq!(store.find_by_key("a@x").unwrap().age(), Some(30));
    assert_eq!(ages(&store.adults()), vec![Some(30), Some(99)]);
}

#[test]
fn test_user_service_flow() {
    let store = RecordStore::new();
    store.add(Record::with_age("Eve", "eve@example.com", 30));

    assert_eq!(store.count(), 1);
    let found = store
        .find_by_key("eve@example.com")
        .expect("Eve should be found");
    assert_eq!(found.name(), "Eve");
    assert_eq!(found.greeting(), "Hello, Eve!");
    assert!(store.find_by_key("nobody@example.com").is_none());
}

#[test]
fn test_adults_from_mixed_ages() {
    let store: RecordStore = vec![
        Record::with_age("Bob", "bob@example.com", 25),
        Record::with_age("Charlie", "charlie@example.com", 15),
        Record::new("Dana", "dana@example.com"),
    ]
    .into_iter()
    .collect();

    let adults = store.adults();
    assert_eq!(adults.len(), 1);
    assert_eq!(adults[0].age(), Some(25));
}

#[test]
fn test_filter_all_preserves_insertion_order() {
    let store = RecordStore::new();
    let names = ["Zed", "Amy", "Moe"];
    for (i, name) in names.iter().enumerate() {
        store.add(Record::new(*name, format!("{}@example.com", i)));
    }

    let all: Vec<String> = store
        .filter_by(|_| true)
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(all, names);
}

#[test]
fn test_mean_contract() {
    assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
    assert!(matches!(mean(&[]), Err(QueryError::EmptyInput)));
}

#[test]
fn test_store_is_shareable_across_threads() {
    let store = Arc::new(RecordStore::new());
    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            for i in 0..500 {
                store.add(Record::with_age("W", format!("w{}@x", i), 20));
            }
        })
    };

    for _ in 0..50 {
        let snapshot = store.filter_by(|_| true);
        assert!(snapshot.len() <= 500);
        assert!(snapshot.iter().all(|r| r.is_adult()));
    }

    writer.join().unwrap();
    assert_eq!(store.count(), 500);
    assert_eq!(store.adults().len(), 500);
}
