use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use calendar_chart::core::{
    DatasetSource, DateDataStore, DateKeyFormat, DateKeyFormatter, Observation,
};
use calendar_chart::{CalendarError, LoadError};

fn store() -> DateDataStore {
    DateDataStore::new(DateKeyFormatter::default())
}

fn users(values: &[(&str, f64)]) -> Vec<Observation> {
    values
        .iter()
        .map(|(label, value)| Observation::new(*label, *value))
        .collect()
}

#[test]
fn new_store_is_empty() {
    let store = store();
    assert!(!store.has("01-09-2025"));
    assert!(store.rows_for("01-09-2025").is_empty());
    assert!(store.snapshot().is_empty());
}

#[test]
fn rows_keep_their_supplied_order() {
    let store = store();
    let rows = users(&[("user_3", 3.0), ("user_1", 1.0), ("user_2", 2.0)]);
    store
        .replace_all(DatasetSource::new().with_date("01-09-2025", rows.clone()))
        .expect("valid dataset");

    assert!(store.has("01-09-2025"));
    assert_eq!(store.rows_for("01-09-2025"), rows);
    assert_eq!(store.rows_for("01-09-2025"), rows);
}

#[test]
fn lookups_accept_keys_and_plain_strings() {
    let store = store();
    store
        .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("user_1", 1.0)])))
        .expect("valid dataset");
    let key = store
        .formatter()
        .format(chrono::NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"));

    assert!(store.has(&key));
    assert!(store.has("01-09-2025"));
    assert_eq!(store.rows_for(&key), store.rows_for("01-09-2025"));
}

#[test]
fn zero_row_dates_are_kept_but_have_no_data() {
    let store = store();
    let dataset = store
        .replace_all(
            DatasetSource::new()
                .with_date("01-09-2025", Vec::new())
                .with_date("02-09-2025", users(&[("user_1", 4.0)])),
        )
        .expect("valid dataset");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.dates_with_data(), 1);
    assert!(!store.has("01-09-2025"));
    assert!(store.rows_for("01-09-2025").is_empty());
    assert!(store.has("02-09-2025"));
}

#[test]
fn invalid_key_rejects_whole_replacement() {
    let store = store();
    store
        .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("user_1", 1.0)])))
        .expect("initial dataset");

    let err = store
        .replace_all(
            DatasetSource::new()
                .with_date("02-09-2025", users(&[("user_1", 9.0)]))
                .with_date("bad-key", users(&[("user_1", 2.0)])),
        )
        .expect_err("bad key");

    assert!(matches!(
        err,
        CalendarError::Load(LoadError::InvalidDateKey { ref key, .. }) if key == "bad-key"
    ));
    assert_eq!(store.rows_for("01-09-2025"), users(&[("user_1", 1.0)]));
    assert!(!store.has("02-09-2025"));
}

#[test]
fn malformed_observations_are_load_errors() {
    let store = store();

    let err = store
        .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("  ", 1.0)])))
        .expect_err("blank label");
    assert_eq!(
        err.as_load_error(),
        Some(&LoadError::EmptyLabel {
            key: "01-09-2025".to_owned(),
            index: 0,
        })
    );

    let err = store
        .replace_all(
            DatasetSource::new()
                .with_date("01-09-2025", users(&[("user_1", 1.0), ("user_2", f64::NAN)])),
        )
        .expect_err("NaN value");
    assert_eq!(
        err.as_load_error(),
        Some(&LoadError::NonNumericValue {
            key: "01-09-2025".to_owned(),
            label: "user_2".to_owned(),
            index: 1,
        })
    );

    let err = store
        .replace_all(
            DatasetSource::new().with_date("01-09-2025", users(&[("user_1", f64::INFINITY)])),
        )
        .expect_err("infinite value");
    assert!(matches!(
        err.as_load_error(),
        Some(LoadError::NonNumericValue { .. })
    ));
    assert!(store.snapshot().is_empty());
}

#[test]
fn duplicate_dates_are_rejected() {
    let store = store();
    let err = store
        .replace_all(
            DatasetSource::new()
                .with_date("01-09-2025", users(&[("user_1", 1.0)]))
                .with_date("01-09-2025", users(&[("user_2", 2.0)])),
        )
        .expect_err("duplicate");
    assert_eq!(
        err.as_load_error(),
        Some(&LoadError::DuplicateDate {
            key: "01-09-2025".to_owned(),
        })
    );
}

#[test]
fn keys_are_validated_against_the_store_format() {
    let store = DateDataStore::new(DateKeyFormatter::new(DateKeyFormat::YearMonthDay));
    assert!(
        store
            .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("a", 1.0)])))
            .is_err()
    );
    store
        .replace_all(DatasetSource::new().with_date("2025-09-01", users(&[("a", 1.0)])))
        .expect("iso key");
    assert!(store.has("2025-09-01"));
}

#[test]
fn sequential_replacements_leave_only_the_last_dataset() {
    let store = store();
    store
        .replace_all(
            DatasetSource::new()
                .with_date("01-09-2025", users(&[("a1", 1.0), ("a2", 2.0)]))
                .with_date("03-09-2025", users(&[("a3", 3.0)])),
        )
        .expect("dataset A");
    store
        .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("b1", 10.0)])))
        .expect("dataset B");

    assert_eq!(store.rows_for("01-09-2025"), users(&[("b1", 10.0)]));
    assert!(!store.has("03-09-2025"));
}

#[test]
fn snapshots_are_unaffected_by_later_replacements() {
    let store = store();
    store
        .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("a", 1.0)])))
        .expect("dataset A");
    let before = store.snapshot();
    store
        .replace_all(DatasetSource::new().with_date("01-09-2025", users(&[("b", 2.0)])))
        .expect("dataset B");

    assert_eq!(before.rows_for("01-09-2025"), users(&[("a", 1.0)]).as_slice());
    assert_eq!(store.rows_for("01-09-2025"), users(&[("b", 2.0)]));
}

#[test]
fn concurrent_readers_see_whole_datasets_only() {
    let rows_a = users(&[("a1", 1.0), ("a2", 2.0)]);
    let rows_b = users(&[("b1", 10.0), ("b2", 20.0), ("b3", 30.0)]);
    let source_a = DatasetSource::new().with_date("01-09-2025", rows_a.clone());
    let source_b = DatasetSource::new().with_date("01-09-2025", rows_b.clone());

    let store = Arc::new(
        DateDataStore::from_source(DateKeyFormatter::default(), source_a.clone())
            .expect("dataset A"),
    );
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            let (rows_a, rows_b) = (rows_a.clone(), rows_b.clone());
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) || reads == 0 {
                    let rows = store.rows_for("01-09-2025");
                    assert!(rows == rows_a || rows == rows_b, "torn read: {rows:?}");
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    for round in 0..500 {
        let source = if round % 2 == 0 {
            source_b.clone()
        } else {
            source_a.clone()
        };
        store.replace_all(source).expect("valid replacement");
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().expect("reader thread") > 0);
    }
    assert_eq!(store.rows_for("01-09-2025"), rows_a);
}
