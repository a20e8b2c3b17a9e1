//! Integration tests: a fetch-and-cache pipeline built from opaque leaves.
//!
//! The remote, the byte cache and the holiday cache are all stand-ins
//! supplied by the test; the pipeline only composes them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use confluence::prelude::*;
use confluence::testing::CallCounter;
use serde::Deserialize;

const URL: &str = "https://date.nager.at/api/v2/PublicHolidays/2019/CA";

const BODY: &str = r#"[
    {"date": "2019-01-01", "name": "New Year's Day", "type": "Public", "global": true},
    {"date": "2019-02-18", "name": "Family Day", "type": "Public", "global": false}
]"#;

#[derive(Debug, Clone, PartialEq)]
enum FetchError {
    CacheMiss,
    Decode(String),
}

#[derive(Debug, Deserialize)]
struct HolidayRecord {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    global: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Holiday {
    name: String,
    kind: String,
    is_global: bool,
}

#[derive(Clone, Default)]
struct Store<T> {
    entries: Arc<Mutex<HashMap<String, T>>>,
}

impl<T: Clone> Store<T> {
    fn get(&self, key: &str) -> Option<T> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: T) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }
}

struct Fixture {
    pipeline: Node<(), Vec<Holiday>, FetchError>,
    bytes: Store<Vec<u8>>,
    holidays: Store<Vec<Holiday>>,
    remote_calls: CallCounter,
    byte_cache_calls: CallCounter,
}

fn fixture() -> Fixture {
    let bytes = Store::<Vec<u8>>::default();
    let holidays = Store::<Vec<Holiday>>::default();
    let remote_calls = CallCounter::new();
    let byte_cache_calls = CallCounter::new();

    let fetch_holiday_cache = {
        let holidays = holidays.clone();
        Node::<(), Vec<Holiday>, FetchError>::from_fn(move |_| {
            holidays.get(URL).ok_or(FetchError::CacheMiss)
        })
    };

    let fetch_cache = byte_cache_calls.node({
        let bytes = bytes.clone();
        Node::<(), Vec<u8>, FetchError>::from_fn(move |_| {
            bytes.get(URL).ok_or(FetchError::CacheMiss)
        })
    });

    let fetch_remote = remote_calls.node(Node::<(), Vec<u8>, FetchError>::new(|_, completion| {
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            completion(Ok(BODY.as_bytes().to_vec()));
        });
    }));

    let cache_data = {
        let bytes = bytes.clone();
        Transform::from_fn(move |data: Vec<u8>| {
            bytes.set(URL, data.clone());
            data
        })
    };

    let parse_data = Node::<Vec<u8>, Vec<HolidayRecord>, FetchError>::from_fn(|data| {
        serde_json::from_slice(&data).map_err(|e| FetchError::Decode(e.to_string()))
    });

    let convert = Transform::from_fn(|records: Vec<HolidayRecord>| {
        records
            .into_iter()
            .map(|r| Holiday {
                name: r.name,
                kind: r.kind,
                is_global: r.global,
            })
            .collect::<Vec<_>>()
    });

    let persist = {
        let holidays = holidays.clone();
        Transform::from_fn(move |list: Vec<Holiday>| {
            holidays.set(URL, list.clone());
            list
        })
    };

    let pipeline = fetch_holiday_cache
        | (fetch_cache | (fetch_remote & cache_data)) & parse_data & convert & persist;

    Fixture {
        pipeline,
        bytes,
        holidays,
        remote_calls,
        byte_cache_calls,
    }
}

fn expected() -> Vec<Holiday> {
    vec![
        Holiday {
            name: "New Year's Day".to_string(),
            kind: "Public".to_string(),
            is_global: true,
        },
        Holiday {
            name: "Family Day".to_string(),
            kind: "Public".to_string(),
            is_global: false,
        },
    ]
}

#[test]
fn test_first_run_fetches_remote_and_fills_both_caches() {
    let f = fixture();

    let result = f.pipeline.invoke_and_wait_unit();

    assert_eq!(result, Ok(expected()));
    assert_eq!(f.remote_calls.calls(), 1);
    assert_eq!(f.byte_cache_calls.calls(), 1);
    assert_eq!(f.bytes.get(URL), Some(BODY.as_bytes().to_vec()));
    assert_eq!(f.holidays.get(URL), Some(expected()));
}

#[test]
fn test_second_run_is_served_from_holiday_cache() {
    let f = fixture();

    let first = f.pipeline.invoke_and_wait_unit();
    let second = f.pipeline.invoke_and_wait_unit();

    assert_eq!(first, second);
    assert_eq!(f.remote_calls.calls(), 1);
    assert_eq!(f.byte_cache_calls.calls(), 1);
}

#[test]
fn test_byte_cache_hit_skips_remote() {
    let f = fixture();
    f.bytes.set(URL, BODY.as_bytes().to_vec());

    let result = f.pipeline.invoke_and_wait_unit();

    assert_eq!(result, Ok(expected()));
    assert_eq!(f.remote_calls.calls(), 0);
}

#[test]
fn test_decode_failure_after_fallback_is_final() {
    let f = fixture();
    f.bytes.set(URL, b"not json".to_vec());

    let result = f.pipeline.invoke_and_wait_unit();

    assert!(matches!(result, Err(FetchError::Decode(_))));
    assert_eq!(f.remote_calls.calls(), 0);
    assert_eq!(f.holidays.get(URL), None);
}

#[tokio::test]
async fn test_pipeline_from_async_code() {
    let f = fixture();

    let result = f.pipeline.invoke_async(()).await;

    assert_eq!(result, Ok(Ok(expected())));
    assert_eq!(f.remote_calls.calls(), 1);
}
