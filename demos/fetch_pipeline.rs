//! Fetch-and-cache pipeline
//!
//! Demonstrates AND / OR composition over opaque leaves:
//! - an in-memory cache tried first (`|`)
//! - a slow "remote" that completes on a background thread
//! - decode and post-processing stages chained with `&`
//!
//! Run with: cargo run --example fetch_pipeline

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use confluence::prelude::*;

#[derive(Debug, Clone)]
enum FetchError {
    Miss,
    Unavailable,
}

type Cache = Arc<Mutex<HashMap<u32, String>>>;

fn lookup(cache: Cache) -> Node<u32, String, FetchError> {
    Node::from_fn(move |id: u32| {
        print!("  cache lookup for {}... ", id);
        match cache.lock().unwrap().get(&id).cloned() {
            Some(hit) => {
                println!("hit");
                Ok(hit)
            }
            None => {
                println!("miss");
                Err(FetchError::Miss)
            }
        }
    })
}

fn remote() -> Node<u32, String, FetchError> {
    Node::new(|id: u32, completion| {
        println!("  fetching {} from remote", id);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            if id == 0 {
                completion(Err(FetchError::Unavailable));
            } else {
                completion(Ok(format!("record-{}", id)));
            }
        });
    })
}

fn store(cache: Cache) -> Transform<String, String> {
    Transform::from_fn(move |value: String| {
        println!("  storing {}", value);
        if let Some(id) = value.strip_prefix("record-").and_then(|n| n.parse().ok()) {
            cache.lock().unwrap().insert(id, value.clone());
        }
        value
    })
}

fn main() {
    println!("=== Fetch-and-cache pipeline ===\n");

    let cache: Cache = Arc::default();
    let shout = Transform::from_fn(|s: String| s.to_uppercase());
    let pipeline = (lookup(cache.clone()) | (remote() & store(cache.clone()))) & shout;

    for (round, id) in [(1, 42), (2, 42), (3, 0)] {
        println!("Round {}:", round);
        match pipeline.invoke_and_wait(id) {
            Ok(value) => println!("  => {}\n", value),
            Err(e) => println!("  => failed: {:?}\n", e),
        }
    }

    println!("Cached entries: {}", cache.lock().unwrap().len());
}
