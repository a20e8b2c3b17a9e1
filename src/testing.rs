//! Testing utilities for pipelines built from nodes and transforms.
//!
//! Completions usually fire inline, which makes asserting on them awkward
//! without a place to put the delivered value. This module provides:
//!
//! - [`Recorder`]: a completion sink that keeps every delivered outcome
//! - [`CallCounter`]: wraps a unit and counts how often it is invoked
//! - [`forbidden_node`] / [`forbidden_transform`]: spies that panic if invoked
//!
//! # Example
//!
//! ```rust
//! use confluence::prelude::*;
//! use confluence::testing::{forbidden_node, Recorder};
//!
//! let failing = Node::<(), i32, &str>::failure("generic");
//! let pipeline = failing & forbidden_node::<i32, String, &str>();
//!
//! let out = Recorder::new();
//! pipeline.invoke_unit(out.sink());
//! assert_eq!(out.single(), Err("generic"));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::node::Node;
use crate::transform::Transform;

/// Collects every outcome delivered to its [`sink`](Recorder::sink)s.
///
/// Clones share the same storage, so a recorder can be handed to several
/// invocations and inspected afterwards.
#[derive(Debug)]
pub struct Recorder<T> {
    delivered: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Recorder {
            delivered: Arc::clone(&self.delivered),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Recorder {
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Recorder<T>
where
    T: Send + 'static,
{
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A completion that appends its value to this recorder.
    pub fn sink(&self) -> impl FnOnce(T) + Send + 'static {
        let delivered = Arc::clone(&self.delivered);
        move |value| {
            delivered
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }
    }

    /// Number of outcomes delivered so far.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Remove and return everything delivered so far, oldest first.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.lock())
    }

    /// Remove and return the only delivered outcome.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one outcome has been delivered, which is what
    /// the completion contract promises for a single invocation.
    pub fn single(&self) -> T {
        let mut delivered = self.take();
        match delivered.len() {
            1 => delivered.remove(0),
            n => panic!("expected exactly one delivered outcome, got {n}"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counts invocations of the units it wraps.
///
/// ```rust
/// use confluence::Node;
/// use confluence::testing::CallCounter;
///
/// let counter = CallCounter::new();
/// let node = counter.node(Node::<i32, i32, String>::from_fn(|x| Ok(x + 1)));
///
/// node.invoke_and_wait(1).unwrap();
/// node.invoke_and_wait(2).unwrap();
/// assert_eq!(counter.calls(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocations observed so far across all wrapped units.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wrap `node` so that every invocation bumps this counter.
    pub fn node<X, Y, E>(&self, node: Node<X, Y, E>) -> Node<X, Y, E>
    where
        X: Send + 'static,
        Y: Send + 'static,
        E: Send + 'static,
    {
        let calls = Arc::clone(&self.calls);
        Node::new(move |input, completion| {
            calls.fetch_add(1, Ordering::SeqCst);
            node.dispatch(input, completion);
        })
    }

    /// Wrap `transform` so that every invocation bumps this counter.
    pub fn transform<X, Y>(&self, transform: Transform<X, Y>) -> Transform<X, Y>
    where
        X: Send + 'static,
        Y: Send + 'static,
    {
        let calls = Arc::clone(&self.calls);
        Transform::new(move |input, completion| {
            calls.fetch_add(1, Ordering::SeqCst);
            transform.dispatch(input, completion);
        })
    }
}

/// A node that panics when invoked.
///
/// Use it on the side of a composition that must never run.
pub fn forbidden_node<X, Y, E>() -> Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    Node::new(|_, _| panic!("forbidden node was invoked"))
}

/// A transform that panics when invoked.
pub fn forbidden_transform<X, Y>() -> Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
{
    Transform::new(|_, _| panic!("forbidden transform was invoked"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_outcomes_in_order() {
        let out = Recorder::new();
        (out.sink())(1);
        (out.sink())(2);

        assert_eq!(out.count(), 2);
        assert_eq!(out.take(), vec![1, 2]);
        assert_eq!(out.count(), 0);
    }

    #[test]
    #[should_panic(expected = "got 0")]
    fn test_single_panics_when_nothing_was_delivered() {
        Recorder::<i32>::new().single();
    }

    #[test]
    fn test_counter_is_shared_between_wrapped_units() {
        let counter = CallCounter::new();
        let node = counter.node(Node::<(), (), String>::success(()));
        let transform = counter.transform(Transform::<(), ()>::from_fn(|_| ()));

        node.fire_unit();
        transform.fire_unit();

        assert_eq!(counter.calls(), 2);
    }

    #[test]
    #[should_panic(expected = "forbidden node was invoked")]
    fn test_forbidden_node_panics() {
        forbidden_node::<(), (), String>().fire_unit();
    }

    #[test]
    #[should_panic(expected = "forbidden transform was invoked")]
    fn test_forbidden_transform_panics() {
        forbidden_transform::<(), ()>().fire_unit();
    }
}
