//! Error types for the synchronous and async bridges.

/// Error returned when a completion is dropped without delivering an outcome.
///
/// Every unit promises to call its completion exactly once. A leaf that
/// drops the completion instead breaks that promise; the bridges observe
/// the drop and report it as `Abandoned` rather than waiting forever.
///
/// A leaf that keeps the completion alive but never calls it cannot be
/// detected and still blocks [`invoke_and_wait`](crate::Node::invoke_and_wait)
/// indefinitely.
///
/// # Examples
///
/// ```rust
/// use confluence::{Abandoned, Node};
///
/// # tokio_test::block_on(async {
/// let lost = Node::<(), i32, String>::new(|_, completion| drop(completion));
///
/// assert_eq!(lost.invoke_async(()).await, Err(Abandoned));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Abandoned;

impl std::fmt::Display for Abandoned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "completion dropped without delivering an outcome")
    }
}

impl std::error::Error for Abandoned {}
