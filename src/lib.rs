//! # Confluence
//!
//! > *Small streams, joined*
//!
//! A tiny algebra for composing asynchronous units of work into pipelines
//! with deterministic short-circuit and fallback semantics.
//!
//! ## Building blocks
//!
//! - [`Transform<X, Y>`]: an async computation from `X` to `Y` that cannot fail
//! - [`Node<X, Y, E>`]: an async computation from `X` to `Result<Y, E>`
//! - [`Sequence`] (`&`): run one unit after another; a failure short-circuits
//! - [`Fallback`] (`|`): if a node fails, try another unit with the same input
//!
//! Units are continuation-passing: the wrapped callable receives its input
//! and a [`Completion`] it must call exactly once, from any thread. Nothing
//! runs until a unit is invoked, and composites can be cloned, stored and
//! invoked concurrently.
//!
//! ## Quick Example
//!
//! ```rust
//! use confluence::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum FetchError {
//!     Miss,
//! }
//!
//! let from_cache = Node::<u32, Vec<u8>, FetchError>::failure(FetchError::Miss);
//! let from_remote = Node::<u32, Vec<u8>, FetchError>::from_fn(|id| {
//!     Ok(format!("{{\"id\":{id}}}").into_bytes())
//! });
//! let decode = Transform::from_fn(|bytes: Vec<u8>| String::from_utf8_lossy(&bytes).into_owned());
//!
//! let pipeline = (from_cache | from_remote) & decode;
//!
//! assert_eq!(pipeline.invoke_and_wait(7), Ok("{\"id\":7}".to_string()));
//! ```
//!
//! ## Bridges
//!
//! - [`Node::invoke`] / [`Transform::invoke`]: start the work, outcome goes to a callback
//! - `invoke_and_wait`: block the calling thread on a one-shot handoff
//! - `invoke_async`: a [`Pending`] future for use inside `async` code
//!
//! ## Cargo features
//!
//! - `async`: `spawn_on` constructors running `async` closures on a tokio runtime
//! - `tracing`: `UnitTracingExt::instrument` runs units inside tracing spans
//!
//! There is deliberately no retry, timeout, cancellation or deduplication.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod completion;
pub mod compose;
pub mod error;
#[cfg(feature = "tracing")]
pub mod instrument;
pub mod node;
#[cfg(feature = "async")]
mod spawn;
pub mod testing;
pub mod transform;

// Re-exports
pub use completion::{Completion, Pending};
pub use compose::{Fallback, Sequence};
pub use error::Abandoned;
#[cfg(feature = "tracing")]
pub use instrument::UnitTracingExt;
pub use node::Node;
pub use transform::Transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::completion::{Completion, Pending};
    pub use crate::compose::{Fallback, Sequence};
    pub use crate::error::Abandoned;
    #[cfg(feature = "tracing")]
    pub use crate::instrument::UnitTracingExt;
    pub use crate::node::Node;
    pub use crate::transform::Transform;
}
