//! Leaf constructors that run `async` closures on a tokio runtime.
//!
//! Feature-gated behind `#[cfg(feature = "async")]`. The caller picks the
//! runtime by passing its [`Handle`]; the units themselves still impose no
//! scheduling policy on anything composed with them.

use std::future::Future;

use tokio::runtime::Handle;

use crate::node::Node;
use crate::transform::Transform;

impl<X, Y, E> Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    /// A node whose work is an `async` closure spawned on `handle`.
    ///
    /// The completion fires from the spawned task. If the runtime shuts down
    /// before the task finishes, the completion is dropped and the bridges
    /// report [`Abandoned`](crate::Abandoned).
    ///
    /// ```rust
    /// use confluence::Node;
    ///
    /// # tokio_test::block_on(async {
    /// let handle = tokio::runtime::Handle::current();
    /// let fetch = Node::spawn_on(handle, |id: u32| async move {
    ///     if id > 0 { Ok(format!("user-{id}")) } else { Err("no such user") }
    /// });
    ///
    /// assert_eq!(fetch.invoke_async(7).await, Ok(Ok("user-7".to_string())));
    /// # });
    /// ```
    pub fn spawn_on<F, Fut>(handle: Handle, f: F) -> Self
    where
        F: Fn(X) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Y, E>> + Send + 'static,
    {
        Self::new(move |input, completion| {
            let work = f(input);
            handle.spawn(async move { completion(work.await) });
        })
    }
}

impl<X, Y> Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
{
    /// A transform whose work is an `async` closure spawned on `handle`.
    pub fn spawn_on<F, Fut>(handle: Handle, f: F) -> Self
    where
        F: Fn(X) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Y> + Send + 'static,
    {
        Self::new(move |input, completion| {
            let work = f(input);
            handle.spawn(async move { completion(work.await) });
        })
    }
}
