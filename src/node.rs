//! Node - an asynchronous unit of work that may fail.

use std::sync::Arc;

use crate::completion::{handoff, wait, Completion, Pending};

type Block<X, Y, E> = dyn Fn(X, Completion<Result<Y, E>>) + Send + Sync;

/// An asynchronous computation from `X` to either `Ok(Y)` or `Err(E)`.
///
/// Like [`Transform`](crate::Transform), a `Node` wraps a continuation-passing
/// callable and does nothing until invoked. The completion receives a
/// `Result`; failure is an ordinary value, never a panic.
///
/// The error type is chosen by the caller and only needs to be `Send + 'static`.
///
/// # Example
///
/// ```rust
/// use confluence::Node;
///
/// let parse = Node::<&'static str, i32, String>::new(|s, completion| {
///     completion(s.parse().map_err(|_| format!("not a number: {s}")))
/// });
///
/// assert_eq!(parse.invoke_and_wait("42"), Ok(42));
/// assert_eq!(parse.invoke_and_wait("x"), Err("not a number: x".to_string()));
/// ```
pub struct Node<X, Y, E> {
    block: Arc<Block<X, Y, E>>,
}

impl<X, Y, E> Clone for Node<X, Y, E> {
    fn clone(&self) -> Self {
        Node {
            block: Arc::clone(&self.block),
        }
    }
}

impl<X, Y, E> std::fmt::Debug for Node<X, Y, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("block", &"<function>").finish()
    }
}

impl<X, Y, E> Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a continuation-passing callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(X, Completion<Result<Y, E>>) + Send + Sync + 'static,
    {
        Node { block: Arc::new(f) }
    }

    /// Wrap a synchronous fallible function. The completion fires inline.
    ///
    /// ```rust
    /// use confluence::Node;
    ///
    /// let checked = Node::from_fn(|x: u8| x.checked_mul(2).ok_or("overflow"));
    /// assert_eq!(checked.invoke_and_wait(100), Ok(200));
    /// assert_eq!(checked.invoke_and_wait(200), Err("overflow"));
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(X) -> Result<Y, E> + Send + Sync + 'static,
    {
        Self::new(move |input, completion| completion(f(input)))
    }

    /// A node that ignores its input and always succeeds with `value`.
    pub fn success(value: Y) -> Self
    where
        Y: Clone + Sync,
    {
        Self::new(move |_, completion| completion(Ok(value.clone())))
    }

    /// A node that ignores its input and always fails with `error`.
    pub fn failure(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move |_, completion| completion(Err(error.clone())))
    }

    /// Start the computation; `completion` receives the outcome exactly once.
    ///
    /// No thread guarantee is made: the completion runs wherever the wrapped
    /// callable decides to call it, possibly before `invoke` returns.
    pub fn invoke<C>(&self, input: X, completion: C)
    where
        C: FnOnce(Result<Y, E>) + Send + 'static,
    {
        self.dispatch(input, Box::new(completion));
    }

    pub(crate) fn dispatch(&self, input: X, completion: Completion<Result<Y, E>>) {
        (self.block)(input, completion)
    }

    /// Run the computation and block the calling thread until it completes.
    ///
    /// Returns the outcome as a `Result`; an `Err` from the node is returned,
    /// not raised. The same deadlock hazards as
    /// [`Transform::invoke_and_wait`](crate::Transform::invoke_and_wait) apply.
    ///
    /// # Panics
    ///
    /// Panics if the callable drops its completion without calling it.
    pub fn invoke_and_wait(&self, input: X) -> Result<Y, E> {
        let (completion, pending) = handoff();
        self.dispatch(input, completion);
        wait(pending)
    }

    /// Run the computation and return a future resolving to its outcome.
    ///
    /// The outer `Result` reports an [`Abandoned`](crate::Abandoned)
    /// completion; the inner one is the node's own outcome.
    pub fn invoke_async(&self, input: X) -> Pending<Result<Y, E>> {
        let (completion, pending) = handoff();
        self.dispatch(input, completion);
        pending
    }
}

impl<Y, E> Node<(), Y, E>
where
    Y: Send + 'static,
    E: Send + 'static,
{
    /// [`invoke`](Node::invoke) for nodes that take no input.
    pub fn invoke_unit<C>(&self, completion: C)
    where
        C: FnOnce(Result<Y, E>) + Send + 'static,
    {
        self.invoke((), completion);
    }

    /// [`invoke_and_wait`](Node::invoke_and_wait) for nodes that take no input.
    pub fn invoke_and_wait_unit(&self) -> Result<Y, E> {
        self.invoke_and_wait(())
    }
}

impl<E> Node<(), (), E>
where
    E: Send + 'static,
{
    /// Start a node that takes no input, discarding its outcome.
    pub fn fire_unit(&self) {
        self.invoke_unit(|_| {});
    }
}
