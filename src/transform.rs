//! Transform - an asynchronous unit of work that cannot fail.

use std::sync::Arc;

use crate::completion::{handoff, wait, Completion, Pending};

type Block<X, Y> = dyn Fn(X, Completion<Y>) + Send + Sync;

/// An asynchronous computation from `X` to `Y` that always produces a value.
///
/// A `Transform` wraps a continuation-passing callable. Constructing one does
/// nothing; each [`invoke`](Transform::invoke) runs the callable, which must
/// call its [`Completion`] exactly once, on whatever thread it likes.
///
/// Cloning is cheap: the callable sits behind an `Arc` and is never mutated.
///
/// # Example
///
/// ```rust
/// use confluence::Transform;
///
/// let double = Transform::<i32, i32>::new(|x, completion| completion(x * 2));
///
/// assert_eq!(double.invoke_and_wait(21), 42);
/// ```
pub struct Transform<X, Y> {
    block: Arc<Block<X, Y>>,
}

impl<X, Y> Clone for Transform<X, Y> {
    fn clone(&self) -> Self {
        Transform {
            block: Arc::clone(&self.block),
        }
    }
}

impl<X, Y> std::fmt::Debug for Transform<X, Y> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("block", &"<function>")
            .finish()
    }
}

impl<X, Y> Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
{
    /// Wrap a continuation-passing callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(X, Completion<Y>) + Send + Sync + 'static,
    {
        Transform { block: Arc::new(f) }
    }

    /// Wrap a synchronous function. The completion fires inline.
    ///
    /// ```rust
    /// use confluence::Transform;
    ///
    /// let len = Transform::from_fn(|s: String| s.len());
    /// assert_eq!(len.invoke_and_wait("four".to_string()), 4);
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(X) -> Y + Send + Sync + 'static,
    {
        Self::new(move |input, completion| completion(f(input)))
    }

    /// Start the computation; `completion` receives the output exactly once.
    ///
    /// No thread guarantee is made: the completion runs wherever the wrapped
    /// callable decides to call it, possibly before `invoke` returns.
    pub fn invoke<C>(&self, input: X, completion: C)
    where
        C: FnOnce(Y) + Send + 'static,
    {
        self.dispatch(input, Box::new(completion));
    }

    pub(crate) fn dispatch(&self, input: X, completion: Completion<Y>) {
        (self.block)(input, completion)
    }

    /// Run the computation and block the calling thread until it completes.
    ///
    /// The caller parks on a one-shot handoff that the completion signals.
    /// This deadlocks if the wrapped callable keeps its completion but never
    /// calls it, or if finishing the work requires the very thread that is
    /// now blocked (for example a single-threaded executor driving the leaf).
    ///
    /// # Panics
    ///
    /// Panics if the callable drops its completion without calling it.
    pub fn invoke_and_wait(&self, input: X) -> Y {
        let (completion, pending) = handoff();
        self.dispatch(input, completion);
        wait(pending)
    }

    /// Run the computation and return a future resolving to its output.
    ///
    /// ```rust
    /// use confluence::Transform;
    ///
    /// # tokio_test::block_on(async {
    /// let shout = Transform::from_fn(|s: &'static str| s.to_uppercase());
    /// assert_eq!(shout.invoke_async("hey").await, Ok("HEY".to_string()));
    /// # });
    /// ```
    pub fn invoke_async(&self, input: X) -> Pending<Y> {
        let (completion, pending) = handoff();
        self.dispatch(input, completion);
        pending
    }
}

impl<Y> Transform<(), Y>
where
    Y: Send + 'static,
{
    /// [`invoke`](Transform::invoke) for transforms that take no input.
    pub fn invoke_unit<C>(&self, completion: C)
    where
        C: FnOnce(Y) + Send + 'static,
    {
        self.invoke((), completion);
    }

    /// [`invoke_and_wait`](Transform::invoke_and_wait) for transforms that take no input.
    pub fn invoke_and_wait_unit(&self) -> Y {
        self.invoke_and_wait(())
    }
}

impl<X> Transform<X, ()>
where
    X: Send + 'static,
{
    /// Start the computation without interest in its (unit) output.
    pub fn fire(&self, input: X) {
        self.invoke(input, |_| {});
    }
}

impl Transform<(), ()> {
    /// Start a transform that neither takes input nor produces output.
    pub fn fire_unit(&self) {
        self.fire(());
    }
}
