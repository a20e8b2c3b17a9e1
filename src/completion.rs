//! Completions and the one-shot handoff behind the bridges.
//!
//! A [`Completion`] is the continuation a unit calls with its outcome. It is
//! an owned `FnOnce`, so a second call is a compile error; the only way to
//! break the exactly-once contract is to drop it unused, which the bridges
//! report as [`Abandoned`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::error::Abandoned;

/// The continuation a unit calls exactly once with its outcome.
///
/// It may be called on any thread; units impose no execution context.
pub type Completion<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Future returned by `invoke_async`.
///
/// Resolves to the delivered outcome, or to [`Abandoned`] if the unit
/// dropped its completion without calling it. Dropping a `Pending` does not
/// stop the underlying work; there is no cancellation.
#[must_use = "futures do nothing unless polled"]
pub struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending").field("rx", &"<receiver>").finish()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, Abandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|delivered| delivered.map_err(|_| Abandoned))
    }
}

/// Create a completion wired to a [`Pending`] on the other end.
pub(crate) fn handoff<T>() -> (Completion<T>, Pending<T>)
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let completion: Completion<T> = Box::new(move |value| {
        // The receiver may already be gone if the caller stopped waiting.
        let _ = tx.send(value);
    });
    (completion, Pending { rx })
}

/// Park the current thread until the handoff is signalled.
///
/// # Panics
///
/// Panics if the completion was dropped without being called.
pub(crate) fn wait<T>(pending: Pending<T>) -> T {
    match futures::executor::block_on(pending) {
        Ok(value) => value,
        Err(abandoned) => panic!("{abandoned}"),
    }
}
