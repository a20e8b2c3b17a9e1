//! Tracing support for nodes and transforms.
//!
//! This module provides the `instrument` method for running a unit inside a
//! tracing span. Feature-gated behind `#[cfg(feature = "tracing")]`.
//!
//! The core itself never logs; instrumentation is opt-in per unit.

use tracing::Span;

use crate::node::Node;
use crate::transform::Transform;

/// Extension trait for adding tracing instrumentation to units.
///
/// This trait is only available when the `tracing` feature is enabled.
pub trait UnitTracingExt: Sized {
    /// Run this unit inside `span`.
    ///
    /// The span is entered while the wrapped callable is dispatched and
    /// again to record a `trace` event when the completion fires. A unit
    /// that completes inline runs its downstream stages while the span is
    /// still entered.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use confluence::prelude::*;
    /// use tracing::info_span;
    ///
    /// let fetch = Node::<u32, String, String>::from_fn(|id| Ok(format!("user-{id}")))
    ///     .instrument(info_span!("fetch_user"));
    /// ```
    fn instrument(self, span: Span) -> Self;
}

impl<X, Y, E> UnitTracingExt for Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    fn instrument(self, span: Span) -> Self {
        let inner = self;
        Node::<X, Y, E>::new(move |input, completion| {
            let completed_in = span.clone();
            span.in_scope(|| {
                tracing::trace!("node invoked");
                inner.dispatch(
                    input,
                    Box::new(move |outcome| {
                        completed_in.in_scope(|| {
                            tracing::trace!(success = outcome.is_ok(), "node completed")
                        });
                        completion(outcome);
                    }),
                );
            });
        })
    }
}

impl<X, Y> UnitTracingExt for Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
{
    fn instrument(self, span: Span) -> Self {
        let inner = self;
        Transform::<X, Y>::new(move |input, completion| {
            let completed_in = span.clone();
            span.in_scope(|| {
                tracing::trace!("transform invoked");
                inner.dispatch(
                    input,
                    Box::new(move |output| {
                        completed_in.in_scope(|| tracing::trace!("transform completed"));
                        completion(output);
                    }),
                );
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_instrumented_node_delivers_same_outcome() {
        let node = Node::<i32, i32, String>::from_fn(|x| Ok(x + 1))
            .instrument(tracing::info_span!("increment"));

        assert_eq!(node.invoke_and_wait(1), Ok(2));
        assert!(logs_contain("node invoked"));
        assert!(logs_contain("node completed"));
        assert!(logs_contain("success=true"));
    }

    #[traced_test]
    #[test]
    fn test_instrumented_failure_is_recorded() {
        let node = Node::<i32, i32, String>::failure("boom".to_string())
            .instrument(tracing::debug_span!("failing"));

        assert_eq!(node.invoke_and_wait(1), Err("boom".to_string()));
        assert!(logs_contain("success=false"));
    }

    #[traced_test]
    #[test]
    fn test_instrumented_transform_in_pipeline() {
        let double = Transform::from_fn(|x: i32| x * 2).instrument(tracing::info_span!("double"));
        let pipeline = Node::<i32, i32, String>::from_fn(Ok) & double;

        assert_eq!(pipeline.invoke_and_wait(21), Ok(42));
        assert!(logs_contain("transform completed"));
    }
}
