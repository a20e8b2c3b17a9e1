//! OR - fallback composition. Defined only for a failing-capable left side.

use std::ops::BitOr;

use super::Fallback;
use crate::node::Node;
use crate::transform::Transform;

impl<X, Y, E> Fallback<Node<X, Y, E>> for Node<X, Y, E>
where
    X: Clone + Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Y, E>;

    fn or(self, alternative: Node<X, Y, E>) -> Node<X, Y, E> {
        let primary = self;
        Node::<X, Y, E>::new(move |input, completion| {
            let retry = input.clone();
            let alternative = alternative.clone();
            primary.dispatch(
                input,
                Box::new(move |outcome| match outcome {
                    Ok(value) => completion(Ok(value)),
                    Err(_) => alternative.dispatch(retry, completion),
                }),
            );
        })
    }
}

impl<X, Y, E> Fallback<Transform<X, Y>> for Node<X, Y, E>
where
    X: Clone + Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Y, E>;

    fn or(self, alternative: Transform<X, Y>) -> Node<X, Y, E> {
        let primary = self;
        Node::<X, Y, E>::new(move |input, completion| {
            let retry = input.clone();
            let alternative = alternative.clone();
            primary.dispatch(
                input,
                Box::new(move |outcome| match outcome {
                    Ok(value) => completion(Ok(value)),
                    Err(_) => {
                        alternative.dispatch(retry, Box::new(move |value| completion(Ok(value))))
                    }
                }),
            );
        })
    }
}

impl<X, Y, E> BitOr<Node<X, Y, E>> for Node<X, Y, E>
where
    X: Clone + Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Y, E>;

    fn bitor(self, rhs: Node<X, Y, E>) -> Self::Output {
        self.or(rhs)
    }
}

impl<X, Y, E> BitOr<Transform<X, Y>> for Node<X, Y, E>
where
    X: Clone + Send + 'static,
    Y: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Y, E>;

    fn bitor(self, rhs: Transform<X, Y>) -> Self::Output {
        self.or(rhs)
    }
}
