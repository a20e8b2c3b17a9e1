//! AND - sequential composition for every pairing of nodes and transforms.

use std::ops::BitAnd;

use super::Sequence;
use crate::node::Node;
use crate::transform::Transform;

impl<X, Y, Z, E> Sequence<Node<Y, Z, E>> for Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Z, E>;

    fn and(self, next: Node<Y, Z, E>) -> Node<X, Z, E> {
        let first = self;
        Node::<X, Z, E>::new(move |input, completion| {
            let next = next.clone();
            first.dispatch(
                input,
                Box::new(move |outcome| match outcome {
                    Ok(value) => next.dispatch(value, completion),
                    Err(error) => completion(Err(error)),
                }),
            );
        })
    }
}

impl<X, Y, Z, E> Sequence<Transform<Y, Z>> for Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Z, E>;

    fn and(self, next: Transform<Y, Z>) -> Node<X, Z, E> {
        let first = self;
        Node::<X, Z, E>::new(move |input, completion| {
            let next = next.clone();
            first.dispatch(
                input,
                Box::new(move |outcome| match outcome {
                    Ok(value) => next.dispatch(value, Box::new(move |out| completion(Ok(out)))),
                    Err(error) => completion(Err(error)),
                }),
            );
        })
    }
}

impl<X, Y, Z> Sequence<Transform<Y, Z>> for Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
{
    type Output = Transform<X, Z>;

    fn and(self, next: Transform<Y, Z>) -> Transform<X, Z> {
        let first = self;
        Transform::<X, Z>::new(move |input, completion| {
            let next = next.clone();
            first.dispatch(input, Box::new(move |value| next.dispatch(value, completion)));
        })
    }
}

impl<X, Y, Z, E> Sequence<Node<Y, Z, E>> for Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Z, E>;

    fn and(self, next: Node<Y, Z, E>) -> Node<X, Z, E> {
        let first = self;
        Node::<X, Z, E>::new(move |input, completion| {
            let next = next.clone();
            first.dispatch(input, Box::new(move |value| next.dispatch(value, completion)));
        })
    }
}

impl<X, Y, Z, E> BitAnd<Node<Y, Z, E>> for Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Z, E>;

    fn bitand(self, rhs: Node<Y, Z, E>) -> Self::Output {
        self.and(rhs)
    }
}

impl<X, Y, Z, E> BitAnd<Transform<Y, Z>> for Node<X, Y, E>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Z, E>;

    fn bitand(self, rhs: Transform<Y, Z>) -> Self::Output {
        self.and(rhs)
    }
}

impl<X, Y, Z> BitAnd<Transform<Y, Z>> for Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
{
    type Output = Transform<X, Z>;

    fn bitand(self, rhs: Transform<Y, Z>) -> Self::Output {
        self.and(rhs)
    }
}

impl<X, Y, Z, E> BitAnd<Node<Y, Z, E>> for Transform<X, Y>
where
    X: Send + 'static,
    Y: Send + 'static,
    Z: Send + 'static,
    E: Send + 'static,
{
    type Output = Node<X, Z, E>;

    fn bitand(self, rhs: Node<Y, Z, E>) -> Self::Output {
        self.and(rhs)
    }
}
