//! AND / OR composition of nodes and transforms.
//!
//! Composition is closed: combining two units always yields another
//! [`Node`](crate::Node) or [`Transform`](crate::Transform), which can be
//! composed further. Building a composite runs nothing; the new unit holds
//! cheap clones of its operands and executes them only when invoked.
//!
//! | left | right | `and` | `or` |
//! |------|-------|-------|------|
//! | `Node<X, Y, E>` | `Node<Y, Z, E>` | `Node<X, Z, E>` | |
//! | `Node<X, Y, E>` | `Transform<Y, Z>` | `Node<X, Z, E>` | |
//! | `Transform<X, Y>` | `Transform<Y, Z>` | `Transform<X, Z>` | |
//! | `Transform<X, Y>` | `Node<Y, Z, E>` | `Node<X, Z, E>` | |
//! | `Node<X, Y, E>` | `Node<X, Y, E>` | | `Node<X, Y, E>` |
//! | `Node<X, Y, E>` | `Transform<X, Y>` | | `Node<X, Y, E>` |
//!
//! The operators `&` and `|` are shorthand for [`Sequence::and`] and
//! [`Fallback::or`], so a pipeline can be written the way it reads:
//!
//! ```rust
//! use confluence::prelude::*;
//!
//! let cached = Node::<u32, String, &str>::failure("miss");
//! let remote = Node::<u32, u32, &str>::from_fn(|id| Ok(id * 10));
//! let render = Transform::from_fn(|n: u32| format!("#{n}"));
//!
//! let lookup = cached | (remote & render);
//! assert_eq!(lookup.invoke_and_wait(4), Ok("#40".to_string()));
//! ```

mod and;
mod or;

/// Sequential composition with short-circuiting.
///
/// `left.and(right)` runs `left`, feeds its output into `right` and delivers
/// `right`'s outcome. If `left` is a [`Node`](crate::Node) that fails, its
/// error is delivered unchanged and `right` never runs.
pub trait Sequence<Rhs> {
    /// The composite unit.
    type Output;

    /// Chain `rhs` after `self`.
    fn and(self, rhs: Rhs) -> Self::Output;
}

/// Fallback composition.
///
/// `left.or(right)` runs `left`; on success its value is delivered and
/// `right` never runs. On failure the error is discarded and `right` runs
/// with the same original input. The input must be `Clone` so a copy can be
/// kept for the second attempt.
///
/// Only [`Node`](crate::Node) implements `Fallback`: a
/// [`Transform`](crate::Transform) cannot fail, so there is nothing to fall
/// back from.
///
/// ```rust,compile_fail
/// use confluence::prelude::*;
///
/// let double = Transform::from_fn(|x: i32| x * 2);
/// let _never = double.clone().or(double);
/// ```
///
/// ```rust,compile_fail
/// use confluence::prelude::*;
///
/// let double = Transform::from_fn(|x: i32| x * 2);
/// let backup = Node::<i32, i32, String>::from_fn(|x| Ok(x));
/// let _never = double | backup;
/// ```
pub trait Fallback<Rhs> {
    /// The composite unit.
    type Output;

    /// Try `self`, then `rhs` with the same input if `self` fails.
    fn or(self, rhs: Rhs) -> Self::Output;
}
