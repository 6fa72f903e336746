//! Compile-time positions of alternatives.
//!
//! `Member<X, I>` holds when `X` is an alternative of the list; `I` is an
//! index witness (`Here`, `There<Here>`, …) that keeps the two impls from
//! overlapping and is always inferred by the compiler. Call sites write it as
//! `_`, e.g. `variant.get::<String, _>()`.
//!
//! A type that is not in the list has no `Member` impl, so asking for it is a
//! compile error rather than a runtime failure.

use super::{Alternatives, Cons};
use core::marker::PhantomData;

/// Index witness: the type is the head of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Here {}

/// Index witness: the type is somewhere in the tail, at index `I` of the tail.
pub struct There<I>(PhantomData<fn() -> I>);

/// Proof that `X` is an alternative of `Self`, with its position.
#[diagnostic::on_unimplemented(
    message = "`{X}` is not an alternative of this variant",
    label = "type not in variant"
)]
pub trait Member<X, I>: Alternatives {
    /// Zero-based position of `X` in the list.
    const POSITION: usize;
}

impl<X: 'static, T: Alternatives> Member<X, Here> for Cons<X, T> {
    const POSITION: usize = 0;
}

impl<X, H: 'static, T, I> Member<X, There<I>> for Cons<H, T>
where
    T: Member<X, I>,
{
    const POSITION: usize = T::POSITION + 1;
}
