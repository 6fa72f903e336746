//! Type-level alternative lists.
//!
//! A variant's alternatives are declared once as a cons list:
//! `Cons<T0, Cons<T1, … Nil>>`. The [`alternatives!`](crate::alternatives)
//! macro spells this out from a flat list of types.
//!
//! - [`analyzer`] computes the static facts about a list (size, alignment,
//!   well-formedness) through the [`Alternatives`] trait.
//! - [`position`] maps a concrete type to its index through [`Member`].

use core::marker::PhantomData;
use core::mem::ManuallyDrop;

pub mod analyzer;
pub mod position;

pub use analyzer::Alternatives;
pub use position::{Here, Member, There};

/// The empty alternative list.
///
/// A `Variant<Nil>` can never be constructed: no type is a member of `Nil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nil {}

/// An alternative list with head `H` followed by the list `T`.
///
/// Only used at the type level; values of this type are never created.
pub struct Cons<H, T>(PhantomData<fn() -> (H, T)>);

/// Storage for a `Cons<H, T>` list.
///
/// Both fields sit at offset 0, so the union is as large as the largest
/// alternative in the whole list and as aligned as the strictest one.
#[repr(C)]
#[allow(dead_code)]
pub union Slot<H, T> {
    head: ManuallyDrop<H>,
    tail: ManuallyDrop<T>,
}

pub(crate) mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Nil {}
    impl<H, T: Sealed> Sealed for super::Cons<H, T> {}
}
