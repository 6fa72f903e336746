//! Single-axis dispatch: destroy and visit the value at a tag.
//!
//! All entry points take the position of the list head as `pos` (0 at the
//! top level) and a type-erased pointer to the variant's storage. Dispatch
//! cost is linear in the tag; after inlining the walk becomes a chain of
//! comparisons against constants.

use super::invalid_tag;
use crate::list::{Alternatives, Cons, Nil};
use crate::raw::slot;
use crate::visitor::{Visit, VisitMut, Visitor};

/// Destroys the value at a tag.
pub trait Table: Alternatives {
    /// Drops the value in `storage` as the alternative at `tag`.
    ///
    /// # Safety
    /// - `storage` must point to a storage union of the top-level list holding
    ///   an initialized value of the alternative at `tag`.
    /// - The value must not be used or dropped again afterwards.
    unsafe fn del(pos: usize, tag: usize, storage: *mut u8);
}

impl Table for Nil {
    unsafe fn del(pos: usize, tag: usize, _storage: *mut u8) {
        invalid_tag(tag, pos)
    }
}

impl<H: 'static, T: Table> Table for Cons<H, T> {
    #[inline]
    unsafe fn del(pos: usize, tag: usize, storage: *mut u8) {
        if tag == pos {
            // SAFETY: the tag names `H`, so the slot holds an `H`.
            unsafe { slot::drop_as::<H>(storage) }
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::del(pos + 1, tag, storage) }
        }
    }
}

/// Invokes a visitor on a shared reference to the value at a tag.
pub trait Apply<V: Visitor>: Table {
    /// Calls `visitor` with the value in `storage` as the alternative at `tag`.
    ///
    /// # Safety
    /// `storage` must hold an initialized value of the alternative at `tag`
    /// and must not be mutated during the call.
    unsafe fn apply(pos: usize, tag: usize, storage: *const u8, visitor: &mut V) -> V::Output;
}

impl<V: Visitor> Apply<V> for Nil {
    unsafe fn apply(pos: usize, tag: usize, _storage: *const u8, _visitor: &mut V) -> V::Output {
        invalid_tag(tag, pos)
    }
}

impl<H, T, V> Apply<V> for Cons<H, T>
where
    H: 'static,
    T: Apply<V>,
    V: Visit<H>,
{
    #[inline]
    unsafe fn apply(pos: usize, tag: usize, storage: *const u8, visitor: &mut V) -> V::Output {
        if tag == pos {
            // SAFETY: the tag names `H`; the caller keeps the slot unmutated.
            visitor.visit(unsafe { slot::ref_as::<H>(storage) })
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::apply(pos + 1, tag, storage, visitor) }
        }
    }
}

/// Invokes a visitor on a mutable reference to the value at a tag.
pub trait ApplyMut<V: Visitor>: Table {
    /// Calls `visitor` with the value in `storage` as the alternative at `tag`.
    ///
    /// # Safety
    /// `storage` must hold an initialized value of the alternative at `tag`
    /// and must be exclusively borrowed for the call.
    unsafe fn apply_mut(pos: usize, tag: usize, storage: *mut u8, visitor: &mut V) -> V::Output;
}

impl<V: Visitor> ApplyMut<V> for Nil {
    unsafe fn apply_mut(pos: usize, tag: usize, _storage: *mut u8, _visitor: &mut V) -> V::Output {
        invalid_tag(tag, pos)
    }
}

impl<H, T, V> ApplyMut<V> for Cons<H, T>
where
    H: 'static,
    T: ApplyMut<V>,
    V: VisitMut<H>,
{
    #[inline]
    unsafe fn apply_mut(pos: usize, tag: usize, storage: *mut u8, visitor: &mut V) -> V::Output {
        if tag == pos {
            // SAFETY: the tag names `H`; the caller holds the slot exclusively.
            visitor.visit_mut(unsafe { slot::mut_as::<H>(storage) })
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::apply_mut(pos + 1, tag, storage, visitor) }
        }
    }
}
