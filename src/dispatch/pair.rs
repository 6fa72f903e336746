//! Cross-product dispatch over two variants.
//!
//! The search advances one axis at a time: [`ApplyPair`] walks the left list
//! until its position matches the left tag, fixing the left type `A`; then
//! [`ApplyRight`] walks the right list until the right tag matches and calls
//! `VisitPair<A, B>`. Each axis is walked once, so the cost is
//! `O(left_tag + right_tag)` rather than a full cross join.

use super::{invalid_tag, Table};
use crate::list::{Cons, Nil};
use crate::raw::slot;
use crate::visitor::{VisitPair, VisitPairMut, Visitor};

/// Left axis of the shared two-variant dispatch.
pub trait ApplyPair<R: Table, V: Visitor>: Table {
    /// Resolves the left tag, then hands over to `R`'s [`ApplyRight`].
    ///
    /// # Safety
    /// Each storage must hold an initialized value of the alternative its tag
    /// names, and neither may be mutated during the call.
    unsafe fn apply_pair(
        pos: usize,
        left_tag: usize,
        left: *const u8,
        right_tag: usize,
        right: *const u8,
        visitor: &mut V,
    ) -> V::Output;
}

impl<R: Table, V: Visitor> ApplyPair<R, V> for Nil {
    unsafe fn apply_pair(
        pos: usize,
        left_tag: usize,
        _left: *const u8,
        _right_tag: usize,
        _right: *const u8,
        _visitor: &mut V,
    ) -> V::Output {
        invalid_tag(left_tag, pos)
    }
}

impl<H, T, R, V> ApplyPair<R, V> for Cons<H, T>
where
    H: 'static,
    T: ApplyPair<R, V>,
    R: ApplyRight<H, V>,
    V: Visitor,
{
    #[inline]
    unsafe fn apply_pair(
        pos: usize,
        left_tag: usize,
        left: *const u8,
        right_tag: usize,
        right: *const u8,
        visitor: &mut V,
    ) -> V::Output {
        if left_tag != pos {
            // SAFETY: forwarded caller contract.
            return unsafe { T::apply_pair(pos + 1, left_tag, left, right_tag, right, visitor) };
        }
        // SAFETY: the left tag names `H`; the right storage is forwarded as is.
        unsafe { R::apply_right(0, right_tag, right, slot::ref_as::<H>(left), visitor) }
    }
}

/// Right axis of the shared two-variant dispatch, with the left value known.
pub trait ApplyRight<A, V: Visitor>: Table {
    /// Resolves the right tag and calls `VisitPair<A, _>`.
    ///
    /// # Safety
    /// `storage` must hold an initialized value of the alternative at `tag`
    /// and must not be mutated during the call.
    unsafe fn apply_right(
        pos: usize,
        tag: usize,
        storage: *const u8,
        left: &A,
        visitor: &mut V,
    ) -> V::Output;
}

impl<A, V: Visitor> ApplyRight<A, V> for Nil {
    unsafe fn apply_right(
        pos: usize,
        tag: usize,
        _storage: *const u8,
        _left: &A,
        _visitor: &mut V,
    ) -> V::Output {
        invalid_tag(tag, pos)
    }
}

impl<A, H, T, V> ApplyRight<A, V> for Cons<H, T>
where
    H: 'static,
    T: ApplyRight<A, V>,
    V: VisitPair<A, H>,
{
    #[inline]
    unsafe fn apply_right(
        pos: usize,
        tag: usize,
        storage: *const u8,
        left: &A,
        visitor: &mut V,
    ) -> V::Output {
        if tag == pos {
            // SAFETY: the tag names `H`; the caller keeps the slot unmutated.
            visitor.visit_pair(left, unsafe { slot::ref_as::<H>(storage) })
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::apply_right(pos + 1, tag, storage, left, visitor) }
        }
    }
}

/// Left axis of the mutable two-variant dispatch.
pub trait ApplyPairMut<R: Table, V: Visitor>: Table {
    /// Resolves the left tag, then hands over to `R`'s [`ApplyRightMut`].
    ///
    /// # Safety
    /// Each storage must hold an initialized value of the alternative its tag
    /// names, and the two storages must be distinct and exclusively borrowed.
    unsafe fn apply_pair_mut(
        pos: usize,
        left_tag: usize,
        left: *mut u8,
        right_tag: usize,
        right: *mut u8,
        visitor: &mut V,
    ) -> V::Output;
}

impl<R: Table, V: Visitor> ApplyPairMut<R, V> for Nil {
    unsafe fn apply_pair_mut(
        pos: usize,
        left_tag: usize,
        _left: *mut u8,
        _right_tag: usize,
        _right: *mut u8,
        _visitor: &mut V,
    ) -> V::Output {
        invalid_tag(left_tag, pos)
    }
}

impl<H, T, R, V> ApplyPairMut<R, V> for Cons<H, T>
where
    H: 'static,
    T: ApplyPairMut<R, V>,
    R: ApplyRightMut<H, V>,
    V: Visitor,
{
    #[inline]
    unsafe fn apply_pair_mut(
        pos: usize,
        left_tag: usize,
        left: *mut u8,
        right_tag: usize,
        right: *mut u8,
        visitor: &mut V,
    ) -> V::Output {
        if left_tag != pos {
            // SAFETY: forwarded caller contract.
            return unsafe {
                T::apply_pair_mut(pos + 1, left_tag, left, right_tag, right, visitor)
            };
        }
        // SAFETY: the left tag names `H` and the left slot is exclusive.
        unsafe { R::apply_right_mut(0, right_tag, right, slot::mut_as::<H>(left), visitor) }
    }
}

/// Right axis of the mutable two-variant dispatch.
pub trait ApplyRightMut<A, V: Visitor>: Table {
    /// Resolves the right tag and calls `VisitPairMut<A, _>`.
    ///
    /// # Safety
    /// `storage` must hold an initialized value of the alternative at `tag`,
    /// be exclusively borrowed, and not overlap `left`.
    unsafe fn apply_right_mut(
        pos: usize,
        tag: usize,
        storage: *mut u8,
        left: &mut A,
        visitor: &mut V,
    ) -> V::Output;
}

impl<A, V: Visitor> ApplyRightMut<A, V> for Nil {
    unsafe fn apply_right_mut(
        pos: usize,
        tag: usize,
        _storage: *mut u8,
        _left: &mut A,
        _visitor: &mut V,
    ) -> V::Output {
        invalid_tag(tag, pos)
    }
}

impl<A, H, T, V> ApplyRightMut<A, V> for Cons<H, T>
where
    H: 'static,
    T: ApplyRightMut<A, V>,
    V: VisitPairMut<A, H>,
{
    #[inline]
    unsafe fn apply_right_mut(
        pos: usize,
        tag: usize,
        storage: *mut u8,
        left: &mut A,
        visitor: &mut V,
    ) -> V::Output {
        if tag == pos {
            // SAFETY: the tag names `H`; the slot is exclusive and disjoint from `left`.
            visitor.visit_pair_mut(left, unsafe { slot::mut_as::<H>(storage) })
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::apply_right_mut(pos + 1, tag, storage, left, visitor) }
        }
    }
}
