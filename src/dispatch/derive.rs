//! Extra table rows behind the std trait impls of `Variant`.
//!
//! A `Clone`/`PartialEq`/`Debug` impl for `Variant<L>` needs the trait on
//! every alternative. Each row below is implemented for `Cons<H, T>` only when
//! `H` has the trait, so the bound `L: CloneTable` says exactly that.

use super::{invalid_tag, Table};
use crate::list::{Cons, Nil};
use crate::raw::slot;
use core::fmt;

/// Clones the value at a tag into fresh storage.
pub trait CloneTable: Table {
    /// Writes a clone of the value in `src` into `dst`.
    ///
    /// # Safety
    /// `src` must hold an initialized value of the alternative at `tag`;
    /// `dst` must be uninitialized storage of the same list.
    unsafe fn clone_at(pos: usize, tag: usize, src: *const u8, dst: *mut u8);
}

impl CloneTable for Nil {
    unsafe fn clone_at(pos: usize, tag: usize, _src: *const u8, _dst: *mut u8) {
        invalid_tag(tag, pos)
    }
}

impl<H: Clone + 'static, T: CloneTable> CloneTable for Cons<H, T> {
    unsafe fn clone_at(pos: usize, tag: usize, src: *const u8, dst: *mut u8) {
        if tag == pos {
            // SAFETY: the tag names `H` in `src`; `dst` is free to overwrite.
            unsafe { slot::write_as(dst, slot::ref_as::<H>(src).clone()) }
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::clone_at(pos + 1, tag, src, dst) }
        }
    }
}

/// Compares two values that share the same tag.
pub trait EqTable: Table {
    /// Returns whether the values in `left` and `right` are equal.
    ///
    /// # Safety
    /// Both storages must hold an initialized value of the alternative at `tag`.
    unsafe fn eq_at(pos: usize, tag: usize, left: *const u8, right: *const u8) -> bool;
}

impl EqTable for Nil {
    unsafe fn eq_at(pos: usize, tag: usize, _left: *const u8, _right: *const u8) -> bool {
        invalid_tag(tag, pos)
    }
}

impl<H: PartialEq + 'static, T: EqTable> EqTable for Cons<H, T> {
    unsafe fn eq_at(pos: usize, tag: usize, left: *const u8, right: *const u8) -> bool {
        if tag == pos {
            // SAFETY: the tag names `H` in both storages.
            unsafe { slot::ref_as::<H>(left) == slot::ref_as::<H>(right) }
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::eq_at(pos + 1, tag, left, right) }
        }
    }
}

/// Formats the value at a tag with its `Debug` impl.
pub trait DebugTable: Table {
    /// Formats the value in `storage`.
    ///
    /// # Safety
    /// `storage` must hold an initialized value of the alternative at `tag`.
    unsafe fn fmt_at(
        pos: usize,
        tag: usize,
        storage: *const u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result;
}

impl DebugTable for Nil {
    unsafe fn fmt_at(
        pos: usize,
        tag: usize,
        _storage: *const u8,
        _f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        invalid_tag(tag, pos)
    }
}

impl<H: fmt::Debug + 'static, T: DebugTable> DebugTable for Cons<H, T> {
    unsafe fn fmt_at(
        pos: usize,
        tag: usize,
        storage: *const u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if tag == pos {
            // SAFETY: the tag names `H`.
            fmt::Debug::fmt(unsafe { slot::ref_as::<H>(storage) }, f)
        } else {
            // SAFETY: forwarded caller contract.
            unsafe { T::fmt_at(pos + 1, tag, storage, f) }
        }
    }
}
