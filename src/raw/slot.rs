//! Unsafe, centralized operations on the type-erased storage slot.
//!
//! The container keeps its value in a `MaybeUninit<L::Storage>` and hands the
//! dispatch tables a `*const u8` / `*mut u8` to its first byte. These helpers
//! provide a single place to audit:
//! - writes (`ptr::write`)
//! - moves out (`ptr::read`)
//! - drops (`drop_in_place`)
//! - conversion to references
//!
//! ## Core invariant
//! For all callers in this crate, the slot holds an initialized `T` *exactly
//! when* the owning variant's tag names `T`, from the end of construction or
//! assignment until `drop` begins (or the value is moved out).

use core::{mem::MaybeUninit, ptr};

/// Returns a read-only erased pointer to the slot's first byte.
#[inline(always)]
pub(crate) fn erase<S>(slot: &MaybeUninit<S>) -> *const u8 {
    slot.as_ptr().cast::<u8>()
}

/// Returns a mutable erased pointer to the slot's first byte.
#[inline(always)]
pub(crate) fn erase_mut<S>(slot: &mut MaybeUninit<S>) -> *mut u8 {
    slot.as_mut_ptr().cast::<u8>()
}

/// Writes `value` into the slot as a `T`.
///
/// # Safety
/// - `slot` must be valid for writes of `T` and suitably aligned.
/// - Any value previously in the slot must already be dropped or moved out.
#[inline(always)]
pub(crate) unsafe fn write_as<T>(slot: *mut u8, value: T) {
    // SAFETY: caller upholds the overwrite contract.
    unsafe { ptr::write(slot.cast::<T>(), value) }
}

/// Drops the `T` held in the slot.
///
/// # Safety
/// - The slot must hold an initialized `T`.
/// - Must not be called more than once for the same logical value.
#[inline(always)]
pub(crate) unsafe fn drop_as<T>(slot: *mut u8) {
    // SAFETY: caller asserts initialization and drop uniqueness.
    unsafe { ptr::drop_in_place(slot.cast::<T>()) }
}

/// Bitwise-moves the `T` out of the slot.
///
/// # Safety
/// - The slot must hold an initialized `T`.
/// - The slot must be treated as uninitialized afterwards.
#[inline(always)]
pub(crate) unsafe fn read_as<T>(slot: *const u8) -> T {
    // SAFETY: caller asserts initialization and gives up ownership.
    unsafe { ptr::read(slot.cast::<T>()) }
}

/// Interprets the slot as `&T`.
///
/// # Safety
/// - The slot must hold an initialized `T` for all of `'a`.
/// - No `&mut T` to the same location may be live during `'a`.
#[inline(always)]
pub(crate) unsafe fn ref_as<'a, T>(slot: *const u8) -> &'a T {
    // SAFETY: caller asserts initialization and shared aliasing.
    unsafe { &*slot.cast::<T>() }
}

/// Interprets the slot as `&mut T`.
///
/// # Safety
/// - The slot must hold an initialized `T` for all of `'a`.
/// - The returned reference must be exclusive for `'a`.
#[inline(always)]
pub(crate) unsafe fn mut_as<'a, T>(slot: *mut u8) -> &'a mut T {
    // SAFETY: caller asserts initialization and exclusivity.
    unsafe { &mut *slot.cast::<T>() }
}
