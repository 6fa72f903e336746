//! Centralized unsafe accessors for variant storage.
//!
//! This module exists to *concentrate* the pointer casts and in-place
//! lifetime operations performed on the storage union. The dispatch tables and
//! the container call into the small surface in [`slot`] instead of using
//! `ptr::*` directly.
//!
//! ## Layout rule
//! Every alternative lives at offset 0 of the storage union (each level is a
//! `#[repr(C)]` union), so a pointer to the storage is a valid pointer to
//! whichever alternative the tag names.

pub(crate) mod slot;
