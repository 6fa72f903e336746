//! `Variant`: a closed-set tagged union with inline storage.
//!
//! A `Variant<L>` holds exactly one value whose type is one of the
//! alternatives of `L`. The value lives in a storage union sized to the
//! largest alternative; a tag records which alternative is live.
//!
//! Implementation details:
//! - Storage is a `MaybeUninit` over the recursive `#[repr(C)]` union built by
//!   the alternative list, so every alternative sits at offset 0.
//! - The tag is the alternative's position; the dispatch tables turn it back
//!   into a static type for drops and visits.
//! - There is no empty state: construction always installs a value, and
//!   assignment installs the new value even if dropping the old one unwinds.

use crate::dispatch::{Apply, ApplyMut, Table};
use crate::error::VariantError;
use crate::list::analyzer::assert_well_formed;
use crate::list::Member;
use crate::raw::slot;
use crate::visitor::Visitor;
use core::any::type_name;
use core::mem::{align_of, size_of, ManuallyDrop, MaybeUninit};

mod traits;

/// A value of exactly one of the alternative types in `L`.
///
/// Build `L` with [`alternatives!`](crate::alternatives).
///
/// # Example
///
/// ```rust
/// use halo_variant::{alternatives, Variant};
///
/// let mut v = Variant::<alternatives![i32, String]>::new(42i32);
/// assert_eq!(v.which(), 0);
/// assert_eq!(v.get::<i32, _>(), Ok(&42));
/// assert!(v.get::<String, _>().is_err());
///
/// v.set(String::from("hi"));
/// assert_eq!(v.which(), 1);
/// assert_eq!(v.get::<String, _>().map(String::as_str), Ok("hi"));
/// assert!(v.get::<i32, _>().is_err());
/// ```
pub struct Variant<L: Table> {
    tag: usize,
    storage: MaybeUninit<L::Storage>,
}

impl<L: Table> Variant<L> {
    /// Creates a variant holding `value`.
    ///
    /// # Panics
    /// Panics if `L` is ill-formed (a reference or duplicate alternative).
    /// Such a list can never produce an instance.
    pub fn new<X, I>(value: X) -> Self
    where
        L: Member<X, I>,
    {
        const {
            assert!(
                size_of::<L::Storage>() >= L::MAX_SIZE && align_of::<L::Storage>() >= L::MAX_ALIGN,
                "variant storage cannot hold its largest alternative"
            );
        }
        assert_well_formed::<L>();

        let mut storage = MaybeUninit::uninit();
        // SAFETY: the storage is fresh and fits every alternative at offset 0.
        unsafe { slot::write_as(slot::erase_mut(&mut storage), value) };
        Self {
            tag: <L as Member<X, I>>::POSITION,
            storage,
        }
    }

    /// Position of `X` in the alternative list.
    pub const fn position<X, I>() -> usize
    where
        L: Member<X, I>,
    {
        <L as Member<X, I>>::POSITION
    }

    /// Returns the position of the live alternative.
    #[inline]
    pub fn which(&self) -> usize {
        self.tag
    }

    /// Returns the type name of the live alternative.
    pub fn active_type_name(&self) -> &'static str {
        match L::type_name_at(self.tag) {
            Some(name) => name,
            None => crate::dispatch::invalid_tag(self.tag, L::LEN),
        }
    }

    /// Returns `true` if the live alternative is an `X`.
    #[inline]
    pub fn is<X, I>(&self) -> bool
    where
        L: Member<X, I>,
    {
        self.tag == <L as Member<X, I>>::POSITION
    }

    /// Replaces the live value with `value`.
    ///
    /// The old value is dropped in place before the new one is written. If
    /// that drop panics, `value` is still installed before the panic
    /// propagates.
    pub fn set<X, I>(&mut self, value: X)
    where
        L: Member<X, I>,
    {
        /// Installs the new value when dropped, including during unwinding.
        struct Reinit<'a, X> {
            tag: &'a mut usize,
            storage: *mut u8,
            value: Option<X>,
            position: usize,
        }

        impl<X> Drop for Reinit<'_, X> {
            fn drop(&mut self) {
                if let Some(value) = self.value.take() {
                    // SAFETY: the previous value has been dropped (or its
                    // drop is unwinding), so the slot is free.
                    unsafe { slot::write_as(self.storage, value) };
                    *self.tag = self.position;
                }
            }
        }

        let old = self.tag;
        let position = <L as Member<X, I>>::POSITION;
        if old != position {
            crate::log_trace!(from = old, to = position, "variant switched alternative");
        }

        let storage = slot::erase_mut(&mut self.storage);
        let reinit = Reinit {
            tag: &mut self.tag,
            storage,
            value: Some(value),
            position,
        };
        // SAFETY: the slot holds the alternative named by `old`, and
        // `reinit` refills it whatever the drop does.
        unsafe { L::del(0, old, storage) };
        drop(reinit);
    }

    /// Replaces the live value with `value`, returning the previous variant.
    pub fn replace<X, I>(&mut self, value: X) -> Self
    where
        L: Member<X, I>,
    {
        core::mem::replace(self, Self::new(value))
    }

    /// Returns a reference to the live value if it is an `X`.
    ///
    /// # Errors
    /// Returns [`VariantError::TypeMismatch`] if another alternative is live.
    pub fn get<X, I>(&self) -> Result<&X, VariantError>
    where
        L: Member<X, I>,
    {
        if self.is::<X, I>() {
            // SAFETY: the tag names `X`; the borrow of `self` keeps it live.
            Ok(unsafe { slot::ref_as(self.as_ptr()) })
        } else {
            Err(self.mismatch::<X>())
        }
    }

    /// Returns a mutable reference to the live value if it is an `X`.
    ///
    /// # Errors
    /// Returns [`VariantError::TypeMismatch`] if another alternative is live.
    pub fn get_mut<X, I>(&mut self) -> Result<&mut X, VariantError>
    where
        L: Member<X, I>,
    {
        if self.is::<X, I>() {
            // SAFETY: the tag names `X`; the exclusive borrow of `self` keeps
            // it live and unaliased.
            Ok(unsafe { slot::mut_as(self.as_mut_ptr()) })
        } else {
            Err(self.mismatch::<X>())
        }
    }

    /// Moves the live value out if it is an `X`, otherwise returns `self`.
    ///
    /// # Errors
    /// Gives the variant back unchanged when another alternative is live.
    pub fn into_inner<X, I>(self) -> Result<X, Self>
    where
        L: Member<X, I>,
    {
        if !self.is::<X, I>() {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        // SAFETY: the tag names `X`, and `this` is never dropped, so the value
        // is moved out exactly once.
        Ok(unsafe { slot::read_as(this.as_ptr()) })
    }

    /// Runs `visitor` on the live value.
    ///
    /// Only compiles if `visitor` handles every alternative of `L`.
    pub fn visit<V>(&self, visitor: &mut V) -> V::Output
    where
        V: Visitor,
        L: Apply<V>,
    {
        // SAFETY: the tag names the live value, and `&self` keeps it unmutated.
        unsafe { L::apply(0, self.tag, self.as_ptr(), visitor) }
    }

    /// Runs `visitor` on the live value, mutably.
    pub fn visit_mut<V>(&mut self, visitor: &mut V) -> V::Output
    where
        V: Visitor,
        L: ApplyMut<V>,
    {
        let tag = self.tag;
        // SAFETY: the tag names the live value, and `&mut self` is exclusive.
        unsafe { L::apply_mut(0, tag, self.as_mut_ptr(), visitor) }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const u8 {
        slot::erase(&self.storage)
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        slot::erase_mut(&mut self.storage)
    }

    fn mismatch<X>(&self) -> VariantError {
        VariantError::TypeMismatch {
            requested: type_name::<X>(),
            active: self.active_type_name(),
        }
    }
}

impl<L: Table> Drop for Variant<L> {
    fn drop(&mut self) {
        let tag = self.tag;
        // SAFETY: the tag names the live value, which is dropped exactly once
        // here.
        unsafe { L::del(0, tag, self.as_mut_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alternatives, Visit, VisitMut};
    use std::cell::Cell;
    use std::rc::Rc;

    type Scalar = Variant<alternatives![i32, String]>;

    #[test]
    fn test_new_sets_tag_and_value() {
        let v = Scalar::new(42i32);
        assert_eq!(v.which(), 0);
        assert_eq!(v.get::<i32, _>(), Ok(&42));
        assert!(v.is::<i32, _>());
        assert!(!v.is::<String, _>());
        assert_eq!(v.active_type_name(), "i32");
    }

    #[test]
    fn test_get_mismatch_reports_types() {
        let v = Scalar::new(42i32);
        let err = v.get::<String, _>().unwrap_err();
        assert_eq!(
            err,
            VariantError::TypeMismatch {
                requested: type_name::<String>(),
                active: "i32",
            }
        );
    }

    #[test]
    fn test_set_switches_alternative() {
        let mut v = Scalar::new(42i32);
        v.set(String::from("hi"));
        assert_eq!(v.which(), 1);
        assert_eq!(v.get::<String, _>().unwrap(), "hi");
        assert!(v.get::<i32, _>().is_err());

        v.set(7i32);
        assert_eq!(v.get::<i32, _>(), Ok(&7));
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut v = Scalar::new(String::from("ab"));
        v.get_mut::<String, _>().unwrap().push('c');
        assert_eq!(v.get::<String, _>().unwrap(), "abc");
        assert!(v.get_mut::<i32, _>().is_err());
    }

    #[test]
    fn test_position_is_const() {
        const POS: usize = Scalar::position::<String, _>();
        assert_eq!(Scalar::position::<i32, _>(), 0);
        assert_eq!(POS, 1);
    }

    #[test]
    fn test_into_inner() {
        let v = Scalar::new(String::from("owned"));
        let v = v.into_inner::<i32, _>().unwrap_err();
        assert_eq!(v.into_inner::<String, _>().unwrap(), "owned");
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut v = Scalar::new(1i32);
        let old = v.replace(String::from("new"));
        assert_eq!(old.get::<i32, _>(), Ok(&1));
        assert_eq!(v.get::<String, _>().unwrap(), "new");
    }

    #[test]
    fn test_drop_runs_once() {
        let shared = Rc::new(());
        {
            let _v = Variant::<alternatives![u8, Rc<()>]>::new(Rc::clone(&shared));
            assert_eq!(Rc::strong_count(&shared), 2);
        }
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_set_drops_previous_value() {
        let shared = Rc::new(());
        let mut v = Variant::<alternatives![u8, Rc<()>]>::new(Rc::clone(&shared));
        v.set(3u8);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    struct Bump<'a>(&'a Cell<u32>);

    impl Visitor for Bump<'_> {
        type Output = ();
    }

    impl VisitMut<i32> for Bump<'_> {
        fn visit_mut(&mut self, value: &mut i32) {
            *value += 1;
            self.0.set(self.0.get() + 1);
        }
    }

    impl VisitMut<String> for Bump<'_> {
        fn visit_mut(&mut self, value: &mut String) {
            value.push('+');
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_visit_mut_updates_value() {
        let calls = Cell::new(0);
        let mut v = Scalar::new(1i32);
        v.visit_mut(&mut Bump(&calls));
        assert_eq!(v.get::<i32, _>(), Ok(&2));

        v.set(String::from("x"));
        v.visit_mut(&mut Bump(&calls));
        assert_eq!(v.get::<String, _>().unwrap(), "x+");
        assert_eq!(calls.get(), 2);
    }

    struct Tag;

    impl Visitor for Tag {
        type Output = usize;
    }

    impl Visit<i32> for Tag {
        fn visit(&mut self, _: &i32) -> usize {
            0
        }
    }

    impl Visit<String> for Tag {
        fn visit(&mut self, _: &String) -> usize {
            1
        }
    }

    #[test]
    fn test_visit_matches_which() {
        let a = Scalar::new(5i32);
        let b = Scalar::new(String::new());
        assert_eq!(a.visit(&mut Tag), a.which());
        assert_eq!(b.visit(&mut Tag), b.which());
    }

    #[test]
    #[should_panic(expected = "duplicate type")]
    fn test_duplicate_list_rejected_at_construction() {
        let _ = Variant::<alternatives![u8, u16, u8]>::new(1u16);
    }

    #[test]
    #[should_panic(expected = "reference types are not permitted")]
    fn test_reference_list_rejected_at_construction() {
        let _ = Variant::<alternatives![u8, &'static str]>::new(1u8);
    }
}
