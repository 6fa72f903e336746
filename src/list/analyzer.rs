//! Static analysis of an alternative list.
//!
//! Everything here is a property of the declaration, not of an instance: the
//! constants are evaluated at compile time and the `TypeId` comparisons in the
//! well-formedness checks compare compile-time constants.
//!
//! ## Checks
//! - **No reference types**: alternatives are owned by the variant. Borrowed
//!   types are already excluded by the `'static` bound on every alternative;
//!   `&'static T` is caught by [`Alternatives::no_reference_types`].
//! - **No duplicates**: a type may appear at most once, otherwise its position
//!   would be ambiguous.

use super::{sealed::Sealed, Cons, Nil, Slot};
use crate::error::VariantError;
use core::any::{type_name, TypeId};
use core::mem::{align_of, size_of};

/// Static facts about an alternative list.
///
/// Implemented only for [`Nil`] and [`Cons`]; build lists with
/// [`alternatives!`](crate::alternatives).
pub trait Alternatives: Sealed + 'static {
    /// Number of alternatives.
    const LEN: usize;

    /// Size in bytes of the largest alternative.
    const MAX_SIZE: usize;

    /// Strictest alignment among the alternatives.
    const MAX_ALIGN: usize;

    /// Inline storage able to hold any single alternative.
    type Storage;

    /// Name of the first alternative that is a reference type, if any.
    fn first_reference() -> Option<&'static str>;

    /// Name of the first alternative that reappears later in the list, if any.
    fn first_duplicate() -> Option<&'static str>;

    /// Position of the first alternative whose `TypeId` is `id`.
    fn position_of_id(id: TypeId) -> Option<usize>;

    /// Name of the alternative at `tag`, or `None` past the end of the list.
    fn type_name_at(tag: usize) -> Option<&'static str>;

    /// Returns `true` if no alternative is a reference type.
    fn no_reference_types() -> bool {
        Self::first_reference().is_none()
    }

    /// Returns `true` if no alternative appears twice.
    fn no_duplicates() -> bool {
        Self::first_duplicate().is_none()
    }

    /// Position of `X` in the list, or `None` if it is not an alternative.
    fn position<X: 'static>() -> Option<usize> {
        Self::position_of_id(TypeId::of::<X>())
    }

    /// Checks that the list may back a variant.
    ///
    /// # Errors
    /// Returns [`VariantError::ReferenceAlternative`] or
    /// [`VariantError::DuplicateAlternative`] naming the first offending type.
    fn validate() -> Result<(), VariantError> {
        if let Some(type_name) = Self::first_reference() {
            return Err(VariantError::ReferenceAlternative { type_name });
        }
        if let Some(type_name) = Self::first_duplicate() {
            return Err(VariantError::DuplicateAlternative { type_name });
        }
        Ok(())
    }
}

impl Alternatives for Nil {
    const LEN: usize = 0;
    const MAX_SIZE: usize = 0;
    const MAX_ALIGN: usize = 1;

    type Storage = ();

    fn first_reference() -> Option<&'static str> {
        None
    }

    fn first_duplicate() -> Option<&'static str> {
        None
    }

    fn position_of_id(_id: TypeId) -> Option<usize> {
        None
    }

    fn type_name_at(_tag: usize) -> Option<&'static str> {
        None
    }
}

impl<H: 'static, T: Alternatives> Alternatives for Cons<H, T> {
    const LEN: usize = T::LEN + 1;
    const MAX_SIZE: usize = max(size_of::<H>(), T::MAX_SIZE);
    const MAX_ALIGN: usize = max(align_of::<H>(), T::MAX_ALIGN);

    type Storage = Slot<H, T::Storage>;

    fn first_reference() -> Option<&'static str> {
        if is_reference::<H>() {
            Some(type_name::<H>())
        } else {
            T::first_reference()
        }
    }

    fn first_duplicate() -> Option<&'static str> {
        if T::position_of_id(TypeId::of::<H>()).is_some() {
            Some(type_name::<H>())
        } else {
            T::first_duplicate()
        }
    }

    fn position_of_id(id: TypeId) -> Option<usize> {
        if id == TypeId::of::<H>() {
            Some(0)
        } else {
            T::position_of_id(id).map(|pos| pos + 1)
        }
    }

    fn type_name_at(tag: usize) -> Option<&'static str> {
        match tag {
            0 => Some(type_name::<H>()),
            _ => T::type_name_at(tag - 1),
        }
    }
}

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Reference types are the only types whose name starts with `&`.
fn is_reference<T: ?Sized>() -> bool {
    type_name::<T>().starts_with('&')
}

/// Panics if `L` cannot back a variant.
///
/// Called on every construction; the checks fold to constants.
#[inline]
pub(crate) fn assert_well_formed<L: Alternatives>() {
    if let Err(err) = L::validate() {
        crate::log_error!(error = %err, "rejected ill-formed alternative list");
        panic!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alternatives;

    #[test]
    fn test_len_and_max_size() {
        type L = alternatives![u8, [u64; 4], u16];
        assert_eq!(L::LEN, 3);
        assert_eq!(L::MAX_SIZE, 32);
        assert_eq!(L::MAX_ALIGN, align_of::<u64>());
        assert!(size_of::<<L as Alternatives>::Storage>() >= L::MAX_SIZE);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(Nil::LEN, 0);
        assert_eq!(Nil::MAX_SIZE, 0);
        assert!(Nil::validate().is_ok());
        assert_eq!(Nil::position::<u8>(), None);
    }

    #[test]
    fn test_position_lookup() {
        type L = alternatives![i32, String, bool];
        assert_eq!(L::position::<i32>(), Some(0));
        assert_eq!(L::position::<String>(), Some(1));
        assert_eq!(L::position::<bool>(), Some(2));
        assert_eq!(L::position::<f64>(), None);
    }

    #[test]
    fn test_duplicate_detected() {
        type L = alternatives![u8, String, u8];
        assert!(!L::no_duplicates());
        assert_eq!(
            L::validate(),
            Err(VariantError::DuplicateAlternative { type_name: "u8" })
        );
    }

    #[test]
    fn test_reference_detected() {
        type L = alternatives![u8, &'static str];
        assert!(!L::no_reference_types());
        assert_eq!(
            L::validate(),
            Err(VariantError::ReferenceAlternative { type_name: "&str" })
        );
    }

    #[test]
    fn test_reference_reported_before_duplicate() {
        type L = alternatives![u8, u8, &'static mut [u8]];
        assert!(matches!(
            L::validate(),
            Err(VariantError::ReferenceAlternative { .. })
        ));
    }

    #[test]
    fn test_type_name_at() {
        type L = alternatives![u8, bool];
        assert_eq!(L::type_name_at(0), Some("u8"));
        assert_eq!(L::type_name_at(1), Some("bool"));
        assert_eq!(L::type_name_at(2), None);
    }

    #[test]
    fn test_well_formed_list_passes() {
        type L = alternatives![u8, Box<u8>, Vec<u8>, Option<u8>];
        assert!(L::validate().is_ok());
        assert_well_formed::<L>();
    }

    #[test]
    #[should_panic(expected = "duplicate type")]
    fn test_assert_well_formed_panics_on_duplicate() {
        assert_well_formed::<alternatives![String, String]>();
    }
}
