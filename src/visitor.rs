//! The visitor protocol.
//!
//! A visitor declares its result type once through [`Visitor`] and then
//! handles each alternative through one [`Visit`] (or [`VisitMut`]) impl per
//! type. Dispatch only compiles if every alternative of the variant is
//! handled.
//!
//! Two-variant dispatch uses [`VisitPair`] / [`VisitPairMut`], implemented for
//! every `(left, right)` pair of alternatives.
//!
//! # Example
//!
//! ```rust
//! use halo_variant::{alternatives, apply, Variant, Visit, Visitor};
//!
//! struct Describe;
//!
//! impl Visitor for Describe {
//!     type Output = String;
//! }
//!
//! impl Visit<i32> for Describe {
//!     fn visit(&mut self, value: &i32) -> String {
//!         format!("int {value}")
//!     }
//! }
//!
//! impl Visit<String> for Describe {
//!     fn visit(&mut self, value: &String) -> String {
//!         format!("text {value:?}")
//!     }
//! }
//!
//! let v = Variant::<alternatives![i32, String]>::new(7i32);
//! assert_eq!(apply(Describe, &v), "int 7");
//! ```

use crate::dispatch::{Apply, ApplyMut, ApplyPair, ApplyPairMut, Table};
use crate::Variant;

/// Declares the result type shared by all of a visitor's handlers.
pub trait Visitor {
    /// Value returned by every handler.
    type Output;
}

/// Handles a shared reference to alternative `T`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot visit alternative `{T}`",
    label = "missing `Visit<{T}>` impl"
)]
pub trait Visit<T>: Visitor {
    /// Called with the live value when it is a `T`.
    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Handles a mutable reference to alternative `T`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot mutably visit alternative `{T}`",
    label = "missing `VisitMut<{T}>` impl"
)]
pub trait VisitMut<T>: Visitor {
    /// Called with the live value when it is a `T`.
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

/// Handles a pair of live alternatives `(A, B)` from two variants.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot visit the pair `({A}, {B})`",
    label = "missing `VisitPair<{A}, {B}>` impl"
)]
pub trait VisitPair<A, B>: Visitor {
    /// Called with both live values when they are an `A` and a `B`.
    fn visit_pair(&mut self, left: &A, right: &B) -> Self::Output;
}

/// Mutable form of [`VisitPair`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot mutably visit the pair `({A}, {B})`",
    label = "missing `VisitPairMut<{A}, {B}>` impl"
)]
pub trait VisitPairMut<A, B>: Visitor {
    /// Called with both live values when they are an `A` and a `B`.
    fn visit_pair_mut(&mut self, left: &mut A, right: &mut B) -> Self::Output;
}

/// Runs `visitor` on the live value of `variant`.
pub fn apply<V, L>(mut visitor: V, variant: &Variant<L>) -> V::Output
where
    V: Visitor,
    L: Apply<V>,
{
    variant.visit(&mut visitor)
}

/// Runs `visitor` on the live value of `variant`, mutably.
pub fn apply_mut<V, L>(mut visitor: V, variant: &mut Variant<L>) -> V::Output
where
    V: Visitor,
    L: ApplyMut<V>,
{
    variant.visit_mut(&mut visitor)
}

/// Runs `visitor` on the live values of two variants at once.
///
/// The variants may have different alternative lists.
pub fn apply_pair<V, L, R>(mut visitor: V, left: &Variant<L>, right: &Variant<R>) -> V::Output
where
    V: Visitor,
    L: ApplyPair<R, V>,
    R: Table,
{
    // SAFETY: both tags name the values their storages hold, and both
    // variants stay borrowed for the duration of the call.
    unsafe {
        L::apply_pair(
            0,
            left.which(),
            left.as_ptr(),
            right.which(),
            right.as_ptr(),
            &mut visitor,
        )
    }
}

/// Runs `visitor` on the live values of two variants at once, mutably.
pub fn apply_pair_mut<V, L, R>(
    mut visitor: V,
    left: &mut Variant<L>,
    right: &mut Variant<R>,
) -> V::Output
where
    V: Visitor,
    L: ApplyPairMut<R, V>,
    R: Table,
{
    let (left_tag, right_tag) = (left.which(), right.which());
    // SAFETY: both tags name the values their storages hold, and the two
    // exclusive borrows cannot alias.
    unsafe {
        L::apply_pair_mut(
            0,
            left_tag,
            left.as_mut_ptr(),
            right_tag,
            right.as_mut_ptr(),
            &mut visitor,
        )
    }
}
