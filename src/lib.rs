//! # `halo-variant` - Closed-Set Tagged Union
//!
//! A value container that holds exactly one value from a fixed list of
//! alternative types, with type-checked extraction and visitor dispatch over
//! one or two variants.
//!
//! ## Safety Guarantees
//!
//! ### Memory Safety
//! - **No unsafe code in public APIs**: the raw storage operations are
//!   concentrated in a small audited module (`raw::slot`); every public method
//!   is safe.
//! - **Single live value**: the tag always names the one initialized value in
//!   storage. Assignment drops the old value before writing the new one and
//!   still installs the new value if that drop unwinds.
//! - **Exactly-once drop**: the live value is dropped once, by assignment or by
//!   the variant's own `Drop`.
//!
//! ### Static Checks
//! - **Type not in variant**: asking to construct, assign or extract a type
//!   that is not an alternative is a compile error.
//! - **Exhaustive visitors**: dispatch only compiles if the visitor handles
//!   every alternative (or every pair of alternatives).
//! - **Well-formed lists**: borrowed alternatives are rejected by the
//!   `'static` bound; `&'static` references and duplicate alternatives are
//!   rejected when the first instance is built.
//!
//! ## Architecture
//!
//! 1. **Alternative lists** (`Cons<H, T>` / `Nil`, see [`alternatives!`]):
//!    - [`Alternatives`]: size, alignment and well-formedness of the list
//!    - [`Member`]: compile-time position of a type
//!
//! 2. **Dispatch tables** ([`dispatch`]):
//!    - Recursive per-position destroy and visit, resolving a runtime tag to a
//!      static type
//!    - Cross-product resolution for two variants, walking each axis once
//!
//! 3. **Container** ([`Variant`]):
//!    - Inline storage sized to the largest alternative plus a tag
//!    - `new`, `set`, `get`, `get_mut`, `which`, `visit`, `visit_mut`
//!
//! 4. **Visitors** ([`visitor`]):
//!    - [`Visit`], [`VisitMut`], [`VisitPair`], [`VisitPairMut`]
//!    - [`apply`], [`apply_mut`], [`apply_pair`], [`apply_pair_mut`]
//!
//! ## Example
//!
//! ```rust
//! use halo_variant::{alternatives, apply_pair, Variant, VisitPair, Visitor};
//!
//! type A = Variant<alternatives![i32, String]>;
//! type B = Variant<alternatives![bool, String]>;
//!
//! struct Join;
//!
//! impl Visitor for Join {
//!     type Output = String;
//! }
//!
//! impl<L: std::fmt::Debug, R: std::fmt::Debug> VisitPair<L, R> for Join {
//!     fn visit_pair(&mut self, left: &L, right: &R) -> String {
//!         format!("{left:?}/{right:?}")
//!     }
//! }
//!
//! let a = A::new(5i32);
//! let b = B::new(String::from("x"));
//! assert_eq!(apply_pair(Join, &a, &b), "5/\"x\"");
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod macros;

pub mod dispatch;
pub mod error;
pub mod list;
mod raw;
pub mod variant;
pub mod visitor;

pub(crate) use macros::{log_error, log_trace};

pub use error::VariantError;
pub use list::{Alternatives, Cons, Here, Member, Nil, There};
pub use variant::Variant;
pub use visitor::{
    apply, apply_mut, apply_pair, apply_pair_mut, Visit, VisitMut, VisitPair, VisitPairMut,
    Visitor,
};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    type Small = <alternatives![u8, u16] as Alternatives>::Storage;
    type Mixed = <alternatives![u8, [u8; 24], u64] as Alternatives>::Storage;

    // Storage is exactly as large as the largest alternative, rounded to
    // the strictest alignment.
    assert!(mem::size_of::<Small>() == 2);
    assert!(mem::align_of::<Small>() == mem::align_of::<u16>());
    assert!(mem::size_of::<Mixed>() == 24);
    assert!(mem::align_of::<Mixed>() == mem::align_of::<u64>());

    // The container adds only the tag on top of its storage.
    assert!(mem::size_of::<Variant<alternatives![u8, u16]>>() <= mem::size_of::<usize>() * 2);
    assert!(mem::size_of::<Variant<alternatives![u8, [u8; 24], u64]>>() <= mem::size_of::<usize>() + 24 + 8);
};
