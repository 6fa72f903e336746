//! Runtime tag → static type resolution.
//!
//! Each table is a trait implemented recursively over the alternative list:
//! the `Cons<H, T>` impl handles position `pos` as an `H` and defers every
//! other tag to `T` with `pos + 1`; the `Nil` impl is only reached with a tag
//! outside the list, which is fatal.
//!
//! - [`table`]: destroy and single-visitor dispatch.
//! - [`pair`]: joint dispatch over two variants.
//! - [`derive`]: the rows backing `Clone`, `PartialEq` and `Debug`.

pub mod derive;
pub mod pair;
pub mod table;

pub use derive::{CloneTable, DebugTable, EqTable};
pub use pair::{ApplyPair, ApplyPairMut, ApplyRight, ApplyRightMut};
pub use table::{Apply, ApplyMut, Table};

/// Reports a tag that matched no alternative.
///
/// Reaching this means the variant's invariant is already broken, so it is
/// never surfaced as a recoverable error.
#[cold]
#[inline(never)]
pub(crate) fn invalid_tag(tag: usize, len: usize) -> ! {
    crate::log_error!(tag, len, "variant tag is invalid");
    panic!("internal error: variant tag {tag} is invalid ({len} alternatives)");
}
