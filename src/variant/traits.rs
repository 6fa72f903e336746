use super::Variant;
use crate::dispatch::{CloneTable, DebugTable, EqTable};
use crate::raw::slot;
use core::fmt;
use core::mem::MaybeUninit;

impl<L: CloneTable> Clone for Variant<L> {
    fn clone(&self) -> Self {
        let mut storage = MaybeUninit::uninit();
        // SAFETY: the tag names the live value in `self`; `storage` is fresh.
        unsafe { L::clone_at(0, self.tag, self.as_ptr(), slot::erase_mut(&mut storage)) };
        Self {
            tag: self.tag,
            storage,
        }
    }
}

impl<L: EqTable> PartialEq for Variant<L> {
    fn eq(&self, other: &Self) -> bool {
        // SAFETY: equal tags name the same alternative in both storages.
        self.tag == other.tag && unsafe { L::eq_at(0, self.tag, self.as_ptr(), other.as_ptr()) }
    }
}

impl<L: DebugTable> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Live<'a, L: DebugTable>(&'a Variant<L>);

        impl<L: DebugTable> fmt::Debug for Live<'_, L> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // SAFETY: the tag names the live value.
                unsafe { L::fmt_at(0, self.0.tag, self.0.as_ptr(), f) }
            }
        }

        f.debug_struct("Variant")
            .field("which", &self.tag)
            .field("value", &Live(self))
            .finish()
    }
}
