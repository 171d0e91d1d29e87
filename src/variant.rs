//! The tagged union container.

use std::{fmt::Debug, mem::MaybeUninit};

use thiserror::Error;

use crate::{
    list::{Alternatives, Member, Nth},
    visit::{DispatchMut, DispatchRef},
};

/// Error returned when visiting a [`Variant`] that holds no alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("variant is empty")]
pub struct EmptyVariant;

/// A tagged union over the closed alternative list `L`.
///
/// Owns one storage block sized and aligned for the largest alternative plus
/// a tag recording which alternative is live, with `L::LEN` as the empty
/// sentinel. Starts out empty; [`set`](Variant::set) destroys whatever is
/// live before constructing the new alternative in place, and dropping the
/// variant destroys the live alternative through the same tag-directed path.
///
/// Inspection and mutation go through [`visit`](Variant::visit) and
/// [`visit_mut`](Variant::visit_mut), which index the per-visitor dispatch
/// table built by [`DispatchRef`]/[`DispatchMut`].
pub struct Variant<L: Alternatives> {
    storage: MaybeUninit<L::Raw>,
    // Position of the live alternative, or `L::LEN` when empty.
    tag: usize,
}

impl<L: Alternatives> Variant<L> {
    /// Creates an empty variant. Dropping it without setting anything is a
    /// no-op.
    pub const fn new() -> Self {
        Self {
            storage: MaybeUninit::uninit(),
            tag: L::LEN,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.tag == L::LEN
    }

    /// Position of the live alternative in `L`, or `None` when empty.
    pub const fn tag(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.tag)
        }
    }

    /// Replaces the contents with `value`.
    ///
    /// The previously live alternative (if any) is destroyed first; the two
    /// never coexist. `T` must be one of the alternatives of `L`, otherwise
    /// this fails to compile.
    pub fn set<T, I>(&mut self, value: T)
    where
        L: Member<T, I>,
    {
        self.clear();
        // Safety: `L::Raw` is large and aligned enough for any alternative,
        // all of which live at offset zero, and nothing is live right now.
        unsafe { self.storage.as_mut_ptr().cast::<T>().write(value) };
        // Only tagged once the alternative is fully constructed.
        self.tag = <L as Member<T, I>>::INDEX;
    }

    /// Destroys the live alternative, leaving the variant empty.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            // Mark empty before running the destructor so a panicking drop
            // cannot lead to a second drop of the same alternative.
            let tag = std::mem::replace(&mut self.tag, L::LEN);
            // Safety: `tag` was the live position and is now retired.
            unsafe { L::drop_in_place(self.storage.as_mut_ptr().cast(), tag) };
        }
    }

    /// Shared reference to the contents, if they currently are a `T`.
    ///
    /// The index marker is inferred: `var.get::<i32, _>()`.
    pub fn get<T, I>(&self) -> Option<&T>
    where
        L: Member<T, I>,
    {
        (self.tag == <L as Member<T, I>>::INDEX)
            // Safety: the tag says a `T` is live at offset zero.
            .then(|| unsafe { &*self.storage.as_ptr().cast::<T>() })
    }

    /// Exclusive reference to the contents, if they currently are a `T`.
    pub fn get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Member<T, I>,
    {
        (self.tag == <L as Member<T, I>>::INDEX)
            // Safety: as in `get`, and `&mut self` guarantees exclusivity.
            .then(|| unsafe { &mut *self.storage.as_mut_ptr().cast::<T>() })
    }

    /// Shared reference to the contents, if the alternative at position `N`
    /// is live.
    pub fn get_at<const N: usize>(&self) -> Option<&<L as Nth<N>>::Type>
    where
        L: Nth<N>,
    {
        // Safety: the tag says position `N`'s alternative is live.
        (self.tag == N).then(|| unsafe { &*self.storage.as_ptr().cast() })
    }

    /// Moves the contents out, if they currently are a `T`, leaving the
    /// variant empty.
    pub fn take<T, I>(&mut self) -> Option<T>
    where
        L: Member<T, I>,
    {
        (self.tag == <L as Member<T, I>>::INDEX).then(|| {
            self.tag = L::LEN;
            // Safety: a `T` was live; the sentinel tag retires it so it is
            // neither dropped nor read again.
            unsafe { self.storage.as_ptr().cast::<T>().read() }
        })
    }

    /// Visits the live alternative by shared reference.
    ///
    /// `visitor` must have a read-only case for every alternative of `L`,
    /// and every case must return the same type:
    ///
    /// ```compile_fail
    /// use motley::{case, overload, Variant};
    ///
    /// let mut var: Variant<(i32, f32)> = Variant::new();
    /// var.set(1i32);
    ///
    /// let mut cases = overload((
    ///     case(|k: &i32| *k),
    ///     case(|f: &f32| *f), // returns f32 while the other arm returns i32
    /// ));
    /// var.visit(&mut cases).unwrap();
    /// ```
    pub fn visit<V, Is>(
        &self,
        visitor: &mut V,
    ) -> Result<<L as DispatchRef<V, Is>>::Output, EmptyVariant>
    where
        L: DispatchRef<V, Is>,
    {
        if self.is_empty() {
            return Err(EmptyVariant);
        }
        let entry = <L as DispatchRef<V, Is>>::entry(self.tag);
        // Safety: the tag selects the table entry generated for the live
        // alternative's position.
        Ok(unsafe { entry(self.storage.as_ptr().cast(), visitor) })
    }

    /// Visits the live alternative by exclusive reference, through the
    /// mutable dispatch table.
    pub fn visit_mut<V, Is>(
        &mut self,
        visitor: &mut V,
    ) -> Result<<L as DispatchMut<V, Is>>::Output, EmptyVariant>
    where
        L: DispatchMut<V, Is>,
    {
        if self.is_empty() {
            return Err(EmptyVariant);
        }
        let entry = <L as DispatchMut<V, Is>>::entry(self.tag);
        // Safety: as in `visit`, and `&mut self` guarantees exclusivity.
        Ok(unsafe { entry(self.storage.as_mut_ptr().cast(), visitor) })
    }
}

impl<L: Alternatives> Default for Variant<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Alternatives> Drop for Variant<L> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<L: Alternatives> Debug for Variant<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant")
            .field("alternatives", &L::LEN)
            .field("tag", &self.tag())
            .finish_non_exhaustive()
    }
}
