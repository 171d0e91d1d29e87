//! Visitor traits and the per-list dispatch tables.
//!
//! A visitor is anything with one [`Case`] (read-only) or [`CaseMut`]
//! (mutable) impl per alternative, all with the same `Output`. For every
//! alternative tuple, [`DispatchRef`] and [`DispatchMut`] hold a
//! compile-time-built table of trampolines, one per position, so a visit is
//! one array index and one indirect call. The two tables are independent and
//! never interchanged.

use crate::list::{with_alternative_arities, Alternatives};

/// A read-only handler for a single alternative type.
///
/// `I` defaults to `()` for directly implemented visitors; composed overload
/// sets use it to expose one impl per constituent slot (see
/// [`Overload`](crate::overload::Overload)).
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no read-only case accepting `&{T}`",
    label = "this visitor does not cover every alternative"
)]
pub trait Case<T, I = ()> {
    /// What the handler returns when invoked with a `&T`.
    type Output;

    fn call(&mut self, value: &T) -> Self::Output;
}

/// A mutable handler for a single alternative type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no mutable case accepting `&mut {T}`",
    label = "this visitor does not cover every alternative"
)]
pub trait CaseMut<T, I = ()> {
    type Output;

    fn call_mut(&mut self, value: &mut T) -> Self::Output;
}

/// Read-only dispatch table for visiting `Self`'s alternatives with a
/// visitor `V`.
///
/// The blanket impls require `V: Case<Ti, Ii, Output = R>` for every
/// alternative with one shared `R`; a visitor whose arms disagree on their
/// return type does not satisfy them and is rejected at compile time, as is
/// one that misses an alternative:
///
/// ```compile_fail
/// use motley::{case, overload, Variant};
///
/// let mut var: Variant<(i32, String)> = Variant::new();
/// var.set(1i32);
///
/// let mut cases = overload((case(|k: &i32| *k),)); // no String case
/// var.visit(&mut cases).unwrap();
/// ```
///
/// # Safety
///
/// For every `tag` in `0..`[`Alternatives::LEN`], `entry(tag)` must return a
/// trampoline that reinterprets its erased pointer only as the alternative
/// at position `tag`.
pub unsafe trait DispatchRef<V, Is>: Alternatives {
    type Output;

    /// Table lookup: the trampoline for the alternative at position `tag`.
    /// Each trampoline casts the storage pointer to its position's
    /// alternative and forwards a shared reference to `V`.
    fn entry(tag: usize) -> unsafe fn(*const (), &mut V) -> Self::Output;
}

/// Mutable counterpart of [`DispatchRef`]. Same contract, but the
/// trampolines forward the alternative by exclusive reference.
///
/// # Safety
///
/// As for [`DispatchRef`].
pub unsafe trait DispatchMut<V, Is>: Alternatives {
    type Output;

    fn entry(tag: usize) -> unsafe fn(*mut (), &mut V) -> Self::Output;
}

/// Table entry reinterpreting erased storage as a `T` and forwarding it to
/// the visitor by shared reference.
///
/// # Safety
///
/// `storage` must point to a live, properly aligned `T`.
unsafe fn trampoline_ref<T, I, V, R>(storage: *const (), visitor: &mut V) -> R
where
    V: Case<T, I, Output = R>,
{
    unsafe { visitor.call(&*storage.cast::<T>()) }
}

/// Mutable counterpart of [`trampoline_ref`].
///
/// # Safety
///
/// `storage` must point to a live, properly aligned `T` not aliased for the
/// duration of the call.
unsafe fn trampoline_mut<T, I, V, R>(storage: *mut (), visitor: &mut V) -> R
where
    V: CaseMut<T, I, Output = R>,
{
    unsafe { visitor.call_mut(&mut *storage.cast::<T>()) }
}

macro_rules! impl_dispatch {
    ($len:tt, $All:tt, $(($T:ident, $I:ident, $idx:tt)),+) => {
        unsafe impl<V, R, $($T, $I,)+> DispatchRef<V, ($($I,)+)> for ($($T,)+)
        where
            V: $(Case<$T, $I, Output = R> +)+
        {
            type Output = R;

            fn entry(tag: usize) -> unsafe fn(*const (), &mut V) -> R {
                let table: [unsafe fn(*const (), &mut V) -> R; $len] = [
                    $(trampoline_ref::<$T, $I, V, R>,)+
                ];
                table[tag]
            }
        }

        unsafe impl<V, R, $($T, $I,)+> DispatchMut<V, ($($I,)+)> for ($($T,)+)
        where
            V: $(CaseMut<$T, $I, Output = R> +)+
        {
            type Output = R;

            fn entry(tag: usize) -> unsafe fn(*mut (), &mut V) -> R {
                let table: [unsafe fn(*mut (), &mut V) -> R; $len] = [
                    $(trampoline_mut::<$T, $I, V, R>,)+
                ];
                table[tag]
            }
        }
    };
}

with_alternative_arities!(impl_dispatch);
