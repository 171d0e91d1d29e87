//! Compile-time machinery over a closed, ordered set of alternative types.
//!
//! Alternative lists are ordinary Rust tuples of 1 to 12 types. The traits
//! here give them a length, a position lookup by type ([`Member`]), a type
//! lookup by position ([`Nth`]) and a raw storage block large and aligned
//! enough for any alternative.

use std::mem::ManuallyDrop;

/// Zero-sized marker identifying position `N` inside an alternative list or
/// an overload set. Never constructed, only inferred.
pub struct At<const N: usize>;

/// Layout-only pair union.
///
/// Chained as `RawPair<T0, RawPair<T1, ...>>` it has the size and alignment
/// of the largest link, with every link at offset zero. It is never
/// constructed or field-accessed; alternatives are written to and read from
/// the containing storage through raw pointers.
#[repr(C)]
#[allow(dead_code)]
pub union RawPair<H, T> {
    head: ManuallyDrop<H>,
    tail: ManuallyDrop<T>,
}

/// A closed, ordered list of alternative types.
///
/// # Safety
///
/// `Raw` must be at least as large and aligned as every alternative with all
/// of them at offset zero, `LEN` must match the number of alternatives, and
/// `drop_in_place` must drop exactly the alternative at `tag` (and nothing
/// for an out-of-range `tag`).
pub unsafe trait Alternatives {
    /// Number of alternatives. Also the sentinel tag of an empty variant.
    const LEN: usize;

    /// Storage block able to hold any one alternative.
    type Raw;

    /// Drops the alternative at position `tag` in place. A `tag` outside
    /// `0..LEN` matches nothing and is a no-op.
    ///
    /// # Safety
    ///
    /// If `tag` is in range, `storage` must point to a live, properly aligned
    /// value of the alternative at that position, which must not be used
    /// afterwards.
    unsafe fn drop_in_place(storage: *mut (), tag: usize);
}

/// Position lookup by type: `T` is an alternative of `Self` at
/// [`Member::INDEX`].
///
/// The `I` parameter is an inferred [`At`] marker that makes one impl per
/// position coherent. Looking up a type that occurs twice leaves `I`
/// ambiguous and fails to compile, as does looking up an absent type.
///
/// ```compile_fail
/// use motley::Variant;
///
/// let mut var: Variant<(i32, String)> = Variant::new();
/// var.set(1.0f64); // f64 is not an alternative
/// ```
///
/// # Safety
///
/// `INDEX` must be the position of `T` in `Self`; unsafe code casts storage
/// to `T` whenever the tag equals `INDEX`.
#[diagnostic::on_unimplemented(
    message = "`{T}` is not an alternative of `{Self}`",
    label = "type not found in the alternative list"
)]
pub unsafe trait Member<T, I>: Alternatives {
    /// Position of `T` in the list.
    const INDEX: usize;
}

/// Type lookup by position: the alternative of `Self` at position `N`.
///
/// Positions past the end of the list have no impl and fail to compile:
///
/// ```compile_fail
/// use motley::Variant;
///
/// let var: Variant<(i32, String)> = Variant::new();
/// var.get_at::<2>(); // positions are 0 and 1
/// ```
///
/// # Safety
///
/// `Type` must be the alternative at position `N` of `Self`; unsafe code
/// casts storage to it whenever the tag equals `N`.
#[diagnostic::on_unimplemented(
    message = "the alternative list `{Self}` is shorter than the requested position"
)]
pub unsafe trait Nth<const N: usize>: Alternatives {
    type Type;
}

macro_rules! raw_storage {
    ($only:ty $(,)?) => { RawPair<$only, ()> };
    ($head:ty, $($rest:ty),+) => { RawPair<$head, raw_storage!($($rest),+)> };
}

/// Invokes `$callback` once per supported arity with the alternative list's
/// type parameters, index-marker parameters and the explicit position
/// sequence `0, 1, ..., N - 1`.
///
/// The first bracketed group repeats the full parameter list so callers can
/// expand it inside a per-position repetition.
macro_rules! with_alternative_arities {
    ($callback:ident) => {
        $callback!(1, [T0], (T0, I0, 0));
        $callback!(2, [T0 T1], (T0, I0, 0), (T1, I1, 1));
        $callback!(3, [T0 T1 T2], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2));
        $callback!(4, [T0 T1 T2 T3], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3));
        $callback!(5, [T0 T1 T2 T3 T4], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4));
        $callback!(6, [T0 T1 T2 T3 T4 T5], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5));
        $callback!(7, [T0 T1 T2 T3 T4 T5 T6], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5), (T6, I6, 6));
        $callback!(8, [T0 T1 T2 T3 T4 T5 T6 T7], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5), (T6, I6, 6), (T7, I7, 7));
        $callback!(9, [T0 T1 T2 T3 T4 T5 T6 T7 T8], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5), (T6, I6, 6), (T7, I7, 7), (T8, I8, 8));
        $callback!(10, [T0 T1 T2 T3 T4 T5 T6 T7 T8 T9], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5), (T6, I6, 6), (T7, I7, 7), (T8, I8, 8), (T9, I9, 9));
        $callback!(11, [T0 T1 T2 T3 T4 T5 T6 T7 T8 T9 T10], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5), (T6, I6, 6), (T7, I7, 7), (T8, I8, 8), (T9, I9, 9), (T10, I10, 10));
        $callback!(12, [T0 T1 T2 T3 T4 T5 T6 T7 T8 T9 T10 T11], (T0, I0, 0), (T1, I1, 1), (T2, I2, 2), (T3, I3, 3), (T4, I4, 4), (T5, I5, 5), (T6, I6, 6), (T7, I7, 7), (T8, I8, 8), (T9, I9, 9), (T10, I10, 10), (T11, I11, 11));
    };
}

pub(crate) use with_alternative_arities;

// The full parameter list has to be "squashed" to a single tt so the
// per-position repetition below can pass it along without rustc seeing
// nested repetitions over different groups.
macro_rules! impl_member_nth {
    ([$($All:ident)+], $T:ident, $idx:tt) => {
        unsafe impl<$($All),+> Member<$T, At<$idx>> for ($($All,)+) {
            const INDEX: usize = $idx;
        }

        unsafe impl<$($All),+> Nth<$idx> for ($($All,)+) {
            type Type = $T;
        }
    };
}

macro_rules! impl_alternatives {
    ($len:tt, $All:tt, $(($T:ident, $I:ident, $idx:tt)),+) => {
        unsafe impl<$($T),+> Alternatives for ($($T,)+) {
            const LEN: usize = $len;

            type Raw = raw_storage!($($T),+);

            unsafe fn drop_in_place(storage: *mut (), tag: usize) {
                match tag {
                    $($idx => unsafe { std::ptr::drop_in_place(storage.cast::<$T>()) },)+
                    // The empty sentinel lands here.
                    _ => {}
                }
            }
        }

        $(impl_member_nth!($All, $T, $idx);)+
    };
}

with_alternative_arities!(impl_alternatives);

#[cfg(test)]
mod test {
    use super::*;

    const _: () = {
        assert!(<(i32, f32) as Member<i32, At<0>>>::INDEX == 0);
        assert!(<(i32, f32) as Member<f32, At<1>>>::INDEX == 1);
        assert!(<(i32,) as Alternatives>::LEN == 1);
        assert!(<(i32, f32, f64) as Alternatives>::LEN == 3);
    };

    // Impls for every position of a wider list, not just the first.
    const _: () = {
        type Wide = (u8, u16, u32, u64, i8, i16, i32, i64);

        assert!(<Wide as Alternatives>::LEN == 8);
        assert!(<Wide as Member<u8, At<0>>>::INDEX == 0);
        assert!(<Wide as Member<i16, At<5>>>::INDEX == 5);
        assert!(<Wide as Member<i64, At<7>>>::INDEX == 7);
    };

    fn type_name_at<L: Nth<N>, const N: usize>() -> &'static str {
        std::any::type_name::<L::Type>()
    }

    #[test]
    fn nth_resolves_positions() {
        assert_eq!(
            type_name_at::<(u8, String), 0>(),
            std::any::type_name::<u8>()
        );
        assert_eq!(
            type_name_at::<(u8, String), 1>(),
            std::any::type_name::<String>()
        );
    }

    #[test]
    fn raw_storage_covers_every_alternative() {
        type Raw = <(u8, u64, [u16; 3]) as Alternatives>::Raw;

        assert!(std::mem::size_of::<Raw>() >= std::mem::size_of::<u64>());
        assert!(std::mem::size_of::<Raw>() >= std::mem::size_of::<[u16; 3]>());
        assert_eq!(std::mem::align_of::<Raw>(), std::mem::align_of::<u64>());
    }
}
