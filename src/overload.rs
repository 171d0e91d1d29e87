//! Composition of single-case closures into one visitor.
//!
//! Rust has no open overload resolution, so the composed set resolves its
//! branch through an inferred slot marker instead: [`Overload`] has one
//! [`Case`] impl per slot, selected by the type the slot's handler accepts.
//! Handler order is independent of the alternative-list order. Two handlers
//! accepting the same type leave the marker ambiguous and fail to compile,
//! the same failure mode an ambiguous overload set has in languages with
//! overloading.

use std::marker::PhantomData;

use crate::{
    list::{with_alternative_arities, At},
    visit::{Case, CaseMut},
};

/// A single-case handler wrapping an `FnMut(&T) -> R` closure.
///
/// Usable in both read-only and mutable visitation; a handler that only
/// reads does not care how the alternative is borrowed.
pub struct CaseFn<T, F> {
    f: F,
    _accepts: PhantomData<fn(&T)>,
}

/// A single-case handler wrapping an `FnMut(&mut T) -> R` closure. Only
/// usable in mutable visitation.
pub struct CaseMutFn<T, F> {
    f: F,
    _accepts: PhantomData<fn(&T)>,
}

/// Wraps a read-only closure together with the alternative type it accepts.
///
/// The closure's argument type must be annotated so the accepted alternative
/// is known: `case(|s: &String| s.len())`.
pub fn case<T, R, F>(f: F) -> CaseFn<T, F>
where
    F: FnMut(&T) -> R,
{
    CaseFn {
        f,
        _accepts: PhantomData,
    }
}

/// Wraps a mutating closure together with the alternative type it accepts.
pub fn case_mut<T, R, F>(f: F) -> CaseMutFn<T, F>
where
    F: FnMut(&mut T) -> R,
{
    CaseMutFn {
        f,
        _accepts: PhantomData,
    }
}

impl<T, R, F> Case<T> for CaseFn<T, F>
where
    F: FnMut(&T) -> R,
{
    type Output = R;

    fn call(&mut self, value: &T) -> R {
        (self.f)(value)
    }
}

impl<T, R, F> CaseMut<T> for CaseFn<T, F>
where
    F: FnMut(&T) -> R,
{
    type Output = R;

    fn call_mut(&mut self, value: &mut T) -> R {
        (self.f)(value)
    }
}

impl<T, R, F> CaseMut<T> for CaseMutFn<T, F>
where
    F: FnMut(&mut T) -> R,
{
    type Output = R;

    fn call_mut(&mut self, value: &mut T) -> R {
        (self.f)(value)
    }
}

/// A visitor composed of per-type handlers, one slot per handler.
///
/// Built with [`overload`] from a tuple of [`case`]/[`case_mut`] wrappers
/// (or any other single-case handlers). Each constituent is moved in.
pub struct Overload<Cases>(Cases);

/// Composes a tuple of single-case handlers into one visitor.
///
/// ```
/// use motley::{case, overload, Variant};
///
/// let mut var: Variant<(i32, String, Vec<i32>)> = Variant::new();
/// var.set(vec![1, 2, 3, 4]);
///
/// let mut cases = overload((
///     case(|v: &Vec<i32>| v.iter().sum::<i32>()),
///     case(|k: &i32| *k),
///     case(|s: &String| s.len() as i32),
/// ));
///
/// assert_eq!(var.visit(&mut cases), Ok(10));
/// ```
///
/// Two handlers for the same alternative type are rejected:
///
/// ```compile_fail
/// use motley::{case, overload, Variant};
///
/// let mut var: Variant<(i32, String)> = Variant::new();
/// var.set(3i32);
///
/// let mut cases = overload((
///     case(|k: &i32| 0usize),
///     case(|s: &String| s.len()),
///     case(|k: &i32| 1usize), // ambiguous with the first handler
/// ));
/// var.visit(&mut cases).unwrap();
/// ```
pub fn overload<Cases>(cases: Cases) -> Overload<Cases> {
    Overload(cases)
}

// Same squash trick as `impl_member_nth`: the slot list wrapped in a
// single tt keeps the per-slot repetition free of nested groups.
macro_rules! impl_overload_slot {
    ([$($C:ident)+], $Slot:ident, $idx:tt) => {
        impl<T, $($C),+> Case<T, At<$idx>> for Overload<($($C,)+)>
        where
            $Slot: Case<T>,
        {
            type Output = <$Slot as Case<T>>::Output;

            fn call(&mut self, value: &T) -> Self::Output {
                <$Slot as Case<T>>::call(&mut (self.0).$idx, value)
            }
        }

        impl<T, $($C),+> CaseMut<T, At<$idx>> for Overload<($($C,)+)>
        where
            $Slot: CaseMut<T>,
        {
            type Output = <$Slot as CaseMut<T>>::Output;

            fn call_mut(&mut self, value: &mut T) -> Self::Output {
                <$Slot as CaseMut<T>>::call_mut(&mut (self.0).$idx, value)
            }
        }
    };
}

macro_rules! impl_overload {
    ($len:tt, $All:tt, $(($Slot:ident, $I:ident, $idx:tt)),+) => {
        $(impl_overload_slot!($All, $Slot, $idx);)+
    };
}

with_alternative_arities!(impl_overload);

#[cfg(test)]
mod test {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn resolves_by_type_not_by_slot_order() {
        let mut var: Variant<(i32, String, Vec<i32>)> = Variant::new();

        // Handlers deliberately listed in a different order than the
        // alternative list.
        let mut cases = overload((
            case(|v: &Vec<i32>| v.len() as i32),
            case(|k: &i32| *k),
            case(|s: &String| s.len() as i32),
        ));

        var.set(String::from("abcd"));
        assert_eq!(var.visit(&mut cases), Ok(4));

        var.set(vec![1, 2, 3]);
        assert_eq!(var.visit(&mut cases), Ok(3));

        var.set(-7i32);
        assert_eq!(var.visit(&mut cases), Ok(-7));
    }

    #[test]
    fn captured_state_is_moved_in_and_shared_across_calls() {
        let mut var: Variant<(u8, u16)> = Variant::new();
        let seen = std::cell::RefCell::new(Vec::new());

        {
            let mut cases = overload((
                case(|b: &u8| seen.borrow_mut().push(u32::from(*b))),
                case(|w: &u16| seen.borrow_mut().push(u32::from(*w))),
            ));

            var.set(5u8);
            var.visit(&mut cases).unwrap();
            var.set(700u16);
            var.visit(&mut cases).unwrap();
        }

        assert_eq!(seen.into_inner(), [5, 700]);
    }

    #[test]
    fn read_only_cases_participate_in_mutable_visitation() {
        let mut var: Variant<(i32, String)> = Variant::new();
        var.set(String::from("x"));

        let mut cases = overload((
            case_mut(|k: &mut i32| {
                *k += 1;
                *k
            }),
            case(|s: &String| s.len() as i32),
        ));

        assert_eq!(var.visit_mut(&mut cases), Ok(1));

        var.set(9i32);
        assert_eq!(var.visit_mut(&mut cases), Ok(10));
        assert_eq!(var.get::<i32, _>(), Some(&10));
    }
}
