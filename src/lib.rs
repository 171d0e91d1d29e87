//! Closed tagged unions with table-driven visitation.
//!
//! A [`Variant`] owns raw storage sized for the largest of a fixed tuple of
//! alternative types plus a tag saying which one is live. Visitation does not
//! branch over the alternatives at runtime: for each (list, visitor) pair a
//! dispatch table of trampolines is built at compile time, and a visit is one
//! bounds-checked index plus one indirect call. Read-only and mutable
//! visitation use separate tables.
//!
//! Per-type handlers are composed with [`overload`], which resolves the
//! branch by the static type a handler accepts, independent of declaration
//! order:
//!
//! ```
//! use motley::{case, case_mut, overload, Variant};
//!
//! let mut var: Variant<(i32, String, Vec<i32>)> = Variant::new();
//! var.set(2i32);
//!
//! let mut cases = overload((
//!     case_mut(|k: &mut i32| {
//!         *k += 1;
//!         *k + 1
//!     }),
//!     case(|s: &String| s.len() as i32),
//!     case(|v: &Vec<i32>| v.iter().sum()),
//! ));
//!
//! assert_eq!(var.visit_mut(&mut cases), Ok(4));
//! assert_eq!(var.get::<i32, _>(), Some(&3));
//!
//! var.set(vec![1, 2, 3, 4]);
//! assert_eq!(var.visit_mut(&mut cases), Ok(10));
//! ```
//!
//! Everything about the contract is checked at compile time: setting a type
//! outside the list, visiting with a handler set that misses an alternative
//! or whose arms disagree on their return type, and composing two handlers
//! for the same type are all rejected by the compiler. The one runtime error
//! is visiting an empty variant, which returns [`EmptyVariant`].

pub mod list;
pub mod overload;
pub mod variant;
pub mod visit;

pub use list::{Alternatives, At, Member, Nth};
pub use overload::{case, case_mut, overload, CaseFn, CaseMutFn, Overload};
pub use variant::{EmptyVariant, Variant};
pub use visit::{Case, CaseMut, DispatchMut, DispatchRef};
