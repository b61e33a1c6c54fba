//! # lazy-list
//!
//! Persistent singly-linked lists with memoized lazy tails.
//!
//! ## Overview
//!
//! A [`LazyList`](persistent::LazyList) is an immutable cons-list whose tail
//! can be left unevaluated until someone asks for it. This makes infinite or
//! expensive sequences (counters, Fibonacci streams, filtered or mapped views)
//! cheap to describe and consume incrementally. It includes:
//!
//! - **Control**: [`Thunk`](control::Thunk), the resolve-once memo cell behind
//!   every lazy tail
//! - **Persistent**: [`LazyList`](persistent::LazyList) with generators
//!   (`series`, `repeat`, `iterate`, `make`), lazy combinators (`map`,
//!   `filter`, `take`, `drop_first`, `take_while`, `drop_while`, `concat`,
//!   `zip`, `zip_with`) and eager consumers (`len`, `fold`, `each`, `all`,
//!   `any`, `cut`, `cut_while`)
//!
//! ## Feature Flags
//!
//! - `control`: Deferred computation primitives
//! - `persistent`: Lazy persistent lists
//! - `arc`: Thread-safe nodes (`Arc` + per-node lock) instead of `Rc`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_list::prelude::*;
//!
//! let squares = LazyList::series(1_u64, 1).map(|value| value * value);
//! let small: Vec<u64> = squares.take_while(|value| *value < 50).into_iter().collect();
//! assert_eq!(small, vec![1, 4, 9, 16, 25, 36, 49]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lazy_list::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;
