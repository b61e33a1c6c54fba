//! Persistent (immutable) lazy sequences.
//!
//! This module provides [`LazyList`], a singly-linked list whose tails may
//! be computed on demand. Nodes are immutable and shared between every list
//! that reaches them; the only state change a node ever undergoes is the
//! one-time resolution of its tail.
//!
//! # Structural Sharing
//!
//! `cons` reuses the receiver as the new node's tail, and forcing a tail
//! caches the produced node inside the parent, so every holder of the parent
//! observes the same node afterwards.
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lazy_list::persistent::LazyList;
//!
//! let naturals = LazyList::series(0, 1);
//! let evens = naturals.filter(|value| value % 2 == 0);
//! let first: Vec<i32> = evens.take(4).into_iter().collect();
//! assert_eq!(first, vec![0, 2, 4, 6]);
//!
//! let sum = naturals.take(8).fold(0, |total, value| total + value);
//! assert_eq!(sum, 28);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod lazy_list;
mod lazy_list_macro;

pub use lazy_list::LazyList;
pub use lazy_list::LazyListIntoIterator;
pub use lazy_list::LazyListIterator;

// =============================================================================
// Tests
// =============================================================================
