//! The `lazy_list!` macro for literal lists.
//!
//! This module provides the [`lazy_list!`](crate::lazy_list!) macro, which
//! builds a fully resolved [`LazyList`](crate::persistent::LazyList) from its
//! arguments.

/// Builds a fully resolved list from a literal sequence of elements.
///
/// `lazy_list![a, b, c]` is equivalent to `LazyList::make([a, b, c])`.
///
/// # Syntax
///
/// - `lazy_list![]` - The empty list
/// - `lazy_list![x]` - A one-element list
/// - `lazy_list![x, y, ...]` - Elements in the order written
///
/// # Examples
///
/// ```
/// use lazy_list::lazy_list;
/// use lazy_list::persistent::LazyList;
///
/// let list = lazy_list![0, 1, 2];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.tail().tail().head(), Some(&2));
/// assert!(list.is_forced());
///
/// let empty: LazyList<i32> = lazy_list![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! lazy_list {
    () => {
        $crate::persistent::LazyList::empty()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::persistent::LazyList::make([$($element),+])
    };
}
