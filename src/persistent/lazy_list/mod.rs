//! Persistent singly-linked list with memoized lazy tails.
//!
//! This module provides [`LazyList`], a cons-list whose tail is either
//! already known or a deferred producer that runs the first time the tail
//! is needed. It provides:
//!
//! - O(1) `cons`, `head`, and construction from a producer
//! - O(1) `tail` on an already-forced node
//! - Lazy combinators (`map`, `filter`, `take`, `drop`, `concat`, `zip`, ...)
//!   that do not force more of their input than their output requires
//! - Eager consumers (`fold`, `len`, `all`, `any`, `each`, `cut`, ...)
//!
//! # Forcing
//!
//! A node's tail is resolved at most once. Every clone of a [`LazyList`]
//! points at the same node, so after one holder forces the tail all holders
//! see the same cached tail, and the producer never runs again.
//!
//! ```rust
//! use lazy_list::persistent::LazyList;
//!
//! let list = LazyList::new(0, || LazyList::singleton(1));
//! assert!(!list.is_forced());
//!
//! let forced = list.force();
//! assert!(LazyList::ptr_eq(&list, &forced));
//! assert!(list.is_forced());
//! assert_eq!(list.tail().head(), Some(&1));
//! ```
//!
//! # Infinite Lists
//!
//! Generators such as [`LazyList::series`] and [`LazyList::repeat`] never
//! end. Consumers that walk the whole list (`len`, `fold`, `each`, and
//! `all`/`any` without a deciding element) do not return on such lists;
//! bound them first with `take` or `take_while`.

mod combinators;
mod consumers;
mod generators;

use std::fmt;
use std::iter::FromIterator;

use super::ReferenceCounter;
use crate::control::{ForceError, Shareable, Thunk};

/// Internal node structure for the lazy list.
///
/// The element is fixed at construction; `next` is resolved at most once.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// The (possibly pending) rest of the list.
    next: Thunk<LazyList<T>>,
}

/// A persistent, possibly infinite, lazily-linked list.
///
/// A `LazyList` is either empty (the absence value, see
/// [`LazyList::empty`]) or a shared pointer to a node holding an element
/// and a tail. Cloning a list copies the pointer, never the nodes.
///
/// # Time Complexity
///
/// | Operation  | Complexity                          |
/// |------------|-------------------------------------|
/// | `empty`    | O(1)                                |
/// | `new`      | O(1)                                |
/// | `cons`     | O(1)                                |
/// | `head`     | O(1)                                |
/// | `tail`     | O(1) plus the producer, first time  |
/// | `len`      | O(n), forces every node             |
/// | `drop`     | O(count)                            |
///
/// # Examples
///
/// ```rust
/// use lazy_list::persistent::LazyList;
///
/// let list = LazyList::make([1, 2, 3]);
/// assert_eq!(list.head(), Some(&1));
/// assert_eq!(list.len(), 3);
///
/// let empty: LazyList<i32> = LazyList::empty();
/// assert_eq!(empty.head(), None);
/// ```
pub struct LazyList<T> {
    /// Reference to the first node, `None` for the empty list.
    head: Option<ReferenceCounter<Node<T>>>,
}

impl<T> LazyList<T> {
    /// Returns the empty list.
    ///
    /// The empty list is the terminal value of every sequence: it has no
    /// head, and its tail is itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list: LazyList<i32> = LazyList::empty();
    /// assert!(list.is_empty());
    /// assert!(list.tail().is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { head: None }
    }

    /// Creates a list whose tail is produced on demand.
    ///
    /// `producer` does not run until the tail is first forced, and it runs
    /// at most once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::new(1, || LazyList::make([2, 3]));
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn new<F>(element: T, producer: F) -> Self
    where
        F: FnOnce() -> Self + Shareable + 'static,
    {
        Self::link(element, Thunk::new(producer))
    }

    /// Creates a one-element list whose tail is already resolved to empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::singleton(0);
    /// assert_eq!(list.head(), Some(&0));
    /// assert!(list.is_forced());
    /// assert!(list.tail().is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::link(element, Thunk::resolved(Self::empty()))
    }

    fn link(element: T, next: Thunk<Self>) -> Self {
        Self {
            head: Some(ReferenceCounter::new(Node { element, next })),
        }
    }

    /// Prepends an element, reusing this list as the resolved tail.
    ///
    /// Never forces the receiver.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let empty: LazyList<i32> = LazyList::empty();
    /// let list = empty.cons(0);
    /// assert_eq!(list.head(), Some(&0));
    /// assert!(LazyList::ptr_eq(&list.tail(), &empty));
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self::link(element, Thunk::resolved(self.clone()))
    }

    /// Returns a reference to the first element, or `None` on the empty list.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns `true` if this is the empty list.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if the first node's tail is resolved.
    ///
    /// The empty list counts as forced. This never runs a producer.
    #[inline]
    #[must_use]
    pub fn is_forced(&self) -> bool {
        self.head
            .as_ref()
            .is_none_or(|node| node.next.is_resolved())
    }

    /// Returns `true` if both lists are the same node (or both empty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::singleton(1);
    /// assert!(LazyList::ptr_eq(&list, &list.clone()));
    /// assert!(!LazyList::ptr_eq(&list, &LazyList::singleton(1)));
    /// ```
    #[inline]
    #[must_use]
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        match (&left.head, &right.head) {
            (None, None) => true,
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Resolves the first node's tail and returns this same list.
    ///
    /// # Errors
    ///
    /// Returns a [`ForceError`] if the tail producer is already running on
    /// this thread or panicked on an earlier attempt.
    pub fn try_force(&self) -> Result<Self, ForceError> {
        if let Some(node) = &self.head {
            node.next.try_force()?;
        }
        Ok(self.clone())
    }

    /// Resolves the first node's tail and returns this same list.
    ///
    /// Forcing is idempotent: `list.force().force()` is the same node as
    /// `list`, and the producer runs only on the first call.
    ///
    /// # Panics
    ///
    /// Panics if [`try_force`](Self::try_force) fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::series(0, 1).take(3);
    /// let forced = list.force().force();
    /// assert!(LazyList::ptr_eq(&list, &forced));
    /// ```
    #[must_use]
    pub fn force(&self) -> Self {
        match self.try_force() {
            Ok(list) => list,
            Err(error) => panic!("{error}"),
        }
    }

    /// Returns the list without its first element, forcing it if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`ForceError`] under the same conditions as
    /// [`try_force`](Self::try_force).
    pub fn try_tail(&self) -> Result<Self, ForceError> {
        match &self.head {
            None => Ok(Self::empty()),
            Some(node) => node.next.try_force().cloned(),
        }
    }

    /// Returns the list without its first element, forcing it if needed.
    ///
    /// The tail of the empty list is the empty list.
    ///
    /// # Panics
    ///
    /// Panics if [`try_tail`](Self::try_tail) fails.
    #[must_use]
    pub fn tail(&self) -> Self {
        match self.try_tail() {
            Ok(list) => list,
            Err(error) => panic!("{error}"),
        }
    }

    /// Decomposes the list into its head and (forced) tail.
    ///
    /// Returns `None` on the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::make([1, 2]);
    /// let (head, tail) = list.uncons().unwrap();
    /// assert_eq!(*head, 1);
    /// assert_eq!(tail.head(), Some(&2));
    /// ```
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head().map(|element| (element, self.tail()))
    }

    /// Returns an iterator over references to the elements.
    ///
    /// Each tail is forced only when the iterator is advanced past the
    /// element before it.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> LazyListIterator<'_, T> {
        LazyListIterator {
            current: self.head.as_deref(),
            started: false,
        }
    }

    /// Builds a fully resolved list from the given values, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::make(vec![0, 1, 2]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.tail().tail().head(), Some(&2));
    /// ```
    #[must_use]
    pub fn make<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut elements: Vec<T> = values.into_iter().collect();
        let mut list = Self::empty();
        while let Some(element) = elements.pop() {
            list = Self::link(element, Thunk::resolved(list));
        }
        list
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`LazyList`].
///
/// Advancing the iterator forces the tail of the node it just yielded.
pub struct LazyListIterator<'a, T> {
    current: Option<&'a Node<T>>,
    started: bool,
}

impl<'a, T> Iterator for LazyListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.current = self
                .current
                .and_then(|node| node.next.force().head.as_deref());
        }
        self.started = true;
        self.current.map(|node| &node.element)
    }
}

/// An owning iterator over elements of a [`LazyList`].
pub struct LazyListIntoIterator<T> {
    list: LazyList<T>,
    started: bool,
}

impl<T: Clone> Iterator for LazyListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.list = self.list.tail();
        }
        self.started = true;
        self.list.head().cloned()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for LazyList<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for LazyList<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

/// Releases uniquely owned, already resolved nodes one at a time.
///
/// Without this, dropping a long forced list would recurse once per node.
impl<T> Drop for LazyList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            current = match ReferenceCounter::try_unwrap(node) {
                Ok(mut node) => node.next.take().and_then(|mut rest| rest.head.take()),
                Err(_) => None,
            };
        }
    }
}

impl<T> FromIterator<T> for LazyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::make(iter)
    }
}

impl<T: Clone> IntoIterator for LazyList<T> {
    type Item = T;
    type IntoIter = LazyListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        LazyListIntoIterator {
            list: self,
            started: false,
        }
    }
}

impl<'a, T> IntoIterator for &'a LazyList<T> {
    type Item = &'a T;
    type IntoIter = LazyListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Element-wise equality. Forces both lists; does not return on two equal
/// infinite lists.
impl<T: PartialEq> PartialEq for LazyList<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LazyList<T> {}

/// Shows the already resolved prefix; a pending tail is printed as `..`.
///
/// Formatting never forces, so it is safe on infinite lists.
impl<T: fmt::Debug> fmt::Debug for LazyList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = formatter.debug_list();
        let mut current = self.head.as_deref();
        while let Some(node) = current {
            entries.entry(&node.element);
            match node.next.get() {
                Some(rest) => current = rest.head.as_deref(),
                None => {
                    entries.entry(&format_args!(".."));
                    break;
                }
            }
        }
        entries.finish()
    }
}

impl<T: fmt::Display> fmt::Display for LazyList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(LazyList<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(LazyList<i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
