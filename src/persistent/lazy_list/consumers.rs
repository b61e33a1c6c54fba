//! Eager consumers.
//!
//! These walk the list from the front, forcing every node they pass. On an
//! infinite list they only return if they can decide early (`all` finding a
//! failing element, `any` finding a match).

use super::LazyList;

impl<T> LazyList<T> {
    /// Returns the number of elements, forcing the whole list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// assert_eq!(LazyList::series(0, 1).take(3).len(), 3);
    /// assert_eq!(LazyList::<i32>::empty().len(), 0);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Left-to-right reduction: `function(... function(initial, e0) ..., en)`.
    ///
    /// Returns `initial` for the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let sum = LazyList::series(0, 1).take(8).fold(0, |total, value| total + value);
    /// assert_eq!(sum, 28);
    /// ```
    pub fn fold<A, F>(&self, initial: A, function: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(initial, function)
    }

    /// Calls `function` once per element, in order.
    pub fn each<F>(&self, function: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(function);
    }

    /// Returns `true` if every element satisfies `predicate`.
    ///
    /// Stops at the first failing element; `true` for the empty list.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().all(predicate)
    }

    /// Returns `true` if some element satisfies `predicate`.
    ///
    /// Stops at the first matching element; `false` for the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let naturals = LazyList::series(0, 1);
    /// assert!(naturals.any(|value| *value == 3));
    /// assert!(!naturals.take(8).any(|value| *value < 0));
    /// ```
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }
}

impl<T: Clone> LazyList<T> {
    /// Materializes the first `count` elements into a fully resolved list.
    ///
    /// Unlike [`take`](Self::take), the prefix is forced and copied now, and
    /// the result holds no reference to this list. `cut(0)` cuts nothing and
    /// returns this same list, even when it is infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let prefix = LazyList::series(0, 1).take(6).cut(3);
    /// assert_eq!(prefix, LazyList::make([0, 1, 2]));
    ///
    /// let zeros = LazyList::repeat(0);
    /// assert!(LazyList::ptr_eq(&zeros.cut(0), &zeros));
    /// ```
    #[must_use]
    pub fn cut(&self, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }
        Self::make(self.iter().take(count).cloned())
    }

    /// Materializes the elements before the first one satisfying `predicate`.
    ///
    /// The list is cut at the first element for which `predicate` holds; that
    /// element and everything after it are left out. If no element matches,
    /// the whole list is forced and this same list is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let prefix = LazyList::series(0, 1).take(6).cut_while(|value| *value >= 3);
    /// assert_eq!(prefix, LazyList::make([0, 1, 2]));
    /// ```
    #[must_use]
    pub fn cut_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut prefix = Vec::new();
        for element in self {
            if predicate(element) {
                return Self::make(prefix);
            }
            prefix.push(element.clone());
        }
        self.clone()
    }
}
