//! Lazy combinators.
//!
//! Each combinator inspects only the first element it needs to produce the
//! head of its result and defers everything after that to a producer. The
//! user-supplied functions are shared (not cloned) between the nodes of a
//! result through a [`ReferenceCounter`].

use smallvec::SmallVec;

use super::LazyList;
use crate::control::Shareable;
use crate::persistent::ReferenceCounter;

/// Inline capacity for the inputs of [`LazyList::zip`].
const ZIP_INLINE_CAPACITY: usize = 4;

type ZipInputs<T> = SmallVec<[LazyList<T>; ZIP_INLINE_CAPACITY]>;

impl<T: Shareable + 'static> LazyList<T> {
    /// Applies `function` to every element, lazily.
    ///
    /// The head of the result is computed immediately; each further element
    /// is computed when its node is forced. Mapping the empty list returns
    /// the empty list without calling `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let doubled = LazyList::series(0, 1).map(|value| value * 2);
    /// assert_eq!(doubled.head(), Some(&0));
    /// assert_eq!(doubled.tail().head(), Some(&2));
    /// assert_eq!(doubled.tail().tail().head(), Some(&4));
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> LazyList<U>
    where
        U: Shareable + 'static,
        F: Fn(&T) -> U + Shareable + 'static,
    {
        Self::map_shared(self, ReferenceCounter::new(function))
    }

    fn map_shared<U, F>(source: &Self, function: ReferenceCounter<F>) -> LazyList<U>
    where
        U: Shareable + 'static,
        F: Fn(&T) -> U + Shareable + 'static,
    {
        let Some(element) = source.head() else {
            return LazyList::empty();
        };
        let mapped = function(element);
        let rest = source.clone();
        LazyList::new(mapped, move || Self::map_shared(&rest.tail(), function))
    }

    /// Combines two lists element by element, stopping at the shorter one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let names = LazyList::make(["a", "b", "c"]);
    /// let labelled = LazyList::series(1, 1).zip_with(&names, |index, name| format!("{index}{name}"));
    /// let values: Vec<String> = labelled.into_iter().collect();
    /// assert_eq!(values, vec!["1a", "2b", "3c"]);
    /// ```
    #[must_use]
    pub fn zip_with<U, V, F>(&self, other: &LazyList<U>, combinator: F) -> LazyList<V>
    where
        U: Shareable + 'static,
        V: Shareable + 'static,
        F: Fn(&T, &U) -> V + Shareable + 'static,
    {
        Self::zip_with_shared(self, other, ReferenceCounter::new(combinator))
    }

    fn zip_with_shared<U, V, F>(
        left: &Self,
        right: &LazyList<U>,
        combinator: ReferenceCounter<F>,
    ) -> LazyList<V>
    where
        U: Shareable + 'static,
        V: Shareable + 'static,
        F: Fn(&T, &U) -> V + Shareable + 'static,
    {
        let (Some(left_element), Some(right_element)) = (left.head(), right.head()) else {
            return LazyList::empty();
        };
        let combined = combinator(left_element, right_element);
        let left_rest = left.clone();
        let right_rest = right.clone();
        LazyList::new(combined, move || {
            Self::zip_with_shared(&left_rest.tail(), &right_rest.tail(), combinator)
        })
    }

    /// Combines any number of lists position by position.
    ///
    /// The `i`-th element of the result is `combinator` applied to the
    /// `i`-th elements of all `inputs`, in input order. The result ends as
    /// soon as any input ends; with no inputs it is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let sums = LazyList::zip(
    ///     [LazyList::series(0, 1), LazyList::series(10, 10), LazyList::repeat(100)],
    ///     |values: &[&i32]| values.iter().copied().sum::<i32>(),
    /// );
    /// let first: Vec<i32> = sums.take(3).into_iter().collect();
    /// assert_eq!(first, vec![110, 121, 132]);
    /// ```
    #[must_use]
    pub fn zip<I, U, F>(inputs: I, combinator: F) -> LazyList<U>
    where
        I: IntoIterator<Item = Self>,
        U: Shareable + 'static,
        F: Fn(&[&T]) -> U + Shareable + 'static,
    {
        Self::zip_shared(inputs.into_iter().collect(), ReferenceCounter::new(combinator))
    }

    fn zip_shared<U, F>(inputs: ZipInputs<T>, combinator: ReferenceCounter<F>) -> LazyList<U>
    where
        U: Shareable + 'static,
        F: Fn(&[&T]) -> U + Shareable + 'static,
    {
        if inputs.is_empty() {
            return LazyList::empty();
        }
        let combined = {
            let heads: Option<SmallVec<[&T; ZIP_INLINE_CAPACITY]>> =
                inputs.iter().map(Self::head).collect();
            match heads {
                Some(heads) => combinator(&heads),
                None => return LazyList::empty(),
            }
        };
        LazyList::new(combined, move || {
            let rests: ZipInputs<T> = inputs.iter().map(Self::tail).collect();
            Self::zip_shared(rests, combinator)
        })
    }
}

impl<T: Clone + Shareable + 'static> LazyList<T> {
    /// Keeps the elements satisfying `predicate`, lazily.
    ///
    /// The search for the first matching element happens now, so the head of
    /// the result is always available; the search for each later match runs
    /// when the corresponding tail is forced. On an infinite list with no
    /// further match this search does not return.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let evens = LazyList::series(0, 1).filter(|value| value % 2 == 0);
    /// assert_eq!(evens.head(), Some(&0));
    /// assert_eq!(evens.tail().head(), Some(&2));
    ///
    /// let none = LazyList::repeat(0).take(8).filter(|_| false);
    /// assert!(none.is_empty());
    /// ```
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Shareable + 'static,
    {
        Self::filter_shared(self, ReferenceCounter::new(predicate))
    }

    fn filter_shared<P>(source: &Self, predicate: ReferenceCounter<P>) -> Self
    where
        P: Fn(&T) -> bool + Shareable + 'static,
    {
        let mut current = source.clone();
        loop {
            let Some(element) = current.head() else {
                return Self::empty();
            };
            if predicate(element) {
                let element = element.clone();
                return Self::new(element, move || {
                    Self::filter_shared(&current.tail(), predicate)
                });
            }
            current = current.tail();
        }
    }

    /// Returns the first `count` elements, lazily.
    ///
    /// The last kept node gets an already resolved empty tail, so the source
    /// is never forced past the `count`-th element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::series(0, 1).take(3);
    /// assert_eq!(list.len(), 3);
    /// assert!(LazyList::series(0, 1).take(0).is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        match (count, self.head()) {
            (0, _) | (_, None) => Self::empty(),
            (1, Some(element)) => Self::singleton(element.clone()),
            (_, Some(element)) => {
                let element = element.clone();
                let rest = self.clone();
                Self::new(element, move || rest.tail().take(count - 1))
            }
        }
    }

    /// Returns the longest prefix whose elements satisfy `predicate`, lazily.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let small = LazyList::series(0, 1).take_while(|value| *value < 3);
    /// assert_eq!(small.len(), 3);
    /// ```
    #[must_use]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Shareable + 'static,
    {
        Self::take_while_shared(self, ReferenceCounter::new(predicate))
    }

    fn take_while_shared<P>(source: &Self, predicate: ReferenceCounter<P>) -> Self
    where
        P: Fn(&T) -> bool + Shareable + 'static,
    {
        match source.head() {
            Some(element) if predicate(element) => {
                let element = element.clone();
                let rest = source.clone();
                Self::new(element, move || {
                    Self::take_while_shared(&rest.tail(), predicate)
                })
            }
            _ => Self::empty(),
        }
    }

    /// Appends `other` after this list, lazily.
    ///
    /// `other` is not touched until this list is exhausted. If this list is
    /// empty, `other` itself is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::series(0, 1).take(3).concat(&LazyList::repeat(3));
    /// let first: Vec<i32> = list.take(5).into_iter().collect();
    /// assert_eq!(first, vec![0, 1, 2, 3, 3]);
    /// ```
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let Some(element) = self.head() else {
            return other.clone();
        };
        let element = element.clone();
        let rest = self.clone();
        let other = other.clone();
        Self::new(element, move || rest.tail().concat(&other))
    }
}

impl<T> LazyList<T> {
    /// Skips the first `count` elements, forcing each skipped node.
    ///
    /// The returned suffix shares nodes with this list and may itself still
    /// be lazy. `drop_first(0)` returns this same list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::series(0, 1).drop_first(3);
    /// assert_eq!(list.head(), Some(&3));
    /// ```
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count {
            if current.is_empty() {
                break;
            }
            current = current.tail();
        }
        current
    }

    /// Skips the longest prefix whose elements satisfy `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let list = LazyList::series(0, 1).drop_while(|value| *value < 3);
    /// assert_eq!(list.head(), Some(&3));
    /// ```
    #[must_use]
    pub fn drop_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut current = self.clone();
        while current.head().is_some_and(&mut predicate) {
            current = current.tail();
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    #[rstest]
    fn test_map_on_empty_does_not_call_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let list: LazyList<i32> = LazyList::empty();
        let mapped = list.map(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            1
        });
        assert!(mapped.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn test_map_is_lazy_beyond_head() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mapped = LazyList::series(0, 1).map(move |value| {
            counter.fetch_add(1, Ordering::SeqCst);
            value * 2
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(mapped.drop_first(4).head(), Some(&8));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[rstest]
    fn test_filter_first_three_evens() {
        let list = LazyList::series(0, 1).filter(|value| value % 2 == 0);
        assert_eq!(list.head(), Some(&0));
        assert_eq!(list.tail().head(), Some(&2));
        assert_eq!(list.tail().tail().head(), Some(&4));
    }

    #[rstest]
    fn test_filter_without_match_is_empty() {
        let list = LazyList::repeat(0).take(8).filter(|_| false);
        assert!(list.is_empty());
    }

    #[rstest]
    fn test_take_does_not_force_past_window() {
        let source = LazyList::series(0, 1);
        let window = source.take(2);
        assert_eq!(window.len(), 2);
        assert!(!source.tail().is_forced());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(5, 5)]
    #[case(9, 5)]
    fn test_take_length_is_bounded(#[case] count: usize, #[case] expected: usize) {
        assert_eq!(LazyList::make([1, 2, 3, 4, 5]).take(count).len(), expected);
    }

    #[rstest]
    fn test_drop_first_zero_returns_same_list() {
        let list = LazyList::series(0, 1);
        assert!(LazyList::ptr_eq(&list.drop_first(0), &list));
    }

    #[rstest]
    fn test_drop_first_past_end_is_empty() {
        assert!(LazyList::make([1, 2]).drop_first(5).is_empty());
    }

    #[rstest]
    fn test_drop_first_shares_suffix() {
        let list = LazyList::make([1, 2, 3]);
        assert!(LazyList::ptr_eq(&list.drop_first(2), &list.tail().tail()));
    }

    #[rstest]
    fn test_take_while_first_three() {
        let list = LazyList::series(0, 1).take_while(|value| *value < 3);
        assert_eq!(list.len(), 3);
        assert_eq!(list.head(), Some(&0));
        assert_eq!(list.tail().head(), Some(&1));
        assert_eq!(list.tail().tail().head(), Some(&2));
    }

    #[rstest]
    fn test_take_while_on_empty() {
        let list: LazyList<i32> = LazyList::empty();
        assert!(list.take_while(|_| true).is_empty());
    }

    #[rstest]
    fn test_drop_while_stops_at_first_failure() {
        let list = LazyList::make([1, 2, 5, 1]).drop_while(|value| *value < 3);
        assert_eq!(list, LazyList::make([5, 1]));
    }

    #[rstest]
    fn test_concat_empty_returns_other() {
        let empty: LazyList<i32> = LazyList::empty();
        let other = LazyList::repeat(3);
        assert!(LazyList::ptr_eq(&empty.concat(&other), &other));
    }

    #[rstest]
    fn test_concat_defers_second_list() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let second = LazyList::new(9, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            LazyList::empty()
        });
        let list = LazyList::make([1, 2]).concat(&second);
        assert_eq!(list.drop_first(2).head(), Some(&9));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(list.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_concat_finite_then_infinite() {
        let list = LazyList::series(0, 1).take(3).concat(&LazyList::repeat(3));
        assert_eq!(list.head(), Some(&0));
        assert_eq!(list.tail().head(), Some(&1));
        assert_eq!(list.tail().tail().head(), Some(&2));
        assert_eq!(list.tail().tail().tail().head(), Some(&3));
        assert_eq!(list.tail().tail().tail().tail().head(), Some(&3));
    }

    #[rstest]
    fn test_zip_builds_fibonacci_from_itself() {
        let knot: Arc<OnceLock<LazyList<u64>>> = Arc::new(OnceLock::new());
        let inner = Arc::clone(&knot);
        let fibonacci = LazyList::new(1, move || {
            let Some(fibonacci) = inner.get() else {
                return LazyList::empty();
            };
            LazyList::zip([fibonacci.clone(), fibonacci.tail()], |pair: &[&u64]| {
                pair[0] + pair[1]
            })
        })
        .cons(0);
        let _ = knot.set(fibonacci.clone());

        let first: Vec<u64> = fibonacci.iter().take(10).copied().collect();
        assert_eq!(first, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[rstest]
    fn test_zip_stops_at_shortest_input() {
        let zipped = LazyList::zip(
            [LazyList::make([1, 2, 3]), LazyList::series(0, 1)],
            |values: &[&i32]| values[0] * values[1],
        );
        assert_eq!(zipped, LazyList::make([0, 2, 6]));
    }

    #[rstest]
    fn test_zip_with_empty_input_is_empty() {
        let zipped = LazyList::zip(
            [LazyList::series(0, 1), LazyList::empty()],
            |values: &[&i32]| *values[0],
        );
        assert!(zipped.is_empty());
    }

    #[rstest]
    fn test_zip_spills_past_inline_capacity() {
        let inputs = (0..6).map(|offset| LazyList::series(offset, 1));
        let sums = LazyList::zip(inputs, |values: &[&i32]| {
            values.iter().copied().sum::<i32>()
        });
        let first: Vec<i32> = sums.take(3).into_iter().collect();
        assert_eq!(first, vec![15, 21, 27]);
    }

    #[rstest]
    fn test_zip_without_inputs_is_empty() {
        let zipped = LazyList::<i32>::zip([], |values: &[&i32]| values.len());
        assert!(zipped.is_empty());
    }

    #[rstest]
    fn test_zip_with_pairs_different_types() {
        let pairs = LazyList::series(0, 1).zip_with(&LazyList::make(['a', 'b']), |index, letter| {
            format!("{letter}{index}")
        });
        assert_eq!(pairs, LazyList::make([String::from("a0"), String::from("b1")]));
    }
}
