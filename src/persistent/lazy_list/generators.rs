//! Infinite list generators.
//!
//! Every generator builds exactly one node up front; each further node is
//! built by the previous node's producer when that tail is forced.

use std::ops::Add;

use super::LazyList;
use crate::control::Shareable;
use crate::persistent::ReferenceCounter;

impl<T: Clone + Shareable + 'static> LazyList<T> {
    /// Returns the infinite list `seed, step(seed), step(step(seed)), ...`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let powers = LazyList::iterate(1, |value| value * 2);
    /// let first: Vec<i32> = powers.take(5).into_iter().collect();
    /// assert_eq!(first, vec![1, 2, 4, 8, 16]);
    /// ```
    #[must_use]
    pub fn iterate<F>(seed: T, step: F) -> Self
    where
        F: Fn(&T) -> T + Shareable + 'static,
    {
        Self::iterate_shared(seed, ReferenceCounter::new(step))
    }

    fn iterate_shared<F>(seed: T, step: ReferenceCounter<F>) -> Self
    where
        F: Fn(&T) -> T + Shareable + 'static,
    {
        let current = seed.clone();
        Self::new(seed, move || {
            let next = step(&current);
            Self::iterate_shared(next, step)
        })
    }

    /// Returns the infinite list `value, value, value, ...`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let zeros = LazyList::repeat(0);
    /// assert!(zeros.take(8).all(|value| *value == 0));
    /// ```
    #[must_use]
    pub fn repeat(value: T) -> Self {
        Self::iterate(value, T::clone)
    }

    /// Returns the arithmetic progression `start, start + step, start + 2 * step, ...`.
    ///
    /// # Panics
    ///
    /// Uses `T`'s `+`, so for primitive integers forcing the list past
    /// `T::MAX` (or `T::MIN`) panics on overflow in debug builds and wraps in
    /// release builds. Use a wrapping type such as [`std::num::Wrapping`] to
    /// get wrapping in every build.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_list::persistent::LazyList;
    ///
    /// let odds = LazyList::series(1, 2);
    /// let first: Vec<i32> = odds.take(4).into_iter().collect();
    /// assert_eq!(first, vec![1, 3, 5, 7]);
    /// ```
    #[must_use]
    pub fn series(start: T, step: T) -> Self
    where
        T: Add<Output = T>,
    {
        Self::iterate(start, move |current| current.clone() + step.clone())
    }
}
