//! Resolve-once deferred computations.
//!
//! This module provides [`Thunk<T>`], the memo cell behind every lazy tail
//! of a [`LazyList`](crate::persistent::LazyList). A thunk starts either
//! pending (holding a producer) or already resolved. Forcing a pending thunk
//! runs the producer exactly once and caches its result; every later force
//! returns a reference to that cached result.
//!
//! # Examples
//!
//! ```rust
//! use lazy_list::control::Thunk;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let thunk = Thunk::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     42
//! });
//!
//! assert_eq!(thunk.force(), &42);
//! assert_eq!(thunk.force(), &42);
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```
//!
//! # Thread Safety
//!
//! Without the `arc` feature a thunk is a single-threaded cell
//! (`OnceCell` + `RefCell`). With `arc`, the resolved value lives in a
//! `OnceLock` and the producer slot sits behind a per-thunk
//! `parking_lot::ReentrantMutex`, held for as long as the producer runs.
//! Concurrent forcers therefore block until the first one finishes and then
//! read its result; the producer is never invoked twice.

use std::cell::RefCell;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

#[cfg(not(feature = "arc"))]
use std::cell::OnceCell as ResolvedSlot;
#[cfg(feature = "arc")]
use std::sync::OnceLock as ResolvedSlot;

/// Marker for values that may be captured by a deferred computation.
///
/// Without the `arc` feature every type is `Shareable`. With `arc`, only
/// `Send + Sync` types are, so that lists and their producers can cross
/// thread boundaries.
#[cfg(not(feature = "arc"))]
pub trait Shareable {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> Shareable for T {}

/// Marker for values that may be captured by a deferred computation.
///
/// Without the `arc` feature every type is `Shareable`. With `arc`, only
/// `Send + Sync` types are, so that lists and their producers can cross
/// thread boundaries.
#[cfg(feature = "arc")]
pub trait Shareable: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: ?Sized + Send + Sync> Shareable for T {}

/// The boxed producer stored by a pending thunk.
#[cfg(not(feature = "arc"))]
pub type Producer<T> = Box<dyn FnOnce() -> T>;

/// The boxed producer stored by a pending thunk.
#[cfg(feature = "arc")]
pub type Producer<T> = Box<dyn FnOnce() -> T + Send>;

/// Error returned when a thunk cannot be forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForceError {
    /// The producer tried to force the thunk that is running it.
    #[error("thunk was forced re-entrantly from its own producer")]
    Reentrant,
    /// A previous producer run panicked; the thunk holds no value.
    #[error("thunk is poisoned: its producer panicked")]
    Poisoned,
}

/// Lifecycle of the producer slot.
enum ThunkState<T> {
    Pending(Producer<T>),
    Forcing,
    Resolved,
    Poisoned,
}

/// Serializes producer runs.
///
/// Single-threaded builds need no lock, so this is a plain wrapper.
#[cfg(not(feature = "arc"))]
struct ProducerSlot<T> {
    state: RefCell<ThunkState<T>>,
}

#[cfg(not(feature = "arc"))]
impl<T> ProducerSlot<T> {
    fn new(state: ThunkState<T>) -> Self {
        Self {
            state: RefCell::new(state),
        }
    }

    fn with<R>(&self, action: impl FnOnce(&RefCell<ThunkState<T>>) -> R) -> R {
        action(&self.state)
    }

    fn get_mut(&mut self) -> &mut ThunkState<T> {
        self.state.get_mut()
    }
}

/// Serializes producer runs.
///
/// The re-entrant lock lets a producer on the owning thread observe the
/// `Forcing` state (and fail with [`ForceError::Reentrant`]) instead of
/// deadlocking, while other threads wait for the result.
#[cfg(feature = "arc")]
struct ProducerSlot<T> {
    state: parking_lot::ReentrantMutex<RefCell<ThunkState<T>>>,
}

#[cfg(feature = "arc")]
impl<T> ProducerSlot<T> {
    fn new(state: ThunkState<T>) -> Self {
        Self {
            state: parking_lot::ReentrantMutex::new(RefCell::new(state)),
        }
    }

    fn with<R>(&self, action: impl FnOnce(&RefCell<ThunkState<T>>) -> R) -> R {
        let guard = self.state.lock();
        action(&guard)
    }

    fn get_mut(&mut self) -> &mut ThunkState<T> {
        self.state.get_mut().get_mut()
    }
}

/// A deferred value that is computed at most once.
///
/// # Type Parameters
///
/// * `T` - The type of the produced value
///
/// # Examples
///
/// ```rust
/// use lazy_list::control::Thunk;
///
/// let pending = Thunk::new(|| 21 * 2);
/// assert!(!pending.is_resolved());
/// assert_eq!(pending.force(), &42);
/// assert!(pending.is_resolved());
///
/// let ready = Thunk::resolved("done");
/// assert_eq!(ready.get(), Some(&"done"));
/// ```
pub struct Thunk<T> {
    value: ResolvedSlot<T>,
    producer: ProducerSlot<T>,
}

impl<T> Thunk<T> {
    /// Creates a pending thunk. The producer does not run until the
    /// first call to [`force`](Self::force).
    #[inline]
    pub fn new<F>(producer: F) -> Self
    where
        F: FnOnce() -> T + Shareable + 'static,
    {
        Self {
            value: ResolvedSlot::new(),
            producer: ProducerSlot::new(ThunkState::Pending(Box::new(producer))),
        }
    }

    /// Creates a thunk that already holds `value`.
    #[inline]
    pub fn resolved(value: T) -> Self {
        Self {
            value: ResolvedSlot::from(value),
            producer: ProducerSlot::new(ThunkState::Resolved),
        }
    }

    /// Returns the cached value without forcing.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns `true` once a value has been cached.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns `true` if a producer run panicked.
    pub fn is_poisoned(&self) -> bool {
        self.producer
            .with(|state| matches!(&*state.borrow(), ThunkState::Poisoned))
    }

    /// Forces the thunk, running the producer if it has not run yet.
    ///
    /// # Errors
    ///
    /// - [`ForceError::Reentrant`] if called from inside this thunk's own
    ///   producer.
    /// - [`ForceError::Poisoned`] if an earlier producer run panicked.
    ///
    /// # Panics
    ///
    /// If the producer panics, the thunk becomes poisoned and the panic is
    /// propagated to the caller.
    pub fn try_force(&self) -> Result<&T, ForceError> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        self.producer.with(|cell| {
            // Another thread may have resolved the value while we waited.
            if self.value.get().is_some() {
                return Ok(());
            }

            let producer = {
                let mut state = cell.borrow_mut();
                match &*state {
                    ThunkState::Pending(_) => {}
                    ThunkState::Resolved => return Ok(()),
                    ThunkState::Forcing => {
                        tracing::debug!("thunk forced re-entrantly");
                        return Err(ForceError::Reentrant);
                    }
                    ThunkState::Poisoned => return Err(ForceError::Poisoned),
                }
                let ThunkState::Pending(producer) =
                    std::mem::replace(&mut *state, ThunkState::Forcing)
                else {
                    unreachable!()
                };
                producer
            };

            tracing::trace!("running thunk producer");
            match catch_unwind(AssertUnwindSafe(producer)) {
                Ok(value) => {
                    let _ = self.value.set(value);
                    *cell.borrow_mut() = ThunkState::Resolved;
                    Ok(())
                }
                Err(payload) => {
                    tracing::debug!("thunk producer panicked; thunk is now poisoned");
                    *cell.borrow_mut() = ThunkState::Poisoned;
                    resume_unwind(payload)
                }
            }
        })?;

        self.value.get().ok_or(ForceError::Poisoned)
    }

    /// Forces the thunk and returns a reference to the cached value.
    ///
    /// # Panics
    ///
    /// Panics if [`try_force`](Self::try_force) fails, or if the producer
    /// itself panics.
    #[inline]
    pub fn force(&self) -> &T {
        match self.try_force() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Takes the cached value out, leaving the thunk unresolved and inert.
    pub(crate) fn take(&mut self) -> Option<T> {
        let value = self.value.take();
        if value.is_some() {
            *self.producer.get_mut() = ThunkState::Poisoned;
        }
        value
    }
}

impl<T: fmt::Debug> fmt::Debug for Thunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => formatter.debug_tuple("Thunk").field(value).finish(),
            None if self.is_poisoned() => {
                formatter.debug_tuple("Thunk").field(&"<poisoned>").finish()
            }
            None => formatter.debug_tuple("Thunk").field(&"<pending>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    #[cfg(not(feature = "arc"))]
    use std::rc::Rc;

    #[rstest]
    fn test_thunk_defers_producer() {
        let thunk = Thunk::new(|| 42);
        assert!(!thunk.is_resolved());
        assert_eq!(thunk.get(), None);
    }

    #[rstest]
    fn test_thunk_resolved_is_ready() {
        let thunk = Thunk::resolved(7);
        assert!(thunk.is_resolved());
        assert_eq!(thunk.force(), &7);
    }

    #[rstest]
    fn test_thunk_force_returns_same_reference() {
        let thunk = Thunk::new(|| String::from("value"));
        let first: *const String = thunk.force();
        let second: *const String = thunk.force();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_thunk_poisoned_after_panic() {
        let thunk: Thunk<i32> = Thunk::new(|| panic!("boom"));
        let outcome = catch_unwind(AssertUnwindSafe(|| thunk.try_force().map(|value| *value)));
        assert!(outcome.is_err());
        assert!(thunk.is_poisoned());
        assert_eq!(thunk.try_force(), Err(ForceError::Poisoned));
    }

    #[cfg(not(feature = "arc"))]
    #[rstest]
    fn test_thunk_reentrant_force_is_reported() {
        let slot: Rc<RefCell<Option<Rc<Thunk<i32>>>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let observed: Rc<RefCell<Option<ForceError>>> = Rc::new(RefCell::new(None));
        let record = Rc::clone(&observed);
        let thunk = Rc::new(Thunk::new(move || {
            if let Some(this) = inner.borrow().as_ref() {
                *record.borrow_mut() = this.try_force().err();
            }
            1
        }));
        *slot.borrow_mut() = Some(Rc::clone(&thunk));

        assert_eq!(thunk.force(), &1);
        assert_eq!(*observed.borrow(), Some(ForceError::Reentrant));
        slot.borrow_mut().take();
    }

    #[rstest]
    fn test_thunk_take_empties_cell() {
        let mut thunk = Thunk::resolved(3);
        assert_eq!(thunk.take(), Some(3));
        assert!(!thunk.is_resolved());
        assert_eq!(thunk.try_force(), Err(ForceError::Poisoned));
    }

    #[rstest]
    fn test_force_error_messages() {
        assert_eq!(
            ForceError::Reentrant.to_string(),
            "thunk was forced re-entrantly from its own producer"
        );
        assert_eq!(
            ForceError::Poisoned.to_string(),
            "thunk is poisoned: its producer panicked"
        );
    }
}
