//! Control structures for deferred evaluation.
//!
//! This module provides the building blocks that lazy sequences are made
//! of:
//!
//! - [`Thunk`]: A resolve-once, memoized deferred value
//! - [`ForceError`]: Why forcing a thunk failed
//! - [`Shareable`]: The capture bound for producers (`Send + Sync` under `arc`)
//!
//! # Examples
//!
//! ```rust
//! use lazy_list::control::{ForceError, Thunk};
//!
//! let thunk = Thunk::new(|| "computed once");
//! assert_eq!(thunk.try_force(), Ok(&"computed once"));
//! assert_ne!(ForceError::Reentrant, ForceError::Poisoned);
//! ```

mod thunk;

pub use thunk::{ForceError, Producer, Shareable, Thunk};
