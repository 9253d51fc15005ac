//! Errors reported by the fallible entry points of this crate.
//!
//! Most failures in a [`BvhLinearTree`] are either programmer errors (exceeding the
//! compile-time capacity, which panics in [`BvhLinearTree::insert`]) or silent geometric
//! no-ops (degenerate boxes never register a hit). The `try_*` and setter methods report
//! the recoverable cases through [`BvhError`].
//!
//! [`BvhLinearTree`]: ../bvh/struct.BvhLinearTree.html
//! [`BvhLinearTree::insert`]: ../bvh/struct.BvhLinearTree.html#method.insert

use std::fmt;

/// Error type of the fallible operations on collections and trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BvhError {
    /// A fixed-capacity container already holds `capacity` elements.
    CapacityExceeded {
        /// The compile-time capacity of the container.
        capacity: usize,
    },

    /// A transform matrix could not be inverted.
    SingularTransform,
}

impl fmt::Display for BvhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BvhError::CapacityExceeded { capacity } => {
                write!(f, "capacity of {} elements exceeded", capacity)
            }
            BvhError::SingularTransform => write!(f, "transform matrix is not invertible"),
        }
    }
}

impl std::error::Error for BvhError {}
