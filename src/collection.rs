//! This module defines [`Collection`], the fixed-capacity storage shared by every container
//! in this crate.
//!
//! [`Collection`]: struct.Collection.html
//!

use crate::error::BvhError;
use std::ops::Index;
use std::slice;

/// An append-only array of up to `2^N` elements.
///
/// The capacity is part of the type, so two collections with different `N` are different
/// types. Elements are never removed; their index stays valid for the lifetime of the
/// collection.
///
/// # Examples
/// ```
/// use linear_bvh::collection::Collection;
///
/// let mut collection = Collection::<u32, 1>::new();
/// assert_eq!(collection.push(7), 0);
/// assert_eq!(collection.push(9), 1);
/// assert!(collection.is_full());
/// assert!(collection.try_push(11).is_err());
/// assert_eq!(collection[1], 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> Collection<T, N> {
    /// The maximum number of elements, `2^N`.
    pub const CAPACITY: usize = 1 << N;

    /// Creates an empty [`Collection`].
    ///
    /// [`Collection`]: struct.Collection.html
    ///
    pub fn new() -> Collection<T, N> {
        Collection {
            items: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Appends `item` and returns its index.
    ///
    /// # Panics
    /// Panics if the collection already holds [`Collection::CAPACITY`] elements.
    pub fn push(&mut self, item: T) -> usize {
        match self.try_push(item) {
            Ok(index) => index,
            Err(err) => panic!("Tried to push into a full collection: {}", err),
        }
    }

    /// Appends `item` and returns its index, or [`BvhError::CapacityExceeded`] if the
    /// collection is full. The rejected item is dropped.
    pub fn try_push(&mut self, item: T) -> Result<usize, BvhError> {
        if self.is_full() {
            return Err(BvhError::CapacityExceeded {
                capacity: Self::CAPACITY,
            });
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if no further element fits.
    pub fn is_full(&self) -> bool {
        self.items.len() >= Self::CAPACITY
    }

    /// Returns the capacity, `2^N`.
    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> Default for Collection<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<usize> for Collection<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Collection<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
