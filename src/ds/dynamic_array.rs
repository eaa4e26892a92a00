//! Growable, index-addressed array with explicit slot occupancy.
//!
//! Backing store for every other structure in the crate: hash table buckets
//! are `DynamicArray`s of key/value pairs, the bucket table is a
//! `DynamicArray` of buckets, and [`SlotArena`](crate::ds::SlotArena) keeps its
//! nodes in one.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Box<[Option<T>]>          len = 3, capacity = 4
//!   ┌──────────┬──────────┬──────────┬──────────┐
//!   │ Some(a)  │ Some(b)  │ Some(c)  │   None   │
//!   └──────────┴──────────┴──────────┴──────────┘
//!     0          1          2          3
//!   ◄────────── live [0, len) ──────►◄ vacant ─►
//! ```
//!
//! Vacancy is tracked by the `Option` tag, never by a sentinel value, so any
//! `T` (including "falsy" values) can be stored.
//!
//! ## Growth
//! - `push` / `insert_at` reallocate to `capacity * 2` when `len + 1 > capacity`
//!   (an array with capacity 0 grows to [`DEFAULT_ARRAY_CAPACITY`]).
//! - Removals never shrink the buffer.
//!
//! ## Indexing
//! - `get`, `get_mut`, `set`, `remove_at` take an `isize`; negative values count
//!   from the end (`-1` is the last element).
//! - `insert_at` takes a position in `0..=len`; `len` appends.
//!
//! ## Performance
//! - `push`: amortized O(1)
//! - `get` / `set`: O(1)
//! - `insert_at` / `remove_at` / `push_front` / `pop_front`: O(n)
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::ds::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! for i in 0..9 {
//!     array.push(i);
//! }
//! assert_eq!(array.len(), 9);
//! assert_eq!(array.capacity(), 16);
//! assert_eq!(array.get(-1), Ok(&8));
//! assert_eq!(array.remove_at(0), Ok(0));
//! ```
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::ArrayError;

/// Capacity of a freshly constructed array, and the size an empty-capacity
/// array grows to on its first write.
pub const DEFAULT_ARRAY_CAPACITY: usize = 4;

fn vacant_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Contiguous, resizable sequence with amortized O(1) append.
#[derive(Clone)]
pub struct DynamicArray<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with [`DEFAULT_ARRAY_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARRAY_CAPACITY)
    }

    /// Creates an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vacant_slots(capacity),
            len: 0,
        }
    }

    /// Takes ownership of `values`; capacity equals the number of values.
    pub fn from_vec(values: Vec<T>) -> Self {
        let len = values.len();
        Self {
            slots: values.into_iter().map(Some).collect(),
            len,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the element at `index` (negative counts from the end).
    pub fn get(&self, index: isize) -> Result<&T, ArrayError> {
        let pos = self.resolve(index)?;
        let len = self.len;
        self.slot(pos)
            .ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: isize) -> Result<&mut T, ArrayError> {
        let pos = self.resolve(index)?;
        let len = self.len;
        self.slot_mut(pos)
            .ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    /// Overwrites the element at `index`.
    pub fn set(&mut self, index: isize, value: T) -> Result<(), ArrayError> {
        let pos = self.resolve(index)?;
        self.slots[pos] = Some(value);
        Ok(())
    }

    /// Returns the live element at position `pos`, or `None` if `pos >= len`.
    #[inline]
    pub fn slot(&self, pos: usize) -> Option<&T> {
        if pos < self.len {
            self.slots[pos].as_ref()
        } else {
            None
        }
    }

    /// Mutable counterpart of [`slot`](Self::slot).
    #[inline]
    pub fn slot_mut(&mut self, pos: usize) -> Option<&mut T> {
        if pos < self.len {
            self.slots[pos].as_mut()
        } else {
            None
        }
    }

    /// Returns the first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.slot(0)
    }

    /// Returns the last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|pos| self.slot(pos))
    }

    /// Appends `value`, growing the buffer if it is full.
    pub fn push(&mut self, value: T) {
        self.reserve_one();
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Inserts `value` at position 0, shifting everything else forward.
    pub fn push_front(&mut self, value: T) {
        self.insert_unchecked(0, value);
    }

    /// Inserts `value` at `index`, shifting elements at `>= index` forward.
    ///
    /// `index == len` appends.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::IndexOutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len: self.len,
            });
        }
        self.insert_unchecked(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail backward.
    pub fn remove_at(&mut self, index: isize) -> Result<T, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::EmptyContainer);
        }
        let pos = self.resolve(index)?;
        let len = self.len;
        // Rotating moves the removed element to the last live slot.
        self.slots[pos..len].rotate_left(1);
        self.len -= 1;
        self.slots[self.len]
            .take()
            .ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Result<T, ArrayError> {
        self.remove_at(-1)
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Result<T, ArrayError> {
        self.remove_at(0)
    }

    /// Drops all live elements; capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = None;
        }
        self.len = 0;
    }

    /// Returns an iterator over the live elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots[..self.len].iter(),
        }
    }

    /// Returns an iterator of mutable references over the live elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.slots[..self.len].iter_mut(),
        }
    }

    /// Normalizes a possibly negative index into a live position.
    fn resolve(&self, index: isize) -> Result<usize, ArrayError> {
        let len = self.len as isize;
        let pos = if index < 0 { index + len } else { index };
        if pos < 0 || pos >= len {
            return Err(ArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(pos as usize)
    }

    fn insert_unchecked(&mut self, pos: usize, value: T) {
        self.reserve_one();
        // slots[len] is vacant, so rotating brings a `None` down to `pos`.
        self.slots[pos..=self.len].rotate_right(1);
        self.slots[pos] = Some(value);
        self.len += 1;
    }

    fn reserve_one(&mut self) {
        if self.len + 1 > self.capacity() {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = if old_capacity == 0 {
            DEFAULT_ARRAY_CAPACITY
        } else {
            old_capacity * 2
        };

        let mut fresh = vacant_slots(new_capacity);
        for (dst, src) in fresh.iter_mut().zip(self.slots[..self.len].iter_mut()) {
            *dst = src.take();
        }
        self.slots = fresh;

        tracing::trace!(
            old_capacity,
            new_capacity,
            len = self.len,
            "dynamic array reallocated"
        );
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len <= self.capacity());
        for (pos, slot) in self.slots.iter().enumerate() {
            if pos < self.len {
                assert!(slot.is_some(), "live slot {} is vacant", pos);
            } else {
                assert!(slot.is_none(), "vacant slot {} is occupied", pos);
            }
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

/// Unchecked-style access by live position.
///
/// # Panics
///
/// Panics if `pos >= len`; use [`slot`](DynamicArray::slot) for a checked read.
impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: usize) -> &T {
        match self.slot(pos) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", self.len, pos),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, pos: usize) -> &mut T {
        let len = self.len;
        match self.slot_mut(pos) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, pos),
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

/// Iterator over the live elements of a [`DynamicArray`].
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().and_then(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().and_then(Option::as_ref)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable iterator over the live elements of a [`DynamicArray`].
pub struct IterMut<'a, T> {
    inner: std::slice::IterMut<'a, Option<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().and_then(Option::as_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator over the live elements of a [`DynamicArray`].
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<Option<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().flatten()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut slots = self.slots.into_vec();
        slots.truncate(self.len);
        IntoIter {
            inner: slots.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_vec<T: Clone>(array: &DynamicArray<T>) -> Vec<T> {
        array.iter().cloned().collect()
    }

    #[test]
    fn new_array_is_empty_with_default_capacity() {
        let array: DynamicArray<i32> = DynamicArray::new();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), DEFAULT_ARRAY_CAPACITY);
        assert!(array.is_empty());
        array.debug_validate_invariants();
    }

    #[test]
    fn from_vec_capacity_matches_length() {
        for n in [2usize, 5, 7, 9, 17] {
            let array = DynamicArray::from_vec((0..n).collect());
            assert_eq!(array.len(), n);
            assert_eq!(array.capacity(), n);
        }
    }

    #[test]
    fn push_doubles_capacity() {
        let cases = [(0usize, 4usize), (1, 4), (4, 4), (5, 8), (8, 8), (9, 16)];
        for (pushes, expected_capacity) in cases {
            let mut array = DynamicArray::new();
            for i in 0..pushes {
                array.push(i);
            }
            assert_eq!(array.len(), pushes);
            assert_eq!(array.capacity(), expected_capacity, "after {} pushes", pushes);
            array.debug_validate_invariants();
        }
    }

    #[test]
    fn push_onto_from_vec_grows_from_its_length() {
        let mut array = DynamicArray::from_vec(vec![0, 1]);
        for i in 0..2 {
            array.push(i);
        }
        assert_eq!((array.len(), array.capacity()), (4, 4));

        let mut array = DynamicArray::from_vec(vec![0, 1]);
        for i in 0..17 {
            array.push(i);
        }
        assert_eq!((array.len(), array.capacity()), (19, 32));
    }

    #[test]
    fn zero_capacity_grows_to_default() {
        let mut array = DynamicArray::with_capacity(0);
        array.push('x');
        assert_eq!(array.capacity(), DEFAULT_ARRAY_CAPACITY);
        assert_eq!(array.get(0), Ok(&'x'));
    }

    #[test]
    fn get_positive_and_negative() {
        let array = DynamicArray::from_vec(vec![0, 1, 2, 3]);
        assert_eq!(array.get(0), Ok(&0));
        assert_eq!(array.get(3), Ok(&3));
        assert_eq!(array.get(-1), Ok(&3));
        assert_eq!(array.get(-2), Ok(&2));
        assert_eq!(array.get(-4), Ok(&0));
    }

    #[test]
    fn get_out_of_range() {
        let array = DynamicArray::from_vec(vec![0, 1]);
        assert_eq!(
            array.get(2),
            Err(ArrayError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(array.get(-3).is_err());

        let empty: DynamicArray<i32> = DynamicArray::new();
        assert!(empty.get(0).is_err());
        assert!(empty.get(-1).is_err());
    }

    #[test]
    fn vacant_slots_are_never_exposed() {
        let mut array = DynamicArray::new();
        array.push(1);
        assert_eq!(array.capacity(), 4);
        assert!(array.get(1).is_err());
        assert_eq!(array.slot(1), None);
        assert_eq!(array.slot(3), None);
        assert_eq!(array.iter().count(), 1);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut array = DynamicArray::from_vec(vec![1, 2, 3, 4, 5]);
        array.set(0, 9).unwrap();
        array.set(-1, 9).unwrap();
        assert_eq!(to_vec(&array), vec![9, 2, 3, 4, 9]);

        array.set(-5, 7).unwrap();
        assert_eq!(array.get(0), Ok(&7));
    }

    #[test]
    fn set_out_of_range() {
        let mut array = DynamicArray::from_vec(vec![1, 2, 3, 4, 5]);
        assert!(array.set(5, 0).is_err());
        assert!(array.set(6, 0).is_err());

        let mut empty: DynamicArray<i32> = DynamicArray::new();
        assert!(empty.set(0, 0).is_err());
        assert!(empty.set(10, 0).is_err());
    }

    #[test]
    fn insert_at_shifts_forward() {
        let mut array = DynamicArray::from_vec(vec![1, 2, 4]);
        array.insert_at(2, 3).unwrap();
        assert_eq!(to_vec(&array), vec![1, 2, 3, 4]);
        assert_eq!(array.capacity(), 6);

        array.insert_at(0, 0).unwrap();
        array.insert_at(array.len(), 5).unwrap();
        assert_eq!(to_vec(&array), vec![0, 1, 2, 3, 4, 5]);
        array.debug_validate_invariants();
    }

    #[test]
    fn insert_at_past_end_fails() {
        let mut array = DynamicArray::from_vec(vec![1, 2]);
        assert_eq!(
            array.insert_at(3, 9),
            Err(ArrayError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(to_vec(&array), vec![1, 2]);
    }

    #[test]
    fn insert_at_huge_index_reports_saturated_index() {
        let mut array = DynamicArray::from_vec(vec![1, 2]);
        assert_eq!(
            array.insert_at(usize::MAX, 9),
            Err(ArrayError::IndexOutOfRange {
                index: isize::MAX,
                len: 2
            })
        );
        assert_eq!(
            array.insert_at(isize::MAX as usize + 1, 9),
            Err(ArrayError::IndexOutOfRange {
                index: isize::MAX,
                len: 2
            })
        );
    }

    #[test]
    fn index_operators_address_live_positions() {
        let mut array = DynamicArray::from_vec(vec![10, 20, 30]);
        assert_eq!(array[1], 20);
        array[2] += 5;
        assert_eq!(to_vec(&array), vec![10, 20, 35]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_len_panics_even_with_spare_capacity() {
        let mut array = DynamicArray::with_capacity(8);
        array.push(1);
        let _value = array[1];
    }

    #[test]
    fn remove_at_shifts_backward_without_shrinking() {
        let mut array = DynamicArray::from_vec(vec![0, 1, 2, 3, 4]);
        assert_eq!(array.remove_at(2), Ok(2));
        assert_eq!(to_vec(&array), vec![0, 1, 3, 4]);
        assert_eq!(array.remove_at(0), Ok(0));
        assert_eq!(to_vec(&array), vec![1, 3, 4]);
        assert_eq!(array.remove_at(-1), Ok(4));
        assert_eq!(to_vec(&array), vec![1, 3]);
        assert_eq!(array.capacity(), 5);
        array.debug_validate_invariants();
    }

    #[test]
    fn remove_errors() {
        let mut empty: DynamicArray<i32> = DynamicArray::new();
        assert_eq!(empty.remove_at(0), Err(ArrayError::EmptyContainer));
        assert_eq!(empty.remove_at(6), Err(ArrayError::EmptyContainer));
        assert_eq!(empty.pop(), Err(ArrayError::EmptyContainer));
        assert_eq!(empty.pop_front(), Err(ArrayError::EmptyContainer));

        let mut array = DynamicArray::from_vec(vec![0, 1, 2, 3, 4, 5]);
        assert!(matches!(
            array.remove_at(6),
            Err(ArrayError::IndexOutOfRange { index: 6, len: 6 })
        ));
        assert_eq!(array.len(), 6);
    }

    #[test]
    fn pop_and_pop_front() {
        let mut array: DynamicArray<i32> = (0..3).collect();
        assert_eq!(array.pop(), Ok(2));
        assert_eq!(to_vec(&array), vec![0, 1]);

        let mut array: DynamicArray<i32> = (9..20).collect();
        assert_eq!(array.pop_front(), Ok(9));
        assert_eq!(to_vec(&array), (10..20).collect::<Vec<_>>());

        let mut single = DynamicArray::new();
        single.push(5);
        assert_eq!(single.pop(), Ok(5));
        assert!(single.is_empty());
    }

    #[test]
    fn push_front_prepends() {
        let mut array = DynamicArray::new();
        for i in 0..5 {
            array.push_front(i);
        }
        assert_eq!(to_vec(&array), vec![4, 3, 2, 1, 0]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn stores_falsy_values() {
        let mut array = DynamicArray::new();
        array.push(0);
        array.push(0);
        array.push(0);
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(1), Ok(&0));
        assert_eq!(array.remove_at(1), Ok(0));
        assert_eq!(array.len(), 2);

        let mut options: DynamicArray<Option<u8>> = DynamicArray::new();
        options.push(None);
        assert_eq!(options.get(0), Ok(&None));
    }

    #[test]
    fn equality_ignores_capacity() {
        let a = DynamicArray::from_vec(vec![1, 2]);
        let mut b = DynamicArray::with_capacity(16);
        b.push(1);
        b.push(2);
        assert_eq!(a, b);
        assert_ne!(a, DynamicArray::from_vec(vec![1, 3]));
        assert_ne!(a, DynamicArray::from_vec(vec![2, 1]));
        assert_eq!(DynamicArray::<i32>::new(), DynamicArray::<i32>::with_capacity(0));
    }

    #[test]
    fn display_and_debug() {
        let array = DynamicArray::from_vec(vec![1, 2, 3]);
        assert_eq!(array.to_string(), "[1, 2, 3]");
        assert_eq!(format!("{:?}", array), "[1, 2, 3]");
        assert_eq!(DynamicArray::<i32>::new().to_string(), "[]");
    }

    #[test]
    fn first_last_and_clear() {
        let mut array = DynamicArray::from_vec(vec!['a', 'b', 'c']);
        assert_eq!(array.first(), Some(&'a'));
        assert_eq!(array.last(), Some(&'c'));
        array.clear();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 3);
        assert_eq!(array.first(), None);
        assert_eq!(array.last(), None);
        array.debug_validate_invariants();
    }

    #[test]
    fn iterators() {
        let mut array: DynamicArray<i32> = (1..=4).collect();
        for value in array.iter_mut() {
            *value *= 10;
        }
        assert_eq!(array.iter().rev().copied().collect::<Vec<_>>(), vec![40, 30, 20, 10]);
        assert_eq!(array.iter().len(), 4);

        array.extend([50, 60]);
        let owned: Vec<i32> = array.into_iter().collect();
        assert_eq!(owned, vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn into_iter_skips_vacant_tail() {
        let mut array = DynamicArray::with_capacity(8);
        array.push(String::from("x"));
        array.push(String::from("y"));
        let owned: Vec<String> = array.into_iter().collect();
        assert_eq!(owned, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn get_mut_updates_value() {
        let mut array = DynamicArray::from_vec(vec![1, 2, 3]);
        *array.get_mut(-1).unwrap() = 30;
        *array.slot_mut(0).unwrap() = 10;
        assert_eq!(to_vec(&array), vec![10, 2, 30]);
        assert!(array.get_mut(3).is_err());
        assert!(array.slot_mut(3).is_none());
    }
}
