use alloc::vec::Vec;
use core::{
    iter::Rev,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Index, IndexMut},
    ptr, slice,
};

use allocator_api2::alloc::{Allocator, Global};

use crate::{Error, MAX_SIZE, Result, error::handle_error, raw::RawBuf};

/// A contiguous, growable list backed by a single allocator-owned buffer.
///
/// Slots `[0, len)` hold live values; slots `[len, capacity)` are allocated
/// but uninitialized. Every indexed access, including `list[i]`, is bounds
/// checked.
pub struct ArrayList<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    len: usize,
    _marker: PhantomData<T>,
}

static_assertions::assert_eq_size!(ArrayList<u8>, [usize; 3]);
static_assertions::assert_eq_size!(ArrayList<u64>, [usize; 3]);

// The list owns its elements and allocator outright.
unsafe impl<T: Send, A: Allocator + Send> Send for ArrayList<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for ArrayList<T, A> {}

impl<T> ArrayList<T> {
    /// Creates an empty list. Nothing is allocated.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty list with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_SIZE`] and aborts if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a list of `n` clones of `value`, with capacity `n`.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, Global)
    }

    /// Copies `src` into a new buffer of `capacity` slots.
    ///
    /// A capacity smaller than `src.len()` is raised to `src.len()`.
    pub fn from_slice_with_capacity(src: &[T], capacity: usize) -> Self
    where
        T: Clone,
    {
        Self::from_slice_with_capacity_in(src, capacity, Global)
    }

    /// Moves `values` into a new list with twice their count as capacity.
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let list = ArrayList::from_values(["a", "b"]);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.capacity(), 4);
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>) -> Self {
        Self::from_values_in(values, Global)
    }
}

impl<T, A: Allocator> ArrayList<T, A> {
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBuf::new_in(alloc),
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self::try_with_capacity_in(capacity, alloc).unwrap_or_else(|err| handle_error(err))
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        Ok(Self {
            buf: RawBuf::try_with_capacity_in(capacity, alloc)?,
            len: 0,
            _marker: PhantomData,
        })
    }

    pub fn from_elem_in(n: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut list = Self::with_capacity_in(n, alloc);
        list.extend_with(n, value);
        list
    }

    pub fn from_slice_with_capacity_in(src: &[T], capacity: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut list = Self::with_capacity_in(capacity.max(src.len()), alloc);
        for value in src {
            // SAFETY: capacity is at least `src.len()`.
            unsafe { list.push_unchecked(value.clone()) };
        }
        list
    }

    pub fn from_values_in(
        values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>,
        alloc: A,
    ) -> Self {
        let iter = values.into_iter();
        let capacity = iter
            .len()
            .checked_mul(2)
            .unwrap_or_else(|| handle_error(Error::CapacityOverflow { requested: usize::MAX }));

        let mut list = Self::with_capacity_in(capacity, alloc);
        for value in iter {
            list.push_back(value);
        }
        list
    }

    /// Moves the contents out, leaving `self` empty and unallocated.
    ///
    /// ```
    /// use array_list::array_list;
    ///
    /// let mut source = array_list![1, 2, 3];
    /// let target = source.take();
    /// assert_eq!(target, [1, 2, 3]);
    /// assert_eq!((source.len(), source.capacity()), (0, 0));
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.allocator().clone());
        mem::replace(self, empty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Always [`MAX_SIZE`].
    pub const fn max_size(&self) -> usize {
        MAX_SIZE
    }

    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Pointer to the first slot, or null while nothing is allocated.
    pub fn as_ptr(&self) -> *const T {
        if self.capacity() == 0 {
            ptr::null()
        } else {
            self.buf.ptr()
        }
    }

    /// Mutable pointer to the first slot, or null while nothing is allocated.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.capacity() == 0 {
            ptr::null_mut()
        } else {
            self.buf.ptr()
        }
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized; the pointer is
        // dangling-but-aligned when `len == 0`.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    // ===================
    // Element access
    // ===================

    /// Returns the element at `index`, or [`Error::IndexOutOfBounds`] when
    /// `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        if index < self.len {
            // SAFETY: `index` is a live slot.
            Ok(unsafe { &*self.buf.ptr().add(index) })
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index < self.len {
            // SAFETY: `index` is a live slot.
            Ok(unsafe { &mut *self.buf.ptr().add(index) })
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    pub fn front(&self) -> Result<&T> {
        self.at(0)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.at_mut(0)
    }

    pub fn back(&self) -> Result<&T> {
        self.at(self.last_index())
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.at_mut(self.last_index())
    }

    // An empty list reports index 0 as the failed access.
    fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Iterates from the last element to the first.
    pub fn rev_iter(&self) -> Rev<slice::Iter<'_, T>> {
        self.iter().rev()
    }

    // ===================
    // Storage management
    // ===================

    /// Makes room for at least `capacity` elements, keeping the contents.
    ///
    /// Never shrinks. Fails with [`Error::CapacityOverflow`] past
    /// [`MAX_SIZE`]; on any error the list is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        if capacity > MAX_SIZE {
            tracing::debug!(requested = capacity, "reserve past maximum capacity");
            return Err(Error::CapacityOverflow {
                requested: capacity,
            });
        }
        self.grow_preserving(capacity)
    }

    /// Reallocates so that the capacity equals the length.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.shrink_to(self.len)
    }

    fn grow_preserving(&mut self, new_capacity: usize) -> Result<()> {
        self.buf.relocate(self.len, new_capacity)
    }

    /// Replaces the buffer without carrying elements over; the old ones are
    /// dropped and the list is left empty. Nothing changes if the allocation fails.
    fn grow_discarding(&mut self, new_capacity: usize) -> Result<()> {
        let block = self.buf.allocate(new_capacity)?;
        tracing::trace!(
            old_capacity = self.capacity(),
            new_capacity,
            "discarded buffer contents"
        );
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `block` holds `new_capacity` slots; the old elements are dropped below.
        let old = unsafe { self.buf.replace(block, new_capacity) };
        // A panicking destructor still unwinds through `old`, which frees the old block.
        // SAFETY: the first `len` slots of the old block were live.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(old.ptr(), len)) };
        Ok(())
    }

    fn shrink_to(&mut self, target: usize) -> Result<()> {
        if target < self.len || target == self.capacity() {
            return Ok(());
        }
        self.buf.relocate(self.len, target)
    }

    /// Capacity after one growth step: `(capacity + 1) * 2`, capped at [`MAX_SIZE`].
    fn next_capacity(&self) -> Result<usize> {
        let capacity = self.capacity();
        if capacity >= MAX_SIZE {
            return Err(Error::CapacityOverflow {
                requested: capacity.saturating_add(1),
            });
        }
        Ok((capacity + 1).saturating_mul(2).min(MAX_SIZE))
    }

    /// Capacity used when `assign` has to reallocate for `count` elements.
    fn assign_capacity(count: usize) -> Result<usize> {
        if count > MAX_SIZE {
            return Err(Error::CapacityOverflow { requested: count });
        }
        Ok(count.saturating_add(1).saturating_mul(2).min(MAX_SIZE))
    }

    /// Empties the list for an assignment of `count` elements.
    fn prepare_assign(&mut self, count: usize) -> Result<()> {
        if count > self.capacity() {
            self.grow_discarding(Self::assign_capacity(count)?)
        } else {
            self.clear();
            Ok(())
        }
    }

    /// # Safety
    ///
    /// `len < capacity` must hold.
    #[inline(always)]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: slot `len` is allocated and not live.
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    fn extend_with(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        debug_assert!(self.len + count <= self.capacity());
        if count == 0 {
            return;
        }
        for _ in 1..count {
            // SAFETY: room for `count` more elements was checked by the caller.
            unsafe { self.push_unchecked(value.clone()) };
        }
        // SAFETY: as above; the last slot takes the original.
        unsafe { self.push_unchecked(value) };
    }

    // ===================
    // Mutation
    // ===================

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// When `count` exceeds the capacity the buffer is replaced by one of
    /// `(count + 1) * 2` slots; the old contents are not copied.
    pub fn assign(&mut self, count: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        self.prepare_assign(count)?;
        self.extend_with(count, value);
        Ok(())
    }

    /// Replaces the contents with the values of an exact-size iterator.
    pub fn assign_iter(
        &mut self,
        values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>,
    ) -> Result<()> {
        let iter = values.into_iter();
        self.prepare_assign(iter.len())?;
        for value in iter {
            self.try_push_back(value)?;
        }
        Ok(())
    }

    /// Replaces the contents with clones of `values`.
    pub fn assign_slice(&mut self, values: &[T]) -> Result<()>
    where
        T: Clone,
    {
        self.assign_iter(values.iter().cloned())
    }

    /// Inserts `value` at `index`, shifting later elements one slot right.
    ///
    /// `index == len` appends. A full list grows first.
    ///
    /// ```
    /// use array_list::{Error, array_list};
    ///
    /// let mut list = array_list![1, 2, 3];
    /// list.insert(1, 9).unwrap();
    /// assert_eq!(list, [1, 9, 2, 3]);
    /// assert_eq!(list.insert(5, 0), Err(Error::InsertOutOfBounds { index: 5, len: 4 }));
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len;
        if index > len {
            return Err(Error::InsertOutOfBounds { index, len });
        }
        if len == self.capacity() {
            self.grow_preserving(self.next_capacity()?)?;
        }

        // SAFETY: `index <= len < capacity`, so shifting `[index, len)` right
        // by one stays inside the buffer.
        unsafe {
            let slot = self.buf.ptr().add(index);
            ptr::copy(slot, slot.add(1), len - index);
            slot.write(value);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len;
        if index >= len {
            return Err(Error::RemoveOutOfBounds { index, len });
        }

        // SAFETY: `index` is live; `[index + 1, len)` moves down over it.
        unsafe {
            let slot = self.buf.ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            Ok(value)
        }
    }

    /// Appends `value`, growing to `(capacity + 1) * 2` when full.
    ///
    /// Growth happens only once every slot is taken, so pushing into an empty
    /// list gives capacities 2, 2, 6, 6, 6, 6, 14, ...
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow and aborts if the allocation fails. See
    /// [`ArrayList::try_push_back`] for the fallible form.
    pub fn push_back(&mut self, value: T) {
        if let Err(err) = self.try_push_back(value) {
            handle_error(err);
        }
    }

    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity() {
            self.grow_preserving(self.next_capacity()?)?;
        }
        // SAFETY: there is at least one free slot now.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Removes the last element. Does nothing on an empty list.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside `[0, len)`.
        Some(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Drops every element. The capacity is kept.
    pub fn clear(&mut self) {
        let elems = ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len);
        // Forget the elements first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        // SAFETY: the slice covered exactly the live elements.
        unsafe { ptr::drop_in_place(elems) };
    }

    /// Exchanges buffers, lengths and allocators with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub(crate) fn into_raw_parts(self) -> (RawBuf<T, A>, usize) {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so the buffer is moved out exactly once.
        let buf = unsafe { ptr::read(&me.buf) };
        (buf, me.len)
    }
}

impl<T, A: Allocator> Drop for ArrayList<T, A> {
    fn drop(&mut self) {
        // SAFETY: exactly the live elements; `RawBuf` frees the block afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for ArrayList<T, A> {
    /// Copies the live elements into a new buffer of the same capacity.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity_in(self.capacity(), self.allocator().clone());
        for value in self.iter() {
            // SAFETY: same capacity as `self`, which holds `len` elements.
            unsafe { copy.push_unchecked(value.clone()) };
        }
        copy
    }
}

impl<T, A: Allocator + Default> Default for ArrayList<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Index<usize> for ArrayList<T, A> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => handle_error(err),
        }
    }
}

impl<T, A: Allocator> IndexMut<usize> for ArrayList<T, A> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => handle_error(err),
        }
    }
}

impl<T, U, A: Allocator, B: Allocator> PartialEq<ArrayList<U, B>> for ArrayList<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &ArrayList<U, B>) -> bool {
        if ptr::addr_eq(self as *const Self, other as *const ArrayList<U, B>) {
            return true;
        }
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: Allocator> Eq for ArrayList<T, A> {}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for ArrayList<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for ArrayList<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for ArrayList<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<Vec<U>> for ArrayList<T, A> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for ArrayList<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for ArrayList<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Extend<T> for ArrayList<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for ArrayList<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for ArrayList<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_values(values)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a ArrayList<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut ArrayList<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
