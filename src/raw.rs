//! Buffer ownership for [`ArrayList`](crate::ArrayList).
//!
//! `RawBuf` knows the pointer, the capacity and the allocator, but nothing
//! about which slots are live. Callers pass the live length when elements
//! have to be carried over to a new block.

use core::{
    alloc::Layout,
    mem,
    ptr::{self, NonNull},
};

use allocator_api2::alloc::Allocator;

use crate::{Error, MAX_SIZE, Result};

pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

impl<T, A: Allocator> RawBuf<T, A> {
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
        }
    }

    pub(crate) fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self> {
        let mut buf = Self::new_in(alloc);
        if cap > 0 {
            buf.ptr = buf.allocate(cap)?;
            buf.cap = cap;
        }
        Ok(buf)
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    fn layout(cap: usize) -> Result<Layout> {
        if cap > MAX_SIZE {
            return Err(Error::CapacityOverflow { requested: cap });
        }
        Layout::array::<T>(cap).map_err(|_| Error::CapacityOverflow { requested: cap })
    }

    /// Obtains a block of `cap` slots. The current block is not touched.
    ///
    /// Zero-sized requests never reach the allocator.
    pub(crate) fn allocate(&self, cap: usize) -> Result<NonNull<T>> {
        let layout = Self::layout(cap)
            .inspect_err(|err| tracing::debug!(error = %err, "rejected capacity request"))?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        match self.alloc.allocate(layout) {
            Ok(block) => {
                tracing::trace!(capacity = cap, bytes = layout.size(), "allocated buffer");
                Ok(block.cast())
            }
            Err(_) => {
                tracing::debug!(capacity = cap, bytes = layout.size(), "allocation failed");
                Err(Error::AllocFailed { layout })
            }
        }
    }

    /// # Safety
    ///
    /// `ptr` must come from [`RawBuf::allocate`] on this buffer with the same `cap`.
    unsafe fn deallocate(&self, ptr: NonNull<T>, cap: usize) {
        let Ok(layout) = Self::layout(cap) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: the block was allocated by `self.alloc` with this layout.
            unsafe { self.alloc.deallocate(ptr.cast(), layout) };
        }
    }

    /// Moves the first `len` slots into a new block of `new_cap` slots and
    /// frees the old block. On error the buffer is left as it was.
    pub(crate) fn relocate(&mut self, len: usize, new_cap: usize) -> Result<()> {
        debug_assert!(len <= self.cap && len <= new_cap);

        let new_ptr = self.allocate(new_cap)?;
        // SAFETY: both blocks hold at least `len` slots and are distinct.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
        }
        tracing::trace!(
            old_capacity = self.cap,
            new_capacity = new_cap,
            len,
            "relocated buffer"
        );

        // SAFETY: the live slots were copied out above.
        unsafe { self.install(new_ptr, new_cap) };
        Ok(())
    }

    /// Swaps in a block obtained from [`RawBuf::allocate`] and frees the old one.
    ///
    /// # Safety
    ///
    /// No live element may remain in the old block, and `ptr` must hold `cap` slots.
    pub(crate) unsafe fn install(&mut self, ptr: NonNull<T>, cap: usize) {
        // SAFETY: forwarded; the retired block is freed right away.
        drop(unsafe { self.replace(ptr, cap) });
    }

    /// Swaps in a block obtained from [`RawBuf::allocate`] and hands back the
    /// old one. The old block is freed when the returned guard is dropped,
    /// which also happens while unwinding.
    ///
    /// # Safety
    ///
    /// `ptr` must hold `cap` slots. Elements still live in the old block must
    /// be dropped or moved out before the guard goes away.
    pub(crate) unsafe fn replace(&mut self, ptr: NonNull<T>, cap: usize) -> Retired<'_, T, A> {
        let old_ptr = mem::replace(&mut self.ptr, ptr);
        let old_cap = mem::replace(&mut self.cap, cap);
        Retired {
            buf: self,
            ptr: old_ptr,
            cap: old_cap,
        }
    }
}

/// A block taken out of a [`RawBuf`], deallocated on drop.
pub(crate) struct Retired<'a, T, A: Allocator> {
    buf: &'a RawBuf<T, A>,
    ptr: NonNull<T>,
    cap: usize,
}

impl<T, A: Allocator> Retired<'_, T, A> {
    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T, A: Allocator> Drop for Retired<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: the block came from `buf.alloc` with `cap` slots.
        unsafe { self.buf.deallocate(self.ptr, self.cap) };
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        if self.cap > 0 {
            tracing::trace!(capacity = self.cap, "released buffer");
        }
        // SAFETY: `ptr` and `cap` always describe the current block.
        unsafe { self.deallocate(self.ptr, self.cap) };
    }
}
