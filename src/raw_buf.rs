use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;

use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::GrowArrErr;
use crate::types::GrowArrResult;
use crate::types::LengthType;

fn array_layout<T>(length: usize) -> GrowArrResult<Layout> {
    let lay = Layout::new::<T>().pad_to_align();
    let Some(size) = length.checked_mul(lay.size()) else {
        return Err(GrowArrErr::new(ErrorReason::UsizeOverflow));
    };
    let Ok(lay) = Layout::from_size_align(size, lay.align()) else {
        return Err(GrowArrErr::new(ErrorReason::LayoutFailure));
    };
    return Ok(lay);
}

/// An owned block of uninitialized storage sized for `capacity` values
/// of `T`.
///
/// The buffer hands out slot addresses and exchanges or releases whole
/// blocks; it never constructs or drops a `T`. Which slots hold live
/// values is entirely the owning container's bookkeeping.
pub(crate) struct RawBuf<T, A: AltAllocator, L: LengthType>
where
    usize: TryFrom<L>,
{
    ptr:      NonNull<T>,
    capacity: L,
    alloc:    A,
}

impl<T, A: AltAllocator, L: LengthType> RawBuf<T, A, L>
where
    usize: TryFrom<L>,
{
    const IS_ZST: bool = size_of::<T>() == 0;

    pub(crate) const fn new_in(alloc: A) -> Self {
        return Self {
            ptr:      NonNull::dangling(),
            capacity: L::ZERO_VALUE,
            alloc:    alloc,
        };
    }

    pub(crate) fn allocate_in(alloc: A, capacity: L) -> GrowArrResult<Self> {
        let Ok(cap) = usize::try_from(capacity) else {
            return Err(GrowArrErr::new(ErrorReason::UsizeOverflow));
        };
        let layout = array_layout::<T>(cap)?;

        // Don't allocate anything in this case.
        if layout.size() == 0 {
            return Ok(Self::new_in(alloc));
        }

        let Ok(block) = alloc.allocate(layout) else {
            return Err(GrowArrErr::new(ErrorReason::AllocFailure));
        };

        return Ok(Self {
            ptr:      block.cast::<T>(),
            capacity: capacity,
            alloc:    alloc,
        });
    }

    /// Total slots in the block. Zero-sized types never allocate, so the
    /// block is effectively unbounded for them.
    pub(crate) const fn capacity(&self) -> L {
        if Self::IS_ZST {
            return L::MAX_VALUE;
        }
        return self.capacity;
    }

    pub(crate) const fn as_ptr(&self) -> *mut T {
        return self.ptr.as_ptr();
    }

    pub(crate) const fn allocator(&self) -> &A {
        return &self.alloc;
    }

    /// Address of slot `i`, which may be one past the last slot. Whether
    /// the slot holds a live value is the caller's bookkeeping.
    #[inline]
    pub(crate) fn slot(&self, i: usize) -> *mut T {
        debug_assert!(Self::IS_ZST || i <= self.capacity.as_usize());
        return unsafe { self.ptr.as_ptr().add(i) };
    }

    /// O(1) exchange of the owned blocks, capacities, and allocators.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Forgets the held block and returns its bare parts. The caller
    /// becomes responsible for the memory; nothing is deallocated.
    pub(crate) fn release(&mut self) -> (NonNull<T>, L) {
        let ptr = mem::replace(&mut self.ptr, NonNull::dangling());
        let capacity = mem::replace(&mut self.capacity, L::ZERO_VALUE);
        return (ptr, capacity);
    }

    /// Swaps the block for a fresh allocation of `new_capacity` slots,
    /// relocating the first `live` slots bitwise into it. Ownership of
    /// those values moves with the bits, so nothing is dropped; the old
    /// block is then freed. On failure the buffer is untouched.
    pub(crate) fn grow_to(&mut self, new_capacity: L, live: usize) -> GrowArrResult<()> {
        if Self::IS_ZST || new_capacity <= self.capacity {
            return Ok(());
        }
        let Ok(cap) = usize::try_from(new_capacity) else {
            return Err(GrowArrErr::new(ErrorReason::UsizeOverflow));
        };
        let layout = array_layout::<T>(cap)?;
        let Ok(block) = self.alloc.allocate(layout) else {
            return Err(GrowArrErr::new(ErrorReason::AllocFailure));
        };
        let new_ptr = block.cast::<T>();

        debug_assert!(live <= self.capacity.as_usize());
        unsafe {
            core::ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), live);
        };
        self.free_block();
        self.ptr = new_ptr;
        self.capacity = new_capacity;
        return Ok(());
    }

    fn free_block(&mut self) {
        let (ptr, capacity) = self.release();
        if Self::IS_ZST || capacity == L::ZERO_VALUE {
            return;
        }
        // The block came from a successful allocation, so this layout is
        // exactly the one it was allocated with.
        let size = size_of::<T>() * capacity.as_usize();
        let layout = unsafe { Layout::from_size_align_unchecked(size, align_of::<T>()) };
        unsafe { self.alloc.deallocate(ptr.cast::<u8>(), layout) };
    }
}

impl<T, A: AltAllocator, L: LengthType> Drop for RawBuf<T, A, L>
where
    usize: TryFrom<L>,
{
    /// Releases the held block without inspecting its contents.
    fn drop(&mut self) {
        self.free_block();
    }
}

unsafe impl<T: Send, A: AltAllocator + Send, L: LengthType> Send for RawBuf<T, A, L> where
    usize: TryFrom<L>
{
}
unsafe impl<T: Sync, A: AltAllocator + Sync, L: LengthType> Sync for RawBuf<T, A, L> where
    usize: TryFrom<L>
{
}
