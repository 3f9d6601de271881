use core::fmt;
use core::mem;
use core::ops;
use core::ptr;
use core::slice;

use crate::raw_buf::RawBuf;
use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::GrowArrErr;
use crate::types::GrowArrResult;
use crate::types::LengthType;
#[cfg(any(feature = "std_alloc", test))]
use crate::types::Global;

/// A growable, contiguous array over raw storage.
///
/// Slots `[0, len)` hold live values; slots `[len, capacity)` are
/// uninitialized memory that is never read, assigned through, or
/// dropped. Every operation that can allocate is fallible and returns
/// a [`GrowArrResult`] instead of panicking.
///
/// Growth is transactional: a new block is filled first and committed
/// with an O(1) exchange, so a failed allocation leaves the container
/// exactly as it was. Any reallocation invalidates raw pointers
/// previously derived from the container; the borrow checker enforces
/// this for safe callers.
pub struct GrowArr<T, A: AltAllocator, L: LengthType = usize>
where
    usize: TryFrom<L>,
{
    buf: RawBuf<T, A, L>,
    len: L,
}

impl<T, A: AltAllocator, L: LengthType> GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    /// An empty array using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        return Self {
            buf: RawBuf::new_in(alloc),
            len: L::ZERO_VALUE,
        };
    }

    /// An empty array with room for `capacity` values.
    pub fn with_capacity_in(alloc: A, capacity: L) -> GrowArrResult<Self> {
        let buf = RawBuf::allocate_in(alloc, capacity)?;
        return Ok(Self {
            buf: buf,
            len: L::ZERO_VALUE,
        });
    }

    /// An array of `len` default values.
    ///
    /// Nothing is retained on failure: values constructed before the
    /// error are dropped and the block is freed.
    pub fn with_len_in(alloc: A, len: L) -> GrowArrResult<Self>
    where
        T: Default,
    {
        let mut arr = Self::with_capacity_in(alloc, len)?;
        arr.resize(len)?;
        return Ok(arr);
    }

    /// An array of `len` clones of `value`.
    pub fn filled_in(alloc: A, len: L, value: T) -> GrowArrResult<Self>
    where
        T: Clone,
    {
        let mut arr = Self::with_capacity_in(alloc, len)?;
        while arr.len < len {
            arr.push(value.clone())?;
        }
        return Ok(arr);
    }

    #[inline]
    pub const fn len(&self) -> L {
        return self.len;
    }

    pub const fn capacity(&self) -> L {
        return self.buf.capacity();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == L::ZERO_VALUE;
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len.as_usize()) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len.as_usize()) }
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        return self.buf.as_ptr();
    }

    #[inline]
    pub const fn as_mut_ptr(&self) -> *mut T {
        return self.buf.as_ptr();
    }

    /// Checked access; `None` when `index` is at or past the end.
    pub fn get(&self, index: L) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        return Some(unsafe { &*self.buf.slot(index.as_usize()) });
    }

    pub fn get_mut(&mut self, index: L) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        return Some(unsafe { &mut *self.buf.slot(index.as_usize()) });
    }

    /// Checked access that reports the failure as an error value.
    pub fn at(&self, index: L) -> GrowArrResult<&T> {
        let Some(item) = self.get(index) else {
            return Err(GrowArrErr::new(ErrorReason::IndexOutOfBounds));
        };
        return Ok(item);
    }

    pub fn at_mut(&mut self, index: L) -> GrowArrResult<&mut T> {
        let Some(item) = self.get_mut(index) else {
            return Err(GrowArrErr::new(ErrorReason::IndexOutOfBounds));
        };
        return Ok(item);
    }

    /// Unchecked access.
    ///
    /// # Safety
    /// `index` must be less than `len()`. Checked in debug builds only.
    pub unsafe fn get_unchecked(&self, index: L) -> &T {
        debug_assert!(index < self.len);
        return unsafe { &*self.buf.slot(index.as_usize()) };
    }

    /// Unchecked access.
    ///
    /// # Safety
    /// `index` must be less than `len()`. Checked in debug builds only.
    pub unsafe fn get_unchecked_mut(&mut self, index: L) -> &mut T {
        debug_assert!(index < self.len);
        return unsafe { &mut *self.buf.slot(index.as_usize()) };
    }

    /// Makes `capacity() >= capacity`, allocating exactly that many
    /// slots. A no-op when the block is already large enough, so calling
    /// it twice with the same argument never reallocates.
    pub fn reserve(&mut self, capacity: L) -> GrowArrResult<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        return self.buf.grow_to(capacity, self.len.as_usize());
    }

    /// Doubling growth, with a floor of one slot; `required` only wins
    /// when it outruns the doubled capacity.
    fn grow_amortized(&mut self, required: L) -> GrowArrResult<()> {
        if required <= self.capacity() {
            return Ok(());
        }
        let cap = self.buf.capacity();
        let doubled = if cap == L::ZERO_VALUE {
            L::ONE_VALUE
        } else {
            match cap.checked_mul(L::from(2u8)) {
                Some(doubled) => doubled,
                None => L::MAX_VALUE,
            }
        };
        let new_cap = if doubled < required { required } else { doubled };
        return self.buf.grow_to(new_cap, self.len.as_usize());
    }

    /// Appends `item`, returning a reference to its new slot. Amortized
    /// O(1); grows by doubling when full.
    pub fn push(&mut self, item: T) -> GrowArrResult<&mut T> {
        if self.len >= self.capacity() {
            let Some(required) = self.len.checked_add(L::ONE_VALUE) else {
                return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
            };
            self.grow_amortized(required)?;
        }
        let i = self.len.as_usize();
        unsafe { ptr::write(self.buf.slot(i), item) };
        self.len += L::ONE_VALUE;
        return Ok(unsafe { &mut *self.buf.slot(i) });
    }

    /// Moves the last value out, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == L::ZERO_VALUE {
            return None;
        }
        self.len -= L::ONE_VALUE;
        let ret = unsafe { ptr::read(self.buf.slot(self.len.as_usize())) };
        return Some(ret);
    }

    /// Places `item` at `index`, shifting `[index, len)` one slot toward
    /// the tail. The shift is a single overlap-safe memory move.
    ///
    /// # Panics
    /// If `index > len()`. Inserting at `len()` appends.
    pub fn insert(&mut self, index: L, item: T) -> GrowArrResult<()> {
        assert!(index <= self.len, "insert index out of bounds");
        if self.len >= self.capacity() {
            let Some(required) = self.len.checked_add(L::ONE_VALUE) else {
                return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
            };
            self.grow_amortized(required)?;
        }
        let i = index.as_usize();
        let len = self.len.as_usize();
        unsafe {
            let base = self.buf.slot(i);
            ptr::copy(base, base.add(1), len - i);
            ptr::write(base, item);
        }
        self.len += L::ONE_VALUE;
        return Ok(());
    }

    /// Removes and returns the value at `index`, shifting `(index, len)`
    /// one slot toward the head.
    ///
    /// # Panics
    /// If `index >= len()`.
    pub fn remove(&mut self, index: L) -> T {
        assert!(index < self.len, "remove index out of bounds");
        let i = index.as_usize();
        let len = self.len.as_usize();
        let ret = unsafe {
            let base = self.buf.slot(i);
            let ret = ptr::read(base);
            ptr::copy(base.add(1), base, len - i - 1);
            ret
        };
        self.len -= L::ONE_VALUE;
        return ret;
    }

    /// Drops the tail `[new_len, len)` in place. A no-op when `new_len`
    /// is at or past the current length.
    pub fn truncate(&mut self, new_len: L) {
        // One slot at a time; len is already down before each drop runs.
        while self.len > new_len {
            self.len -= L::ONE_VALUE;
            unsafe { ptr::drop_in_place(self.buf.slot(self.len.as_usize())) };
        }
    }

    pub fn clear(&mut self) {
        self.truncate(L::ZERO_VALUE);
    }

    /// Grows or shrinks the live prefix to exactly `new_len`, dropping
    /// the excess or default-constructing the gap in place.
    pub fn resize(&mut self, new_len: L) -> GrowArrResult<()>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.grow_amortized(new_len)?;
        // len advances with each constructed slot.
        while self.len < new_len {
            let i = self.len.as_usize();
            unsafe { ptr::write(self.buf.slot(i), T::default()) };
            self.len += L::ONE_VALUE;
        }
        return Ok(());
    }

    /// O(1) exchange of the full state of two arrays.
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// A deep copy with capacity exactly `len()`. The strong guarantee
    /// holds: on failure nothing is leaked and `self` is untouched.
    pub fn try_clone(&self) -> GrowArrResult<Self>
    where
        T: Clone,
        A: Clone,
    {
        let alloc = self.buf.allocator().clone();
        let mut copy = Self::with_capacity_in(alloc, self.len)?;
        for item in self.as_slice() {
            // Capacity was reserved up front; these appends cannot fail
            // or reallocate.
            copy.push(item.clone())?;
        }
        return Ok(copy);
    }

    /// Clones `other`'s contents into `self`, reusing the live prefix
    /// and the existing block when they are large enough.
    ///
    /// When `other` outsizes the block, a full copy is built first and
    /// committed by exchange, so failure leaves `self` unmodified.
    pub fn try_clone_from(&mut self, other: &Self) -> GrowArrResult<()>
    where
        T: Clone,
        A: Clone,
    {
        if other.len > self.capacity() {
            let copy = other.try_clone()?;
            *self = copy;
            return Ok(());
        }
        // Assign over the shared prefix.
        for (dst, src) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            dst.clone_from(src);
        }
        if other.len < self.len {
            self.truncate(other.len);
            return Ok(());
        }
        // Construct the remainder into uninitialized slots.
        while self.len < other.len {
            let i = self.len.as_usize();
            unsafe { ptr::write(self.buf.slot(i), other.as_slice()[i].clone()) };
            self.len += L::ONE_VALUE;
        }
        return Ok(());
    }
}

#[cfg(any(feature = "std_alloc", test))]
impl<T, L: LengthType> GrowArr<T, Global, L>
where
    usize: TryFrom<L>,
{
    /// An empty array using the global allocator. Does not allocate.
    pub const fn new() -> Self {
        return Self::new_in(Global);
    }

    pub fn with_capacity(capacity: L) -> GrowArrResult<Self> {
        return Self::with_capacity_in(Global, capacity);
    }

    pub fn with_len(len: L) -> GrowArrResult<Self>
    where
        T: Default,
    {
        return Self::with_len_in(Global, len);
    }

    pub fn filled(len: L, value: T) -> GrowArrResult<Self>
    where
        T: Clone,
    {
        return Self::filled_in(Global, len, value);
    }
}

impl<T, A: AltAllocator, L: LengthType> Drop for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    /// Drops the live prefix; the buffer then releases the block.
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len.as_usize());
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T, A: AltAllocator + Default, L: LengthType> Default for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    fn default() -> Self {
        return Self::new_in(A::default());
    }
}

impl<T, A: AltAllocator, L: LengthType> ops::Index<L> for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    type Output = T;

    fn index(&self, index: L) -> &T {
        let Some(item) = self.get(index) else {
            panic!("index out of bounds");
        };
        return item;
    }
}

impl<T, A: AltAllocator, L: LengthType> ops::IndexMut<L> for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    fn index_mut(&mut self, index: L) -> &mut T {
        let Some(item) = self.get_mut(index) else {
            panic!("index out of bounds");
        };
        return item;
    }
}

impl<T: fmt::Debug, A: AltAllocator, L: LengthType> fmt::Debug for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.as_slice()).finish();
    }
}
