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

/// The simpler of the two containers: every slot within capacity holds
/// a constructed value at all times.
///
/// Fresh slots are flood-filled with `T::default()` the moment they are
/// allocated, so there is no uninitialized region and mutation works by
/// plain assignment instead of placement construction. The price is the
/// `T: Default` bound; element types without a default value need
/// [`GrowArr`](crate::GrowArr).
///
/// Slots `[len, capacity)` always hold default values: `pop`, `remove`,
/// and `truncate` re-fill the slots they vacate.
pub struct FillArr<T, A: AltAllocator, L: LengthType = usize>
where
    T: Default,
    usize: TryFrom<L>,
{
    buf: RawBuf<T, A, L>,
    len: L,
    cap: L,
}

impl<T, A: AltAllocator, L: LengthType> FillArr<T, A, L>
where
    T: Default,
    usize: TryFrom<L>,
{
    /// An empty array using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        return Self {
            buf: RawBuf::new_in(alloc),
            len: L::ZERO_VALUE,
            cap: L::ZERO_VALUE,
        };
    }

    /// An empty array with `capacity` slots, each holding a default
    /// value.
    pub fn with_capacity_in(alloc: A, capacity: L) -> GrowArrResult<Self> {
        let buf = RawBuf::allocate_in(alloc, capacity)?;
        let mut arr = Self {
            buf: buf,
            len: L::ZERO_VALUE,
            cap: L::ZERO_VALUE,
        };
        arr.fill_defaults(capacity);
        return Ok(arr);
    }

    /// An array of `len` default values.
    pub fn with_len_in(alloc: A, len: L) -> GrowArrResult<Self> {
        let mut arr = Self::with_capacity_in(alloc, len)?;
        arr.len = len;
        return Ok(arr);
    }

    /// An array of `len` slots assigned from `value`.
    pub fn filled_in(alloc: A, len: L, value: T) -> GrowArrResult<Self>
    where
        T: Clone,
    {
        let mut arr = Self::with_capacity_in(alloc, len)?;
        arr.len = len;
        for slot in arr.as_mut_slice() {
            slot.clone_from(&value);
        }
        return Ok(arr);
    }

    /// Constructs defaults into `[cap, up_to)`; cap advances with each
    /// constructed slot.
    fn fill_defaults(&mut self, up_to: L) {
        while self.cap < up_to {
            let i = self.cap.as_usize();
            unsafe { ptr::write(self.buf.slot(i), T::default()) };
            self.cap += L::ONE_VALUE;
        }
    }

    #[inline]
    pub const fn len(&self) -> L {
        return self.len;
    }

    #[inline]
    pub const fn capacity(&self) -> L {
        return self.cap;
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

    /// Checked access that reports the failure as an error value,
    /// unlike the index operator.
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
    /// slots and flood-filling the fresh ones. A no-op when the block is
    /// already large enough.
    pub fn reserve(&mut self, capacity: L) -> GrowArrResult<()> {
        if capacity <= self.cap {
            return Ok(());
        }
        self.buf.grow_to(capacity, self.cap.as_usize())?;
        self.fill_defaults(capacity);
        return Ok(());
    }

    /// Growth lands on `max(required, 2 * capacity)`.
    fn grow_to_at_least(&mut self, required: L) -> GrowArrResult<()> {
        if required <= self.cap {
            return Ok(());
        }
        let doubled = match self.cap.checked_mul(L::from(2u8)) {
            Some(doubled) => doubled,
            None => L::MAX_VALUE,
        };
        let new_cap = if doubled < required { required } else { doubled };
        self.buf.grow_to(new_cap, self.cap.as_usize())?;
        self.fill_defaults(new_cap);
        return Ok(());
    }

    /// Appends `item` by assigning it over the spare slot at the tail,
    /// returning a reference to it. Amortized O(1).
    pub fn push(&mut self, item: T) -> GrowArrResult<&mut T> {
        if self.len >= self.cap {
            let Some(required) = self.len.checked_add(L::ONE_VALUE) else {
                return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
            };
            self.grow_to_at_least(required)?;
        }
        let i = self.len.as_usize();
        unsafe { *self.buf.slot(i) = item };
        self.len += L::ONE_VALUE;
        return Ok(unsafe { &mut *self.buf.slot(i) });
    }

    /// Takes the last value, leaving a default in its slot, or `None`
    /// when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == L::ZERO_VALUE {
            return None;
        }
        self.len -= L::ONE_VALUE;
        let slot = unsafe { &mut *self.buf.slot(self.len.as_usize()) };
        return Some(mem::take(slot));
    }

    /// Places `item` at `index`, rotating `[index, len]` one slot so the
    /// spare tail slot lands at `index` to receive it. In place; no
    /// side buffer.
    ///
    /// # Panics
    /// If `index > len()`. Inserting at `len()` appends.
    pub fn insert(&mut self, index: L, item: T) -> GrowArrResult<()> {
        assert!(index <= self.len, "insert index out of bounds");
        if self.len >= self.cap {
            let Some(required) = self.len.checked_add(L::ONE_VALUE) else {
                return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
            };
            self.grow_to_at_least(required)?;
        }
        self.len += L::ONE_VALUE;
        let i = index.as_usize();
        let len = self.len.as_usize();
        let items = unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), len) };
        items[i..].rotate_right(1);
        items[i] = item;
        return Ok(());
    }

    /// Removes and returns the value at `index`, rotating the vacated
    /// slot (re-filled with a default) out past the tail.
    ///
    /// # Panics
    /// If `index >= len()`.
    pub fn remove(&mut self, index: L) -> T {
        assert!(index < self.len, "remove index out of bounds");
        let i = index.as_usize();
        let len = self.len.as_usize();
        let items = unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), len) };
        let ret = mem::take(&mut items[i]);
        items[i..].rotate_left(1);
        self.len -= L::ONE_VALUE;
        return ret;
    }

    /// Shrinks the live prefix to `new_len`, re-filling vacated slots
    /// with defaults. A no-op when `new_len` is at or past the length.
    pub fn truncate(&mut self, new_len: L) {
        while self.len > new_len {
            self.len -= L::ONE_VALUE;
            let slot = unsafe { &mut *self.buf.slot(self.len.as_usize()) };
            *slot = T::default();
        }
    }

    pub fn clear(&mut self) {
        self.truncate(L::ZERO_VALUE);
    }

    /// Grows or shrinks the live prefix to exactly `new_len`. Fresh
    /// slots hold default values.
    pub fn resize(&mut self, new_len: L) -> GrowArrResult<()> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.grow_to_at_least(new_len)?;
        // Slots in [len, new_len) already hold defaults.
        self.len = new_len;
        return Ok(());
    }

    /// O(1) exchange of the full state of two arrays.
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.cap, &mut other.cap);
    }

    /// A deep copy with capacity exactly `len()`.
    pub fn try_clone(&self) -> GrowArrResult<Self>
    where
        T: Clone,
        A: Clone,
    {
        let alloc = self.buf.allocator().clone();
        let mut copy = Self::with_capacity_in(alloc, self.len)?;
        copy.len = self.len;
        for (dst, src) in copy.as_mut_slice().iter_mut().zip(self.as_slice()) {
            dst.clone_from(src);
        }
        return Ok(copy);
    }

    /// Clones `other`'s contents into `self` by building the copy fully
    /// and committing it by exchange; failure leaves `self` unmodified.
    pub fn try_clone_from(&mut self, other: &Self) -> GrowArrResult<()>
    where
        T: Clone,
        A: Clone,
    {
        let copy = other.try_clone()?;
        *self = copy;
        return Ok(());
    }
}

#[cfg(any(feature = "std_alloc", test))]
impl<T, L: LengthType> FillArr<T, Global, L>
where
    T: Default,
    usize: TryFrom<L>,
{
    /// An empty array using the global allocator. Does not allocate.
    pub const fn new() -> Self {
        return Self::new_in(Global);
    }

    pub fn with_capacity(capacity: L) -> GrowArrResult<Self> {
        return Self::with_capacity_in(Global, capacity);
    }

    pub fn with_len(len: L) -> GrowArrResult<Self> {
        return Self::with_len_in(Global, len);
    }

    pub fn filled(len: L, value: T) -> GrowArrResult<Self>
    where
        T: Clone,
    {
        return Self::filled_in(Global, len, value);
    }
}

impl<T, A: AltAllocator, L: LengthType> Drop for FillArr<T, A, L>
where
    T: Default,
    usize: TryFrom<L>,
{
    /// Every slot within capacity is live; drop them all, then the
    /// buffer releases the block.
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.cap.as_usize());
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T, A: AltAllocator + Default, L: LengthType> Default for FillArr<T, A, L>
where
    T: Default,
    usize: TryFrom<L>,
{
    fn default() -> Self {
        return Self::new_in(A::default());
    }
}

impl<T, A: AltAllocator, L: LengthType> ops::Index<L> for FillArr<T, A, L>
where
    T: Default,
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

impl<T, A: AltAllocator, L: LengthType> ops::IndexMut<L> for FillArr<T, A, L>
where
    T: Default,
    usize: TryFrom<L>,
{
    fn index_mut(&mut self, index: L) -> &mut T {
        let Some(item) = self.get_mut(index) else {
            panic!("index out of bounds");
        };
        return item;
    }
}

impl<T, A: AltAllocator, L: LengthType> fmt::Debug for FillArr<T, A, L>
where
    T: Default + fmt::Debug,
    usize: TryFrom<L>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.as_slice()).finish();
    }
}
