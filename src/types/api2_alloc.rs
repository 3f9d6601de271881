use core::alloc::Layout;
use core::ptr::NonNull;

use allocator_api2::alloc::Allocator as Alloc2;

use crate::types::AllocError;
use crate::types::AltAllocator;

/// Adapter that lets any `allocator_api2` allocator back the containers.
#[derive(Debug, Copy, Clone, Default)]
pub struct Api2Alloc<A: Alloc2>(pub A);

unsafe impl<A: Alloc2> AltAllocator for Api2Alloc<A> {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let Ok(mem) = self.0.allocate(layout) else {
            return Err(AllocError);
        };
        return Ok(mem);
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.0.deallocate(ptr, layout) };
    }
}
