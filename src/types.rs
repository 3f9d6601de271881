mod alt_alloc;
#[cfg(feature = "alloc_api2")]
mod api2_alloc;
mod errors;
mod len_type;
#[cfg(any(feature = "std_alloc", test))]
mod std_alloc;

pub use alt_alloc::AltAllocator;
#[cfg(feature = "alloc_api2")]
pub use api2_alloc::Api2Alloc;
pub use errors::*;
pub use len_type::LengthType;
#[cfg(any(feature = "std_alloc", test))]
pub use std_alloc::Global;
