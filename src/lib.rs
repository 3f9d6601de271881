//! # Grow Array
//!
//! The `grow_array` crate provides a pair of `#[no_std]` growable arrays
//! that manage their own memory instead of leaning on `std::Vec`. The
//! interesting part is the memory model: an owning raw buffer of
//! uninitialized slots, and a live-element count tracking exactly which
//! prefix of those slots holds constructed values.
//!
//! [`GrowArr`] is the fuller container. It constructs and drops values in
//! place, one slot at a time, and every growth step is transactional: a
//! new block is filled first and committed with an O(1) exchange, so an
//! allocation failure leaves the array exactly as it was.
//!
//! [`FillArr`] is the simpler policy. Every slot within capacity holds a
//! constructed value at all times (flood-filled with `T::default()`), so
//! mutation is plain assignment. It trades the `T: Default` bound for
//! not having to track construction at all.
//!
//! Both use fallible allocations, meaning that instead of panicking on
//! allocation failure, they return an error. This allows one to handle
//! the error in a more graceful or robust manner. Both are also generic
//! over the type used for the length, capacity, and indexing operations,
//! so a `u32`-indexed array on a 64-bit system takes less space than a
//! `usize`-indexed one.
//!
//! The allocator API is not stable yet, so this crate provides an
//! alternate trait `AltAllocator` that works like the `Allocator` trait.
//!
//! # Feature Flags
//! * `std_alloc` (default) - Enables a wrapper called `Global` that
//!   implements `AltAllocator` using the standard allocator APIs. Disable
//!   it for `no_std` builds.
//! * `alloc_api2` - Enables `Api2Alloc`, an adapter for allocators
//!   implementing the `allocator-api2` crate's `Allocator` trait.

#![no_std]

#[cfg(any(feature = "std_alloc", test))]
extern crate std;

mod fill_array;
mod grow_array;
mod raw_buf;
pub mod types;

pub use fill_array::FillArr;
pub use grow_array::GrowArr;
