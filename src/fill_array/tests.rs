use core::alloc::Layout;
use core::ptr::NonNull;

use super::FillArr;
use crate::types::AllocError;
use crate::types::AltAllocator;
use crate::types::ErrorReason;

struct NoAlloc;

unsafe impl AltAllocator for NoAlloc {
    fn allocate(&self, _: Layout) -> Result<NonNull<[u8]>, AllocError> {
        return Err(AllocError);
    }
    unsafe fn deallocate(&self, _: NonNull<u8>, _: Layout) {
        return;
    }
}

#[test]
fn array_new() {
    let arr = FillArr::<u32, NoAlloc>::new_in(NoAlloc);
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), 0);
    assert!(arr.is_empty());
}

#[test]
fn push_fail() {
    let mut arr = FillArr::<u32, NoAlloc>::new_in(NoAlloc);
    let ret = arr.push(0);
    assert!(ret.is_err());
    if let Err(e) = ret {
        assert_eq!(e.reason(), ErrorReason::AllocFailure)
    }
    assert_eq!(arr.len(), 0);
}

#[test]
fn zero_capacity_needs_no_allocation() {
    let arr = FillArr::<u32, NoAlloc>::with_capacity_in(NoAlloc, 0).unwrap();
    assert_eq!(arr.capacity(), 0);
}

#[cfg(feature = "std_alloc")]
mod std_alloc {
    use core::cell::Cell;

    use super::*;
    use crate::types::Global;

    #[test]
    fn with_capacity_fills_slots() {
        let mut arr = FillArr::<u32, Global>::with_capacity(4).unwrap();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 4);

        // Appends up to capacity reuse the pre-filled slots.
        for i in 0..4 {
            arr.push(i).unwrap();
        }
        assert_eq!(arr.capacity(), 4);
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn with_len_defaults() {
        let mut arr = FillArr::<i32, Global>::with_len(3).unwrap();
        assert_eq!(arr.as_slice(), &[0, 0, 0]);

        arr.resize(1).unwrap();
        assert_eq!(arr.as_slice(), &[0]);
        assert!(arr.capacity() >= 3);
    }

    #[test]
    fn filled_assigns_value() {
        let arr = FillArr::<u8, Global>::filled(5, 7).unwrap();
        assert_eq!(arr.as_slice(), &[7, 7, 7, 7, 7]);
        assert_eq!(arr.capacity(), 5);
    }

    #[test]
    fn push_pop() {
        let mut arr = FillArr::<u8, Global>::new();
        arr.push(1).unwrap();
        arr.push(2).unwrap();
        arr.push(3).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);

        assert_eq!(arr.pop(), Some(3));
        assert_eq!(arr.pop(), Some(2));
        assert_eq!(arr.len(), 1);

        arr[0] = 9;
        assert_eq!(arr.pop(), Some(9));
        assert!(arr.pop().is_none());
    }

    #[test]
    fn growth_is_doubled_or_requested() {
        let mut arr = FillArr::<u32, Global>::with_capacity(3).unwrap();
        for i in 0..3 {
            arr.push(i).unwrap();
        }
        assert_eq!(arr.capacity(), 3);

        // One past capacity doubles.
        arr.push(3).unwrap();
        assert_eq!(arr.capacity(), 6);

        // A request far past double lands exactly on the request.
        arr.resize(40).unwrap();
        assert_eq!(arr.capacity(), 40);
        assert_eq!(arr.len(), 40);
        assert_eq!(arr[39], 0);
    }

    #[test]
    fn reserve_is_exact_and_idempotent() {
        let mut arr = FillArr::<u8, Global>::new();
        arr.reserve(50).unwrap();
        assert_eq!(arr.capacity(), 50);

        arr.reserve(50).unwrap();
        arr.reserve(10).unwrap();
        assert_eq!(arr.capacity(), 50);
        assert_eq!(arr.len(), 0);
    }

    #[test]
    fn insert_and_remove() {
        let mut arr = FillArr::<i32, Global>::new();
        for v in [1, 2, 3, 4] {
            arr.push(v).unwrap();
        }

        let removed = arr.remove(1);
        assert_eq!(removed, 2);
        assert_eq!(arr.as_slice(), &[1, 3, 4]);

        arr.insert(1, 2).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4]);

        arr.insert(4, 5).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4, 5]);

        arr.insert(0, 0).unwrap();
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn checked_access() {
        let mut arr = FillArr::<i32, Global>::new();
        assert!(arr.get(0).is_none());

        let err = arr.at(0);
        assert!(err.is_err());
        if let Err(e) = err {
            assert_eq!(e.reason(), ErrorReason::IndexOutOfBounds);
        }

        arr.push(5).unwrap();
        assert_eq!(arr.at(0).unwrap(), &5);
        *arr.at_mut(0).unwrap() = 6;
        assert_eq!(arr[0], 6);

        // Slots between len and capacity exist but are not readable.
        arr.reserve(8).unwrap();
        assert!(arr.get(1).is_none());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end_panics() {
        let arr = FillArr::<i32, Global>::new();
        let _ = arr[0];
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut arr = FillArr::<u8, Global>::filled(6, 1).unwrap();
        arr.clear();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 6);
    }

    #[test]
    fn try_clone_is_deep() {
        let mut arr = FillArr::<i32, Global>::new();
        for v in [1, 2, 3] {
            arr.push(v).unwrap();
        }

        let mut copy = arr.try_clone().unwrap();
        assert_eq!(copy.as_slice(), arr.as_slice());
        assert_eq!(copy.capacity(), 3);

        copy[0] = 99;
        copy.push(4).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
        assert_eq!(copy.as_slice(), &[99, 2, 3, 4]);
    }

    #[test]
    fn clone_from_replaces_state() {
        let mut a = FillArr::<i32, Global>::filled(4, 9).unwrap();
        let mut b = FillArr::<i32, Global>::new();
        b.push(1).unwrap();
        b.push(2).unwrap();

        a.try_clone_from(&b).unwrap();
        assert_eq!(a.as_slice(), &[1, 2]);

        // The copy is independent of its source.
        b[0] = 5;
        assert_eq!(a.as_slice(), &[1, 2]);
    }

    #[test]
    fn swap_exchanges_state() {
        let mut a = FillArr::<i32, Global>::new();
        a.push(1).unwrap();

        let mut b = FillArr::<i32, Global>::with_capacity(5).unwrap();
        b.push(9).unwrap();
        b.push(8).unwrap();

        a.swap(&mut b);
        assert_eq!(a.as_slice(), &[9, 8]);
        assert_eq!(a.capacity(), 5);
        assert_eq!(b.as_slice(), &[1]);
    }

    #[test]
    fn zst_values() {
        let mut arr = FillArr::<(), Global>::new();
        arr.push(()).unwrap();
        arr.push(()).unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.pop(), Some(()));
        assert_eq!(arr.len(), 1);
    }

    #[derive(Default)]
    struct Tally<'a>(Option<&'a Cell<usize>>);

    impl Drop for Tally<'_> {
        fn drop(&mut self) {
            if let Some(count) = self.0 {
                count.set(count.get() + 1);
            }
        }
    }

    #[test]
    fn values_dropped_once() {
        let drops = Cell::new(0);
        let mut arr = FillArr::<Tally, Global>::with_capacity(4).unwrap();
        for _ in 0..3 {
            arr.push(Tally(Some(&drops))).unwrap();
        }

        drop(arr.remove(1));
        assert_eq!(drops.get(), 1);

        arr.truncate(1);
        assert_eq!(drops.get(), 2);

        drop(arr);
        assert_eq!(drops.get(), 3);
    }

    mod props {
        use proptest::prelude::*;
        use std::vec::Vec;

        use super::*;

        proptest! {
            #[test]
            fn insert_remove_match_model(
                seed in proptest::collection::vec(0i32..1000, 0..24),
                index in 0usize..24,
                value in 0i32..1000,
            ) {
                let mut arr = FillArr::<i32, Global>::new();
                let mut model: Vec<i32> = Vec::new();
                for v in &seed {
                    arr.push(*v).unwrap();
                    model.push(*v);
                }

                let at = index % (model.len() + 1);
                arr.insert(at, value).unwrap();
                model.insert(at, value);
                prop_assert_eq!(arr.as_slice(), model.as_slice());

                let removed = arr.remove(at);
                let expected = model.remove(at);
                prop_assert_eq!(removed, expected);
                prop_assert_eq!(arr.as_slice(), model.as_slice());
            }
        }
    }
}
