use ballast_alloc::Counting;
use ballast_collections::Vec;

// =============================================================================
// Vec - push/pop accounting
// =============================================================================

#[test]
fn tail_discipline_over_mixed_sequences() {
    let mut v: Vec<u32> = Vec::new();
    let mut pushes = 0usize;
    let mut pops = 0usize;

    for round in 0..10u32 {
        for i in 0..round * 3 {
            v.push(i);
            pushes += 1;
        }
        for _ in 0..round {
            if v.pop().is_some() {
                pops += 1;
            }
        }
    }

    assert_eq!(v.len(), pushes - pops);

    // Whatever survived is a prefix-order merge of the pushed runs: popping
    // everything returns elements in exact reverse of their final order.
    let mut forward: std::vec::Vec<u32> = v.iter().copied().collect();
    let mut reversed = std::vec::Vec::new();
    while let Some(value) = v.pop() {
        reversed.push(value);
    }
    forward.reverse();
    assert_eq!(forward, reversed);
}

// =============================================================================
// Vec - reserve pins the allocation
// =============================================================================

#[test]
fn no_reallocation_between_reserve_and_fill() {
    for n in [1usize, 2, 7, 64, 1000] {
        let counting: Counting = Counting::default();
        let mut v = Vec::new_in(&counting);

        v.reserve(n);
        let allocations = counting.allocations();
        let ptr = v.as_ptr();

        for i in 0..n {
            v.push(i);
        }

        assert_eq!(v.as_ptr(), ptr, "n = {n}");
        assert_eq!(counting.allocations(), allocations, "n = {n}");
    }
}

// =============================================================================
// Vec - insert/erase round trip
// =============================================================================

#[test]
fn insert_erase_round_trip_at_every_position() {
    let original: Vec<u32> = (0..8).collect();

    for index in 0..=original.len() {
        let mut v = original.clone();
        v.insert(index, 999);
        assert_eq!(v.len(), original.len() + 1);
        assert_eq!(v[index], 999);

        assert_eq!(v.remove(index), 999);
        assert_eq!(v, original, "index = {index}");
    }
}

// =============================================================================
// Vec - deep copy
// =============================================================================

#[test]
fn clone_of_nested_values_is_independent() {
    let mut original: Vec<std::vec::Vec<u8>> = Vec::new();
    original.push(vec![1, 2]);
    original.push(vec![3]);

    let mut copy = original.clone();
    copy[0].push(99);
    copy.push(vec![4]);

    assert_eq!(original[0], [1, 2]);
    assert_eq!(original.len(), 2);
}

// =============================================================================
// Vec - shrink_to_fit
// =============================================================================

#[test]
fn shrink_to_fit_after_removals() {
    let mut v: Vec<u32> = (0..32).collect();
    let spare = v.capacity();
    while v.len() > 5 {
        v.pop();
    }
    assert_eq!(v.capacity(), spare);

    v.shrink_to_fit();
    assert_eq!(v.capacity(), 5);
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);
}

// =============================================================================
// Vec - allocator balance
// =============================================================================

#[test]
fn every_block_is_returned() {
    let counting: Counting = Counting::default();
    {
        let mut v = Vec::new_in(&counting);
        for i in 0..100u64 {
            v.push(i);
        }
        v.shrink_to_fit();
        drop(v.drain(10..60));
    }
    assert_eq!(counting.live_bytes(), 0);
    assert_eq!(counting.allocations(), counting.deallocations());
}
