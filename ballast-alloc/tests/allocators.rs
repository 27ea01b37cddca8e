use ballast_alloc::{AllocError, Allocator, Arena, Counting, Global};
use std::alloc::Layout;

// =============================================================================
// Trait surface - every allocator through a generic caller
// =============================================================================

fn round_trip<A: Allocator>(alloc: &A) {
    let layout = Layout::array::<u64>(16).unwrap();
    let block = alloc.allocate(layout).unwrap();
    assert_eq!(block.as_ptr() as usize % layout.align(), 0);

    unsafe {
        let ptr = block.cast::<u64>().as_ptr();
        for i in 0..16 {
            ptr.add(i).write(i as u64);
        }
        for i in 0..16 {
            assert_eq!(ptr.add(i).read(), i as u64);
        }
        alloc.deallocate(block, layout);
    }
}

#[test]
fn all_allocators_satisfy_the_contract() {
    round_trip(&Global);
    round_trip(&Arena::with_capacity(1024));
    round_trip(&Counting::new(Global));
    round_trip(&Counting::new(Arena::with_capacity(1024)));
}

// =============================================================================
// Arena - exhaustion and reuse
// =============================================================================

#[test]
fn arena_fills_then_recovers_after_reset() {
    let arena = Arena::with_capacity(128);
    let layout = Layout::array::<u8>(64).unwrap();

    arena.allocate(layout).unwrap();
    arena.allocate(layout).unwrap();

    match arena.allocate(layout) {
        Err(AllocError::Exhausted {
            requested,
            remaining,
        }) => {
            assert_eq!(requested, 64);
            assert_eq!(remaining, 0);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }

    // SAFETY: the blocks above are not used again.
    unsafe { arena.reset() };
    arena.allocate(layout).unwrap();
}

// =============================================================================
// Counting - wrapping a borrowed arena
// =============================================================================

#[test]
fn counting_delegates_to_the_wrapped_allocator() {
    let arena = Arena::with_capacity(256);
    let counting = Counting::new(&arena);

    let layout = Layout::new::<u64>();
    let block = counting.allocate(layout).unwrap();
    let used = arena.used();
    assert!(used >= 8);
    assert_eq!(counting.live_bytes(), 8);

    unsafe { counting.deallocate(block, layout) };
    // The arena never reclaims; the counter still balances.
    assert_eq!(counting.live_bytes(), 0);
    assert_eq!(arena.used(), used);
}
