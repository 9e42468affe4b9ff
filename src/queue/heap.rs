//! Binary heap primitives with an explicit ordering predicate.
//!
//! The raster queue's heap key is each pair's current top tile, which
//! changes whenever the pair advances, and the ordering itself depends on
//! the tree priority chosen at build time. `std::collections::BinaryHeap`
//! wants a fixed `Ord` implementation, so the queue uses these sift
//! operations instead and follows the extract-mutate-reinsert discipline:
//! pop the root off the heap, advance it, push it back.
//!
//! `lower` is a strict-weak-order "lower priority than" predicate. The
//! resulting heap is a max-heap: the root is not lower than any element.

/// Rearranges `items` into a max-heap under `lower`. O(n).
pub(crate) fn make_heap<T, F>(items: &mut [T], lower: F)
where
    F: Fn(&T, &T) -> bool,
{
    for root in (0..items.len() / 2).rev() {
        sift_down(items, root, &lower);
    }
}

/// Restores the heap after appending one element at the end.
pub(crate) fn push_heap<T, F>(items: &mut [T], lower: F)
where
    F: Fn(&T, &T) -> bool,
{
    if let Some(last) = items.len().checked_sub(1) {
        sift_up(items, last, &lower);
    }
}

/// Moves the root to the last position and restores the heap over the
/// remaining prefix. The displaced root stays in the slice for the caller
/// to mutate and push back.
pub(crate) fn pop_heap<T, F>(items: &mut [T], lower: F)
where
    F: Fn(&T, &T) -> bool,
{
    let len = items.len();
    if len <= 1 {
        return;
    }
    items.swap(0, len - 1);
    sift_down(&mut items[..len - 1], 0, &lower);
}

/// True when `items` satisfies the max-heap property under `lower`.
pub(crate) fn is_heap<T, F>(items: &[T], lower: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    (1..items.len()).all(|child| !lower(&items[(child - 1) / 2], &items[child]))
}

fn sift_down<T, F>(items: &mut [T], mut root: usize, lower: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let len = items.len();
    loop {
        let left = 2 * root + 1;
        if left >= len {
            return;
        }
        let right = left + 1;
        let mut child = left;
        if right < len && lower(&items[left], &items[right]) {
            child = right;
        }
        if !lower(&items[root], &items[child]) {
            return;
        }
        items.swap(root, child);
        root = child;
    }
}

fn sift_up<T, F>(items: &mut [T], mut pos: usize, lower: &F)
where
    F: Fn(&T, &T) -> bool,
{
    while pos > 0 {
        let parent = (pos - 1) / 2;
        if !lower(&items[parent], &items[pos]) {
            return;
        }
        items.swap(parent, pos);
        pos = parent;
    }
}
