use std::cmp::Ordering;

use super::shape::Shape;

/// Farther shapes (lower depth proxy) sort first; ties fall back to the
/// shape index so the order never depends on where sorting started.
pub fn compare_depth(shapes: &[Shape], a: usize, b: usize) -> Ordering {
    shapes[a]
        .depth()
        .total_cmp(&shapes[b].depth())
        .then(a.cmp(&b))
}

/// Re-sort `order` back to front.
pub fn sort_back_to_front(shapes: &[Shape], order: &mut [usize]) {
    order.sort_by(|&a, &b| compare_depth(shapes, a, b));
}
