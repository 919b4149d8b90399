use flowroute_core::Point;

/// Straight-line (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
