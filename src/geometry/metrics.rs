//! Point arithmetic used by face and edge queries.
//!
//! Positions are plain `[f64; 3]`. These helpers are deliberately tiny:
//! the kernel is a topology layer and only needs averages and an area
//! vector. Degenerate inputs report `None` instead of producing NaN.

const EPS: f64 = 1e-12;

/// Arithmetic mean of `points`, or `None` if the sequence is empty.
pub fn centroid<I>(points: I) -> Option<[f64; 3]>
where
    I: IntoIterator<Item = [f64; 3]>,
{
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        sum = add(sum, p);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(scale(sum, 1.0 / count as f64))
}

/// Midpoint of the segment `a`-`b`.
pub fn midpoint(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    scale(add(a, b), 0.5)
}

/// Area vector of a (possibly non-planar) polygon by Newell's method.
///
/// The magnitude is twice the projected area; the direction follows the
/// right-hand rule over the vertex order.
pub fn newell_area_vector(points: &[[f64; 3]]) -> [f64; 3] {
    let n = points.len();
    let mut acc = [0.0; 3];
    for i in 0..n {
        let cur = points[i];
        let nxt = points[(i + 1) % n];
        acc[0] += (cur[1] - nxt[1]) * (cur[2] + nxt[2]);
        acc[1] += (cur[2] - nxt[2]) * (cur[0] + nxt[0]);
        acc[2] += (cur[0] - nxt[0]) * (cur[1] + nxt[1]);
    }
    acc
}

/// Unit normal of a polygon, or `None` when its area vanishes.
pub fn polygon_normal(points: &[[f64; 3]]) -> Option<[f64; 3]> {
    let v = newell_area_vector(points);
    let len = norm(v);
    if len <= EPS {
        return None;
    }
    Some(scale(v, 1.0 / len))
}

/// Polygon area (half the Newell area-vector length).
pub fn polygon_area(points: &[[f64; 3]]) -> f64 {
    0.5 * norm(newell_area_vector(points))
}

/// Euclidean distance between two points.
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(sub(a, b))
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f64; 3], b: [f64; 3]) -> bool {
        distance(a, b) < 1e-12
    }

    #[test]
    fn centroid_of_unit_square() {
        let sq = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        assert!(approx(centroid(sq).unwrap(), [0.5, 0.5, 0.0]));
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn midpoint_is_halfway() {
        assert!(approx(midpoint([0.0, 0.0, 0.0], [2.0, 4.0, -6.0]), [1.0, 2.0, -3.0]));
    }

    #[test]
    fn ccw_square_normal_points_up() {
        let sq = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        assert!(approx(polygon_normal(&sq).unwrap(), [0.0, 0.0, 1.0]));
        assert!((polygon_area(&sq) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_polygon_has_no_normal() {
        let line = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        assert!(polygon_normal(&line).is_none());
    }
}
