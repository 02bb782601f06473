//! Piecewise Bézier reconstruction of Graphviz edge splines.
//!
//! Graphviz stores an edge as a chain of cubic Bézier segments that share
//! endpoints, prefixed by the tagged arrow endpoint. The chain is written
//! backwards relative to that endpoint, so it is reordered before sampling.

use crate::error::GeometryError;
use crate::geometry::Point;

/// Points per Bézier segment when no resolution is configured.
pub const DEFAULT_RESOLUTION: usize = 200;
/// Control points per segment; consecutive segments overlap by one.
const GROUP_SIZE: usize = 4;
const GROUP_STRIDE: usize = 3;

/// Puts raw `[start, end, m0, m1, ...]` coordinates into forward curve order:
/// `[start] + reverse([m0, m1, ...]) + [end]`.
///
/// Lists with fewer than two points are returned unchanged.
pub fn reorder_control_points(raw: &[Point]) -> Vec<Point> {
    if raw.len() < 2 {
        return raw.to_vec();
    }
    let mut ordered = Vec::with_capacity(raw.len());
    ordered.push(raw[0]);
    ordered.extend(raw[2..].iter().rev().copied());
    ordered.push(raw[1]);
    ordered
}

/// Splits forward-ordered points into overlapping groups of up to four,
/// the first starting at index 1 and each next one three points further on.
pub fn bezier_groups(points: &[Point]) -> Vec<&[Point]> {
    let mut groups = Vec::new();
    let mut start = 1;
    while start + 2 < points.len() {
        let end = (start + GROUP_SIZE).min(points.len());
        groups.push(&points[start..end]);
        start += GROUP_STRIDE;
    }
    groups
}

/// Samples the Bézier curve defined by `points` at `resolution` evenly spaced
/// parameters in `[0, 1]`, both ends included.
///
/// The degree follows the number of control points, so a full group gives a cubic.
/// Evaluation is by repeated interpolation, so coincident control points yield
/// exactly that point.
pub fn sample_bezier(points: &[Point], resolution: usize) -> Vec<Point> {
    if points.is_empty() || resolution == 0 {
        return Vec::new();
    }
    if resolution == 1 {
        return vec![points[0]];
    }
    let last = (resolution - 1) as f32;
    let mut scratch = Vec::with_capacity(points.len());

    (0..resolution)
        .map(|step| {
            let t = step as f32 / last;
            de_casteljau(points, t, &mut scratch)
        })
        .collect()
}

/// Rebuilds the drawable polyline of an edge from its raw control points:
/// the start point followed by the samples of every Bézier group in order.
pub fn reconstruct_curve(raw: &[Point], resolution: usize) -> Result<Vec<Point>, GeometryError> {
    let ordered = reorder_control_points(raw);
    if ordered.len() < GROUP_SIZE {
        return Err(GeometryError::InsufficientControlPoints {
            count: ordered.len(),
        });
    }
    let resolution = resolution.max(2);
    let groups = bezier_groups(&ordered);

    let mut curve = Vec::with_capacity(1 + groups.len() * resolution);
    curve.push(ordered[0]);
    for group in groups {
        curve.extend(sample_bezier(group, resolution));
    }
    Ok(curve)
}

fn de_casteljau(points: &[Point], t: f32, scratch: &mut Vec<Point>) -> Point {
    scratch.clear();
    scratch.extend_from_slice(points);
    for level in (1..scratch.len()).rev() {
        for i in 0..level {
            let (a, b) = (scratch[i], scratch[i + 1]);
            scratch[i] = a + (b - a) * t;
        }
    }
    scratch[0]
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn cubic_samples_hit_both_endpoints(
            control in prop::array::uniform4(point_strategy()),
            resolution in 2usize..300,
        ) {
            let samples = sample_bezier(&control, resolution);
            prop_assert_eq!(samples.len(), resolution);
            let first = samples[0];
            let last = samples[resolution - 1];
            prop_assert!(approx_eq!(f32, first.x, control[0].x, epsilon = 1e-2));
            prop_assert!(approx_eq!(f32, first.y, control[0].y, epsilon = 1e-2));
            prop_assert!(approx_eq!(f32, last.x, control[3].x, epsilon = 1e-2));
            prop_assert!(approx_eq!(f32, last.y, control[3].y, epsilon = 1e-2));
        }

        #[test]
        fn reconstruction_is_deterministic(
            raw in prop::collection::vec(point_strategy(), 5..20),
            resolution in 2usize..50,
        ) {
            prop_assert_eq!(reconstruct_curve(&raw, resolution), reconstruct_curve(&raw, resolution));
        }
    }
}
