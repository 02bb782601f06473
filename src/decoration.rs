use crate::config::DecorationConfig;
use crate::error::GeometryError;
use crate::geometry::Point;
use crate::ir::{EdgeType, Marker};

/// Which end of a reconstructed curve a decoration is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// The first sample, i.e. the layout engine's tagged endpoint.
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub end: EdgeEnd,
    pub marker: Marker,
    pub points: Vec<Point>,
}

/// Builds the marker an edge of `edge_type` carries, if any.
///
/// Arrowheads sit on the curve start and point along the direction from a sample
/// `arrow_direction_offset` steps into the curve; tees sit on the curve end and are
/// oriented by the sample `tee_direction_offset` steps before it.
pub fn build_decoration(
    curve: &[Point],
    edge_type: &EdgeType,
    config: &DecorationConfig,
) -> Result<Option<Decoration>, GeometryError> {
    let decoration = match edge_type.marker() {
        Marker::Arrowhead => {
            let anchor = *curve.first().ok_or(GeometryError::DegenerateDirectionVector)?;
            let toward = curve[config.arrow_direction_offset.min(curve.len() - 1)];
            let half_angle = config.arrow_half_angle_degrees.to_radians();
            Decoration {
                end: EdgeEnd::Start,
                marker: Marker::Arrowhead,
                points: marker_polygon(
                    toward,
                    anchor,
                    config.arrow_height,
                    config.arrow_height * half_angle.tan(),
                )?
                .to_vec(),
            }
        }
        Marker::Tee => {
            let anchor = *curve.last().ok_or(GeometryError::DegenerateDirectionVector)?;
            let last = curve.len() - 1;
            let toward = curve[last.saturating_sub(config.tee_direction_offset)];
            Decoration {
                end: EdgeEnd::End,
                marker: Marker::Tee,
                points: marker_polygon(toward, anchor, config.tee_height, config.tee_width)?
                    .to_vec(),
            }
        }
        Marker::None => return Ok(None),
    };
    Ok(Some(decoration))
}

/// Three-point marker anchored at `b`, pointing from `a` to `b`:
/// `[b - h·u + w·v, b, b - h·u - w·v]` with `u` the unit direction and `v` its normal.
pub fn marker_polygon(
    a: Point,
    b: Point,
    height: f32,
    width: f32,
) -> Result<[Point; 3], GeometryError> {
    let u = (b - a).unit().ok_or(GeometryError::DegenerateDirectionVector)?;
    let v = u.perpendicular();
    let base = b - u * height;
    Ok([base + v * width, b, base - v * width])
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn marker_middle_point_is_anchor(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            dx in 1.0f32..100.0, dy in -100.0f32..100.0,
            height in 0.0f32..20.0, width in 0.0f32..20.0,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(ax + dx, ay + dy);
            let polygon = marker_polygon(a, b, height, width).unwrap();
            prop_assert_eq!(polygon.len(), 3);
            prop_assert_eq!(polygon[1], b);
        }
    }
}
