use crate::config::Config;
use crate::curve::reconstruct_curve;
use crate::decoration::build_decoration;
use crate::error::SceneError;
use crate::geometry::Point;
use crate::ir::{EdgeType, LayoutEdge, LayoutGraph, Viewport};
use log::{debug, warn};
use std::collections::BTreeSet;

/// Renderer-agnostic shape handed to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawablePrimitive {
    Circle {
        center: Point,
        radius_x: f32,
        radius_y: f32,
    },
    Label {
        position: Point,
        text: String,
    },
    Curve {
        points: Vec<Point>,
    },
    Polygon {
        points: Vec<Point>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Labels first, then node circles, then each edge's curve and its decoration.
    pub primitives: Vec<DrawablePrimitive>,
    pub viewport: Viewport,
}

impl Scene {
    pub fn curves(&self) -> impl Iterator<Item = &[Point]> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            DrawablePrimitive::Curve { points } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &[Point]> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            DrawablePrimitive::Polygon { points } => Some(points.as_slice()),
            _ => None,
        })
    }
}

/// Builds the full primitive list for a parsed layout.
pub fn assemble_scene(graph: &LayoutGraph, config: &Config) -> Result<Scene, SceneError> {
    let mut primitives = Vec::with_capacity(graph.nodes.len() * 2 + graph.edges.len() * 2);

    for node in graph.nodes.values() {
        primitives.push(DrawablePrimitive::Label {
            position: node.position,
            text: node.id.clone(),
        });
    }

    let scale = config.scene.point_scale;
    for node in graph.nodes.values() {
        primitives.push(DrawablePrimitive::Circle {
            center: node.position,
            radius_x: 0.5 * node.width * scale,
            radius_y: 0.5 * node.height * scale,
        });
    }

    let mut unrecognized = BTreeSet::new();
    for edge in &graph.edges {
        if let EdgeType::Unrecognized(label) = &edge.edge_type {
            if unrecognized.insert(label.as_str()) {
                warn!(edge_type = label.as_str(); "Edge type has no decoration");
            }
        }
        primitives.extend(edge_primitives(edge, config)?);
    }

    debug!(primitives = primitives.len(); "Assembled scene");
    Ok(Scene {
        primitives,
        viewport: graph.viewport,
    })
}

/// The curve of one edge followed by its decoration, if it has one.
pub fn edge_primitives(
    edge: &LayoutEdge,
    config: &Config,
) -> Result<Vec<DrawablePrimitive>, SceneError> {
    let wrap = |source| SceneError::Edge {
        source_id: edge.source_id.clone(),
        target_id: edge.target_id.clone(),
        source,
    };

    let curve = reconstruct_curve(&edge.control_points, config.scene.curve_resolution)
        .map_err(wrap)?;
    let decoration =
        build_decoration(&curve, &edge.edge_type, &config.decoration).map_err(wrap)?;

    let mut primitives = vec![DrawablePrimitive::Curve { points: curve }];
    if let Some(decoration) = decoration {
        primitives.push(DrawablePrimitive::Polygon {
            points: decoration.points,
        });
    }
    Ok(primitives)
}
