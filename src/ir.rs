use crate::geometry::Point;
use std::collections::BTreeMap;

/// Label attached to edges that draw an arrowhead at the curve start.
pub const CAUSES_OR_PROMOTES: &str = "causes_or_promotes";
/// Label attached to edges that draw a tee at the curve end.
pub const INHIBITED_BY: &str = "is_inhibited_or_prevented_or_blocked_or_slowed_by";

/// Semantic relation carried by an edge's `type` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeType {
    CausesOrPromotes,
    InhibitedBy,
    /// The edge statement had no `type` attribute.
    Untyped,
    Unrecognized(String),
}

/// Which decoration, if any, an edge type is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Arrowhead,
    Tee,
    None,
}

impl EdgeType {
    pub fn from_label(label: &str) -> Self {
        match label {
            CAUSES_OR_PROMOTES => Self::CausesOrPromotes,
            INHIBITED_BY => Self::InhibitedBy,
            "" => Self::Untyped,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn marker(&self) -> Marker {
        match self {
            Self::CausesOrPromotes => Marker::Arrowhead,
            Self::InhibitedBy => Marker::Tee,
            Self::Untyped | Self::Unrecognized(_) => Marker::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub position: Point,
    /// Width in the layout engine's unit (inches for Graphviz).
    pub width: f32,
    /// Height in the layout engine's unit (inches for Graphviz).
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub source_id: String,
    pub target_id: String,
    /// Raw `pos` coordinates: the `e,`-tagged endpoint followed by the spline points,
    /// in the order the layout engine wrote them.
    pub control_points: Vec<Point>,
    pub edge_type: EdgeType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGraph {
    pub nodes: BTreeMap<String, LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub viewport: Viewport,
}

impl LayoutGraph {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            viewport,
        }
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_type_matches_exact_labels() {
        assert_eq!(EdgeType::from_label(CAUSES_OR_PROMOTES), EdgeType::CausesOrPromotes);
        assert_eq!(EdgeType::from_label(INHIBITED_BY), EdgeType::InhibitedBy);
        assert_eq!(
            EdgeType::from_label("inhibited by"),
            EdgeType::Unrecognized("inhibited by".to_string())
        );
    }

    #[test]
    fn unknown_labels_have_no_marker() {
        let edge_type = EdgeType::from_label("is_a_part_of");
        assert_eq!(edge_type, EdgeType::Unrecognized("is_a_part_of".to_string()));
        assert_eq!(edge_type.marker(), Marker::None);
        assert_eq!(EdgeType::from_label("").marker(), Marker::None);
    }

    #[test]
    fn recognized_labels_pick_markers() {
        assert_eq!(EdgeType::CausesOrPromotes.marker(), Marker::Arrowhead);
        assert_eq!(EdgeType::InhibitedBy.marker(), Marker::Tee);
    }
}
