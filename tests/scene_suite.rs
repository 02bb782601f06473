use std::path::Path;

use dot_spline_renderer::{
    Config, DrawablePrimitive, EdgeType, LayoutError, Point, SceneError, Theme, assemble_scene,
    build_scene, parse_layout, render_svg,
};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture read failed")
}

#[test]
fn fixture_parses_to_expected_records() {
    let graph = parse_layout(&fixture("causal_chain.gv")).expect("parse failed");
    assert_eq!(graph.viewport.width, 397.13);
    assert_eq!(graph.viewport.height, 252.0);
    assert_eq!(graph.nodes.len(), 5);
    assert_eq!(graph.edges.len(), 5);

    let sinks = graph.node("carbon sinks").expect("missing node");
    assert_eq!(sinks.position, Point::new(94.571, 18.0));
    assert_eq!(sinks.width, 1.6);

    let types: Vec<&EdgeType> = graph.edges.iter().map(|edge| &edge.edge_type).collect();
    assert_eq!(
        types,
        [
            &EdgeType::CausesOrPromotes,
            &EdgeType::CausesOrPromotes,
            &EdgeType::InhibitedBy,
            &EdgeType::Unrecognized("is_a_subclass_of".to_string()),
            &EdgeType::CausesOrPromotes,
        ]
    );

    // The wrapped `pos` line is joined back into one list: the `e,` point plus
    // ten spline points, three cubic segments.
    let wrapped = &graph.edges[4];
    assert_eq!(wrapped.control_points.len(), 11);
    assert_eq!(wrapped.control_points[0], Point::new(214.4, 144.1));
    assert_eq!(wrapped.control_points[6], Point::new(196.52, 104.34));
    assert_eq!(wrapped.control_points[10], Point::new(210.54, 134.45));
}

#[test]
fn fixture_parse_is_idempotent() {
    let input = fixture("causal_chain.gv");
    assert_eq!(parse_layout(&input).unwrap(), parse_layout(&input).unwrap());
}

#[test]
fn fixture_scene_has_expected_primitives() {
    let input = fixture("causal_chain.gv");
    let graph = parse_layout(&input).unwrap();
    let scene = assemble_scene(&graph, &Config::default()).unwrap();

    let labels = scene
        .primitives
        .iter()
        .filter(|p| matches!(p, DrawablePrimitive::Label { .. }))
        .count();
    let circles = scene
        .primitives
        .iter()
        .filter(|p| matches!(p, DrawablePrimitive::Circle { .. }))
        .count();
    assert_eq!(labels, 5);
    assert_eq!(circles, 5);
    assert_eq!(scene.curves().count(), 5);
    // Three arrowheads and one tee; the subclass edge is undecorated.
    assert_eq!(scene.polygons().count(), 4);
    assert_eq!(scene.primitives.len(), 19);

    let lengths: Vec<usize> = scene.curves().map(|curve| curve.len()).collect();
    assert_eq!(lengths, [201, 201, 201, 201, 601]);

    for (curve, edge) in scene.curves().zip(&graph.edges) {
        assert_eq!(curve[0], edge.control_points[0]);
    }
    for polygon in scene.polygons() {
        assert_eq!(polygon.len(), 3);
    }
}

#[test]
fn decorations_are_anchored_on_curve_ends() {
    let scene = build_scene(&fixture("causal_chain.gv"), &Config::default()).unwrap();
    let mut last_curve: Option<&[Point]> = None;
    let mut checked = 0;
    for primitive in &scene.primitives {
        match primitive {
            DrawablePrimitive::Curve { points } => last_curve = Some(points.as_slice()),
            DrawablePrimitive::Polygon { points } => {
                let curve = last_curve.expect("decoration without a curve");
                assert!(points[1] == curve[0] || points[1] == curve[curve.len() - 1]);
                checked += 1;
            }
            _ => {}
        }
    }
    assert_eq!(checked, 4);
}

#[test]
fn fixture_renders_svg() {
    let scene = build_scene(&fixture("causal_chain.gv"), &Config::default()).unwrap();
    let svg = render_svg(&scene, &Theme::modern());
    assert!(svg.contains("<svg"), "missing <svg tag");
    assert!(svg.contains("</svg>"), "missing </svg tag");
    assert!(svg.contains("renewable energy"));
    assert_eq!(svg.matches("<ellipse").count(), 5);
}

#[test]
fn missing_width_fails_the_whole_parse() {
    let input = fixture("causal_chain.gv").replace(",\n\t\twidth=1.6]", "]");
    let err = parse_layout(&input).unwrap_err();
    assert!(
        matches!(&err, LayoutError::MalformedNodeRecord { record, .. } if record == "carbon sinks"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn dangling_edge_reports_unknown_node() {
    let input = fixture("causal_chain.gv").replace(
        "\"global warming\" -> \"carbon sinks\"",
        "\"global warming\" -> \"ocean sinks\"",
    );
    let err = build_scene(&input, &Config::default()).unwrap_err();
    assert_eq!(
        err,
        SceneError::Layout(LayoutError::UnknownNodeReference {
            edge: "global warming -> ocean sinks".to_string(),
            id: "ocean sinks".to_string(),
        })
    );
}
