#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod curve;
pub mod decoration;
pub mod error;
pub mod geometry;
pub mod ir;
pub mod parser;
pub mod render;
pub mod scene;
pub mod scene_dump;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, DecorationConfig, RenderConfig, SceneConfig, load_config};
pub use error::{GeometryError, LayoutError, SceneError};
pub use geometry::Point;
pub use ir::{EdgeType, LayoutEdge, LayoutGraph, LayoutNode, Marker, Viewport};
pub use parser::parse_layout;
pub use render::render_svg;
pub use scene::{DrawablePrimitive, Scene, assemble_scene};
pub use theme::Theme;

/// Parses layout text and assembles its scene in one step.
pub fn build_scene(input: &str, config: &Config) -> Result<Scene, SceneError> {
    let graph = parse_layout(input)?;
    assemble_scene(&graph, config)
}

/// Parses layout text and renders it straight to SVG.
pub fn render_layout_svg(input: &str, config: &Config) -> Result<String, SceneError> {
    let scene = build_scene(input, config)?;
    Ok(render_svg(&scene, &config.theme))
}
