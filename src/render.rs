use crate::geometry::Point;
use crate::scene::{DrawablePrimitive, Scene};
use crate::theme::Theme;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Renders a scene as SVG.
///
/// Layout coordinates have their origin at the bottom left, so every y value is
/// flipped against the viewport height. Primitives are written in scene order.
pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    let width = scene.viewport.width.max(1.0);
    let height = scene.viewport.height.max(1.0);
    let flip = |point: Point| Point::new(point.x, height - point.y);

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    );

    for primitive in &scene.primitives {
        match primitive {
            DrawablePrimitive::Label { position, text } => {
                let p = flip(*position);
                let _ = write!(
                    svg,
                    "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                    p.x,
                    p.y,
                    escape_xml(&theme.font_family),
                    theme.font_size,
                    theme.text_color,
                    escape_xml(text)
                );
            }
            DrawablePrimitive::Circle {
                center,
                radius_x,
                radius_y,
            } => {
                let c = flip(*center);
                let _ = write!(
                    svg,
                    "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    c.x,
                    c.y,
                    radius_x,
                    radius_y,
                    theme.node_fill,
                    theme.node_border_color,
                    theme.node_border_width
                );
            }
            DrawablePrimitive::Curve { points } => {
                let _ = write!(
                    svg,
                    "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    points_attr(points, flip),
                    theme.line_color,
                    theme.line_width
                );
            }
            DrawablePrimitive::Polygon { points } => {
                let _ = write!(
                    svg,
                    "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"/>",
                    points_attr(points, flip),
                    theme.decoration_color,
                    theme.decoration_width
                );
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn points_attr(points: &[Point], flip: impl Fn(Point) -> Point) -> String {
    let mut attr = String::new();
    for (idx, point) in points.iter().enumerate() {
        let p = flip(*point);
        if idx > 0 {
            attr.push(' ');
        }
        let _ = write!(attr, "{:.2},{:.2}", p.x, p.y);
    }
    attr
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Viewport;

    fn scene() -> Scene {
        Scene {
            primitives: vec![
                DrawablePrimitive::Label {
                    position: Point::new(10.0, 90.0),
                    text: "heat & <drought>".to_string(),
                },
                DrawablePrimitive::Circle {
                    center: Point::new(10.0, 90.0),
                    radius_x: 5.0,
                    radius_y: 3.0,
                },
                DrawablePrimitive::Curve {
                    points: vec![Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
                },
                DrawablePrimitive::Polygon {
                    points: vec![
                        Point::new(1.0, 1.0),
                        Point::new(2.0, 2.0),
                        Point::new(3.0, 1.0),
                    ],
                },
            ],
            viewport: Viewport {
                width: 50.0,
                height: 100.0,
            },
        }
    }

    #[test]
    fn render_svg_basic() {
        let svg = render_svg(&scene(), &Theme::classic());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 50 100\""));
        assert!(svg.contains("heat &amp; &lt;drought&gt;"));
    }

    #[test]
    fn y_axis_is_flipped() {
        let svg = render_svg(&scene(), &Theme::classic());
        assert!(svg.contains("cx=\"10.00\" cy=\"10.00\""));
        assert!(svg.contains("points=\"0.00,100.00 10.00,80.00\""));
    }

    #[test]
    fn primitives_keep_scene_order() {
        let svg = render_svg(&scene(), &Theme::modern());
        let text = svg.find("<text").unwrap();
        let ellipse = svg.find("<ellipse").unwrap();
        let curve = svg.find("<polyline").unwrap();
        assert!(text < ellipse && ellipse < curve);
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn configured_background_fills_the_canvas() {
        let config =
            crate::config::parse_config(r##"{ "themeVariables": { "background": "#101820" } }"##)
                .unwrap();
        let svg = render_svg(&scene(), &config.theme);
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#101820\"/>"));
    }
}
