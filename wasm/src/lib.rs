use dot_spline_renderer::{Config, Theme};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    curve_resolution: Option<usize>,
    point_scale: Option<f32>,
}

fn build_config(options: LayoutRenderOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("modern") {
        config.theme = Theme::modern();
    }

    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(resolution) = options.curve_resolution {
        config.scene.curve_resolution = resolution;
    }
    if let Some(scale) = options.point_scale {
        config.scene.point_scale = scale;
    }

    config
}

#[wasm_bindgen]
pub fn render_layout_svg(blob: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<LayoutRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        LayoutRenderOptions::default()
    };

    let config = build_config(options);
    dot_spline_renderer::render_layout_svg(blob, &config)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use dot_spline_renderer::render_layout_svg;

    use crate::{LayoutRenderOptions, build_config};

    const BLOB: &str = "digraph {\n\tgraph [bb=\"0,0,54,108\"];\n\tnode [label=\"\\N\"];\n\tedge [arrowhead=none];\n\ta\t[height=0.5,\n\t\tpos=\"27,90\",\n\t\twidth=0.75];\n\tb\t[height=0.5,\n\t\tpos=\"27,18\",\n\t\twidth=0.75];\n\ta -> b\t[pos=\"e,27,36.1 27,71.7 27,63.98 27,54.71 27,46.11\",\n\t\ttype=is_inhibited_or_prevented_or_blocked_or_slowed_by];\n}";

    #[test]
    fn renders_inhibition_edge() {
        let svg = render_layout_svg(BLOB, &build_config(LayoutRenderOptions::default()))
            .expect("layout should render");

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<ellipse").count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn options_override_defaults() {
        let options: LayoutRenderOptions =
            serde_json::from_str(r#"{"theme":"modern","fontSize":18,"curveResolution":12}"#)
                .unwrap();
        let config = build_config(options);
        assert_eq!(config.theme.font_size, 18.0);
        assert_eq!(config.scene.curve_resolution, 12);
    }
}
