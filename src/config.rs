use crate::curve::DEFAULT_RESOLUTION;
use crate::theme::Theme;
use serde::Deserialize;
use std::path::Path;

/// Graphviz reports node sizes in inches and positions in points.
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Multiplier from the layout engine's size unit to coordinate units.
    pub point_scale: f32,
    /// Samples per Bézier segment.
    pub curve_resolution: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            point_scale: POINTS_PER_INCH,
            curve_resolution: DEFAULT_RESOLUTION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecorationConfig {
    pub arrow_height: f32,
    pub arrow_half_angle_degrees: f32,
    /// Curve sample the arrowhead direction is taken from, counted from the start.
    pub arrow_direction_offset: usize,
    pub tee_height: f32,
    pub tee_width: f32,
    /// Curve sample the tee direction is taken from, counted back from the end.
    pub tee_direction_offset: usize,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            arrow_height: 5.0 * 3f32.sqrt(),
            arrow_half_angle_degrees: 22.5,
            arrow_direction_offset: 20,
            tee_height: 0.0,
            tee_width: 10.0,
            tee_direction_offset: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub scene: SceneConfig,
    pub decoration: DecorationConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    node_fill: Option<String>,
    node_border_color: Option<String>,
    node_border_width: Option<f32>,
    line_color: Option<String>,
    line_width: Option<f32>,
    decoration_color: Option<String>,
    decoration_width: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SceneConfigFile {
    point_scale: Option<f32>,
    curve_resolution: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DecorationConfigFile {
    arrow_height: Option<f32>,
    arrow_half_angle_degrees: Option<f32>,
    arrow_direction_offset: Option<usize>,
    tee_height: Option<f32>,
    tee_width: Option<f32>,
    tee_direction_offset: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    scene: Option<SceneConfigFile>,
    decoration: Option<DecorationConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Applies a JSON (or JSON5) config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config: {json_err} (as JSON5: {json5_err})")
        })?,
    };

    let mut config = Config::default();

    match parsed.theme.as_deref() {
        Some("modern") => config.theme = Theme::modern(),
        Some("classic") | Some("default") | None => {}
        Some(other) => return Err(anyhow::anyhow!("unknown theme `{other}`")),
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.node_fill {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.node_border_color {
            config.theme.node_border_color = v;
        }
        if let Some(v) = vars.node_border_width {
            config.theme.node_border_width = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.line_width {
            config.theme.line_width = v;
        }
        if let Some(v) = vars.decoration_color {
            config.theme.decoration_color = v;
        }
        if let Some(v) = vars.decoration_width {
            config.theme.decoration_width = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(scene) = parsed.scene {
        if let Some(v) = scene.point_scale {
            config.scene.point_scale = v;
        }
        if let Some(v) = scene.curve_resolution {
            config.scene.curve_resolution = v;
        }
    }

    if let Some(decoration) = parsed.decoration {
        if let Some(v) = decoration.arrow_height {
            config.decoration.arrow_height = v;
        }
        if let Some(v) = decoration.arrow_half_angle_degrees {
            config.decoration.arrow_half_angle_degrees = v;
        }
        if let Some(v) = decoration.arrow_direction_offset {
            config.decoration.arrow_direction_offset = v;
        }
        if let Some(v) = decoration.tee_height {
            config.decoration.tee_height = v;
        }
        if let Some(v) = decoration.tee_width {
            config.decoration.tee_width = v;
        }
        if let Some(v) = decoration.tee_direction_offset {
            config.decoration.tee_direction_offset = v;
        }
    }

    Ok(config)
}
