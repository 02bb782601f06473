use crate::scene::{DrawablePrimitive, Scene};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// JSON shape of a [`Scene`], handed to viewers that draw the primitives themselves.
#[derive(Debug, Serialize)]
pub struct SceneDump {
    pub viewport: ViewportDump,
    pub primitives: Vec<PrimitiveDump>,
}

#[derive(Debug, Serialize)]
pub struct ViewportDump {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveDump {
    Circle {
        center: [f32; 2],
        radius_x: f32,
        radius_y: f32,
    },
    Label {
        position: [f32; 2],
        text: String,
    },
    Curve {
        points: Vec<[f32; 2]>,
    },
    Polygon {
        points: Vec<[f32; 2]>,
    },
}

impl SceneDump {
    pub fn from_scene(scene: &Scene) -> Self {
        let primitives = scene
            .primitives
            .iter()
            .map(|primitive| match primitive {
                DrawablePrimitive::Circle {
                    center,
                    radius_x,
                    radius_y,
                } => PrimitiveDump::Circle {
                    center: [center.x, center.y],
                    radius_x: *radius_x,
                    radius_y: *radius_y,
                },
                DrawablePrimitive::Label { position, text } => PrimitiveDump::Label {
                    position: [position.x, position.y],
                    text: text.clone(),
                },
                DrawablePrimitive::Curve { points } => PrimitiveDump::Curve {
                    points: points.iter().map(|p| [p.x, p.y]).collect(),
                },
                DrawablePrimitive::Polygon { points } => PrimitiveDump::Polygon {
                    points: points.iter().map(|p| [p.x, p.y]).collect(),
                },
            })
            .collect();

        SceneDump {
            viewport: ViewportDump {
                x0: 0.0,
                y0: 0.0,
                x1: scene.viewport.width,
                y1: scene.viewport.height,
            },
            primitives,
        }
    }
}

/// Writes the scene as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_scene_dump(path: Option<&Path>, scene: &Scene) -> anyhow::Result<()> {
    let dump = SceneDump::from_scene(scene);
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
