use crate::config::{Config, load_config};
use crate::parser::parse_layout;
use crate::render::{render_svg, write_output_svg};
use crate::scene::assemble_scene;
use crate::scene_dump::write_scene_dump;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "dsr",
    version,
    about = "Render Graphviz-laid-out DOT text as curves, arrowheads and tees"
)]
pub struct Args {
    /// Input layout file (DOT text with positions) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Samples per Bézier segment (overrides the config file)
    #[arg(short = 'r', long = "resolution")]
    pub resolution: Option<usize>,

    /// Layout-unit to point factor for node sizes (overrides the config file)
    #[arg(short = 's', long = "pointScale")]
    pub point_scale: Option<f32>,

    /// PNG width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// PNG height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");
    run_with_args(&args)
}

pub fn run_with_args(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    let input = read_input(args.input.as_deref())?;

    let graph = parse_layout(&input)?;
    info!(nodes = graph.nodes.len(), edges = graph.edges.len(); "Loaded layout");
    let scene = assemble_scene(&graph, &config)?;

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&scene, &config.theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&render_svg(&scene, &config.theme), &output, &config)?;
        }
        OutputFormat::Json => {
            write_scene_dump(args.output.as_deref(), &scene)?;
        }
    }

    info!(primitives = scene.primitives.len(); "Scene written");
    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;
    if let Some(resolution) = args.resolution {
        config.scene.curve_resolution = resolution;
    }
    if let Some(scale) = args.point_scale {
        config.scene.point_scale = scale;
    }
    Ok(config)
}

fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "dsr", "-i", "graph.gv", "-e", "json", "-r", "40", "-s", "96",
        ])
        .unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("graph.gv")));
        assert_eq!(args.output_format, OutputFormat::Json);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.scene.curve_resolution, 40);
        assert_eq!(config.scene.point_scale, 96.0);
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("out.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
