use crate::config::{Config, load_config};
use crate::data::DataView;
use crate::format_pane::{FORMAT_OBJECTS, enumerate_all, enumerate_object_instances};
use crate::layout_dump::write_layout_dump;
use crate::logging::{LoggingConfig, init_logging};
use crate::render::{write_output_png, write_output_svg};
use crate::visual::render_rating;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ratings", version, about = "Rating indicator renderer (stars, triangles, circles)")]
pub struct Args {
    /// Data view JSON/JSON5 file or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with_all = ["value", "max"])]
    pub input: Option<PathBuf>,

    /// Rating value, used instead of a data view
    #[arg(long = "value", allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Rating maximum; defaults to the indicator count
    #[arg(long = "max")]
    pub max: Option<f64>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (base style objects, render and layout options)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Viewport height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed layout as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Print style pane instances for an object (or 'all') instead of rendering
    #[arg(long = "formatPane")]
    pub format_pane: Option<String>,

    /// Embed tooltip rows in the SVG title
    #[arg(long = "tooltips")]
    pub tooltips: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_verbosity(args.verbose));

    let config = build_config(&args)?;
    let data_view = read_data_view(&args)?;

    if let Some(object_name) = args.format_pane.as_deref() {
        return print_format_pane(object_name, &config, &data_view);
    }

    let rendered = render_rating(&data_view, &config).context("failed to render rating")?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &rendered)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&rendered.svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&rendered.svg, &output, &config.render)?;
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref()).with_context(|| {
        format!(
            "failed to load config {}",
            args.config.as_deref().unwrap_or(Path::new("-")).display()
        )
    })?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.tooltips {
        config.render.tooltips = true;
    }
    Ok(config)
}

fn read_data_view(args: &Args) -> Result<DataView> {
    let Some(path) = args.input.as_deref() else {
        return Ok(DataView::from_values(args.value.unwrap_or(0.0), args.max));
    };
    let text = read_input(path)?;
    DataView::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_format_pane(object_name: &str, config: &Config, data_view: &DataView) -> Result<()> {
    let style = config.style_for(&data_view.objects);
    let instances = if object_name == "all" {
        enumerate_all(&style)
    } else if FORMAT_OBJECTS.contains(&object_name) {
        enumerate_object_instances(object_name, &style)
    } else {
        return Err(anyhow::anyhow!(
            "unknown format pane object {object_name:?} (expected one of {} or all)",
            FORMAT_OBJECTS.join(", ")
        ));
    };
    println!("{}", serde_json::to_string_pretty(&instances)?);
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
