//! drawkit command-line tool
//!
//! Imports SVG documents as shapes and runs path operations on SVG path
//! data.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use drawkit::designer::DefaultShapeFactory;
use drawkit::{
    init_logging_with_level, Config, PathConverter, PathOp, PathShape, PictureImporter, Shape,
};

#[derive(Parser)]
#[command(name = "drawkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vector path conversion and SVG shape import", long_about = None)]
struct Cli {
    /// Configuration file (.json or .toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an SVG file and list the recovered shapes
    Import {
        /// SVG file
        file: PathBuf,

        /// Print the shapes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Boolean operation across SVG path data strings
    Op {
        /// union, intersect, difference, xor or reverse-difference
        operation: PathOp,

        /// Path data, one argument per shape
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// Outline of the stroke of a path as path data
    Stroke {
        /// Path data
        data: String,

        /// Stroke width
        #[arg(short, long, default_value_t = 1.0)]
        width: f64,
    },

    /// Simplified path data
    Simplify {
        /// Path data
        data: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging_with_level(level)?;

    let config = load_config(cli.config.as_deref())?;
    let converter = PathConverter::with_settings(config.conversion.clone());

    match cli.command {
        Commands::Import { file, json } => import(&file, json, &config),
        Commands::Op { operation, paths } => {
            let shapes = paths
                .iter()
                .map(|d| parse_shape(&converter, d).map(Shape::Path))
                .collect::<Result<Vec<_>>>()?;
            print_result(&converter, converter.op(&shapes, operation))
        }
        Commands::Stroke { data, width } => {
            let mut shape = parse_shape(&converter, &data)?;
            shape.style.stroke.thickness = width;
            print_result(
                &converter,
                converter.to_stroke_path_shape(&Shape::Path(shape)),
            )
        }
        Commands::Simplify { data } => {
            let shape = parse_shape(&converter, &data)?;
            print_result(&converter, converter.simplify(&Shape::Path(shape)))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let default_path = Config::default_path();
            if default_path.exists() {
                debug!("Using config {}", default_path.display());
                Config::load_from_file(&default_path)?
            } else {
                Config::new()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

fn parse_shape(converter: &PathConverter, data: &str) -> Result<PathShape> {
    match converter.from_svg_path_data(data, true, true) {
        Some(shape) => Ok(shape),
        None => bail!("invalid path data: {:?}", data),
    }
}

fn print_result(converter: &PathConverter, result: Option<PathShape>) -> Result<()> {
    match result.and_then(|shape| converter.to_svg_path_data(&Shape::Path(shape))) {
        Some(data) => println!("{}", data),
        None => println!("(no result)"),
    }
    Ok(())
}

fn import(file: &Path, json: bool, config: &Config) -> Result<()> {
    let importer =
        PictureImporter::with_settings(Arc::new(DefaultShapeFactory), config.import.clone());
    let conversion = importer.convert_file(file);
    let Some(group) = conversion.group else {
        bail!("{} is not a readable SVG document", file.display());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&group)?);
        return Ok(());
    }

    println!(
        "{}: {} shapes, {} x {}",
        group.name,
        group.len(),
        conversion.width,
        conversion.height
    );
    for shape in &group.shapes {
        match shape.bounds() {
            Some(b) => println!(
                "  {:?} ({}, {}) - ({}, {})",
                shape.shape_type(),
                b.left,
                b.top,
                b.right,
                b.bottom
            ),
            None => println!("  {:?}", shape.shape_type()),
        }
    }
    info!("Known import limitations:");
    for limitation in PictureImporter::limitations() {
        info!("  {}", limitation);
    }
    Ok(())
}
