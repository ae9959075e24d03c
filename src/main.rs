//! TMX CLI - Command-line tool for TMX tile maps.
//!
//! This is the main entry point for the `tmx` command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use walkdir::WalkDir;

use tmx::prelude::*;

/// TMX - tile map copy and inspection tool
#[derive(Parser)]
#[command(name = "tmx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log resolver details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a map and write it back out with contiguous ids
    Copy {
        /// Input TMX file
        #[arg(short, long, env = "TMX_INPUT")]
        input: PathBuf,

        /// Output TMX file
        #[arg(short, long, env = "TMX_OUTPUT")]
        output: PathBuf,

        /// Tile data encoding (csv or base64)
        #[arg(short, long, default_value = "csv")]
        encoding: DataEncoding,

        /// Spaces per nesting level, 0 for no indentation
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },

    /// Print the contents of a map
    Print {
        /// Input TMX file
        #[arg(short, long, env = "TMX_INPUT")]
        input: PathBuf,

        /// Dump the decoded map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-encode every map under a directory
    BatchCopy {
        /// Input directory
        #[arg(short, long, env = "TMX_INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "TMX_OUTPUT_DIR")]
        output: PathBuf,

        /// Filter pattern for paths relative to the input directory (glob-style)
        #[arg(short, long, default_value = "**/*.tmx")]
        filter: String,

        /// Tile data encoding (csv or base64)
        #[arg(short, long, default_value = "csv")]
        encoding: DataEncoding,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Copy { input, output, encoding, indent } => {
            let options = WriteOptions::default()
                .with_encoding(encoding)
                .with_indent(indent);
            cmd_copy(&input, &output, &options)?;
        }
        Commands::Print { input, json } => {
            cmd_print(&input, json)?;
        }
        Commands::BatchCopy { input, output, filter, encoding } => {
            let options = WriteOptions::default().with_encoding(encoding);
            cmd_batch_copy(&input, &output, &filter, &options)?;
        }
    }

    Ok(())
}

fn read_map(path: &Path) -> Result<Map> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    tmx::decode(&data).with_context(|| format!("Failed to decode {}", path.display()))
}

fn copy_map(input: &Path, output: &Path, options: &WriteOptions) -> Result<()> {
    let mut map = read_map(input)?;
    let bytes = tmx::encode_with(&mut map, options)
        .with_context(|| format!("Failed to encode {}", input.display()))?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn cmd_copy(input: &Path, output: &Path, options: &WriteOptions) -> Result<()> {
    println!("Copying: {} -> {}", input.display(), output.display());

    let start = Instant::now();
    copy_map(input, output, options)?;

    println!("Copy completed in {:?}", start.elapsed());
    Ok(())
}

fn cmd_print(input: &Path, json: bool) -> Result<()> {
    let map = read_map(input)?;

    if json {
        let text = serde_json::to_string_pretty(&map).context("Failed to serialize map")?;
        println!("{text}");
        return Ok(());
    }

    println!("Map: {}", input.display());
    println!(
        "  {}x{} cells of {}x{} px, {}, render order {}",
        map.width(),
        map.height(),
        map.tile_width(),
        map.tile_height(),
        map.orientation.as_str(),
        map.render_order
    );
    if let Some(background) = map.background {
        println!("  background {background}");
    }
    println!("  next object id {}", map.next_object_id);
    print_properties(&map.properties, 1);

    println!("\nTilesets: {}", map.tilesets().len());
    for tileset in map.tilesets() {
        println!(
            "  [{}] {:?}: {} tiles, {}x{} px",
            tileset.first_gid,
            tileset.name,
            tileset.tile_count(),
            tileset.tile_width,
            tileset.tile_height
        );
        if let Some(source) = &tileset.source {
            println!("    external source {source}");
        }
        print_properties(&tileset.properties, 2);
        for terrain in tileset.terrains() {
            let tile = terrain
                .tile
                .and_then(|position| tileset.tile(position))
                .map_or_else(|| "-".to_string(), |tile| tile.id.to_string());
            println!("    terrain {:?} (tile {tile})", terrain.name);
        }
        let animated = tileset.tiles().iter().filter(|t| t.animation.is_some()).count();
        if animated > 0 {
            println!("    {animated} animated tiles");
        }
    }

    println!("\nLayers:");
    print_layers(
        &map.tile_layers,
        &map.image_layers,
        &map.object_groups,
        &map.groups,
        1,
    );

    Ok(())
}

fn print_layers(
    tile_layers: &[TileLayer],
    image_layers: &[ImageLayer],
    object_groups: &[ObjectGroup],
    groups: &[Group],
    depth: usize,
) {
    let pad = "  ".repeat(depth);
    for layer in tile_layers {
        println!(
            "{pad}tile layer {:?}: {}x{}, {} tiles{}",
            layer.name,
            layer.width(),
            layer.height(),
            layer.tile_count(),
            if layer.visible { "" } else { " (hidden)" }
        );
        print_properties(&layer.properties, depth + 1);
    }
    for layer in image_layers {
        let source = layer.image.as_ref().map_or("-", |image| image.source.as_str());
        println!("{pad}image layer {:?}: {source}", layer.name);
        print_properties(&layer.properties, depth + 1);
    }
    for group in object_groups {
        println!("{pad}object group {:?}: {} objects", group.name, group.objects.len());
        for object in &group.objects {
            println!(
                "{pad}  #{} {:?} {} at ({}, {})",
                object.id,
                object.name,
                object.shape.name(),
                object.x,
                object.y
            );
        }
        print_properties(&group.properties, depth + 1);
    }
    for group in groups {
        println!("{pad}group {:?}: {} layers", group.name, group.layer_count());
        print_properties(&group.properties, depth + 1);
        print_layers(
            &group.tile_layers,
            &group.image_layers,
            &group.object_groups,
            &group.groups,
            depth + 1,
        );
    }
}

fn print_properties(properties: &Properties, depth: usize) {
    let pad = "  ".repeat(depth);
    for property in properties.iter() {
        let value = match property.value() {
            PropertyValue::String(s) | PropertyValue::File(s) => format!("{s:?}"),
            PropertyValue::Int(v) => v.to_string(),
            PropertyValue::Float(v) => v.to_string(),
            PropertyValue::Bool(v) => v.to_string(),
            PropertyValue::Colour(c) => c.to_string(),
        };
        println!(
            "{pad}{} ({}) = {value}",
            property.name(),
            property.property_type()
        );
    }
}

fn cmd_batch_copy(input: &Path, output: &Path, filter: &str, options: &WriteOptions) -> Result<()> {
    let pattern = glob::Pattern::new(filter).context("Invalid filter pattern")?;

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.strip_prefix(input)
                .map(|relative| pattern.matches_path(relative))
                .unwrap_or(false)
        })
        .collect();

    println!("Copying {} maps to {}...", files.len(), output.display());
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let failures: Vec<(PathBuf, anyhow::Error)> = files
        .par_iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(input).unwrap_or(path);
            let target = output.join(relative);
            debug!("copying {}", relative.display());
            let result = copy_map(path, &target, options);
            pb.inc(1);
            result.err().map(|e| (path.clone(), e))
        })
        .collect();

    pb.finish_with_message("Done");
    for (path, error) in &failures {
        eprintln!("Error copying {}: {:#}", path.display(), error);
    }
    info!("batch copy of {} finished", input.display());
    println!(
        "Copied {} maps in {:?} ({} errors)",
        files.len() - failures.len(),
        start.elapsed(),
        failures.len()
    );

    Ok(())
}
