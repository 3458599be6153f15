//! thumbsheet: resize a folder of PNGs and lay them out as a labeled
//! collage sheet
//!
//! The heavy lifting lives in the `collage` module; this file is the
//! thin command line wrapper and the stage-by-stage orchestration.

mod collage;
mod config;
mod error;

use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::collage::compose::create_collage;
use crate::collage::resample::resize_images;
use crate::config::CollageConfig;
use crate::error::Error;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Folder containing the source PNG images
    source: Option<PathBuf>,

    /// Where to write the finished collage
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Uniform height for the resized images, in pixels
    #[clap(long)]
    height: Option<u32>,

    /// Maximum number of images per collage row
    #[clap(long)]
    images_per_row: Option<u32>,

    /// Spacing between images, rows and labels, in pixels
    #[clap(long)]
    margin: Option<u32>,

    /// JSON config file; explicit flags override its values
    #[clap(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Assemble the run configuration: the config file (or the
    /// defaults) first, explicit flags on top
    fn into_config(self) -> Result<CollageConfig, Error> {
        let mut config = match &self.config {
            Some(path) => CollageConfig::from_json(&fs::read_to_string(path)?)?,
            None => CollageConfig::default(),
        };

        if let Some(source) = self.source {
            config.source_dir = source;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(height) = self.height {
            config.target_height = height;
        }
        if let Some(images_per_row) = self.images_per_row {
            config.images_per_row = images_per_row;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }

        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    let result = args.into_config().and_then(|config| run(&config));
    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Run the full pipeline: resize, compose, clean up
fn run(config: &CollageConfig) -> Result<(), Error> {
    if !config.source_dir.is_dir() {
        return Err(Error::SourceDirMissing(config.source_dir.clone()));
    }

    println!("Resizing images...");
    let batch = resize_images(
        &config.source_dir,
        config.target_height,
        config.background_color,
    )?;
    if batch.is_empty() {
        // The composer rejects an empty batch too; erroring here keeps
        // the collage stage from being announced for a no-op run.
        return Err(Error::NoImages);
    }
    println!("Resized {} images.", batch.len());

    println!("Creating collage...");
    create_collage(batch.images(), &config.output_path, config)?;

    batch.cleanup()?;
    println!("Temporary resized images removed.");

    Ok(())
}
