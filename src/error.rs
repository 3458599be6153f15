//! Error types for the collage pipeline
//!
//! Every failure is terminal for the run: there are no retries, and no
//! partial collage is written once a stage has failed.

use std::path::PathBuf;
use thiserror::Error;

/// All the ways a collage run can fail
#[derive(Debug, Error)]
pub enum Error {
    /// The configured source folder does not exist (or is not a directory).
    /// Checked before any work starts, so this produces no side effects.
    #[error("source folder does not exist: {}", .0.display())]
    SourceDirMissing(PathBuf),

    /// The resampler found no PNG images, so there is nothing to lay out.
    /// Layout arithmetic over an empty row is undefined, so this is an
    /// explicit error rather than a degenerate canvas.
    #[error("no PNG images found to lay out")]
    NoImages,

    /// An entry could not be decoded or encoded as an image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A file could not be read, written or removed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The embedded label font failed to parse
    #[error("embedded label font is invalid")]
    InvalidFont,

    /// A configuration file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
