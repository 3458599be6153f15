//! Configuration for a collage run
//!
//! This struct lifts every knob the pipeline uses into one place with
//! documented defaults. It can be serialized to JSON so a run can be
//! described by a config file instead of command line flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All parameters for one collage run
///
/// Defaults: light gray background, 8 images per row, 10px margins,
/// 960px display height.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CollageConfig {
    /// Folder containing the source PNG images
    /// - Only `.png` entries (case-insensitive) are considered
    /// - Default: the current directory
    pub source_dir: PathBuf,

    /// Where the finished collage PNG is written
    /// - Default: `collage.png`
    pub output_path: PathBuf,

    /// Uniform display height every image is resized to, in pixels
    /// - Width follows from each image's aspect ratio
    /// - Default: 960
    pub target_height: u32,

    /// Spacing between adjacent images, between rows, and between a
    /// label and its image, in pixels
    /// - Default: 10
    pub margin: u32,

    /// Opaque RGB fill for the collage canvas, also used to flatten
    /// transparent source images
    /// - Default: [225, 225, 225] (light gray)
    pub background_color: [u8; 3],

    /// Maximum number of images laid out per row
    /// - Default: 8
    pub images_per_row: u32,
}

impl Default for CollageConfig {
    /// Create the default run parameters
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_path: PathBuf::from("collage.png"),
            target_height: 960,
            margin: 10,
            background_color: [225, 225, 225],
            images_per_row: 8,
        }
    }
}

impl CollageConfig {
    /// Convert to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a JSON string (from a config file)
    ///
    /// Missing fields fall back to their defaults, so a partial config
    /// file is valid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = CollageConfig::default();

        assert_eq!(config.output_path, PathBuf::from("collage.png"));
        assert_eq!(config.target_height, 960);
        assert_eq!(config.margin, 10);
        assert_eq!(config.background_color, [225, 225, 225]);
        assert_eq!(config.images_per_row, 8);
    }

    #[test]
    fn test_serialization() {
        let mut config = CollageConfig::default();
        config.source_dir = PathBuf::from("flags");
        config.target_height = 300;
        config.images_per_row = 4;

        // Serialize to JSON
        let json = config.to_json().unwrap();

        // Deserialize back
        let restored = CollageConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CollageConfig::from_json(r#"{"target_height": 300}"#).unwrap();

        assert_eq!(config.target_height, 300);
        assert_eq!(config.margin, 10);
        assert_eq!(config.images_per_row, 8);
    }
}
