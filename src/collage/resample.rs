//! Supersample resizing of the source images
//!
//! Every PNG in the source folder is resized to one display height with
//! a fixed four-step recipe: bicubic upscale to twice the target size,
//! flatten to opaque RGB, small Gaussian blur to suppress upscaling
//! aliasing, bicubic downscale to the target size.

use image::{imageops, imageops::FilterType, DynamicImage, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Error;

/// One resized image, ready for compositing
#[derive(Debug, Clone)]
pub struct ResizedImage {
    /// Caption drawn above the image (source file name without extension)
    pub label: String,
    /// Temporary file holding the resized pixels
    pub path: PathBuf,
    /// Width in pixels, following the source aspect ratio
    pub width: u32,
    /// Height in pixels, always the target height
    pub height: u32,
}

/// The ordered list of resized images produced by one run
///
/// Owns the temporary `resized_*` files backing the images. The files
/// are removed by [`cleanup`](Self::cleanup) at the end of a successful
/// run, or by `Drop` when the run aborts partway, so an interrupted run
/// leaves nothing behind next to the sources.
pub struct ResizedBatch {
    images: Vec<ResizedImage>,
}

impl ResizedBatch {
    /// The resized images, in collage reading order
    pub fn images(&self) -> &[ResizedImage] {
        &self.images
    }

    /// Whether the source folder contained no PNGs
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of resized images in the batch
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Remove every temporary file and consume the batch
    pub fn cleanup(mut self) -> Result<(), Error> {
        for img in self.images.drain(..) {
            fs::remove_file(&img.path)?;
        }
        Ok(())
    }
}

impl Drop for ResizedBatch {
    fn drop(&mut self) {
        // Removal errors are ignored: drop runs on the failure path,
        // and the original error is the one worth reporting.
        for img in &self.images {
            let _ = fs::remove_file(&img.path);
        }
    }
}

/// Resize every PNG in `folder` to `target_height`, preserving aspect ratio
///
/// Entries are processed in ascending file name order, which fixes the
/// reading order of the collage. Each result is written to a
/// `resized_<name>` file in the same folder; the returned batch owns
/// those files.
///
/// # Arguments
/// * `folder` - Existing directory containing the source PNGs
/// * `target_height` - Display height of every resized image, in pixels
/// * `background` - Opaque RGB fill flattened beneath transparent images
pub fn resize_images(
    folder: &Path,
    target_height: u32,
    background: [u8; 3],
) -> Result<ResizedBatch, Error> {
    println!("🔍 Scanning folder: {}", folder.display());

    let mut batch = ResizedBatch { images: Vec::new() };

    for path in png_entries(folder) {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // A decode failure aborts the run; the batch drop removes any
        // temporary files already written for earlier entries.
        let img = image::open(&path)?;

        // Flatten transparency onto the solid background before
        // resizing. Palette PNGs with a transparency entry decode to
        // RGBA, so the same check covers them.
        let working = if img.color().has_alpha() {
            flatten_onto_background(&img, background)
        } else {
            img.to_rgba8()
        };

        let resized = supersample_resize(&working, target_height);

        let temp_path = folder.join(format!("resized_{}", file_name));
        resized.save(&temp_path)?;

        println!("   → {}: {}x{}", label, resized.width(), resized.height());

        batch.images.push(ResizedImage {
            label,
            path: temp_path,
            width: resized.width(),
            height: resized.height(),
        });
    }

    Ok(batch)
}

/// List the top-level `.png` entries of the folder, sorted by file name
fn png_entries(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false)
        })
        .collect()
}

/// Composite an image onto an opaque single-color background of its own size
fn flatten_onto_background(img: &DynamicImage, background: [u8; 3]) -> RgbaImage {
    let [r, g, b] = background;
    let mut solid = RgbaImage::from_pixel(img.width(), img.height(), Rgba([r, g, b, 255]));
    imageops::overlay(&mut solid, &img.to_rgba8(), 0, 0);
    solid
}

/// The fixed four-step resampling recipe
///
/// 1. Bicubic upscale to twice the target size
/// 2. Drop the alpha channel so the blur operates on opaque color
/// 3. Gaussian blur (radius 0.5) against upscaling aliasing
/// 4. Bicubic downscale to the target size
///
/// The step order is fixed; reordering changes the output.
fn supersample_resize(img: &RgbaImage, target_height: u32) -> RgbImage {
    let aspect_ratio = img.width() as f64 / img.height() as f64;
    // Extreme aspect ratios could round the width down to zero, which
    // the PNG encoder rejects.
    let new_width = ((target_height as f64 * aspect_ratio).round() as u32).max(1);

    let upscaled = imageops::resize(
        img,
        new_width * 2,
        target_height * 2,
        FilterType::CatmullRom,
    );
    let opaque = DynamicImage::ImageRgba8(upscaled).into_rgb8();
    let blurred = imageops::blur(&opaque, 0.5);
    imageops::resize(&blurred, new_width, target_height, FilterType::CatmullRom)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a solid-color RGBA PNG fixture into `dir`
    fn write_png(dir: &Path, name: &str, width: u32, height: u32, pixel: Rgba<u8>) {
        RgbaImage::from_pixel(width, height, pixel)
            .save(dir.join(name))
            .unwrap();
    }

    fn opaque_red() -> Rgba<u8> {
        Rgba([200, 30, 30, 255])
    }

    #[test]
    fn test_resizes_to_target_height_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        // Written out of order on purpose: the batch must come back
        // sorted by file name.
        write_png(dir.path(), "b.png", 100, 50, opaque_red());
        write_png(dir.path(), "a.png", 50, 50, opaque_red());
        write_png(dir.path(), "c.png", 200, 100, opaque_red());

        let batch = resize_images(dir.path(), 100, [225, 225, 225]).unwrap();

        let labels: Vec<&str> = batch.images().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);

        let dims: Vec<(u32, u32)> = batch.images().iter().map(|i| (i.width, i.height)).collect();
        assert_eq!(dims, vec![(100, 100), (200, 100), (200, 100)]);

        for img in batch.images() {
            assert!(img.path.exists());
            assert!(img
                .path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("resized_"));
            assert_eq!(img.path.parent().unwrap(), dir.path());
        }
    }

    #[test]
    fn test_width_follows_rounded_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        // 5:3 aspect, target 100 -> 166.66.. rounds up to 167
        write_png(dir.path(), "wide.png", 5, 3, opaque_red());

        let batch = resize_images(dir.path(), 100, [225, 225, 225]).unwrap();

        assert_eq!(batch.images()[0].width, 167);
        assert_eq!(batch.images()[0].height, 100);
    }

    #[test]
    fn test_ignores_non_png_entries() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "flag.PNG", 20, 20, opaque_red());
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_png(&dir.path().join("nested"), "inner.png", 20, 20, opaque_red());

        let batch = resize_images(dir.path(), 10, [225, 225, 225]).unwrap();

        // Uppercase extension accepted, text file and nested folder skipped
        let labels: Vec<&str> = batch.images().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["flag"]);
    }

    #[test]
    fn test_empty_folder_returns_empty_batch() {
        let dir = tempfile::tempdir().unwrap();

        let batch = resize_images(dir.path(), 100, [225, 225, 225]).unwrap();

        assert!(batch.is_empty());
    }

    #[test]
    fn test_flattens_transparency_onto_background() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "clear.png", 16, 16, Rgba([0, 0, 0, 0]));

        let batch = resize_images(dir.path(), 8, [225, 225, 225]).unwrap();

        let out = image::open(&batch.images()[0].path).unwrap().to_rgba8();
        for pixel in out.pixels() {
            // The blur keeps a constant image constant, so every pixel
            // is the background fill (give the filters 1 unit of slack).
            assert!(pixel[0].abs_diff(225) <= 1);
            assert!(pixel[1].abs_diff(225) <= 1);
            assert!(pixel[2].abs_diff(225) <= 1);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn test_cleanup_removes_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 10, 10, opaque_red());

        let batch = resize_images(dir.path(), 10, [225, 225, 225]).unwrap();
        let temp_path = batch.images()[0].path.clone();
        assert!(temp_path.exists());

        batch.cleanup().unwrap();

        assert!(!temp_path.exists());
        // The source itself stays
        assert!(dir.path().join("a.png").exists());
    }

    #[test]
    fn test_drop_removes_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 10, 10, opaque_red());

        let batch = resize_images(dir.path(), 10, [225, 225, 225]).unwrap();
        let temp_path = batch.images()[0].path.clone();
        assert!(temp_path.exists());

        drop(batch);

        assert!(!temp_path.exists());
    }

    #[test]
    fn test_decode_failure_cleans_up_earlier_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 10, 10, opaque_red());
        fs::write(dir.path().join("b.png"), b"definitely not a png").unwrap();

        let result = resize_images(dir.path(), 10, [225, 225, 225]);

        assert!(result.is_err());
        // a.png was resized before b.png failed; its temp file must be gone
        assert!(!dir.path().join("resized_a.png").exists());
    }
}
