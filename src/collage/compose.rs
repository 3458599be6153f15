//! Collage composition
//!
//! Loads the resized images back from disk, draws each label centered
//! above its image, and composites everything onto one background-filled
//! canvas in grid order.

use ab_glyph::{FontRef, PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

use crate::collage::layout;
use crate::collage::resample::ResizedImage;
use crate::collage::LABEL_FONT_SIZE;
use crate::config::CollageConfig;
use crate::error::Error;

/// Embedded label font (DejaVu Sans Bold)
const LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");

/// Compose the labeled grid collage and save it as a PNG
///
/// Images are loaded in the given order; the grid is computed by
/// [`layout::plan`] from the loaded pixel sizes, and the same plan
/// drives canvas sizing and pasting.
///
/// An empty image list is rejected rather than producing a degenerate
/// canvas: layout arithmetic over an empty row is undefined.
pub fn create_collage(
    images: &[ResizedImage],
    output_path: &Path,
    config: &CollageConfig,
) -> Result<(), Error> {
    if images.is_empty() {
        return Err(Error::NoImages);
    }

    let font = FontRef::try_from_slice(LABEL_FONT).map_err(|_| Error::InvalidFont)?;
    let scale = PxScale::from(LABEL_FONT_SIZE as f32);

    let mut loaded: Vec<(String, RgbaImage)> = Vec::with_capacity(images.len());
    for img in images {
        loaded.push((img.label.clone(), image::open(&img.path)?.to_rgba8()));
    }

    let dimensions: Vec<(u32, u32)> = loaded
        .iter()
        .map(|(_, img)| (img.width(), img.height()))
        .collect();
    let grid = layout::plan(
        &dimensions,
        config.images_per_row,
        config.margin,
        LABEL_FONT_SIZE,
    );

    let [r, g, b] = config.background_color;
    // RGBA canvas even though the fill is opaque, so pasted images that
    // still carry alpha composite cleanly.
    let mut canvas = RgbaImage::from_pixel(
        grid.canvas_width,
        grid.canvas_height,
        Rgba([r, g, b, 255]),
    );

    let margin = config.margin;
    let mut y_offset: u32 = 0;
    for row in &grid.rows {
        let mut x_offset: u32 = 0;
        // Captions sit slightly above the row start; on the first row
        // this clips at the canvas top.
        let text_y = y_offset as i32 - (LABEL_FONT_SIZE / 4) as i32;

        for (label, img) in &loaded[row.start..row.end] {
            let text_width = text_size(scale, &font, label).0 as i32;
            let text_x = x_offset as i32 + (img.width() as i32 - text_width) / 2;
            draw_text_mut(
                &mut canvas,
                Rgba([0, 0, 0, 255]),
                text_x,
                text_y,
                scale,
                &font,
                label,
            );

            imageops::overlay(
                &mut canvas,
                img,
                x_offset as i64,
                (y_offset + LABEL_FONT_SIZE + margin / 2) as i64,
            );

            x_offset += img.width() + margin;
        }

        y_offset += row.max_image_height + LABEL_FONT_SIZE + margin;
    }

    canvas.save(output_path)?;
    println!("Collage saved to {}", output_path.display());

    Ok(())
}
