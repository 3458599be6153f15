//! Grid layout arithmetic for the collage sheet
//!
//! The layout is computed once, up front, and the composer reads the
//! same numbers for canvas sizing and for pasting. Keeping a single
//! source of truth is what guarantees the two passes cannot misalign.

/// One horizontal group of images in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    /// Index of the first image in this row
    pub start: usize,
    /// One past the index of the last image in this row
    pub end: usize,
    /// Height of the tallest image in the row, in pixels
    pub max_image_height: u32,
    /// Row width: sum of image widths plus the margins between them
    pub width: u32,
}

/// The computed grid: row partition and overall canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct CollageLayout {
    /// Rows in reading order, each covering a slice of the image list
    pub rows: Vec<RowLayout>,
    /// Width of the widest row
    pub canvas_width: u32,
    /// Sum of row heights (tallest image + font size + margin each)
    /// plus an inter-row margin
    pub canvas_height: u32,
}

/// Partition the images into rows of at most `images_per_row` and size
/// the canvas
///
/// `dimensions` holds one (width, height) pair per image, in reading
/// order. Row height = tallest image in the row + font size + margin;
/// row width = image widths + margin × (count − 1); canvas width = the
/// widest row; canvas height = sum of row heights + margin × (rows − 1).
pub fn plan(
    dimensions: &[(u32, u32)],
    images_per_row: u32,
    margin: u32,
    font_size: u32,
) -> CollageLayout {
    let per_row = images_per_row.max(1) as usize;

    let mut rows = Vec::new();
    let mut start = 0;
    while start < dimensions.len() {
        let end = (start + per_row).min(dimensions.len());
        let row = &dimensions[start..end];
        rows.push(RowLayout {
            start,
            end,
            max_image_height: row.iter().map(|d| d.1).max().unwrap_or(0),
            width: row.iter().map(|d| d.0).sum::<u32>() + margin * (row.len() as u32 - 1),
        });
        start = end;
    }

    let canvas_width = rows.iter().map(|r| r.width).max().unwrap_or(0);
    let row_heights: u32 = rows
        .iter()
        .map(|r| r.max_image_height + font_size + margin)
        .sum();
    let canvas_height = row_heights + margin * (rows.len() as u32).saturating_sub(1);

    CollageLayout {
        rows,
        canvas_width,
        canvas_height,
    }
}
