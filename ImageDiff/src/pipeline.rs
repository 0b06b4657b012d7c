//! Image diff pipeline
//!
//! Encodes both images row by row, diffs the rows and paints the result.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::codec::encode_image;
use crate::compositor::{Canvas, render};
use crate::diff::{DiffStats, EditScript, diff_rows};
use crate::error::{Error, Result};

/// Result of diffing two images
#[derive(Debug, Clone)]
pub struct ImageDiff {
    /// One entry per output row
    pub script: EditScript,
    /// The painted diff
    pub canvas: Canvas,
}

impl ImageDiff {
    /// True when both images have the same rows
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.script.is_identical()
    }

    #[must_use]
    pub fn stats(&self) -> DiffStats {
        self.script.stats()
    }

    /// Output dimensions (width, height)
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.script.summary()
    }

    /// Write the diff image to a PNG file
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        tracing::info!("Writing diff image: {:?}", path.as_ref());
        self.canvas.write_png(path)
    }
}

/// One-line report, e.g. `1 row(s) removed, 2 row(s) added, 5 unchanged (640x8)`
impl fmt::Display for ImageDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        if self.is_identical() {
            write!(f, "Images are identical ({width}x{height})")
        } else {
            write!(f, "{} ({width}x{height})", self.summary())
        }
    }
}

/// Diff two decoded images
///
/// The output is as wide as the wider input and has one row per script
/// entry.
///
/// # Errors
/// Returns an error only if a row token fails to decode, which means the
/// encode/diff/decode chain is out of sync.
pub fn diff_images(old: &DynamicImage, new: &DynamicImage) -> Result<ImageDiff> {
    let (old_width, old_height) = old.dimensions();
    let (new_width, new_height) = new.dimensions();
    tracing::info!(
        "Diffing {}x{} against {}x{}",
        old_width,
        old_height,
        new_width,
        new_height
    );

    let old_rows = encode_image(old);
    let new_rows = encode_image(new);

    let script = diff_rows(&old_rows, &new_rows);
    let stats = script.stats();
    tracing::debug!(
        "Edit script: {} entries ({} equal, {} inserted, {} deleted)",
        script.len(),
        stats.equal,
        stats.inserted,
        stats.deleted
    );

    let canvas = render(&script, old_width.max(new_width))?;
    Ok(ImageDiff { script, canvas })
}

/// Load an image from disk, guessing the format from its contents
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    tracing::debug!("Loading image: {}", path.display());
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| Error::ImageOpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Diff two image files
///
/// # Errors
/// Returns an error if either file cannot be loaded.
pub fn diff_files<P: AsRef<Path>, Q: AsRef<Path>>(old: P, new: Q) -> Result<ImageDiff> {
    let old_img = load_image(old)?;
    let new_img = load_image(new)?;
    diff_images(&old_img, &new_img)
}

/// Diff two image files and write the diff as PNG
///
/// # Errors
/// Returns an error if loading, diffing or writing fails.
pub fn diff_files_to_png<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    old: P,
    new: Q,
    output: R,
) -> Result<ImageDiff> {
    let result = diff_files(old, new)?;
    result.write(output)?;
    Ok(result)
}
