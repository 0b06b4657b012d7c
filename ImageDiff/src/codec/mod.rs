//! Scanline encoding
//!
//! Rows of 16-bit premultiplied pixels are turned into opaque single-line
//! ASCII tokens so that a line differ can compare whole scanlines.
//!
//! ```
//! use imagediff::codec::{decode_row, encode_row, Pixel};
//!
//! let row = vec![Pixel::new(0xFFFF, 0, 0, 0xFFFF), Pixel::TRANSPARENT];
//! let token = encode_row(&row);
//! assert_eq!(decode_row(&token)?, row);
//! # Ok::<(), imagediff::Error>(())
//! ```

mod pixel;
mod row;

use image::DynamicImage;
use rayon::prelude::*;

pub use pixel::{CHANNEL_MAX, Pixel, Rgba16Image, Row, image_rows, row_from_samples, to_rgba16};
pub use row::{PIXEL_STRIDE, RowToken, decode_row, encode_row};

/// Encode every scanline of an image, top to bottom.
///
/// Rows are encoded in parallel; the returned order always matches the
/// image's row order.
#[must_use]
pub fn encode_image(img: &DynamicImage) -> Vec<RowToken> {
    let buffer = to_rgba16(img);
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width == 0 {
        return vec![encode_row(&[]); height];
    }

    buffer
        .as_raw()
        .par_chunks_exact(width * 4)
        .map(|samples| encode_row(&row_from_samples(samples)))
        .collect()
}
