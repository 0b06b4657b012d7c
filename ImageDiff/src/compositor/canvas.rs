//! Output canvas

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageBuffer};

use crate::codec::{Pixel, Rgba16Image};
use crate::error::{Error, Result};

/// Premultiplied 16-bit raster the diff is painted into.
///
/// Starts out fully transparent black. Only the compositor writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; width as usize * height as usize],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at (x, y), `None` outside the canvas
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// One full canvas row
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        self.pixels.get(start..start + self.width as usize)
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> Option<&mut [Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        let end = start + self.width as usize;
        self.pixels.get_mut(start..end)
    }

    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to a straight-alpha 16-bit RGBA image for encoding.
    pub fn to_image(&self) -> Result<DynamicImage> {
        let samples: Vec<u16> = self
            .pixels
            .iter()
            .flat_map(|px| px.to_straight().0)
            .collect();
        let buffer: Rgba16Image = ImageBuffer::from_raw(self.width, self.height, samples)
            .ok_or(Error::ImageBufferFailed)?;
        Ok(DynamicImage::ImageRgba16(buffer))
    }

    /// Write the canvas as a 16-bit PNG file
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or encoding fails.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut output = BufWriter::new(File::create(path.as_ref())?);
        self.write_png_to(&mut output)?;
        output.flush()?;
        Ok(())
    }

    fn write_png_to<W: Write>(&self, writer: W) -> Result<()> {
        let img = self.to_image()?;
        let encoder = PngEncoder::new(writer);
        img.write_with_encoder(encoder)
            .map_err(|e| Error::PngEncodeFailed {
                message: e.to_string(),
            })
    }
}
