//! 16-bit premultiplied pixels and scanline extraction

use image::{DynamicImage, ImageBuffer, Rgba};

/// Maximum value of a 16-bit channel.
pub const CHANNEL_MAX: u16 = 0xFFFF;

/// One 16-bit RGBA pixel with premultiplied alpha.
///
/// Images are widened to 16 bits per channel before premultiplying, so
/// 8-bit sources land on `v * 257` exactly like the other 16-bit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

/// A single scanline, one pixel per column.
pub type Row = Vec<Pixel>;

/// A 16-bit RGBA buffer with straight (non-premultiplied) alpha.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

impl Pixel {
    /// Fully transparent black, the canvas background.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Build a premultiplied pixel from straight-alpha channels.
    ///
    /// Both directions round to nearest, so a straight -> premultiplied ->
    /// straight trip is off by at most one step of `65535 / a`.
    #[must_use]
    pub fn from_straight(rgba: Rgba<u16>) -> Self {
        let [r, g, b, a] = rgba.0;
        let a32 = u32::from(a);
        let max = u32::from(CHANNEL_MAX);
        let scale = |c: u16| ((u32::from(c) * a32 + max / 2) / max) as u16;
        Self::new(scale(r), scale(g), scale(b), a)
    }

    /// Undo premultiplication for storage in straight-alpha formats like PNG.
    #[must_use]
    pub fn to_straight(self) -> Rgba<u16> {
        match self.a {
            CHANNEL_MAX => Rgba([self.r, self.g, self.b, self.a]),
            0 => Rgba([0, 0, 0, 0]),
            a => {
                let a32 = u32::from(a);
                let max = u32::from(CHANNEL_MAX);
                let unscale = |c: u16| ((u32::from(c) * max + a32 / 2) / a32).min(max) as u16;
                Rgba([unscale(self.r), unscale(self.g), unscale(self.b), a])
            }
        }
    }

    /// Channels in R, G, B, A order
    #[must_use]
    pub const fn channels(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[must_use]
    pub const fn from_channels([r, g, b, a]: [u16; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Widen any decoded image to 16-bit straight RGBA.
#[must_use]
pub fn to_rgba16(img: &DynamicImage) -> Rgba16Image {
    img.to_rgba16()
}

/// Convert one row of raw straight-alpha samples (4 per pixel) into pixels.
#[must_use]
pub fn row_from_samples(samples: &[u16]) -> Row {
    samples
        .chunks_exact(4)
        .map(|px| Pixel::from_straight(Rgba([px[0], px[1], px[2], px[3]])))
        .collect()
}

/// Extract every scanline of an image as premultiplied rows.
#[must_use]
pub fn image_rows(img: &DynamicImage) -> Vec<Row> {
    let buffer = to_rgba16(img);
    let width = buffer.width() as usize;
    if width == 0 {
        return vec![Row::new(); buffer.height() as usize];
    }
    buffer
        .as_raw()
        .chunks_exact(width * 4)
        .map(row_from_samples)
        .collect()
}
