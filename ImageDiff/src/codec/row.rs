//! Row tokens - lossless single-line encoding of one scanline
//!
//! Each pixel is written as four big-endian 32-bit words (R, G, B, A) and the
//! whole buffer is encoded as URL-safe base64 without padding. The alphabet
//! has no newline, so a token is always exactly one line for the differ.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use byteorder::{BigEndian, ByteOrder};

use super::pixel::{Pixel, Row};
use crate::error::{Error, Result};

/// Bytes per channel word
const CHANNEL_BYTES: usize = 4;

/// Bytes per encoded pixel (four channel words)
pub const PIXEL_STRIDE: usize = CHANNEL_BYTES * 4;

/// Opaque encoded scanline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RowToken(String);

impl RowToken {
    /// Rebuild a token from one line of a diff block.
    pub(crate) fn from_line(line: &str) -> Self {
        Self(line.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for RowToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode one scanline into a row token.
#[must_use]
pub fn encode_row(row: &[Pixel]) -> RowToken {
    let mut buffer = vec![0u8; row.len() * PIXEL_STRIDE];
    for (pixel, group) in row.iter().zip(buffer.chunks_exact_mut(PIXEL_STRIDE)) {
        BigEndian::write_u32_into(&pixel.channels().map(u32::from), group);
    }
    RowToken(BASE64.encode(&buffer))
}

/// Decode a row token back into pixels.
///
/// # Errors
/// Returns [`Error::MalformedToken`] if the token is not valid unpadded
/// URL-safe base64, does not hold a whole number of pixels, or carries a
/// channel value that does not fit in 16 bits.
pub fn decode_row(token: &RowToken) -> Result<Row> {
    let bytes = BASE64.decode(token.as_str()).map_err(|e| Error::MalformedToken {
        message: format!("invalid base64: {e}"),
    })?;

    if bytes.len() % PIXEL_STRIDE != 0 {
        return Err(Error::MalformedToken {
            message: format!(
                "{} bytes is not a multiple of the {PIXEL_STRIDE}-byte pixel stride",
                bytes.len()
            ),
        });
    }

    let mut row = Row::with_capacity(bytes.len() / PIXEL_STRIDE);
    let mut words = [0u32; 4];
    for (column, group) in bytes.chunks_exact(PIXEL_STRIDE).enumerate() {
        BigEndian::read_u32_into(group, &mut words);
        let mut channels = [0u16; 4];
        for (channel, &word) in channels.iter_mut().zip(&words) {
            *channel = u16::try_from(word).map_err(|_| Error::MalformedToken {
                message: format!("channel value {word:#x} at column {column} exceeds 16 bits"),
            })?;
        }
        row.push(Pixel::from_channels(channels));
    }

    Ok(row)
}
