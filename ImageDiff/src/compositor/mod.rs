//! Diff compositing
//!
//! Paints an edit script into a canvas, one script entry per canvas row.
//! Deleted rows get a red tint, inserted rows a green one, equal rows are
//! copied as they are.

mod canvas;

pub use canvas::Canvas;

use crate::codec::{CHANNEL_MAX, Pixel, decode_row};
use crate::diff::{DiffKind, EditScript};
use crate::error::{Error, Result};

/// Overlay alpha for highlighted rows (a quarter of full scale)
pub const OVERLAY_ALPHA: u16 = 0x4000;

/// Tint for rows only in the first image
pub const DELETE_OVERLAY: Pixel = Pixel::new(CHANNEL_MAX, 0, 0, OVERLAY_ALPHA);

/// Tint for rows only in the second image
pub const INSERT_OVERLAY: Pixel = Pixel::new(0, CHANNEL_MAX, 0, OVERLAY_ALPHA);

/// Overlay for a diff kind, `None` for rows that pass through
#[must_use]
pub const fn overlay_for(kind: DiffKind) -> Option<Pixel> {
    match kind {
        DiffKind::Delete => Some(DELETE_OVERLAY),
        DiffKind::Insert => Some(INSERT_OVERLAY),
        DiffKind::Equal => None,
    }
}

/// Source-over blend of `overlay` onto `dest`.
///
/// Colour channels are mixed by the overlay's alpha. The result is always
/// fully opaque, whatever the destination alpha was.
#[must_use]
pub fn blend(dest: Pixel, overlay: Pixel) -> Pixel {
    let a = f64::from(overlay.a) / f64::from(CHANNEL_MAX);
    let mix = |src: u16, dst: u16| (f64::from(src) * a + f64::from(dst) * (1.0 - a)) as u16;

    Pixel::new(
        mix(overlay.r, dest.r),
        mix(overlay.g, dest.g),
        mix(overlay.b, dest.b),
        CHANNEL_MAX,
    )
}

/// Render an edit script into a canvas of the given width.
///
/// Row `y` of the canvas is entry `y` of the script. Columns past a decoded
/// row's own width stay transparent black.
///
/// # Errors
/// Returns [`Error::MalformedToken`] if any entry fails to decode, or
/// [`Error::ImageBufferFailed`] if the script is too long for a canvas.
pub fn render(script: &EditScript, width: u32) -> Result<Canvas> {
    let height = u32::try_from(script.len()).map_err(|_| Error::ImageBufferFailed)?;
    let mut canvas = Canvas::new(width, height);

    for (y, entry) in (0..height).zip(script) {
        let pixels = decode_row(&entry.token)?;
        let overlay = overlay_for(entry.kind);
        let Some(target) = canvas.row_mut(y) else {
            break;
        };

        for (slot, &pixel) in target.iter_mut().zip(&pixels) {
            *slot = match overlay {
                Some(tint) => blend(pixel, tint),
                None => pixel,
            };
        }
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{RowToken, encode_row};
    use crate::diff::DiffEntry;

    const WHITE: Pixel = Pixel::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX);

    fn entry(kind: DiffKind, row: &[Pixel]) -> DiffEntry {
        DiffEntry::new(kind, encode_row(row))
    }

    fn close(actual: u16, expected: f64) -> bool {
        (f64::from(actual) - expected).abs() <= 1.0
    }

    #[test]
    fn test_blend_white_with_red() {
        let out = blend(WHITE, DELETE_OVERLAY);
        assert!(close(out.r, f64::from(0xFFFF_u16)));
        assert!(close(out.g, f64::from(0xFFFF_u16) * 0.75));
        assert!(close(out.b, f64::from(0xFFFF_u16) * 0.75));
        assert_eq!(out.a, 0xFFFF);
    }

    #[test]
    fn test_blend_black_with_green() {
        let out = blend(Pixel::new(0, 0, 0, CHANNEL_MAX), INSERT_OVERLAY);
        assert_eq!(out.r, 0);
        assert!(close(out.g, f64::from(0xFFFF_u16) * 0.25));
        assert_eq!(out.b, 0);
    }

    #[test]
    fn test_blend_forces_opaque() {
        let out = blend(Pixel::TRANSPARENT, DELETE_OVERLAY);
        assert_eq!(out.a, CHANNEL_MAX);
        assert!(close(out.r, f64::from(0xFFFF_u16) * 0.25));
    }

    #[test]
    fn test_render_tints_by_kind() {
        let script = EditScript::new(vec![
            entry(DiffKind::Equal, &[WHITE]),
            entry(DiffKind::Delete, &[WHITE]),
            entry(DiffKind::Insert, &[WHITE]),
        ]);
        let canvas = render(&script, 1).unwrap();

        assert_eq!(canvas.dimensions(), (1, 3));
        assert_eq!(canvas.get(0, 0), Some(WHITE));
        assert_eq!(canvas.get(0, 1), Some(blend(WHITE, DELETE_OVERLAY)));
        assert_eq!(canvas.get(0, 2), Some(blend(WHITE, INSERT_OVERLAY)));
    }

    #[test]
    fn test_equal_rows_keep_alpha() {
        let translucent = Pixel::new(0x1000, 0x2000, 0x3000, 0x4000);
        let script = EditScript::new(vec![entry(DiffKind::Equal, &[translucent])]);
        let canvas = render(&script, 1).unwrap();
        assert_eq!(canvas.get(0, 0), Some(translucent));
    }

    #[test]
    fn test_narrow_rows_leave_columns_transparent() {
        let script = EditScript::new(vec![
            entry(DiffKind::Delete, &[WHITE; 2]),
            entry(DiffKind::Insert, &[WHITE; 4]),
        ]);
        let canvas = render(&script, 4).unwrap();

        let first = canvas.row(0).unwrap();
        assert!(first[..2].iter().all(|px| px.a == CHANNEL_MAX));
        assert!(first[2..].iter().all(|&px| px == Pixel::TRANSPARENT));
        assert!(canvas.row(1).unwrap().iter().all(|px| px.a == CHANNEL_MAX));
    }

    #[test]
    fn test_malformed_token_aborts() {
        let script = EditScript::new(vec![
            entry(DiffKind::Equal, &[WHITE]),
            DiffEntry::new(DiffKind::Insert, RowToken::from_line("%%")),
        ]);
        let err = render(&script, 1).unwrap_err();
        assert!(matches!(err, Error::MalformedToken { .. }));
    }

    #[test]
    fn test_empty_script() {
        let canvas = render(&EditScript::default(), 7).unwrap();
        assert_eq!(canvas.dimensions(), (7, 0));
    }
}
