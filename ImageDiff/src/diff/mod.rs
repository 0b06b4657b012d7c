//! Row-level diffing
//!
//! Treats every encoded scanline as one line of text and computes a Myers
//! edit script over them.
//!
//! ```
//! use imagediff::codec::{encode_row, Pixel};
//! use imagediff::diff::{diff_rows, DiffKind};
//!
//! let black = encode_row(&[Pixel::new(0, 0, 0, 0xFFFF)]);
//! let white = encode_row(&[Pixel::new(0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF)]);
//!
//! let script = diff_rows(&[black.clone()], &[black, white]);
//! assert_eq!(script.kinds(), vec![DiffKind::Equal, DiffKind::Insert]);
//! ```

mod line_diff;
mod row_table;
mod types;

pub use line_diff::{diff_rows, normalize};
pub use types::{DiffBlock, DiffEntry, DiffKind, DiffStats, EditScript};
