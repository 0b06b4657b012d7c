//! # `ImageDiff`
//!
//! Visual diffs of raster images, one scanline at a time.
//!
//! Every row of both images is encoded as a line of text, the two line
//! sequences are diffed with Myers, and the resulting edit script is
//! painted into a new image: removed rows tinted red, added rows tinted
//! green, unchanged rows copied through.
//!
//! ## Quick Start
//!
//! ```no_run
//! use imagediff::diff_files;
//!
//! let result = diff_files("before.png", "after.png")?;
//! println!("{}", result.summary());
//! result.write("diff.png")?;
//! # Ok::<(), imagediff::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use imagediff::prelude::*;
//!
//! // Now you have access to:
//! // - diff_images, diff_files, ImageDiff
//! // - EditScript, DiffEntry, DiffKind
//! // - Canvas, Pixel, RowToken
//! // - Error, Result
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `imagediff` command-line binary

pub mod codec;
pub mod compositor;
pub mod diff;
pub mod error;
pub mod pipeline;

// Re-exports for convenience
pub use error::{Error, Result};
pub use pipeline::{ImageDiff, diff_files, diff_files_to_png, diff_images, load_image};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::codec::{Pixel, Row, RowToken, decode_row, encode_image, encode_row};
    pub use crate::compositor::{Canvas, blend, render};
    pub use crate::diff::{DiffEntry, DiffKind, DiffStats, EditScript, diff_rows};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{ImageDiff, diff_files, diff_images, load_image};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
