//! CLI command for diffing two images

use std::path::Path;

use anyhow::Context;

use super::OutputFormat;
use crate::pipeline::{ImageDiff, diff_images, load_image};

/// Diff two images and write the result as PNG
pub fn compare(
    image1: &Path,
    image2: &Path,
    output: &Path,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let old = load_image(image1)
        .with_context(|| format!("Failed to load image: {}", image1.display()))?;
    let new = load_image(image2)
        .with_context(|| format!("Failed to load image: {}", image2.display()))?;

    let result = diff_images(&old, &new)?;
    result
        .write(output)
        .with_context(|| format!("Failed to write diff image: {}", output.display()))?;

    if quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let summary = summary_json(image1, image2, output, &result);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("{result}");
            println!("Wrote diff to: {}", output.display());
        }
    }

    Ok(())
}

fn summary_json(
    image1: &Path,
    image2: &Path,
    output: &Path,
    result: &ImageDiff,
) -> serde_json::Value {
    let (width, height) = result.dimensions();
    serde_json::json!({
        "image1": image1.display().to_string(),
        "image2": image2.display().to_string(),
        "output": output.display().to_string(),
        "width": width,
        "height": height,
        "identical": result.is_identical(),
        "rows": result.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    #[test]
    fn test_summary_json_fields() {
        let old = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let new = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 3, Rgba([1, 2, 3, 255])));
        let result = diff_images(&old, &new).unwrap();

        let (a, b, d) = (Path::new("a.png"), Path::new("b.png"), Path::new("d.png"));
        let json = summary_json(a, b, d, &result);
        assert_eq!(json["width"], 2);
        assert_eq!(json["height"], 3);
        assert_eq!(json["identical"], false);
        assert_eq!(json["rows"]["equal"], 2);
        assert_eq!(json["rows"]["inserted"], 1);
        assert_eq!(json["rows"]["deleted"], 0);
    }

    #[test]
    fn test_compare_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        let out = dir.path().join("diff.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255])).save(&a).unwrap();
        RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 255])).save(&b).unwrap();

        compare(&a, &b, &out, OutputFormat::Text, true).unwrap();
        let written = image::open(&out).unwrap();
        assert_eq!((written.width(), written.height()), (3, 2));
    }

    #[test]
    fn test_compare_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let out = dir.path().join("diff.png");

        let err = compare(&missing, &missing, &out, OutputFormat::Text, true).unwrap_err();
        assert!(err.to_string().contains("Failed to load image"));
        assert!(!out.exists());
    }
}
