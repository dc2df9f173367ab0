// The seam between orchestration and whichever service does the compression.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;

use crate::discover::extension_of;

/// Outcome of one shrink request.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrinkResult {
    /// Where the compressed image can be downloaded from.
    pub output_url: String,
    /// Compressed size divided by original size.
    pub ratio: f64,
}

impl ShrinkResult {
    /// Percentage of the original size saved, rounded to the nearest integer.
    ///
    /// A ratio above 1.0 means the "compressed" file grew; the result is then
    /// negative.
    pub fn percent_saved(&self) -> i64 {
        (100.0 * (1.0 - self.ratio)).round() as i64
    }
}

/// Something that accepts image bytes and hands back where the smaller
/// version lives.
pub trait CompressionProvider {
    /// Submit `body` with the given `content-type`.
    fn shrink(&self, body: Vec<u8>, content_type: &str) -> Result<ShrinkResult>;
}

/// MIME type sent for a file: PNG for `.png`, JPEG for everything else.
pub fn content_type_for(path: &Path) -> &'static str {
    match extension_of(path).as_deref().and_then(OsStr::to_str) {
        Some("png") => "image/png",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(ratio: f64) -> ShrinkResult {
        ShrinkResult {
            output_url: "https://x/y".into(),
            ratio,
        }
    }

    #[test]
    fn percent_saved_from_ratio() {
        assert_eq!(result(0.8).percent_saved(), 20);
        assert_eq!(result(0.8352).percent_saved(), 16);
        assert_eq!(result(0.0).percent_saved(), 100);
        assert_eq!(result(1.0).percent_saved(), 0);
    }

    #[test]
    fn growth_is_reported_as_negative_savings() {
        assert_eq!(result(1.05).percent_saved(), -5);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.webp")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("noext")), "image/jpeg");
        assert_eq!(content_type_for(Path::new(".png")), "image/png");
    }
}
