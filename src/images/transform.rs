use std::io::Cursor;

use image::imageops::FilterType;
use imgforged_common::{Dimensions, Error, Result};

/// Resizes encoded image bytes to a target size.
pub trait Transformer: Send + Sync {
    /// Produce encoded bytes at exactly `target`, or fail.
    fn transform(&self, source: &[u8], target: Dimensions) -> Result<Vec<u8>>;
}

/// [`Transformer`] backed by the `image` crate.
///
/// The source is scaled to cover the target and centre-cropped to it, then
/// re-encoded in the same format it was read in.
#[derive(Debug, Clone, Copy)]
pub struct ImageTransformer {
    filter: FilterType,
}

impl ImageTransformer {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for ImageTransformer {
    fn default() -> Self {
        Self::new(FilterType::Lanczos3)
    }
}

impl Transformer for ImageTransformer {
    fn transform(&self, source: &[u8], target: Dimensions) -> Result<Vec<u8>> {
        let format = image::guess_format(source)
            .map_err(|e| Error::transform(format!("Unrecognised image data: {}", e)))?;

        let img = image::load_from_memory_with_format(source, format)
            .map_err(|e| Error::transform(format!("Failed to decode image: {}", e)))?;

        let resized = img.resize_to_fill(target.width, target.height, self.filter);

        let mut buf = Cursor::new(Vec::new());
        resized
            .write_to(&mut buf, format)
            .map_err(|e| Error::transform(format!("Failed to encode image: {}", e)))?;

        Ok(buf.into_inner())
    }
}
