use crate::Result;
use image::DynamicImage;

/// Turns cached file bytes into a bitmap.
pub trait ImageDecoder: Send + Sync + 'static {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage>;
}

/// Decodes PNG and JPEG through the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        Ok(image::load_from_memory(data)?)
    }
}
