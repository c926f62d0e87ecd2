use anyhow::Context;
use image::{DynamicImage, GrayImage};

use crate::{
    foundation::error::{EdgeError, EdgeResult},
    raster::buffer::PixelBuffer,
};

impl PixelBuffer {
    /// Take ownership of an 8-bit luma image.
    pub fn from_luma8(img: GrayImage) -> EdgeResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(width as usize, height as usize, img.into_raw())
    }

    /// Convert any decoded image to 8-bit luma.
    pub fn from_dynamic(img: &DynamicImage) -> EdgeResult<Self> {
        Self::from_luma8(img.to_luma8())
    }

    /// Hand the samples back as an `image` luma buffer, ready for encoding.
    pub fn into_luma8(self) -> EdgeResult<GrayImage> {
        let width = u32::try_from(self.width())
            .context("pixel buffer width exceeds u32")
            .map_err(EdgeError::from)?;
        let height = u32::try_from(self.height())
            .context("pixel buffer height exceeds u32")
            .map_err(EdgeError::from)?;
        GrayImage::from_raw(width, height, self.into_raw())
            .ok_or_else(|| EdgeError::validation("pixel buffer does not match luma image shape"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/convert.rs"]
mod tests;
