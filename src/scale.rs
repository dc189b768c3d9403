//! Downscaling hook used before histogram construction.
//!
//! Resampling is left to the caller: `generate` only decides whether and
//! to what size an image should shrink, then hands the work to a
//! [`Scaler`].

use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

use crate::error::BoxError;

/// An image resampling algorithm.
pub trait Scaler: Send + Sync {
    /// Resample `img` to exactly `width` x `height`.
    fn scale(
        &self,
        img: ImgRef<'_, RGBA8>,
        width: usize,
        height: usize,
    ) -> Result<ImgVec<RGBA8>, BoxError>;
}

/// Target size for an image of `width` x `height` so that its area does
/// not exceed `resize_area`, keeping the aspect ratio.
///
/// Returns `None` when `resize_area` is 0 or the image is already small
/// enough.
pub fn resize_dimensions(width: usize, height: usize, resize_area: u64) -> Option<(usize, usize)> {
    let area = width as u64 * height as u64;
    if resize_area == 0 || area <= resize_area {
        return None;
    }
    let ratio = (resize_area as f64 / area as f64).sqrt();
    let scaled = |v: usize| ((v as f64 * ratio).ceil() as usize).clamp(1, v);
    Some((scaled(width), scaled(height)))
}

#[cfg(feature = "image")]
pub use self::image_scaler::ImageScaler;

#[cfg(feature = "image")]
mod image_scaler {
    use image::imageops::{self, FilterType};
    use image::{Rgba, RgbaImage};
    use imgref::{ImgRef, ImgVec};
    use rgb::RGBA8;

    use super::Scaler;
    use crate::error::BoxError;

    /// [`Scaler`] backed by `image::imageops::resize`.
    #[derive(Debug, Clone, Copy)]
    pub struct ImageScaler {
        filter: FilterType,
    }

    impl ImageScaler {
        pub fn new(filter: FilterType) -> Self {
            Self { filter }
        }
    }

    impl Default for ImageScaler {
        fn default() -> Self {
            Self::new(FilterType::Triangle)
        }
    }

    impl Scaler for ImageScaler {
        fn scale(
            &self,
            img: ImgRef<'_, RGBA8>,
            width: usize,
            height: usize,
        ) -> Result<ImgVec<RGBA8>, BoxError> {
            let src = to_rgba_image(img)?;
            let (w, h) = (u32::try_from(width)?, u32::try_from(height)?);
            let out = imageops::resize(&src, w, h, self.filter);
            let pixels = out
                .pixels()
                .map(|Rgba([r, g, b, a])| RGBA8::new(*r, *g, *b, *a))
                .collect();
            Ok(ImgVec::new(pixels, out.width() as usize, out.height() as usize))
        }
    }

    fn to_rgba_image(img: ImgRef<'_, RGBA8>) -> Result<RgbaImage, BoxError> {
        let mut buf = Vec::with_capacity(img.width() * img.height() * 4);
        for row in img.rows() {
            for px in row {
                buf.extend_from_slice(&[px.r, px.g, px.b, px.a]);
            }
        }
        let (w, h) = (u32::try_from(img.width())?, u32::try_from(img.height())?);
        RgbaImage::from_raw(w, h, buf)
            .ok_or_else(|| "pixel buffer does not match image size".into())
    }
}
