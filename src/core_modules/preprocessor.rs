// THEORY:
// The `preprocessor` is the first stage of detection. It reduces a color image to
// the two-valued `BinaryMask` the region extractor works on.
//
// Key architectural principles:
// 1.  **Two Steps, One Pass**: grayscale reduction (`Pixel::luminance`) and the fixed
//     threshold are applied per pixel in a single pass, so no intermediate gray
//     image is ever allocated.
// 2.  **Strictly Greater**: a pixel is foreground only when its luminance is
//     strictly greater than the threshold. The threshold is an `i32` and is not
//     clamped: any negative value marks every pixel foreground and any value of
//     255 or more marks none.
// 3.  **Stateless**: nothing is remembered between calls. The mask has exactly the
//     dimensions of its source.

pub mod preprocessor {
    use crate::core_modules::binary_mask::binary_mask::{BinaryMask, BACKGROUND, FOREGROUND};
    use crate::core_modules::pixel::pixel::{Pixel, CHANNELS};
    use crate::core_modules::utils::image_helper::image_helper::{
        ensure_non_empty, ensure_rgba_buffer,
    };
    use crate::error::{VisionError, VisionResult};
    use image::{GenericImageView, GrayImage, Luma, Pixel as _};
    use tracing::debug;

    #[inline]
    fn classify(pixel: Pixel, threshold: i32) -> u8 {
        if i32::from(pixel.luminance()) > threshold {
            FOREGROUND
        } else {
            BACKGROUND
        }
    }

    /// Converts any 8-bit image (gray, RGB, RGBA, `DynamicImage`) to a binary mask.
    pub fn binarize<I>(image: &I, threshold: i32) -> VisionResult<BinaryMask>
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        ensure_non_empty(width, height)?;

        let mask = GrayImage::from_fn(width, height, |x, y| {
            let pixel = Pixel::from(image.get_pixel(x, y).to_rgba());
            Luma([classify(pixel, threshold)])
        });

        debug!(width, height, threshold, "binarized image");
        Ok(BinaryMask::from_binarized(mask))
    }

    /// Same as [`binarize`] for a raw row-major RGBA frame buffer.
    pub fn binarize_rgba(
        frame_buffer: &[u8],
        width: u32,
        height: u32,
        threshold: i32,
    ) -> VisionResult<BinaryMask> {
        ensure_rgba_buffer(frame_buffer, width, height)?;

        let data: Vec<u8> = frame_buffer
            .chunks_exact(CHANNELS)
            .map(|bytes| classify(Pixel::from(bytes), threshold))
            .collect();

        let mask = GrayImage::from_raw(width, height, data).ok_or_else(|| {
            VisionError::InvalidImage {
                reason: format!("mask buffer does not fit {width}x{height}"),
            }
        })?;

        debug!(width, height, threshold, "binarized RGBA buffer");
        Ok(BinaryMask::from_binarized(mask))
    }
}
