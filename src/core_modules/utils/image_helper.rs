// Shape checks shared by every stage, plus synthetic scenes for the tests.

pub mod image_helper {
    use crate::core_modules::pixel::pixel::CHANNELS;
    use crate::error::{VisionError, VisionResult};

    /// Fails with `InvalidImage` when either side is zero.
    pub fn ensure_non_empty(width: u32, height: u32) -> VisionResult<()> {
        if width == 0 || height == 0 {
            return Err(VisionError::empty_image(width, height));
        }
        Ok(())
    }

    /// Validates a raw row-major RGBA frame buffer against its claimed size.
    pub fn ensure_rgba_buffer(buffer: &[u8], width: u32, height: u32) -> VisionResult<()> {
        ensure_non_empty(width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if buffer.len() != expected {
            return Err(VisionError::InvalidImage {
                reason: format!(
                    "RGBA buffer holds {} bytes, {width}x{height} needs {expected}",
                    buffer.len()
                ),
            });
        }
        Ok(())
    }

}
