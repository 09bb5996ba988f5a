// THEORY:
// The `BinaryMask` is the hand-off between the two detection stages. It is a
// single-channel image in which every pixel is either `BACKGROUND` (0) or
// `FOREGROUND` (255), with the same dimensions as the image it was made from.
//
// The two-valued invariant is enforced at construction: the only ways in are
// the preprocessor (which writes 0/255 itself) and `from_gray`, which maps any
// non-zero value to foreground. Downstream code can therefore test
// `value != 0` without caring how the mask was produced.

pub mod binary_mask {
    use crate::error::{VisionError, VisionResult};
    use image::{GrayImage, Luma};

    pub const FOREGROUND: u8 = 255;
    pub const BACKGROUND: u8 = 0;

    /// A two-valued single-channel image.
    #[derive(Debug, Clone, PartialEq)]
    pub struct BinaryMask {
        image: GrayImage,
    }

    impl BinaryMask {
        /// Wraps a gray image whose pixels are already 0 or 255.
        pub(crate) fn from_binarized(image: GrayImage) -> Self {
            debug_assert!(image.pixels().all(|p| p.0[0] == FOREGROUND || p.0[0] == BACKGROUND));
            Self { image }
        }

        /// Builds a mask from an arbitrary gray image. Any non-zero pixel is foreground.
        pub fn from_gray(gray: &GrayImage) -> VisionResult<Self> {
            let (width, height) = gray.dimensions();
            if width == 0 || height == 0 {
                return Err(VisionError::empty_image(width, height));
            }
            let image = GrayImage::from_fn(width, height, |x, y| {
                if gray.get_pixel(x, y).0[0] != BACKGROUND {
                    Luma([FOREGROUND])
                } else {
                    Luma([BACKGROUND])
                }
            });
            Ok(Self { image })
        }

        pub fn width(&self) -> u32 {
            self.image.width()
        }

        pub fn height(&self) -> u32 {
            self.image.height()
        }

        pub fn dimensions(&self) -> (u32, u32) {
            self.image.dimensions()
        }

        /// Whether `(x, y)` is foreground. Out-of-range coordinates read as background.
        pub fn is_foreground(&self, x: u32, y: u32) -> bool {
            self.image
                .get_pixel_checked(x, y)
                .is_some_and(|p| p.0[0] == FOREGROUND)
        }

        /// Number of foreground pixels.
        pub fn foreground_count(&self) -> usize {
            self.image.as_raw().iter().filter(|&&v| v == FOREGROUND).count()
        }

        pub fn as_gray(&self) -> &GrayImage {
            &self.image
        }

        pub fn into_inner(self) -> GrayImage {
            self.image
        }
    }
}
