// THEORY:
// The `region_cropper` cuts a square window around a point of interest, usually a
// candidate's centroid, without ever stepping outside the source image.
//
// Key architectural principles & algorithm steps:
// 1.  **Centre, then Clamp**: the window starts `region_size / 2` (truncated) up and
//     left of the centre and is pushed back inside from the left/top, then from the
//     right/bottom (`start = max(0, side - region_size)`). The extent is whatever
//     remains, at most `region_size` and never less than 1.
// 2.  **Always Inside**: the resulting `CropWindow` satisfies
//     `x + width <= image width` and `y + height <= image height` for any centre
//     (even far outside the image) and any positive size (even larger than the
//     image). Arithmetic is done in `i64` so extreme centres cannot overflow.
// 3.  **Borrowed View**: `CroppedRegion` borrows the source image and only stores the
//     window. The borrow checker guarantees the source outlives every view and is
//     not mutated while one exists. `to_image` makes an owned copy when the crop
//     has to outlive the source.

pub mod region_cropper {
    use crate::core_modules::utils::image_helper::image_helper::ensure_non_empty;
    use crate::error::{VisionError, VisionResult};
    use image::{GenericImageView, ImageBuffer, SubImage};
    use std::fmt;
    use tracing::trace;

    /// Side of the square crop when the caller has no preference.
    pub const DEFAULT_REGION_SIZE: i32 = 40;

    /// An axis-aligned rectangle fully inside some image.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CropWindow {
        pub x: u32,
        pub y: u32,
        pub width: u32,
        pub height: u32,
    }

    impl CropWindow {
        /// Computes the clamped square window of side `region_size` centred on
        /// `(center_x, center_y)` inside an `image_width x image_height` image.
        pub fn around(
            image_width: u32,
            image_height: u32,
            center_x: i32,
            center_y: i32,
            region_size: i32,
        ) -> VisionResult<Self> {
            ensure_non_empty(image_width, image_height)?;
            if region_size <= 0 {
                return Err(VisionError::InvalidArgument {
                    name: "region_size",
                    reason: format!("must be > 0, got {region_size}"),
                });
            }

            let (x, width) = clamp_axis(center_x, region_size, image_width);
            let (y, height) = clamp_axis(center_y, region_size, image_height);
            Ok(Self {
                x,
                y,
                width,
                height,
            })
        }

        /// Whether `(x, y)` in source coordinates lies inside the window.
        pub fn contains(&self, x: u32, y: u32) -> bool {
            x >= self.x
                && y >= self.y
                && (x - self.x) < self.width
                && (y - self.y) < self.height
        }
    }

    /// Start and extent along one axis.
    fn clamp_axis(center: i32, region_size: i32, side: u32) -> (u32, u32) {
        let size = i64::from(region_size);
        let side = i64::from(side);

        let mut start = (i64::from(center) - size / 2).max(0);
        if start + size > side {
            start = (side - size).max(0);
        }
        let extent = size.min(side - start).max(1);
        (start as u32, extent as u32)
    }

    /// A window into a borrowed source image.
    pub struct CroppedRegion<'a, I> {
        source: &'a I,
        window: CropWindow,
    }

    impl<I> Clone for CroppedRegion<'_, I> {
        fn clone(&self) -> Self {
            *self
        }
    }

    impl<I> Copy for CroppedRegion<'_, I> {}

    impl<I> fmt::Debug for CroppedRegion<'_, I> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("CroppedRegion")
                .field("window", &self.window)
                .finish_non_exhaustive()
        }
    }

    impl<'a, I> CroppedRegion<'a, I>
    where
        I: GenericImageView,
    {
        pub fn window(&self) -> CropWindow {
            self.window
        }

        pub fn width(&self) -> u32 {
            self.window.width
        }

        pub fn height(&self) -> u32 {
            self.window.height
        }

        pub fn dimensions(&self) -> (u32, u32) {
            (self.window.width, self.window.height)
        }

        /// Pixel at `(x, y)` relative to the window's top-left corner, or `None`
        /// outside the window.
        pub fn get_pixel(&self, x: u32, y: u32) -> Option<I::Pixel> {
            if x >= self.window.width || y >= self.window.height {
                return None;
            }
            Some(self.source.get_pixel(self.window.x + x, self.window.y + y))
        }

        /// The window as an `image` sub-view sharing the source's storage.
        pub fn view(&self) -> SubImage<&'a I> {
            let source: &'a I = self.source;
            source.view(self.window.x, self.window.y, self.window.width, self.window.height)
        }

        /// Copies the window into a freshly owned image buffer.
        pub fn to_image(
            &self,
        ) -> ImageBuffer<I::Pixel, Vec<<I::Pixel as image::Pixel>::Subpixel>> {
            ImageBuffer::from_fn(self.window.width, self.window.height, |x, y| {
                self.source.get_pixel(self.window.x + x, self.window.y + y)
            })
        }
    }

    /// Returns a bounds-safe square window of side `region_size` around
    /// `(center_x, center_y)`, borrowing `image`.
    pub fn crop_around<I>(
        image: &I,
        center_x: i32,
        center_y: i32,
        region_size: i32,
    ) -> VisionResult<CroppedRegion<'_, I>>
    where
        I: GenericImageView,
    {
        let (width, height) = image.dimensions();
        let window = CropWindow::around(width, height, center_x, center_y, region_size)?;
        trace!(center_x, center_y, region_size, ?window, "cropped region");
        Ok(CroppedRegion {
            source: image,
            window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::region_cropper::*;
    use crate::core_modules::region_extractor::region_extractor::detect_candidates;
    use crate::core_modules::utils::image_helper::image_helper::fixtures;
    use crate::error::VisionError;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn assert_inside(window: CropWindow, width: u32, height: u32) {
        assert!(window.width >= 1 && window.height >= 1, "{window:?}");
        assert!(window.x + window.width <= width, "{window:?} in {width}x{height}");
        assert!(window.y + window.height <= height, "{window:?} in {width}x{height}");
    }

    #[test]
    fn centred_window_in_the_middle() {
        let window = CropWindow::around(100, 80, 50, 40, 40).unwrap();
        assert_eq!(
            window,
            CropWindow {
                x: 30,
                y: 20,
                width: 40,
                height: 40
            }
        );
    }

    #[test]
    fn odd_size_truncates_half() {
        // 7 / 2 == 3
        let window = CropWindow::around(50, 50, 10, 10, 7).unwrap();
        assert_eq!((window.x, window.y, window.width, window.height), (7, 7, 7, 7));
    }

    #[test]
    fn near_edges_window_is_pushed_inside() {
        let top_left = CropWindow::around(100, 100, 3, 5, 40).unwrap();
        assert_eq!((top_left.x, top_left.y), (0, 0));
        assert_eq!((top_left.width, top_left.height), (40, 40));

        let bottom_right = CropWindow::around(100, 100, 98, 99, 40).unwrap();
        assert_eq!((bottom_right.x, bottom_right.y), (60, 60));
        assert_eq!((bottom_right.width, bottom_right.height), (40, 40));
    }

    #[test]
    fn region_larger_than_image_covers_whole_image() {
        let window = CropWindow::around(30, 20, 15, 10, 100).unwrap();
        assert_eq!(
            window,
            CropWindow {
                x: 0,
                y: 0,
                width: 30,
                height: 20
            }
        );
    }

    #[test]
    fn always_inside_for_pathological_inputs() {
        let sizes = [(1, 1), (1, 7), (13, 1), (40, 40), (64, 9)];
        let centres = [i32::MIN, -1000, -1, 0, 5, 39, 63, 64, 1000, i32::MAX];
        let regions = [1, 2, 3, 40, 41, 65, 1000, i32::MAX];
        for &(w, h) in &sizes {
            for &cx in &centres {
                for &cy in &centres {
                    for &size in &regions {
                        let window = CropWindow::around(w, h, cx, cy, size).unwrap();
                        assert_inside(window, w, h);
                    }
                }
            }
        }
    }

    #[test]
    fn non_positive_size_is_invalid_argument() {
        let image = RgbaImage::new(10, 10);
        for size in [0, -1, i32::MIN] {
            let err = crop_around(&image, 5, 5, size).unwrap_err();
            assert!(matches!(
                err,
                VisionError::InvalidArgument {
                    name: "region_size",
                    ..
                }
            ));
        }
    }

    #[test]
    fn empty_image_is_invalid_image() {
        let err = crop_around(&RgbaImage::new(0, 10), 0, 0, 4).unwrap_err();
        assert!(matches!(err, VisionError::InvalidImage { .. }));
    }

    #[test]
    fn view_reads_source_pixels() {
        let image = fixtures::coordinate_canvas(50, 50);
        let region = crop_around(&image, 20, 30, 10).unwrap();
        assert_eq!(region.dimensions(), (10, 10));
        assert_eq!(region.get_pixel(0, 0), Some(Rgba([15, 25, 0, 255])));
        assert_eq!(region.get_pixel(9, 9), Some(Rgba([24, 34, 0, 255])));
        assert_eq!(region.get_pixel(10, 0), None);

        let view = region.view();
        assert_eq!(view.dimensions(), (10, 10));
        assert_eq!(view.get_pixel(3, 4), Rgba([18, 29, 0, 255]));
    }

    #[test]
    fn copy_matches_view() {
        let image = fixtures::coordinate_canvas(16, 12);
        let region = crop_around(&image, 15, 0, 6).unwrap();
        let copy = region.to_image();
        assert_eq!(copy.dimensions(), (6, 6));
        assert_eq!(region.window().x, 10);
        for (x, y, pixel) in copy.enumerate_pixels() {
            assert_eq!(Some(*pixel), region.get_pixel(x, y));
        }
    }

    #[test]
    fn crop_around_candidate_contains_its_pixels() {
        let squares = [(0, 0, 6), (40, 12, 9), (90, 50, 10)];
        let image = fixtures::canvas_with_squares(100, 60, &squares);
        let candidates = detect_candidates(&image, 128, 1.0).unwrap();
        assert_eq!(candidates.len(), squares.len());

        for candidate in &candidates {
            let region = crop_around(&image, candidate.x, candidate.y, 24).unwrap();
            let window = region.window();
            let &(ox, oy, size) = squares
                .iter()
                .find(|(ox, oy, size)| {
                    (*ox..ox + size).contains(&(candidate.x as u32))
                        && (*oy..oy + size).contains(&(candidate.y as u32))
                })
                .unwrap();
            for y in oy..oy + size {
                for x in ox..ox + size {
                    assert!(window.contains(x, y), "({x}, {y}) outside {window:?}");
                }
            }
        }
    }
}
