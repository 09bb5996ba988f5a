// THEORY:
// The `region_extractor` is the heart of detection. It turns a `BinaryMask` into a
// list of `Candidate`s: one per outermost foreground region that survives the
// area and mass filters.
//
// Key architectural principles & algorithm steps:
// 1.  **Contour Tracing**: `find_external_contours` yields one simplified outer
//     polygon per outermost 8-connected region, in raster discovery order.
// 2.  **Area Filter**: the unsigned shoelace area of the polygon is compared with
//     `min_area`; regions with `area < min_area` are dropped, so the bound is
//     inclusive. A negative `min_area` disables the filter.
// 3.  **Moment Centroid**: polygon moments give `m00`, `m10`, `m01`. Massless
//     polygons (points, lines) are dropped, then the centroid is truncated toward
//     zero and regions with a negative centroid are dropped.
// 4.  **Independent Decisions**: every contour is judged on its own. A rejected
//     contour never affects the next, and rejections are noise, not errors.
// 5.  **Stateless Utility**: nothing is kept between calls. The returned list is
//     freshly owned by the caller; the label grid and contour buffers are dropped
//     on every exit path.

pub mod region_extractor {
    use crate::core_modules::binary_mask::binary_mask::BinaryMask;
    use crate::core_modules::candidate::candidate::Candidate;
    use crate::core_modules::contour::contour::{find_external_contours, Contour};
    use crate::core_modules::moment::moment::Moments;
    use crate::core_modules::preprocessor::preprocessor::binarize;
    use crate::core_modules::utils::image_helper::image_helper::ensure_non_empty;
    use crate::error::VisionResult;
    use image::GenericImageView;
    use tracing::{debug, trace};

    /// Regions enclosing less than one square pixel are dropped by default.
    pub const DEFAULT_MIN_AREA: f64 = 1.0;

    /// Why a contour did not become a candidate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Rejection {
        TooSmall,
        Massless,
        NegativeCentroid,
    }

    /// Judges a single contour. Pure; used by `extract_candidates` for every contour.
    pub fn evaluate_contour(contour: &Contour, min_area: f64) -> Result<Candidate, Rejection> {
        let moments = Moments::of_polygon(&contour.points);
        let area = moments.m00;
        if area < min_area {
            return Err(Rejection::TooSmall);
        }

        let center = moments.centroid().ok_or(Rejection::Massless)?;
        if center.x < 0 || center.y < 0 {
            return Err(Rejection::NegativeCentroid);
        }

        Ok(Candidate::new(center.x, center.y, area))
    }

    /// Finds every outermost foreground region of `mask` and returns the ones
    /// enclosing at least `min_area` square pixels, in discovery order.
    pub fn extract_candidates(mask: &BinaryMask, min_area: f64) -> VisionResult<Vec<Candidate>> {
        let (width, height) = mask.dimensions();
        ensure_non_empty(width, height)?;

        let contours = find_external_contours(mask);
        let mut candidates = Vec::with_capacity(contours.len());
        for (index, contour) in contours.iter().enumerate() {
            match evaluate_contour(contour, min_area) {
                Ok(candidate) => candidates.push(candidate),
                Err(reason) => trace!(index, vertices = contour.len(), ?reason, "contour rejected"),
            }
        }

        debug!(
            contours = contours.len(),
            accepted = candidates.len(),
            min_area,
            "extracted candidates"
        );
        Ok(candidates)
    }

    /// Binarizes `image` and extracts candidates from the mask in one call.
    /// The intermediate mask is discarded.
    pub fn detect_candidates<I>(image: &I, threshold: i32, min_area: f64) -> VisionResult<Vec<Candidate>>
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        let mask = binarize(image, threshold)?;
        extract_candidates(&mask, min_area)
    }
}
