use crate::core_modules::region_cropper::region_cropper::DEFAULT_REGION_SIZE;
use crate::core_modules::region_extractor::region_extractor::DEFAULT_MIN_AREA;
use crate::error::{VisionError, VisionResult};

/// Default luminance cutoff: anything brighter than mid-gray is foreground.
pub const DEFAULT_THRESHOLD: i32 = 128;

/// Configuration for the detection pipelines, allowing for tunable behavior.
///
/// The free functions (`binarize`, `extract_candidates`, `crop_around`) take
/// these values as plain arguments; this struct only bundles them for
/// `DetectionPipeline` and `ParallelPipeline`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Luminance a pixel must strictly exceed to count as foreground.
    ///
    /// Not clamped: negative values mark every pixel foreground, values of 255
    /// or more mark none.
    pub threshold: i32,

    /// Smallest contour area (in square pixels) kept as a candidate. Inclusive.
    ///
    /// Zero or negative disables the area filter; massless regions are still dropped.
    pub min_area: f64,

    /// Side of the square crop cut around each candidate. Must be positive.
    pub region_size: i32,

    /// Keep the binary mask in the analysis result instead of dropping it.
    pub keep_mask: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
            region_size: DEFAULT_REGION_SIZE,
            keep_mask: false,
        }
    }
}

impl DetectorConfig {
    // Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    // Set threshold
    pub fn set_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    // Set minimum area
    pub fn set_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    // Set crop size
    pub fn set_region_size(mut self, region_size: i32) -> Self {
        self.region_size = region_size;
        self
    }

    // Retain the intermediate mask
    pub fn set_keep_mask(mut self, keep_mask: bool) -> Self {
        self.keep_mask = keep_mask;
        self
    }

    /// Rejects values the pipelines cannot work with.
    pub fn validate(&self) -> VisionResult<()> {
        if self.region_size <= 0 {
            return Err(VisionError::InvalidArgument {
                name: "region_size",
                reason: format!("must be > 0, got {}", self.region_size),
            });
        }
        if !self.min_area.is_finite() {
            return Err(VisionError::InvalidArgument {
                name: "min_area",
                reason: format!("must be finite, got {}", self.min_area),
            });
        }
        Ok(())
    }
}
