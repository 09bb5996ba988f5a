// THEORY:
// The `pipeline` module is the top-level, single-frame API. It packages the usual
// composition an external caller performs (binarize, extract, then crop around
// each candidate) behind one configured struct.
//
// The stages stay independent: the pipeline holds only its `DetectorConfig`, so
// `analyze` is as pure as the free functions it calls and one pipeline can be
// shared between threads. Crops borrow the caller's image; the pipeline never
// owns pixel data.

use crate::config::DetectorConfig;
use crate::core_modules::binary_mask::binary_mask::BinaryMask;
use crate::core_modules::candidate::candidate::Candidate;
use crate::core_modules::preprocessor::preprocessor::{binarize, binarize_rgba};
use crate::core_modules::region_cropper::region_cropper::{crop_around, CroppedRegion};
use crate::core_modules::region_extractor::region_extractor::extract_candidates;
use crate::error::VisionResult;
use image::GenericImageView;
use tracing::debug;

/// Everything one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    /// Accepted regions in discovery order.
    pub candidates: Vec<Candidate>,
    /// The binarized frame, present only when `keep_mask` is configured.
    pub mask: Option<BinaryMask>,
}

/// The primary yes/no output of the pipeline for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    NoCandidates,
    CandidatesFound(Vec<Candidate>),
}

/// The main, top-level struct for single-image detection.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    config: DetectorConfig,
}

impl DetectionPipeline {
    pub fn new(config: DetectorConfig) -> VisionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn analyze<I>(&self, image: &I) -> VisionResult<FrameAnalysis>
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        // Stage 1: Binarization
        let mask = binarize(image, self.config.threshold)?;
        // Stage 2: Region extraction
        self.finish(mask)
    }

    /// Same as [`analyze`](Self::analyze) for a raw row-major RGBA frame buffer.
    pub fn analyze_rgba(&self, frame_buffer: &[u8], width: u32, height: u32) -> VisionResult<FrameAnalysis> {
        let mask = binarize_rgba(frame_buffer, width, height, self.config.threshold)?;
        self.finish(mask)
    }

    fn finish(&self, mask: BinaryMask) -> VisionResult<FrameAnalysis> {
        let candidates = extract_candidates(&mask, self.config.min_area)?;
        debug!(candidates = candidates.len(), keep_mask = self.config.keep_mask, "frame analyzed");
        Ok(FrameAnalysis {
            candidates,
            mask: self.config.keep_mask.then_some(mask),
        })
    }

    pub fn report<I>(&self, image: &I) -> VisionResult<Report>
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        let analysis = self.analyze(image)?;
        if analysis.candidates.is_empty() {
            Ok(Report::NoCandidates)
        } else {
            Ok(Report::CandidatesFound(analysis.candidates))
        }
    }

    pub fn candidates_detected<I>(&self, image: &I) -> VisionResult<bool>
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        Ok(matches!(self.report(image)?, Report::CandidatesFound(_)))
    }

    /// Stage 3: one configured-size crop per candidate, in candidate order.
    pub fn crop_candidates<'a, I>(
        &self,
        image: &'a I,
        candidates: &[Candidate],
    ) -> VisionResult<Vec<CroppedRegion<'a, I>>>
    where
        I: GenericImageView,
    {
        candidates
            .iter()
            .map(|c| crop_around(image, c.x, c.y, self.config.region_size))
            .collect()
    }
}
