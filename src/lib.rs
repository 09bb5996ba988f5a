// THEORY:
// This file is the main entry point for the `spot_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (a camera loop, an uploader, a UI).
//
// The engine answers one question about a single still image: "where are the
// small bright blobs, and what does the image look like right around each one?"
// It does so in two independent, stateless stages:
//   1. binarize + extract: grayscale, fixed threshold, outer-contour tracing and
//      polygon moments, producing a list of `Candidate`s.
//   2. crop: a bounds-safe square window around any point, usually a candidate.
//
// The free functions re-exported below are the whole contract. `pipeline` and
// `parallel_pipeline` only package the usual composition of those functions for
// one frame and for a batch of frames respectively.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use config::DetectorConfig;
pub use core_modules::binary_mask::binary_mask::BinaryMask;
pub use core_modules::candidate::candidate::{Candidate, Point};
pub use core_modules::preprocessor::preprocessor::{binarize, binarize_rgba};
pub use core_modules::region_cropper::region_cropper::{
    crop_around, CropWindow, CroppedRegion, DEFAULT_REGION_SIZE,
};
pub use core_modules::region_extractor::region_extractor::{
    detect_candidates, extract_candidates, DEFAULT_MIN_AREA,
};
pub use error::{VisionError, VisionResult};
