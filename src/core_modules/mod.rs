pub mod binary_mask;
pub mod candidate;
pub mod contour;
pub mod moment;
pub mod pixel;
pub mod preprocessor;
pub mod region_cropper;
pub mod region_extractor;
pub mod utils;
