// THEORY:
// The `candidate` module holds the two plain values that leave the extraction
// stage: `Point`, an integer pixel coordinate used for contour vertices, and
// `Candidate`, one accepted region summarized by its centroid and area.
//
// Key architectural principles:
// 1.  **Stateless Data Container**: a `Candidate` is a snapshot of one region in one
//     image. It does not know its contour, its neighbours or where it came from.
// 2.  **Signed Coordinates**: both types use `i32` so that geometry arithmetic
//     (deltas, cross products, crop offsets) never needs unsigned juggling. The
//     extractor only ever emits non-negative centroids.

pub mod candidate {
    /// A 2D integer pixel coordinate, origin top-left, `y` growing downwards.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }

    impl Point {
        pub const fn new(x: i32, y: i32) -> Self {
            Self { x, y }
        }
    }

    /// One detected region: integer centroid plus enclosed polygon area in pixels.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Candidate {
        /// Centroid column, truncated toward zero.
        pub x: i32,
        /// Centroid row, truncated toward zero.
        pub y: i32,
        /// Area enclosed by the region's outer contour polygon.
        pub area: f64,
    }

    impl Candidate {
        pub fn new(x: i32, y: i32, area: f64) -> Self {
            Self { x, y, area }
        }

        pub fn center(&self) -> Point {
            Point::new(self.x, self.y)
        }
    }
}
