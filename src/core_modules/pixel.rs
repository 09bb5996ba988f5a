// THEORY:
// The `Pixel` module is the most fundamental building block of the detector.
// It is a "dumb" data container for one RGBA pixel plus the single heuristic the
// preprocessor needs from it: luminance.
//
// Key architectural principles:
// 1.  **Data Purity**: It holds the raw `u8` channel values without any interpretation.
// 2.  **Intrinsic Knowledge**: `luminance` depends only on the pixel's own channels.
//     It knows nothing about neighbours, thresholds or masks.
// 3.  **Integer Exactness**: Luminance is computed with the BT.601 weights in 14-bit
//     fixed point. The weights sum to exactly 1 << 14, so a gray pixel `(v, v, v)`
//     maps back to `v` and grayscale input passes through untouched. Alpha is ignored.

pub mod pixel {
    use image::Rgba;

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Luminance = u8;

    pub const CHANNELS: usize = 4;

    const LUMA_SHIFT: u32 = 14;
    const RED_WEIGHT: u32 = 4899; // 0.299 * 2^14
    const GREEN_WEIGHT: u32 = 9617; // 0.587 * 2^14
    const BLUE_WEIGHT: u32 = 1868; // 0.114 * 2^14
    const ROUNDING: u32 = 1 << (LUMA_SHIFT - 1);

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// Rec. 601 luminance, rounded to the nearest integer.
        pub fn luminance(&self) -> Luminance {
            let weighted = RED_WEIGHT * self.red as u32
                + GREEN_WEIGHT * self.green as u32
                + BLUE_WEIGHT * self.blue as u32;
            ((weighted + ROUNDING) >> LUMA_SHIFT) as Luminance
        }
    }

    impl From<Rgba<Byte>> for Pixel {
        fn from(rgba: Rgba<Byte>) -> Self {
            let [red, green, blue, alpha] = rgba.0;
            Pixel::new(red, green, blue, alpha)
        }
    }

    /// Reads one pixel out of an RGBA byte quadruple. Callers hand in exact
    /// `chunks_exact(CHANNELS)` slices, so a short slice is a caller bug; it
    /// reads missing channels as zero rather than panicking.
    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            let channel = |i: usize| bytes.get(i).copied().unwrap_or_default();
            Pixel::new(channel(0), channel(1), channel(2), channel(3))
        }
    }
}
