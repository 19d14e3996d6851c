// Stride-sampled estimate of how much of the surface has been erased.

use crate::types::{PixelBuffer, CLEARED};

/// Grid stride for coverage sampling: every 3rd column of every 3rd row,
/// i.e. one pixel in nine. Coarser is faster but noisier.
pub const SAMPLE_STRIDE: usize = 3;

/// Fraction of the surface revealed so far, in [0, 1].
///
/// Reads the buffer on the stride grid and counts fully transparent
/// samples; the denominator is the number of samples actually visited, so
/// the result is exact for the grid even when dimensions are not multiples
/// of the stride. Read-only: calling it twice without an intervening
/// stroke returns the identical value. A zero-area surface reports 0.0.
pub fn estimate_revealed_fraction(surface: &PixelBuffer) -> f32 {
    let mut visited = 0u32;
    let mut transparent = 0u32;

    for y in (0..surface.height).step_by(SAMPLE_STRIDE) {
        for x in (0..surface.width).step_by(SAMPLE_STRIDE) {
            visited += 1;
            if surface.pixels[y * surface.width + x] == CLEARED {
                transparent += 1;
            }
        }
    }

    if visited == 0 {
        return 0.0;
    }
    transparent as f32 / visited as f32
}
