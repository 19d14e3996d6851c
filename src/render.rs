// Software compositing of one ARGB buffer over another.
//
// Visual: the scratch surface is laid over the revealed content at the
// origin, unscaled. Opaque surface pixels hide the content, erased pixels
// let it through, and partially transparent pixels (from an image
// foreground) mix the two.

use crate::types::PixelBuffer;

/// Draw `src` over `dst` at (0, 0), clipped to the overlapping region.
/// Standard source-over blend on all four channels.
pub fn composite_over(dst: &mut PixelBuffer, src: &PixelBuffer) {
    let w = dst.width.min(src.width);
    let h = dst.height.min(src.height);

    for y in 0..h {
        let src_row = y * src.width;
        let dst_row = y * dst.width;
        for x in 0..w {
            let s = src.pixels[src_row + x];
            let a = s >> 24;
            if a == 0xFF {
                dst.pixels[dst_row + x] = s;
            } else if a != 0 {
                dst.pixels[dst_row + x] = blend_over(s, dst.pixels[dst_row + x], a);
            }
            // a == 0: erased pixel, background shows through untouched.
        }
    }
}

/// Per-channel integer source-over for straight (non-premultiplied) ARGB:
/// color = (src * a + dst * (255 - a)) / 255, alpha accumulates toward opaque.
/// Also used by foreground initialization to base images over the accent fill.
#[inline]
pub(crate) fn blend_over(src: u32, dst: u32, a: u32) -> u32 {
    let inv = 255 - a;

    let sr = (src >> 16) & 0xFF;
    let sg = (src >> 8) & 0xFF;
    let sb = src & 0xFF;

    let da = (dst >> 24) & 0xFF;
    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;

    let oa = a + da * inv / 255;
    let or = (sr * a + dr * inv) / 255;
    let og = (sg * a + dg * inv) / 255;
    let ob = (sb * a + db * inv) / 255;

    (oa << 24) | (or << 16) | (og << 8) | ob
}
