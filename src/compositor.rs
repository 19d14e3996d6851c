// Clear-blend stroke rasterizer.
//
// Visual: wherever the brush passes, the foreground layer becomes fully
// transparent and the content underneath shows through. The stroke is the
// brush-width outline swept along the path with round caps and joins;
// we get both for free by flattening each segment into short steps and
// stamping a filled disc at every step (overlapping discs along a path
// *are* a round-capped, round-joined stroke).

use crate::stroke::Segment;
use crate::types::{PixelBuffer, Point, CLEARED};

/// Spacing, in pixels, between disc stamps along a flattened segment.
/// Must be comfortably below the smallest sensible brush radius or the
/// stroke edge turns scalloped.
pub const FLATTEN_STEP: f32 = 2.0;

/// Erase one newly appended segment onto the surface.
///
/// Called once per emitted segment, so each pointer event costs time
/// proportional to how much the path just grew; the already-erased part
/// of the stroke is never redrawn.
pub fn erase_segment(surface: &mut PixelBuffer, segment: Segment, radius: f32) {
    match segment {
        Segment::Line { from, to } => erase_line(surface, from, to, radius),
        Segment::Quad { from, ctrl, to } => erase_quad(surface, from, ctrl, to, radius),
    }
}

/// Flood the entire surface with the clear effect: every pixel becomes
/// transparent, as if one giant fill-style brush covered the canvas.
/// This backs the "remove paint on release" reveal.
pub fn clear_all(surface: &mut PixelBuffer) {
    surface.fill(CLEARED);
}

/// Stamp discs along a straight segment.
fn erase_line(surface: &mut PixelBuffer, from: Point, to: Point, radius: f32) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    let steps = (len / FLATTEN_STEP).ceil().max(1.0) as i32;

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        erase_disc(surface, from.x + dx * t, from.y + dy * t, radius);
    }
}

/// Stamp discs along a quadratic curve, evaluated with the Bézier form
/// B(t) = (1-t)²·from + 2t(1-t)·ctrl + t²·to.
fn erase_quad(surface: &mut PixelBuffer, from: Point, ctrl: Point, to: Point, radius: f32) {
    // The control polygon length bounds the arc length, which is enough
    // to pick a step count that keeps stamps within FLATTEN_STEP of each
    // other.
    let leg1 = ((ctrl.x - from.x).powi(2) + (ctrl.y - from.y).powi(2)).sqrt();
    let leg2 = ((to.x - ctrl.x).powi(2) + (to.y - ctrl.y).powi(2)).sqrt();
    let steps = ((leg1 + leg2) / FLATTEN_STEP).ceil().max(1.0) as i32;

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let u = 1.0 - t;
        let x = u * u * from.x + 2.0 * u * t * ctrl.x + t * t * to.x;
        let y = u * u * from.y + 2.0 * u * t * ctrl.y + t * t * to.y;
        erase_disc(surface, x, y, radius);
    }
}

/// Clear every pixel within `radius` of (cx, cy). Scans just the bounding
/// box; out-of-bounds rows and columns are clipped, so stamping near (or
/// entirely off) an edge is safe.
fn erase_disc(surface: &mut PixelBuffer, cx: f32, cy: f32, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let r = radius.ceil() as i32;
    let r2 = radius * radius;
    let icx = cx.round() as i32;
    let icy = cy.round() as i32;

    for y in (icy - r)..=(icy + r) {
        for x in (icx - r)..=(icx + r) {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r2 {
                surface.put(x, y, CLEARED);
            }
        }
    }
}
