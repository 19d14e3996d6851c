// Stroke builder: turns raw pointer samples into a smoothed erase trail.
//
// Raw touch samples arrive as a noisy polyline. Drawing straight lines
// through them looks jagged, so each accepted move emits a quadratic curve
// whose control point is the *previous* sample and whose endpoint is the
// midpoint of the previous and current sample. Only the last sample is
// retained, so memory stays O(1) regardless of stroke length.

use crate::types::Point;

/// Minimum per-axis movement (device-independent units) before a move
/// sample extends the stroke. Rejects sensor jitter while the finger rests.
pub const MOVE_THRESHOLD: f32 = 4.0;

/// One smoothed piece of the in-progress stroke. Segments carry their own
/// start point so the compositor can rasterize each one as it is emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Quadratic curve: smoothed continuation of the trail.
    Quad { from: Point, ctrl: Point, to: Point },
    /// Straight closing segment appended on pointer-up.
    Line { from: Point, to: Point },
}

/// Converts the pointer-down/move/up stream into [`Segment`]s.
pub struct StrokeBuilder {
    /// Where the smoothed trail currently ends. None until the first
    /// pointer-down, and reset by every new pointer-down.
    cursor: Option<Point>,
    /// Last raw sample seen. Updated on *every* event, even a rejected
    /// below-threshold move, so deltas are always against the newest input.
    last: Point,
    threshold: f32,
}

impl StrokeBuilder {
    pub fn new() -> Self {
        Self {
            cursor: None,
            last: Point::new(0.0, 0.0),
            threshold: MOVE_THRESHOLD,
        }
    }

    /// Pointer-down: discard any previous trail and move the cursor to the
    /// touch point. Nothing is drawn yet.
    pub fn begin(&mut self, p: Point) {
        self.cursor = Some(p);
        self.last = p;
    }

    /// Pointer-move: emit the next smoothed segment, or None when the
    /// sample is below the noise threshold (or no stroke has begun).
    pub fn extend(&mut self, p: Point) -> Option<Segment> {
        let from = self.cursor?;
        let dx = (p.x - self.last.x).abs();
        let dy = (p.y - self.last.y).abs();

        let segment = if dx >= self.threshold || dy >= self.threshold {
            let ctrl = self.last;
            let to = self.last.midpoint(p);
            self.cursor = Some(to);
            Some(Segment::Quad { from, ctrl, to })
        } else {
            None
        };
        self.last = p;
        segment
    }

    /// Pointer-up: close the stroke with a straight segment to the lift
    /// point. The next pointer-down starts a fresh trail.
    pub fn finish(&mut self, p: Point) -> Option<Segment> {
        let from = self.cursor?;
        self.cursor = Some(p);
        self.last = p;
        Some(Segment::Line { from, to: p })
    }
}

impl Default for StrokeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
