// The scratch-card widget core.
//
// Owns the erasable surface and glues the pieces together: resize events
// rebuild the surface from the foreground source, pointer events run
// through the stroke builder into the clear-blend compositor, pointer-up
// notifies the scratch listener, and an optional deferred "remove paint"
// reveal floods the layer half a second after the finger lifts.
//
// Everything here is driven synchronously from the host's UI loop. The
// deferred reveal is a stored deadline polled by `tick`, so its mutation
// is sequenced on the same thread as pointer input and rendering, and it
// dies with the widget: `detach` drops the deadline together with the
// surface.

use std::time::{Duration, Instant};

use image::RgbaImage;
use log::{debug, info};

use crate::compositor::{clear_all, erase_segment};
use crate::coverage::estimate_revealed_fraction;
use crate::foreground::{paint_foreground, ForegroundConfig, ResourceLoader, ResourceScale};
use crate::render::composite_over;
use crate::stroke::StrokeBuilder;
use crate::types::{Brush, PixelBuffer, Point, DEFAULT_STROKE_WIDTH};

/// How long after pointer-up the "remove paint on release" reveal fires.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

/// Host callback invoked when a stroke ends. The boolean is always `true`
/// today; hosts wanting a threshold can read
/// [`ScratchCard::estimate_revealed_fraction`] themselves.
pub type ScratchListener = Box<dyn FnMut(bool)>;

/// The widget is a two-state machine: nothing exists until the first
/// resize, then surface, brush and stroke state are built atomically.
enum CardState {
    Uninitialized,
    Ready {
        surface: PixelBuffer,
        brush: Brush,
        stroke: StrokeBuilder,
    },
}

pub struct ScratchCard {
    state: CardState,
    foreground: ForegroundConfig,
    /// Width applied to the brush at the next pointer-down.
    stroke_width: f32,
    remove_paint_on_up: bool,
    listener: Option<ScratchListener>,
    /// Pending "remove paint" deadline; None when nothing is scheduled.
    reveal_at: Option<Instant>,
}

impl ScratchCard {
    /// A detached card: no surface yet, defaults matching the host
    /// attributes (width 150, color/resource unset, no reveal-on-up).
    pub fn new() -> Self {
        Self {
            state: CardState::Uninitialized,
            foreground: ForegroundConfig::default(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            remove_paint_on_up: false,
            listener: None,
            reveal_at: None,
        }
    }

    // ----------------------------- configuration -----------------------------
    // Foreground changes take effect at the next resize, when the surface
    // is repainted; width changes at the next stroke.

    /// Explicit raster override; wins over every other foreground source.
    pub fn set_foreground_image(&mut self, image: Option<RgbaImage>) {
        self.foreground.image = image;
    }

    /// Solid foreground color (ARGB). 0 means unset.
    pub fn set_foreground_color(&mut self, color: u32) {
        self.foreground.color = color;
    }

    /// Host resource id for a raster foreground. 0 means unset.
    pub fn set_foreground_resource(&mut self, id: u32) {
        self.foreground.resource = id;
    }

    /// Placement for resource images: centered (default) or stretched.
    pub fn set_resource_scale(&mut self, scale: ResourceScale) {
        self.foreground.resource_scale = scale;
    }

    /// Brush width for subsequent strokes.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    /// When set, pointer-up schedules a full reveal [`REVEAL_DELAY`] later.
    pub fn set_remove_paint_on_up(&mut self, enabled: bool) {
        self.remove_paint_on_up = enabled;
    }

    /// Register the single scratch listener (replacing any previous one).
    pub fn set_on_scratch_listener(&mut self, listener: Option<ScratchListener>) {
        self.listener = listener;
    }

    // ------------------------------- lifecycle --------------------------------

    /// Layout notification: build a fresh surface of exactly (width, height),
    /// repainted from the foreground source. The old surface, any stroke in
    /// progress and any pending reveal are discarded. Pixels erased before
    /// a resize are lost.
    pub fn resize(&mut self, width: usize, height: usize, loader: &dyn ResourceLoader) {
        debug!("resize to {width}x{height}");
        let mut surface = PixelBuffer::new(width, height);
        paint_foreground(&mut surface, &self.foreground, loader);
        self.state = CardState::Ready {
            surface,
            brush: Brush::new(self.stroke_width),
            stroke: StrokeBuilder::new(),
        };
        self.reveal_at = None;
    }

    /// Detach notification: release the surface and cancel any pending
    /// reveal. A reveal deadline that already passed becomes a no-op.
    pub fn detach(&mut self) {
        debug!("detach: releasing surface");
        self.state = CardState::Uninitialized;
        self.reveal_at = None;
    }

    // ------------------------------ pointer input -----------------------------
    // All three are safe no-ops before the first resize.

    pub fn pointer_down(&mut self, p: Point) {
        if let CardState::Ready { brush, stroke, .. } = &mut self.state {
            brush.stroke_width = self.stroke_width;
            stroke.begin(p);
        }
    }

    pub fn pointer_move(&mut self, p: Point) {
        if let CardState::Ready { surface, brush, stroke } = &mut self.state {
            if let Some(segment) = stroke.extend(p) {
                erase_segment(surface, segment, brush.radius());
            }
        }
    }

    /// Finish the stroke: erase the closing segment, notify the listener,
    /// and schedule the deferred reveal when configured.
    pub fn pointer_up(&mut self, p: Point) {
        let CardState::Ready { surface, brush, stroke } = &mut self.state else {
            return;
        };
        if let Some(segment) = stroke.finish(p) {
            erase_segment(surface, segment, brush.radius());
        }

        let fraction = estimate_revealed_fraction(surface);
        debug!("stroke finished, revealed fraction {fraction:.3}");

        // Observed host-widget behavior: the listener always receives
        // `true` on stroke end; the fraction is not part of the signal.
        if let Some(listener) = &mut self.listener {
            listener(true);
        }

        if self.remove_paint_on_up {
            self.reveal_at = Some(Instant::now() + REVEAL_DELAY);
            debug!("remove-paint reveal scheduled in {REVEAL_DELAY:?}");
        }
    }

    // ------------------------------ deferred reveal ---------------------------

    /// Poll the deferred reveal from the host loop. When the deadline has
    /// passed this floods the whole surface with the clear effect and
    /// returns true so the host re-renders. No-ops (returning false) when
    /// nothing is scheduled or the surface was released in the meantime.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.reveal_at else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.reveal_at = None;

        match &mut self.state {
            CardState::Ready { surface, .. } => {
                info!("remove-paint reveal: clearing the whole surface");
                clear_all(surface);
                true
            }
            // Detached before the timer fired: nothing left to mutate.
            CardState::Uninitialized => false,
        }
    }

    // -------------------------------- rendering -------------------------------

    /// Paint request: composite the scratch layer over whatever the host
    /// already drew into `frame`, at the origin, unscaled. Erased pixels
    /// leave the host content visible. No-op before the first resize.
    pub fn render_into(&self, frame: &mut PixelBuffer) {
        if let CardState::Ready { surface, .. } = &self.state {
            composite_over(frame, surface);
        }
    }

    // -------------------------------- inspection ------------------------------

    /// Current surface dimensions, None before the first resize.
    pub fn size(&self) -> Option<(usize, usize)> {
        match &self.state {
            CardState::Ready { surface, .. } => Some((surface.width, surface.height)),
            CardState::Uninitialized => None,
        }
    }

    /// Borrow the surface for inspection (tests, host-side effects).
    pub fn surface(&self) -> Option<&PixelBuffer> {
        match &self.state {
            CardState::Ready { surface, .. } => Some(surface),
            CardState::Uninitialized => None,
        }
    }

    /// Stride-sampled revealed fraction; 0.0 before the first resize.
    pub fn estimate_revealed_fraction(&self) -> f32 {
        match &self.state {
            CardState::Ready { surface, .. } => estimate_revealed_fraction(surface),
            CardState::Uninitialized => 0.0,
        }
    }

    /// True while a reveal is scheduled but has not fired.
    pub fn reveal_pending(&self) -> bool {
        self.reveal_at.is_some()
    }
}

impl Default for ScratchCard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foreground::NoResources;

    #[test]
    fn pointer_input_before_first_resize_is_a_no_op() {
        let mut card = ScratchCard::new();
        card.pointer_down(Point::new(5.0, 5.0));
        card.pointer_move(Point::new(50.0, 50.0));
        card.pointer_up(Point::new(50.0, 50.0));
        assert_eq!(card.size(), None);
        assert_eq!(card.estimate_revealed_fraction(), 0.0);
    }

    #[test]
    fn width_change_applies_to_the_next_stroke_only() {
        let mut card = ScratchCard::new();
        card.set_foreground_color(0xFF33_3333);
        card.resize(60, 60, &NoResources);

        card.set_stroke_width(2.0);
        card.pointer_down(Point::new(30.0, 30.0));
        // Mid-stroke width change must not affect the stroke in flight.
        card.set_stroke_width(40.0);
        card.pointer_up(Point::new(30.0, 48.0));

        let narrow = card.estimate_revealed_fraction();
        assert!(narrow > 0.0);

        // The next stroke picks up the wide brush.
        card.pointer_down(Point::new(30.0, 30.0));
        card.pointer_up(Point::new(30.0, 48.0));
        assert!(card.estimate_revealed_fraction() > narrow);
    }

    #[test]
    fn resize_discards_the_pending_reveal() {
        let mut card = ScratchCard::new();
        card.set_foreground_color(0xFF33_3333);
        card.set_remove_paint_on_up(true);
        card.resize(20, 20, &NoResources);
        card.pointer_down(Point::new(1.0, 1.0));
        card.pointer_up(Point::new(10.0, 10.0));
        assert!(card.reveal_pending());

        card.resize(20, 20, &NoResources);
        assert!(!card.reveal_pending());
        assert!(!card.tick(Instant::now() + REVEAL_DELAY * 2));
        assert_eq!(card.estimate_revealed_fraction(), 0.0);
    }
}
