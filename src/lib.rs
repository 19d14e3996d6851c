// Scratch-card engine: an opaque foreground layer the user erases by
// dragging a pointer across it, revealing content underneath.
//
// The library is the headless core (surface buffer, stroke smoothing,
// clear-blend compositing, stride-sampled coverage) with no windowing
// dependency. A host (see the demo binary in main.rs) feeds it resize and
// pointer events and presents the composited frames.

pub mod card;
pub mod compositor;
pub mod coverage;
pub mod error;
pub mod foreground;
pub mod render;
pub mod stroke;
pub mod types;

pub use card::{ScratchCard, ScratchListener, REVEAL_DELAY};
pub use coverage::{estimate_revealed_fraction, SAMPLE_STRIDE};
pub use error::Error;
pub use foreground::{
    ForegroundConfig, NoResources, ResourceLoader, ResourceScale, DEFAULT_ACCENT,
};
pub use stroke::{Segment, StrokeBuilder, MOVE_THRESHOLD};
pub use types::{Brush, PixelBuffer, Point, CLEARED, DEFAULT_STROKE_WIDTH};

// The image crate is part of the public surface (foreground overrides and
// the resource-loader seam); re-export the types hosts actually touch.
pub use image::{Rgba, RgbaImage};
