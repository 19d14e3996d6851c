// Core types shared by the scratch engine.

/// A grid of packed ARGB pixels (0xAARRGGBB).
/// Visual: this is both the erasable foreground layer and, in the demo,
/// the screen image we push to the window each frame.
#[derive(Clone)]
pub struct PixelBuffer {
    pub width: usize,     // pixels per row
    pub height: usize,    // rows
    pub pixels: Vec<u32>, // length = width * height
}

/// A pixel value whose every channel is zero: a fully erased pixel.
/// The coverage estimator compares against exactly this value.
pub const CLEARED: u32 = 0x0000_0000;

impl PixelBuffer {
    /// Allocate a buffer of the given size, every pixel fully transparent.
    /// Degenerate sizes (0 in either axis) are allowed and yield an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![CLEARED; width * height] }
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, color: u32) {
        for px in &mut self.pixels {
            *px = color;
        }
    }

    /// Read the pixel at (x, y), or None outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Write the pixel at (x, y) if it is inside the grid.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }
}

/// A pointer sample in local widget coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint of two samples, the endpoint of a smoothed segment.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Stroke width the widget starts with, in device-independent units.
pub const DEFAULT_STROKE_WIDTH: f32 = 150.0;

/// The scratch brush. Cap and join are fixed round/round and the blend is
/// fixed clear; only the width is configurable. A width change takes
/// effect on the next stroke, not the one in flight.
#[derive(Clone, Copy, Debug)]
pub struct Brush {
    pub stroke_width: f32,
}

impl Brush {
    pub fn new(stroke_width: f32) -> Self {
        Self { stroke_width }
    }

    /// Radius of the round tip swept along the path.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.stroke_width / 2.0
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self { stroke_width: DEFAULT_STROKE_WIDTH }
    }
}
