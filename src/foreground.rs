// Foreground initialization: what the scratch layer looks like before any
// erasing happens.
//
// The source is chosen by a fixed precedence, evaluated once per buffer
// (re)initialization:
//   1. explicit image override, stretched to fill;
//   2. explicit foreground color (non-zero);
//   3. an image obtained from the host's resource loader, centered or
//      stretched per configuration; a failed load falls through;
//   4. the default accent color.
// Whatever the source, the layer ends up fully opaque: image sources are
// composited over an accent-color base so uncovered or semi-transparent
// regions never start out "already scratched".

use image::RgbaImage;
use log::{debug, warn};

use crate::render::blend_over;
use crate::types::PixelBuffer;

/// Accent color used when nothing else is configured (and as the base
/// under image foregrounds).
pub const DEFAULT_ACCENT: u32 = 0xFF62_00EE;

/// How a resource-loaded image is placed into the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResourceScale {
    /// Draw at its own size, centered (clipped when larger than the surface).
    #[default]
    Center,
    /// Resample to cover the whole surface.
    Stretch,
}

/// The configured foreground sources. `color == 0` and `resource == 0`
/// both mean "unset", matching the host-attribute defaults.
#[derive(Clone, Default)]
pub struct ForegroundConfig {
    pub image: Option<RgbaImage>,
    pub color: u32,
    pub resource: u32,
    pub resource_scale: ResourceScale,
}

/// Host seam for turning a resource identifier into a raster image.
/// Returning None means the load failed; the caller falls back to a solid
/// color rather than surfacing an error.
pub trait ResourceLoader {
    fn load_raster(&self, id: u32) -> Option<RgbaImage>;
}

/// Loader for hosts without any resource table: every lookup fails.
pub struct NoResources;

impl ResourceLoader for NoResources {
    fn load_raster(&self, _id: u32) -> Option<RgbaImage> {
        None
    }
}

/// Paint the surface from the configured foreground source.
pub fn paint_foreground(
    surface: &mut PixelBuffer,
    config: &ForegroundConfig,
    loader: &dyn ResourceLoader,
) {
    if surface.width == 0 || surface.height == 0 {
        return;
    }

    if let Some(img) = &config.image {
        debug!("foreground: explicit image, stretched to {}x{}", surface.width, surface.height);
        surface.fill(DEFAULT_ACCENT);
        stretch_over(surface, img);
        return;
    }

    if config.color != 0 {
        debug!("foreground: solid color {:#010x}", config.color);
        surface.fill(config.color);
        return;
    }

    if config.resource != 0 {
        match loader.load_raster(config.resource) {
            Some(img) => {
                debug!("foreground: resource {} ({:?})", config.resource, config.resource_scale);
                surface.fill(DEFAULT_ACCENT);
                match config.resource_scale {
                    ResourceScale::Stretch => stretch_over(surface, &img),
                    ResourceScale::Center => center_over(surface, &img),
                }
                return;
            }
            None => {
                warn!("foreground: resource {} failed to load, using accent", config.resource);
            }
        }
    }

    surface.fill(DEFAULT_ACCENT);
}

/// Resample the image to the surface size (nearest neighbor) and blend it
/// over the current contents.
fn stretch_over(surface: &mut PixelBuffer, img: &RgbaImage) {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 {
        return;
    }
    for y in 0..surface.height {
        let sy = (y as u64 * ih as u64 / surface.height as u64) as u32;
        for x in 0..surface.width {
            let sx = (x as u64 * iw as u64 / surface.width as u64) as u32;
            blend_pixel(surface, x as i32, y as i32, argb(img.get_pixel(sx, sy).0));
        }
    }
}

/// Blend the image over the surface at its natural size, centered.
fn center_over(surface: &mut PixelBuffer, img: &RgbaImage) {
    let (iw, ih) = img.dimensions();
    let ox = (surface.width as i32 - iw as i32) / 2;
    let oy = (surface.height as i32 - ih as i32) / 2;
    for y in 0..ih {
        for x in 0..iw {
            blend_pixel(surface, ox + x as i32, oy + y as i32, argb(img.get_pixel(x, y).0));
        }
    }
}

#[inline]
fn argb([r, g, b, a]: [u8; 4]) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
fn blend_pixel(surface: &mut PixelBuffer, x: i32, y: i32, src: u32) {
    if x < 0 || y < 0 || x as usize >= surface.width || y as usize >= surface.height {
        return;
    }
    let idx = y as usize * surface.width + x as usize;
    let a = src >> 24;
    if a == 0xFF {
        surface.pixels[idx] = src;
    } else if a != 0 {
        surface.pixels[idx] = blend_over(src, surface.pixels[idx], a);
    }
}
