// Demo host for the scratch-card engine.
//
// What you SEE:
// • A window painted with an opaque scratch layer (silver by default, or
//   an image passed as the first CLI argument).
// • Hold Left Mouse and drag: the layer erases under the cursor and the
//   prize artwork underneath shows through.
// • R toggles "remove paint on release": half a second after you lift the
//   button, the whole layer dissolves. ESC quits.

use std::time::Instant;

use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use scratch_card::error::Error;
use scratch_card::foreground::NoResources;
use scratch_card::types::{PixelBuffer, Point};
use scratch_card::ScratchCard;

const WIDTH: usize = 640;
const HEIGHT: usize = 400;

/// Thin wrapper around the minifb window so the main loop stays clean.
struct Drawer {
    window: Window,
}

impl Drawer {
    fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the composited frame to the screen.
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x, y))
    }
}

/// The "prize" artwork hiding under the scratch layer: a dark gradient
/// with a gold coin in the middle.
fn draw_prize(frame: &mut PixelBuffer) {
    let (w, h) = (frame.width, frame.height);
    for y in 0..h {
        for x in 0..w {
            let shade = (40 + 120 * (x + y) / (w + h).max(1)) as u32;
            frame.pixels[y * w + x] = 0xFF00_0000 | (shade << 16) | (shade << 8) | (shade + 40);
        }
    }
    // Coin: a filled gold disc with a darker rim.
    let (cx, cy) = (w as i32 / 2, h as i32 / 2);
    let radius = (w.min(h) as i32) / 4;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            let dy = y - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius {
                let rim = d2 > (radius - 6) * (radius - 6);
                let color = if rim { 0xFFB8_860B } else { 0xFFFF_D700 };
                frame.put(x, y, color);
            }
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    /* --- Window + card setup ---
       Visual: the window opens fully covered by the scratch layer. */
    let mut drawer = Drawer::new("Scratch Card: drag to reveal", WIDTH, HEIGHT)?;

    let mut card = ScratchCard::new();
    if let Some(path) = std::env::args().nth(1) {
        let img = image::open(&path)
            .map_err(|e| Error::ImageDecode(format!("{path}: {e}")))?
            .to_rgba8();
        info!("foreground image: {path}");
        card.set_foreground_image(Some(img));
    } else {
        card.set_foreground_color(0xFFC0_C0C0); // classic scratch silver
    }
    card.set_stroke_width(48.0);
    card.set_on_scratch_listener(Some(Box::new(|scratched| {
        info!("onScratch fired: {scratched}");
    })));

    // The demo window never changes size, so one layout pass is enough.
    card.resize(WIDTH, HEIGHT, &NoResources);

    /* --- Prize artwork (drawn once) and the per-frame screen buffer --- */
    let mut prize = PixelBuffer::new(WIDTH, HEIGHT);
    draw_prize(&mut prize);
    let mut screen = PixelBuffer::new(WIDTH, HEIGHT);

    let mut remove_on_up = false;
    let mut was_down = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // Toggle the deferred reveal with R.
        if drawer.r_pressed_once() {
            remove_on_up = !remove_on_up;
            card.set_remove_paint_on_up(remove_on_up);
            info!("remove paint on release: {remove_on_up}");
        }

        // Translate mouse state transitions into pointer events.
        let down = drawer.left_mouse_down();
        match (was_down, down, drawer.mouse_pos()) {
            (false, true, Some(p)) => card.pointer_down(p),
            (true, true, Some(p)) => card.pointer_move(p),
            (true, false, Some(p)) => card.pointer_up(p),
            _ => {}
        }
        was_down = down;

        // Deferred reveal, sequenced on this thread.
        if card.tick(Instant::now()) {
            info!(
                "revealed fraction after timed clear: {:.2}",
                card.estimate_revealed_fraction()
            );
        }

        // Compose: prize underneath, scratch layer (with its holes) on top.
        screen.pixels.copy_from_slice(&prize.pixels);
        card.render_into(&mut screen);
        drawer.present(&screen)?;
    }

    card.detach();
    Ok(())
}
