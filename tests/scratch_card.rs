// End-to-end scenarios for the scratch-card core, driven the way a host
// would drive it: resize notifications, pointer events, render requests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use scratch_card::foreground::NoResources;
use scratch_card::types::{PixelBuffer, Point};
use scratch_card::{Rgba, RgbaImage, ScratchCard, CLEARED, REVEAL_DELAY};

fn solid_card(width: usize, height: usize) -> ScratchCard {
    let mut card = ScratchCard::new();
    card.set_foreground_color(0xFF55_5555);
    card.resize(width, height, &NoResources);
    card
}

#[test]
fn surface_always_matches_the_latest_resize() {
    let mut card = ScratchCard::new();
    card.set_foreground_color(0xFF55_5555);
    for (w, h) in [(10, 10), (200, 50), (1, 1), (64, 64), (3, 300)] {
        card.resize(w, h, &NoResources);
        assert_eq!(card.size(), Some((w, h)));
        assert_eq!(card.surface().unwrap().pixels.len(), w * h);
    }
}

#[test]
fn resize_resets_erased_pixels() {
    let mut card = solid_card(50, 50);
    card.pointer_down(Point::new(5.0, 25.0));
    card.pointer_up(Point::new(45.0, 25.0));
    assert!(card.estimate_revealed_fraction() > 0.0);

    // Re-layout at the same size: scratched pixels are gone by design.
    card.resize(50, 50, &NoResources);
    assert_eq!(card.estimate_revealed_fraction(), 0.0);
}

// Scenario A: one diagonal stroke across a 100x100 solid surface reveals
// something, but nowhere near everything.
#[test]
fn single_diagonal_stroke_reveals_a_strict_fraction() {
    let mut card = solid_card(100, 100);
    card.set_stroke_width(12.0);

    card.pointer_down(Point::new(10.0, 10.0));
    card.pointer_move(Point::new(90.0, 90.0));
    card.pointer_up(Point::new(90.0, 90.0));

    let fraction = card.estimate_revealed_fraction();
    assert!(fraction > 0.0, "stroke revealed nothing (fraction {fraction})");
    assert!(fraction < 1.0, "one stroke cannot reveal everything (fraction {fraction})");
}

// Scenario B: a degenerate resize must not crash, and the next real
// resize must yield a fully opaque surface.
#[test]
fn zero_size_resize_then_recovery() {
    let mut card = solid_card(40, 40);
    card.resize(0, 0, &NoResources);
    assert_eq!(card.size(), Some((0, 0)));
    // Input against the degenerate surface is harmless.
    card.pointer_down(Point::new(3.0, 3.0));
    card.pointer_up(Point::new(30.0, 30.0));
    assert_eq!(card.estimate_revealed_fraction(), 0.0);

    card.resize(50, 50, &NoResources);
    assert_eq!(card.size(), Some((50, 50)));
    let surface = card.surface().unwrap();
    assert!(surface.pixels.iter().all(|&px| px == 0xFF55_5555));
}

// Scenario C: with "remove paint on release", any stroke plus the
// deferred delay reveals the entire surface.
#[test]
fn remove_paint_on_release_reveals_everything_after_the_delay() {
    let mut card = solid_card(60, 60);
    card.set_remove_paint_on_up(true);
    card.set_stroke_width(8.0);

    card.pointer_down(Point::new(5.0, 5.0));
    card.pointer_move(Point::new(20.0, 20.0));
    card.pointer_up(Point::new(25.0, 25.0));

    // Before the deadline nothing happens.
    assert!(!card.tick(Instant::now()));
    assert!(card.estimate_revealed_fraction() < 1.0);

    // Past the deadline the whole layer is flooded clear.
    assert!(card.tick(Instant::now() + REVEAL_DELAY + Duration::from_millis(100)));
    assert_eq!(card.estimate_revealed_fraction(), 1.0);

    // The timer is one-shot.
    assert!(!card.tick(Instant::now() + REVEAL_DELAY * 4));
}

// Scenario D: detaching mid-timer must not panic and must not mutate
// anything afterwards.
#[test]
fn detach_cancels_the_pending_reveal() {
    let mut card = solid_card(60, 60);
    card.set_remove_paint_on_up(true);
    card.pointer_down(Point::new(5.0, 5.0));
    card.pointer_up(Point::new(25.0, 25.0));
    assert!(card.reveal_pending());

    card.detach();
    assert!(!card.reveal_pending());
    assert!(!card.tick(Instant::now() + REVEAL_DELAY * 2));
    assert_eq!(card.size(), None);
    assert_eq!(card.estimate_revealed_fraction(), 0.0);
}

#[test]
fn coverage_is_monotonic_across_strokes() {
    let mut card = solid_card(80, 80);
    card.set_stroke_width(10.0);

    let mut previous = card.estimate_revealed_fraction();
    let strokes = [
        (Point::new(10.0, 10.0), Point::new(70.0, 10.0)),
        (Point::new(10.0, 40.0), Point::new(70.0, 40.0)),
        (Point::new(10.0, 70.0), Point::new(70.0, 70.0)),
        // Re-scratching an already cleared row adds nothing but must
        // never decrease the estimate.
        (Point::new(10.0, 40.0), Point::new(70.0, 40.0)),
    ];
    for (from, to) in strokes {
        card.pointer_down(from);
        card.pointer_up(to);
        let fraction = card.estimate_revealed_fraction();
        assert!(fraction >= previous, "coverage regressed: {previous} -> {fraction}");
        previous = fraction;
    }
}

#[test]
fn listener_receives_true_on_every_pointer_up() {
    let mut card = solid_card(40, 40);
    let calls: Rc<RefCell<Vec<bool>>> = Rc::default();
    let sink = Rc::clone(&calls);
    card.set_on_scratch_listener(Some(Box::new(move |scratched| {
        sink.borrow_mut().push(scratched);
    })));

    for _ in 0..3 {
        card.pointer_down(Point::new(2.0, 2.0));
        card.pointer_move(Point::new(20.0, 20.0));
        card.pointer_up(Point::new(21.0, 21.0));
    }
    assert_eq!(*calls.borrow(), vec![true, true, true]);
}

#[test]
fn render_shows_background_only_through_erased_pixels() {
    let mut card = solid_card(30, 30);
    card.set_stroke_width(6.0);
    card.pointer_down(Point::new(0.0, 15.0));
    card.pointer_up(Point::new(29.0, 15.0));

    let mut frame = PixelBuffer::new(30, 30);
    frame.fill(0xFF12_3456);
    card.render_into(&mut frame);

    // Along the erased band the background shows through.
    assert_eq!(frame.get(15, 15), Some(0xFF12_3456));
    // Away from it, the foreground still covers.
    assert_eq!(frame.get(15, 2), Some(0xFF55_5555));
}

#[test]
fn image_foreground_applies_on_next_resize() {
    let mut card = ScratchCard::new();
    card.set_foreground_color(0xFF00_00FF);
    card.set_foreground_image(Some(RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 255]))));
    card.resize(10, 10, &NoResources);
    // Image wins over the color despite both being set.
    assert!(card
        .surface()
        .unwrap()
        .pixels
        .iter()
        .all(|&px| px == 0xFF09_0807));
}

#[test]
fn detached_card_renders_nothing() {
    let mut card = solid_card(20, 20);
    card.detach();
    let mut frame = PixelBuffer::new(20, 20);
    frame.fill(0xFFAA_AAAA);
    card.render_into(&mut frame);
    assert!(frame.pixels.iter().all(|&px| px == 0xFFAA_AAAA));
    assert!(frame.pixels.iter().all(|&px| px != CLEARED));
}
