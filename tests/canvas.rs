// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! End-to-end scenarios against a `Canvas`, driven only through its public API.

use vectorfill::{
    Bitmap, Canvas, Color, Contour, Paint, Point, PremultipliedColorU8, Rect, Shader, TileMode,
};

fn blank_canvas(width: u32, height: u32, pixels: &mut [PremultipliedColorU8]) -> Canvas<'_> {
    Canvas::new(width, height, width * 4, pixels).unwrap()
}

fn pixel_at(pixels: &[PremultipliedColorU8], width: u32, x: u32, y: u32) -> PremultipliedColorU8 {
    pixels[(y * width + x) as usize]
}

#[test]
fn clear_sets_every_pixel_to_the_premultiplied_color() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 0); 16];
    let mut canvas = blank_canvas(4, 4, &mut pixels);
    canvas.clear(Color::from_rgba8(255, 0, 0, 255));

    for p in &pixels {
        assert_eq!((p.red(), p.green(), p.blue(), p.alpha()), (255, 0, 0, 255));
    }
}

#[test]
fn fill_rect_paints_the_interior_black_and_leaves_the_border_white() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(255, 255, 255, 255); 16];
    let mut canvas = blank_canvas(4, 4, &mut pixels);
    let mut paint = Paint::new();
    paint.set_color(Color::BLACK);
    canvas.draw_rect(Rect::from_ltrb(1.0, 1.0, 3.0, 3.0).unwrap(), &paint);

    for y in 1..3 {
        for x in 1..3 {
            assert_eq!(pixel_at(&pixels, 4, x, y).red(), 0, "({x},{y}) should be black");
        }
    }
    assert_eq!(pixel_at(&pixels, 4, 0, 0).red(), 255);
    assert_eq!(pixel_at(&pixels, 4, 3, 3).red(), 255);
}

#[test]
fn convex_triangle_interior_and_exterior_follow_the_center_in_rule() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 255); 16];
    let mut canvas = blank_canvas(4, 4, &mut pixels);
    let mut paint = Paint::new();
    paint.set_color(Color::from_rgba8(255, 0, 0, 255));
    let pts = [Point::from_xy(0.0, 0.0), Point::from_xy(4.0, 0.0), Point::from_xy(0.0, 4.0)];
    canvas.draw_convex_polygon(&pts, &paint);

    // Hypotenuse is x + y == 4. Pixel centers sit at half-integer offsets, so a pixel
    // whose center sum is < 4 is inside, and a pixel whose center sum is exactly 4 is
    // outside (it's on the boundary, which the fill excludes).
    assert_eq!(pixel_at(&pixels, 4, 0, 0).red(), 255); // center (0.5, 0.5), sum 1
    assert_eq!(pixel_at(&pixels, 4, 2, 0).red(), 255); // center (2.5, 0.5), sum 3
    assert_eq!(pixel_at(&pixels, 4, 3, 0).red(), 0); // center (3.5, 0.5), sum 4: outside
    assert_eq!(pixel_at(&pixels, 4, 3, 3).red(), 0); // center (3.5, 3.5), sum 7: outside
}

#[test]
fn rotate_by_a_quarter_turn_and_back_is_the_identity_within_tolerance() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 0); 4];
    let mut canvas = blank_canvas(2, 2, &mut pixels);
    canvas.rotate(std::f32::consts::FRAC_PI_2);
    canvas.rotate(-std::f32::consts::FRAC_PI_2);

    // Can't read the CTM back from outside the crate, so drive the check through a
    // draw call: a one-pixel fill that should land exactly where it would under an
    // untouched identity transform.
    let mut paint = Paint::new();
    paint.set_color(Color::WHITE);
    canvas.draw_rect(Rect::from_ltrb(1.0, 1.0, 2.0, 2.0).unwrap(), &paint);
    assert_eq!(pixel_at(&pixels, 2, 1, 1).alpha(), 255);
    assert_eq!(pixel_at(&pixels, 2, 0, 0).alpha(), 0);
}

#[test]
fn linear_gradient_ramp_is_monotonic_and_spans_the_endpoints() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 0); 10];
    let mut canvas = blank_canvas(10, 1, &mut pixels);
    let mut paint = Paint::new();
    paint.set_shader(Some(Shader::LinearGradient(vectorfill::shaders::LinearGradientShader::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(10.0, 0.0),
        Color::from_rgba8(255, 0, 0, 255),
        Color::from_rgba8(255, 255, 0, 255),
        TileMode::Clamp,
    ))));
    canvas.draw_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 1.0).unwrap(), &paint);

    let mut prev = 0u8;
    for x in 0..10 {
        let g = pixels[x].green();
        assert!(g >= prev);
        prev = g;
    }
    assert!(pixels[0].green() <= 30);
    assert!(pixels[9].green() >= 225);
}

#[test]
fn radial_gradient_interpolates_from_center_to_edge() {
    // A 12x12 canvas gives room for a sample point past distance == 1 from a radius-5
    // gradient centered at (5, 5), so the "outside the circle" clamp is exercised
    // exactly rather than approximately.
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 0); 144];
    let mut canvas = blank_canvas(12, 12, &mut pixels);
    let shader = Canvas::make_radial_gradient(5.0, 5.0, 5.0, vec![Color::WHITE, Color::from_rgba8(255, 0, 0, 255)]);
    let mut paint = Paint::new();
    paint.set_shader(Some(shader));
    canvas.draw_rect(Rect::from_ltrb(0.0, 0.0, 12.0, 12.0).unwrap(), &paint);

    let center = pixel_at(&pixels, 12, 5, 5);
    let edge = pixel_at(&pixels, 12, 11, 5);
    let mid = pixel_at(&pixels, 12, 8, 5);

    assert!(center.green() > 200, "center should be near-white, got {center:?}");
    assert_eq!(edge.green(), 0, "edge should be pure red");
    assert!(mid.green() < center.green() && mid.green() > edge.green());
}

#[test]
fn bitmap_round_trips_pixel_for_pixel_under_the_identity_ctm() {
    let src_pixels: Vec<_> = (0..16u8)
        .map(|i| PremultipliedColorU8::from_rgba(i * 16, i * 8, i * 4, 255))
        .collect();
    let src = Bitmap::from_pixels(4, 4, &src_pixels).unwrap();

    let mut dst_pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 0); 16];
    let mut canvas = blank_canvas(4, 4, &mut dst_pixels);
    canvas.fill_bitmap_rect(src, Rect::from_ltrb(0.0, 0.0, 4.0, 4.0).unwrap());

    assert_eq!(dst_pixels, src_pixels);
}

#[test]
fn a_fully_interior_polygon_is_unaffected_by_clipping() {
    // Invariant: clipping preserves winding for a polygon entirely inside the device
    // rect — the convex and general rasterizers must therefore agree pixel-for-pixel.
    let pts = [
        Point::from_xy(2.0, 1.0),
        Point::from_xy(6.0, 2.0),
        Point::from_xy(5.0, 7.0),
        Point::from_xy(1.0, 6.0),
    ];

    let mut convex_pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 255); 64];
    let mut paint = Paint::new();
    paint.set_color(Color::from_rgba8(0, 200, 0, 255));
    {
        let mut canvas = blank_canvas(8, 8, &mut convex_pixels);
        canvas.draw_convex_polygon(&pts, &paint);
    }

    let mut general_pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 255); 64];
    {
        let mut canvas = blank_canvas(8, 8, &mut general_pixels);
        let contour = Contour::new(&pts, true);
        canvas.draw_contours(std::slice::from_ref(&contour), &paint);
    }

    assert_eq!(convex_pixels, general_pixels);
}

#[test]
fn stroke_mode_expands_a_polyline_into_a_filled_band() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 255); 100];
    let mut canvas = blank_canvas(10, 10, &mut pixels);
    let pts = [Point::from_xy(1.0, 5.0), Point::from_xy(9.0, 5.0)];
    let contour = Contour::new(&pts, false);

    let mut paint = Paint::new();
    paint.set_color(Color::WHITE);
    paint.set_is_stroke(true);
    paint.set_stroke_width(2.0);
    canvas.draw_contours(std::slice::from_ref(&contour), &paint);

    // A 2-wide horizontal stroke centered on y=5 should light up rows 4 and 5 at x=5,
    // but leave a row far from the line untouched.
    assert!(pixel_at(&pixels, 10, 5, 4).red() == 255 || pixel_at(&pixels, 10, 5, 5).red() == 255);
    assert_eq!(pixel_at(&pixels, 10, 5, 9).red(), 0);
}

#[test]
fn save_restore_pairs_leave_subsequent_draws_unaffected_by_the_nested_transform() {
    let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 255); 16];
    let mut canvas = blank_canvas(4, 4, &mut pixels);
    let mut paint = Paint::new();
    paint.set_color(Color::WHITE);

    canvas.save();
    canvas.translate(100.0, 100.0);
    canvas.restore();

    canvas.draw_rect(Rect::from_ltrb(1.0, 1.0, 2.0, 2.0).unwrap(), &paint);
    assert_eq!(pixel_at(&pixels, 4, 1, 1).red(), 255);
}
