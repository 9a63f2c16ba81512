// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The destination surface plus its CTM stack and the scan-conversion draw calls:
//! convex polygons, general contours (with stroking and winding), bitmap rects,
//! meshes and quad patches.

use crate::edge::{sort_edges, Edge};
use crate::edge_builder::clip_and_build_edge;
use crate::mesh::{resolve_triangle, tessellate_quad_patch, triangle_shader};
use crate::shaders::{BitmapShader, RadialGradientShader, TileMode, MAX_SHADE_ROW};
use crate::{
    blend, stroker, Bitmap, BitmapMut, Color, Contour, IntRect, Paint, Point,
    PremultipliedColorU8, Rect, Shader, Transform,
};

/// A canvas bound to a mutable destination surface.
///
/// Owns a CTM stack (`save`/`restore`/`concat` and sugar over it) and the scan
/// conversion routines that rasterize geometry onto the surface.
pub struct Canvas<'a> {
    surface: BitmapMut<'a>,
    clip: IntRect,
    ctm: Transform,
    saved: Vec<Transform>,
}

impl<'a> Canvas<'a> {
    /// Binds a canvas to `pixels`, with CTM = identity and an empty save stack.
    ///
    /// Fails when the surface fails its validity checks (see [`BitmapMut::new`]).
    pub fn new(width: u32, height: u32, row_bytes: u32, pixels: &'a mut [PremultipliedColorU8]) -> Option<Self> {
        let surface = BitmapMut::new(width, height, row_bytes, pixels)?;
        let clip = IntRect::from_xywh(0, 0, width, height)?;
        Some(Canvas { surface, clip, ctm: Transform::identity(), saved: Vec::new() })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Overwrites every pixel in the surface with the premultiplied conversion of
    /// `color`.
    pub fn clear(&mut self, color: Color) {
        self.surface.fill_all(color.premultiply().to_color_u8());
    }

    /// Pushes the current transform onto the save stack.
    pub fn save(&mut self) {
        self.saved.push(self.ctm);
    }

    /// Pops the most recently saved transform into the current one.
    ///
    /// A `restore` with nothing saved is a no-op; callers are responsible for
    /// balancing their `save`/`restore` pairs.
    pub fn restore(&mut self) {
        if let Some(ctm) = self.saved.pop() {
            self.ctm = ctm;
        }
    }

    /// `CTM ← CTM · m` — `m` is applied first when mapping a point.
    pub fn concat(&mut self, m: Transform) {
        self.ctm = self.ctm.pre_concat(&m);
    }

    /// Sugar over `concat` with a translation.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        if let Some(m) = Transform::from_translate(tx, ty) {
            self.concat(m);
        }
    }

    /// Sugar over `concat` with a scale.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        if let Some(m) = Transform::from_scale(sx, sy) {
            self.concat(m);
        }
    }

    /// Sugar over `concat` with a rotation, in radians.
    pub fn rotate(&mut self, radians: f32) {
        if let Some(m) = Transform::from_rotate(radians) {
            self.concat(m);
        }
    }

    /// Draws `src` mapped onto `dst` using a bitmap shader in Clamp mode.
    pub fn fill_bitmap_rect(&mut self, src: Bitmap, dst: Rect) {
        let dst_w = dst.right() - dst.left();
        let dst_h = dst.bottom() - dst.top();
        if dst_w <= 0.0 || dst_h <= 0.0 {
            log::warn!("fillBitmapRect destination rect is empty");
            return;
        }

        let local = match Transform::from_row(
            dst_w / src.width() as f32, 0.0,
            0.0, dst_h / src.height() as f32,
            dst.left(), dst.top(),
        ) {
            Some(m) => m,
            None => {
                log::warn!("fillBitmapRect scale transform is non-finite");
                return;
            }
        };

        let mut paint = Paint::new();
        paint.set_shader(Some(Shader::Bitmap(BitmapShader::new(src, local, TileMode::Clamp))));
        self.draw_rect(dst, &paint);
    }

    /// Fills `rect`, with "pixel center strictly inside" containment.
    pub fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.draw_convex_polygon(&rect.to_points(), paint);
    }

    /// Scan-converts a convex polygon: two active edges (left, right) walked top to
    /// bottom. Faster than [`Canvas::draw_contours`] but only correct for a single,
    /// convex, non-self-intersecting outline.
    pub fn draw_convex_polygon(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 3 {
            log::warn!("a convex polygon needs at least 3 points");
            return;
        }

        let mut device_points: Vec<Point> = points.to_vec();
        self.ctm.map_points(&mut device_points);

        let mut edges = Vec::new();
        let n = device_points.len();
        for i in 0..n {
            clip_and_build_edge(device_points[i], device_points[(i + 1) % n], self.clip, &mut edges);
        }
        if edges.len() < 2 {
            return;
        }
        sort_edges(&mut edges);

        let paint = match paint_with_context(paint, &self.ctm) {
            Some(Ok(paint)) => Some(paint),
            Some(Err(())) => {
                log::warn!("shader transform is singular, skipping draw");
                return;
            }
            None => None,
        };

        let mut left = 0usize;
        let mut right = 1usize;
        let mut next = 2usize;
        let mut y = edges[left].y_min;

        loop {
            let sx = round_half_up(edges[left].x_current);
            let ex = round_half_up(edges[right].x_current);
            self.shade_span(sx, y, ex, paint.as_ref().map(ResolvedPaintOwner::as_ref));

            y += 1;

            if y == edges[left].y_max {
                if next == edges.len() {
                    return;
                }
                left = next;
                next += 1;
            } else {
                edges[left].step();
            }

            if y == edges[right].y_max {
                if next == edges.len() {
                    return;
                }
                right = next;
                next += 1;
            } else {
                edges[right].step();
            }
        }
    }

    /// Scan-converts one or more contours with the non-zero winding rule, via a full
    /// active-edge-list walk. Stroke-mode paints are expanded to filled contours
    /// first and recursed into in fill mode.
    pub fn draw_contours(&mut self, contours: &[Contour], paint: &Paint) {
        if paint.is_stroke() {
            let stroked = stroker::stroke_contours(contours, paint.stroke_width(), paint.miter_limit());
            let mut fill_paint = Paint::new();
            fill_paint.set_color(paint.color());
            fill_paint.set_shader(paint.shader().cloned());
            let owned: Vec<Contour> = stroked.iter().map(|pts| Contour::new(pts, true)).collect();
            self.draw_contours(&owned, &fill_paint);
            return;
        }

        let mut edges = Vec::new();
        for contour in contours {
            if contour.points().len() < 3 {
                continue;
            }
            for (p0, p1) in contour.segments() {
                clip_and_build_edge(self.ctm.map_point(p0), self.ctm.map_point(p1), self.clip, &mut edges);
            }
        }
        if edges.len() < 2 {
            return;
        }
        sort_edges(&mut edges);

        let paint = match paint_with_context(paint, &self.ctm) {
            Some(Ok(paint)) => Some(paint),
            Some(Err(())) => {
                log::warn!("shader transform is singular, skipping draw");
                return;
            }
            None => None,
        };

        let mut active: Vec<usize> = Vec::new();
        let mut next_edge = 0usize;
        let mut y = 0i32;
        let mut need_sort = true;

        loop {
            let before = active.len();
            active.retain(|&i| edges[i].y_max > y);
            if active.len() != before {
                need_sort = true;
            }

            if active.is_empty() {
                if next_edge >= edges.len() {
                    return;
                }
                active.push(next_edge);
                y = edges[next_edge].y_min;
                next_edge += 1;
                need_sort = true;
            }

            while next_edge < edges.len() && edges[next_edge].y_min == y {
                active.push(next_edge);
                next_edge += 1;
                need_sort = true;
            }

            if need_sort {
                active.sort_by(|&a, &b| {
                    edges[a].x_current.partial_cmp(&edges[b].x_current).unwrap_or(std::cmp::Ordering::Equal)
                });
                need_sort = false;
            }

            let mut i = 0;
            while i < active.len() {
                let start_x = round_half_up(edges[active[i]].x_current);
                let mut acc = edges[active[i]].orientation;
                let mut j = i + 1;
                while j < active.len() {
                    acc += edges[active[j]].orientation;
                    if acc == 0 {
                        let end_x = round_half_up(edges[active[j]].x_current);
                        self.shade_span(start_x, y, end_x, paint.as_ref().map(ResolvedPaintOwner::as_ref));
                        break;
                    }
                    j += 1;
                }
                i = j + 1;
            }

            for idx in 0..active.len() {
                edges[active[idx]].step();
                if idx > 0 && edges[active[idx]].x_current < edges[active[idx - 1]].x_current {
                    need_sort = true;
                }
            }

            y += 1;
        }
    }

    /// Fans a triangle soup (optionally indexed, with optional per-vertex colors
    /// and/or texture coordinates) into per-triangle `draw_contours` calls.
    pub fn draw_mesh(
        &mut self,
        points: &[Point],
        indices: Option<&[u32]>,
        colors: Option<&[Color]>,
        tex: Option<&[Point]>,
        paint: &Paint,
    ) {
        let triangle_count = match indices {
            Some(indices) => indices.len() / 3,
            None => points.len() / 3,
        };

        for i in 0..triangle_count {
            let tri = resolve_triangle(i, points, indices, colors, tex);
            let shader = match triangle_shader(&tri, paint.shader()) {
                Some(shader) => shader,
                None => continue,
            };

            let mut tri_paint = Paint::new();
            tri_paint.set_color(paint.color());
            tri_paint.set_shader(Some(shader));

            let contour = Contour::new(&tri.points, true);
            self.draw_contours(std::slice::from_ref(&contour), &tri_paint);
        }
    }

    /// Bilinearly subdivides a quad patch into a triangle mesh and draws it.
    pub fn draw_quad_patch(
        &mut self,
        corners: [Point; 4],
        colors: Option<[Color; 4]>,
        tex: Option<[Point; 4]>,
        subdivisions: u32,
        paint: &Paint,
    ) {
        let (points, colors, tex) = tessellate_quad_patch(corners, colors, tex, subdivisions);
        self.draw_mesh(&points, None, colors.as_deref(), tex.as_deref(), paint);
    }

    /// Shades and blends the span `[x0, x1)` of scanline `y`, chunking shader spans
    /// into buffers of at most [`MAX_SHADE_ROW`] pixels.
    ///
    /// `x0`/`x1`/`y` are always within the surface: every edge reaching here was
    /// already clipped against `self.clip` by `clip_and_build_edge`.
    fn shade_span(&mut self, x0: i32, y: i32, x1: i32, paint: Option<ResolvedPaint>) {
        if x1 <= x0 {
            return;
        }

        let dst = self.surface.row_mut(y as u32);
        let dst = &mut dst[x0 as usize..x1 as usize];

        match paint {
            None => {}
            Some(ResolvedPaint::Solid(pixel)) => {
                if pixel.alpha() == 255 {
                    blend::fill_row(*pixel, dst);
                } else {
                    blend::blend_row(*pixel, dst);
                }
            }
            Some(ResolvedPaint::Shader(shader)) => {
                let mut buf = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); MAX_SHADE_ROW];
                let mut x = x0;
                let mut remaining = (x1 - x0) as usize;
                let mut offset = 0usize;
                while remaining > 0 {
                    let n = remaining.min(MAX_SHADE_ROW);
                    shader.shade_row(x, y, n, &mut buf[..n]);
                    blend::blend_rows(&buf[..n], &mut dst[offset..offset + n]);
                    x += n as i32;
                    offset += n;
                    remaining -= n;
                }
            }
        }
    }

    /// Creates a shader for a radial gradient of `n >= 2` colors evenly spaced
    /// along the radius of a circle centered at `(cx, cy)`.
    pub fn make_radial_gradient(cx: f32, cy: f32, radius: f32, colors: Vec<Color>) -> Shader<'static> {
        Shader::RadialGradient(RadialGradientShader::new(cx, cy, radius, colors))
    }
}

/// The result of resolving a paint's shading path once per draw call: either a
/// precomputed solid pixel, or a context-configured shader ready for `shade_row`.
#[derive(Clone, Copy)]
enum ResolvedPaint<'p, 's> {
    Solid(PremultipliedColorU8),
    Shader(&'p Shader<'s>),
}

/// Resolves `paint`'s shading path for this draw call.
///
/// Returns `None` when there is nothing to draw with (unreachable today, kept for
/// symmetry with the shader failure case); `Some(Err(()))` when the paint has a
/// shader and its combined transform is singular (the caller must skip the draw);
/// `Some(Ok(_))` otherwise.
fn paint_with_context<'p, 's>(paint: &'p Paint<'s>, ctm: &Transform) -> Option<Result<ResolvedPaintOwner<'p, 's>, ()>> {
    match paint.shader() {
        None => {
            let pixel = paint.color().premultiply().to_color_u8();
            Some(Ok(ResolvedPaintOwner::Solid(pixel)))
        }
        Some(shader) => {
            let mut shader = shader.clone();
            if !shader.set_context(ctm, paint.color().alpha()) {
                return Some(Err(()));
            }
            Some(Ok(ResolvedPaintOwner::Shader(shader)))
        }
    }
}

/// Owns the per-draw-call resolved shading path (a shader must be cloned to be
/// mutated by `set_context` without requiring `&mut Paint`).
enum ResolvedPaintOwner<'p, 's> {
    Solid(PremultipliedColorU8),
    Shader(Shader<'s>),
}

impl<'p, 's> ResolvedPaintOwner<'p, 's> {
    fn as_ref(&self) -> ResolvedPaint<'_, 's> {
        match self {
            ResolvedPaintOwner::Solid(pixel) => ResolvedPaint::Solid(*pixel),
            ResolvedPaintOwner::Shader(shader) => ResolvedPaint::Shader(shader),
        }
    }
}

#[inline]
fn round_half_up(x: f32) -> i32 {
    (x + 0.5) as i32
}
