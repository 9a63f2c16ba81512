// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::shaders::{combined_inverse, row_start_and_step, TileMode};
use crate::{Color, Point, PremultipliedColorU8, Transform};

/// A two-color gradient along the segment `p0 -> p1`, tiled per `tile_mode`.
#[derive(Clone, Copy)]
pub struct LinearGradientShader {
    local: Transform,
    c0: Color,
    c1: Color,
    tile_mode: TileMode,
    inverse: Transform,
    lookup: [PremultipliedColorU8; 256],
}

impl LinearGradientShader {
    /// Creates a gradient shader. The local transform maps the unit x-axis onto the
    /// segment `p0 -> p1`: `[dx, -dy, p0.x; dy, dx, p0.y]`.
    pub fn new(p0: Point, p1: Point, c0: Color, c1: Color, tile_mode: TileMode) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let local = Transform::from_row(dx, dy, -dy, dx, p0.x, p0.y)
            .unwrap_or_else(Transform::identity);

        LinearGradientShader {
            local,
            c0,
            c1,
            tile_mode,
            inverse: Transform::identity(),
            lookup: [PremultipliedColorU8::from_rgba(0, 0, 0, 0); 256],
        }
    }

    pub(crate) fn set_context(&mut self, ctm: &Transform, alpha: f32) -> bool {
        let inverse = match combined_inverse(ctm, &self.local) {
            Some(inverse) => inverse,
            None => return false,
        };
        self.inverse = inverse;
        self.rebuild_lookup(alpha);
        true
    }

    fn rebuild_lookup(&mut self, alpha: f32) {
        let delta_a = (1.0 / 255.0) * (self.c1.alpha() * alpha - self.c0.alpha() * alpha);
        let delta_r = (1.0 / 255.0) * (self.c1.red() - self.c0.red());
        let delta_g = (1.0 / 255.0) * (self.c1.green() - self.c0.green());
        let delta_b = (1.0 / 255.0) * (self.c1.blue() - self.c0.blue());

        let mut a = self.c0.alpha() * alpha;
        let mut r = self.c0.red();
        let mut g = self.c0.green();
        let mut b = self.c0.blue();

        for entry in self.lookup.iter_mut() {
            *entry = Color::from_rgba(r, g, b, a).premultiply().to_color_u8();
            a += delta_a;
            r += delta_r;
            g += delta_g;
            b += delta_b;
        }
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, count: usize, out: &mut [PremultipliedColorU8]) {
        let (mut p, step) = row_start_and_step(&self.inverse, x, y);

        for out_pixel in out.iter_mut().take(count) {
            let t = self.tile_mode.fold_unit(p.x);
            let index = (t * 255.0 + 0.5) as usize;
            *out_pixel = self.lookup[index.min(255)];
            p.x += step.x;
        }
    }
}
