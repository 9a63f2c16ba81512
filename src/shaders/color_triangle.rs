// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::shaders::{combined_inverse, row_start_and_step};
use crate::{Color, Point, PremultipliedColorU8, Transform};

/// Interpolates three colors across a triangle using barycentric coordinates.
#[derive(Clone, Copy)]
pub struct ColorTriangleShader {
    local: Transform,
    c0: Color,
    c1: Color,
    c2: Color,
    inverse: Transform,
    alpha: f32,
}

impl ColorTriangleShader {
    /// Creates a shader over the triangle `p0, p1, p2` with a color at each vertex.
    /// The local transform expresses device space in the barycentric frame where
    /// `p0` is the origin, `p0 -> p1` is the u-axis and `p0 -> p2` is the v-axis.
    pub fn new(p0: Point, p1: Point, p2: Point, c0: Color, c1: Color, c2: Color) -> Self {
        let local = Transform::from_row(p1.x - p0.x, p1.y - p0.y, p2.x - p0.x, p2.y - p0.y, p0.x, p0.y)
            .unwrap_or_else(Transform::identity);
        ColorTriangleShader { local, c0, c1, c2, inverse: Transform::identity(), alpha: 1.0 }
    }

    pub(crate) fn set_context(&mut self, ctm: &Transform, alpha: f32) -> bool {
        match combined_inverse(ctm, &self.local) {
            Some(inverse) => {
                self.inverse = inverse;
                self.alpha = alpha;
                true
            }
            None => false,
        }
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, count: usize, out: &mut [PremultipliedColorU8]) {
        let (mut p, step) = row_start_and_step(&self.inverse, x, y);

        for out_pixel in out.iter_mut().take(count) {
            let u = p.x;
            let v = p.y;
            let w = 1.0 - u - v;

            let a = (u * self.c1.alpha() + v * self.c2.alpha() + w * self.c0.alpha()) * self.alpha;
            let r = u * self.c1.red() + v * self.c2.red() + w * self.c0.red();
            let g = u * self.c1.green() + v * self.c2.green() + w * self.c0.green();
            let b = u * self.c1.blue() + v * self.c2.blue() + w * self.c0.blue();

            *out_pixel = Color::from_rgba(r, g, b, a).premultiply().to_color_u8();

            p.x += step.x;
            p.y += step.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_vertex_samples_its_own_color() {
        // shade_row samples at each pixel's center, so the triangle is placed a half
        // pixel off the origin to land the barycentric vertices exactly on sample
        // points.
        let mut shader = ColorTriangleShader::new(
            Point::from_xy(0.5, 0.5),
            Point::from_xy(10.5, 0.5),
            Point::from_xy(0.5, 10.5),
            Color::BLACK,
            Color::from_rgba8(255, 0, 0, 255),
            Color::from_rgba8(0, 255, 0, 255),
        );
        assert!(shader.set_context(&Transform::identity(), 1.0));

        let mut p0 = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); 1];
        shader.shade_row(0, 0, 1, &mut p0);
        assert_eq!(p0[0].red(), 0);
        assert_eq!(p0[0].green(), 0);

        let mut p1 = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); 1];
        shader.shade_row(10, 0, 1, &mut p1);
        assert_eq!(p1[0].red(), 255);
    }

    #[test]
    fn paint_alpha_scales_the_interpolated_alpha() {
        let mut shader = ColorTriangleShader::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            Point::from_xy(0.0, 10.0),
            Color::WHITE,
            Color::WHITE,
            Color::WHITE,
        );
        shader.set_context(&Transform::identity(), 0.5);

        let mut out = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); 1];
        shader.shade_row(1, 1, 1, &mut out);
        assert_eq!(out[0].alpha(), 128);
    }
}
