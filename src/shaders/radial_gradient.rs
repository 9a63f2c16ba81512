// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::shaders::{combined_inverse, row_start_and_step};
use crate::{Color, PremultipliedColorU8, Transform};

/// `n >= 2` colors distributed evenly along the radius of a circle.
#[derive(Clone)]
pub struct RadialGradientShader {
    local: Transform,
    colors: Vec<Color>,
    inverse: Transform,
    alpha: f32,
}

impl RadialGradientShader {
    /// Creates a radial gradient centered at `(cx, cy)` with the given `radius`.
    /// The local transform maps the unit disc onto that circle:
    /// `[radius, 0, cx; 0, radius, cy]`.
    ///
    /// Panics if `colors` has fewer than 2 entries.
    pub fn new(cx: f32, cy: f32, radius: f32, colors: Vec<Color>) -> Self {
        assert!(colors.len() >= 2, "a radial gradient needs at least 2 colors");
        let local = Transform::from_row(radius, 0.0, 0.0, radius, cx, cy).unwrap_or_else(Transform::identity);
        RadialGradientShader { local, colors, inverse: Transform::identity(), alpha: 1.0 }
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
        let last = self.colors.len() - 1;

        for out_pixel in out.iter_mut().take(count) {
            let distance = (p.x * p.x + p.y * p.y).sqrt();

            let color = if distance >= 1.0 {
                self.colors[last]
            } else {
                let f = distance * last as f32;
                let i0 = f.floor() as usize;
                let i1 = f.ceil() as usize;
                let t = f - i0 as f32;

                let c0 = self.colors[i0];
                let c1 = self.colors[i1];
                let mut blended = Color::from_rgba(
                    (1.0 - t) * c0.red() + t * c1.red(),
                    (1.0 - t) * c0.green() + t * c1.green(),
                    (1.0 - t) * c0.blue() + t * c1.blue(),
                    (1.0 - t) * c0.alpha() + t * c1.alpha(),
                );
                blended.set_alpha(blended.alpha() * self.alpha);
                blended
            };

            *out_pixel = color.premultiply().to_color_u8();

            p.x += step.x;
            p.y += step.y;
        }
    }
}
