// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::shaders::{combined_inverse, row_start_and_step, TileMode};
use crate::{Bitmap, PremultipliedColorU8, Transform};

/// Samples a [`Bitmap`] with nearest-neighbor filtering and a single tile mode shared
/// by both axes.
#[derive(Clone, Copy)]
pub struct BitmapShader<'a> {
    bitmap: Bitmap<'a>,
    local: Transform,
    tile_mode: TileMode,
    inverse: Transform,
    alpha: f32,
}

impl<'a> BitmapShader<'a> {
    /// Creates a shader sampling `bitmap` through `local` (mapping the bitmap's
    /// intrinsic unit space into paint space), tiled per `tile_mode`.
    pub fn new(bitmap: Bitmap<'a>, local: Transform, tile_mode: TileMode) -> Self {
        BitmapShader { bitmap, local, tile_mode, inverse: Transform::identity(), alpha: 1.0 }
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
            let src_x = self.tile_mode.fold_index(p.x.floor() as i32, self.bitmap.width());
            let src_y = self.tile_mode.fold_index(p.y.floor() as i32, self.bitmap.height());
            let src = self.bitmap.pixel(src_x, src_y);

            *out_pixel = if self.alpha == 1.0 {
                src
            } else {
                PremultipliedColorU8::from_rgba(
                    scale_channel(src.red(), self.alpha),
                    scale_channel(src.green(), self.alpha),
                    scale_channel(src.blue(), self.alpha),
                    scale_channel(src.alpha(), self.alpha),
                )
            };

            p.x += step.x;
            p.y += step.y;
        }
    }
}

#[inline]
fn scale_channel(c: u8, alpha: f32) -> u8 {
    (c as f32 * alpha + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> Vec<PremultipliedColorU8> {
        vec![
            PremultipliedColorU8::from_rgba(255, 0, 0, 255),
            PremultipliedColorU8::from_rgba(0, 255, 0, 255),
            PremultipliedColorU8::from_rgba(0, 0, 255, 255),
            PremultipliedColorU8::from_rgba(255, 255, 255, 255),
        ]
    }

    #[test]
    fn clamp_mode_samples_nearest_and_clips_at_edges() {
        let px = checkerboard();
        let bmp = Bitmap::from_pixels(2, 2, &px).unwrap();
        let mut shader = BitmapShader::new(bmp, Transform::identity(), TileMode::Clamp);
        assert!(shader.set_context(&Transform::identity(), 1.0));

        let mut out = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); 4];
        shader.shade_row(0, 0, 4, &mut out);
        assert_eq!(out[0], px[0]);
        // x = 2, 3 clamp to column 1 (the last column), still row 0.
        assert_eq!(out[2], px[1]);
        assert_eq!(out[3], px[1]);
    }

    #[test]
    fn alpha_modulation_scales_every_channel() {
        let px = vec![PremultipliedColorU8::from_rgba(200, 100, 50, 200)];
        let bmp = Bitmap::from_pixels(1, 1, &px).unwrap();
        let mut shader = BitmapShader::new(bmp, Transform::identity(), TileMode::Clamp);
        shader.set_context(&Transform::identity(), 0.5);

        let mut out = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); 1];
        shader.shade_row(0, 0, 1, &mut out);
        assert_eq!(out[0].red(), 100);
        assert_eq!(out[0].alpha(), 100);
    }

    #[test]
    fn singular_combined_transform_fails_set_context() {
        let px = [PremultipliedColorU8::from_rgba(0, 0, 0, 0)];
        let bmp = Bitmap::from_pixels(1, 1, &px).unwrap();
        let mut shader = BitmapShader::new(bmp, Transform::from_scale(0.0, 1.0).unwrap(), TileMode::Clamp);
        assert!(!shader.set_context(&Transform::identity(), 1.0));
    }
}
