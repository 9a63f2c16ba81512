// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A uniform shading contract — `set_context` then `shade_row` — implemented by a
//! fixed set of variants instead of virtual dispatch.

mod bitmap;
mod bitmap_proxy;
mod color_triangle;
mod compose;
mod linear_gradient;
mod radial_gradient;

pub use bitmap::BitmapShader;
pub use bitmap_proxy::BitmapProxyShader;
pub use color_triangle::ColorTriangleShader;
pub use compose::ComposeShader;
pub use linear_gradient::LinearGradientShader;
pub use radial_gradient::RadialGradientShader;

pub(crate) use compose::MAX_SHADE_ROW;

use crate::{Point, PremultipliedColorU8, Transform};

/// How a gradient or bitmap shader samples outside its intrinsic `[0, 1]` domain.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TileMode {
    Clamp,
    Repeat,
    Mirror,
}

impl TileMode {
    /// Folds a 1D coordinate into `[0, 1]` per this tile mode.
    #[inline]
    pub(crate) fn fold_unit(&self, t: f32) -> f32 {
        match self {
            TileMode::Clamp => t.max(0.0).min(1.0),
            TileMode::Repeat => t - t.floor(),
            TileMode::Mirror => {
                let half = t * 0.5;
                1.0 - (1.0 - 2.0 * (half - half.floor())).abs()
            }
        }
    }

    /// Folds an integer coordinate `v` into `[0, extent)` per this tile mode, in
    /// source-pixel units (used by the bitmap shader).
    #[inline]
    pub(crate) fn fold_index(&self, v: i32, extent: u32) -> u32 {
        let extent = extent as i32;
        match self {
            TileMode::Clamp => v.max(0).min(extent - 1) as u32,
            TileMode::Repeat => v.rem_euclid(extent) as u32,
            TileMode::Mirror => {
                let period = 2 * extent;
                let folded = v.rem_euclid(period);
                if folded >= extent {
                    (period - folded - 1) as u32
                } else {
                    folded as u32
                }
            }
        }
    }
}

/// A shader variant. Every variant is configured once per draw call via
/// [`Shader::set_context`], then sampled a row at a time via [`Shader::shade_row`].
///
/// Cheap to clone: the heavy resource a shader may read (e.g. a bitmap's pixels) is
/// always held by borrowed reference, never by value.
#[derive(Clone)]
pub enum Shader<'a> {
    Bitmap(BitmapShader<'a>),
    LinearGradient(LinearGradientShader),
    RadialGradient(RadialGradientShader),
    ColorTriangle(ColorTriangleShader),
    Proxy(Box<BitmapProxyShader<'a>>),
    Compose(Box<ComposeShader<'a>>),
}

impl<'a> Shader<'a> {
    /// Combines the context CTM with paint alpha. Returns `false` when the shader's
    /// combined device-to-source transform is singular; the caller must then skip the
    /// shaded draw entirely.
    ///
    /// Must be called before any [`Shader::shade_row`] for a given draw.
    pub fn set_context(&mut self, ctm: &Transform, alpha: f32) -> bool {
        match self {
            Shader::Bitmap(s) => s.set_context(ctm, alpha),
            Shader::LinearGradient(s) => s.set_context(ctm, alpha),
            Shader::RadialGradient(s) => s.set_context(ctm, alpha),
            Shader::ColorTriangle(s) => s.set_context(ctm, alpha),
            Shader::Proxy(s) => s.set_context(ctm, alpha),
            Shader::Compose(s) => s.set_context(ctm, alpha),
        }
    }

    /// Fills `out[0..count]` with premultiplied source pixels for device pixels
    /// `(x, y), (x + 1, y), …, (x + count - 1, y)`, sampled at each pixel's center.
    pub fn shade_row(&self, x: i32, y: i32, count: usize, out: &mut [PremultipliedColorU8]) {
        match self {
            Shader::Bitmap(s) => s.shade_row(x, y, count, out),
            Shader::LinearGradient(s) => s.shade_row(x, y, count, out),
            Shader::RadialGradient(s) => s.shade_row(x, y, count, out),
            Shader::ColorTriangle(s) => s.shade_row(x, y, count, out),
            Shader::Proxy(s) => s.shade_row(x, y, count, out),
            Shader::Compose(s) => s.shade_row(x, y, count, out),
        }
    }
}

/// Combines the context CTM with a shader's local transform `L` (mapping the
/// shader's intrinsic unit space into paint space) into `M = (ctm * local)^-1`, the
/// device-to-source transform. Returns `None` when that combined transform is
/// singular.
pub(crate) fn combined_inverse(ctm: &Transform, local: &Transform) -> Option<Transform> {
    ctm.pre_concat(local).invert()
}

/// Returns the source point sampled for device pixel `(x, y)` and the per-pixel
/// step to add to walk one pixel to the right, both derived from the device-to-source
/// transform `m`.
#[inline]
pub(crate) fn row_start_and_step(m: &Transform, x: i32, y: i32) -> (Point, Point) {
    let p = m.map_point(Point::from_xy(x as f32 + 0.5, y as f32 + 0.5));
    let (sx, ky, ..) = m.get_row();
    (p, Point::from_xy(sx, ky))
}
