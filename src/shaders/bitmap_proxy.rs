// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::shaders::Shader;
use crate::{Point, PremultipliedColorU8, Transform};

/// Wraps another shader (typically a [`super::BitmapShader`]) and remaps a triangle's
/// device-space positions into its texture coordinates before the wrapped shader
/// samples them.
#[derive(Clone)]
pub struct BitmapProxyShader<'a> {
    pts_matrix: Transform,
    tex_matrix_inv: Transform,
    inner: Shader<'a>,
}

impl<'a> BitmapProxyShader<'a> {
    /// Creates a proxy mapping triangle `pts` to texture coordinates `tex`, both given
    /// as `[p0, p1, p2]` with `p0` the pivot, `p0 -> p1` the u-axis and `p0 -> p2` the
    /// v-axis. `inner` is evaluated in the resulting texture space.
    ///
    /// Returns `None` if the texture triangle is degenerate (its basis is singular).
    pub fn new(inner: Shader<'a>, pts: [Point; 3], tex: [Point; 3]) -> Option<Self> {
        let pts_matrix = Transform::from_row(
            pts[1].x - pts[0].x, pts[1].y - pts[0].y,
            pts[2].x - pts[0].x, pts[2].y - pts[0].y,
            pts[0].x, pts[0].y,
        )?;
        let tex_matrix = Transform::from_row(
            tex[1].x - tex[0].x, tex[1].y - tex[0].y,
            tex[2].x - tex[0].x, tex[2].y - tex[0].y,
            tex[0].x, tex[0].y,
        )?;
        let tex_matrix_inv = tex_matrix.invert()?;

        Some(BitmapProxyShader { pts_matrix, tex_matrix_inv, inner })
    }

    pub(crate) fn set_context(&mut self, ctm: &Transform, alpha: f32) -> bool {
        let combined = ctm.pre_concat(&self.pts_matrix).pre_concat(&self.tex_matrix_inv);
        self.inner.set_context(&combined, alpha)
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, count: usize, out: &mut [PremultipliedColorU8]) {
        self.inner.shade_row(x, y, count, out)
    }
}
