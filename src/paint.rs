// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Color, Shader};

/// A small value object carrying the color, shader, and stroke settings of a draw
/// call.
///
/// The shader, if any, is owned by the `Paint` itself and cheap to clone: a shader
/// variant never owns the heavy resource it reads (a bitmap's pixels are always held
/// by borrowed reference), so owning the shader descriptor costs nothing beyond the
/// lifetime `'a` bounding that borrow.
pub struct Paint<'a> {
    color: Color,
    shader: Option<Shader<'a>>,
    is_stroke: bool,
    stroke_width: f32,
    miter_limit: f32,
}

impl<'a> Default for Paint<'a> {
    #[inline]
    fn default() -> Self {
        Paint {
            color: Color::BLACK,
            shader: None,
            is_stroke: false,
            stroke_width: 1.0,
            miter_limit: 4.0,
        }
    }
}

impl<'a> Paint<'a> {
    /// Creates a paint with the default black, fill-mode settings.
    #[inline]
    pub fn new() -> Self {
        Paint::default()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn shader(&self) -> Option<&Shader<'a>> {
        self.shader.as_ref()
    }

    #[inline]
    pub fn set_shader(&mut self, shader: Option<Shader<'a>>) {
        self.shader = shader;
    }

    #[inline]
    pub fn is_stroke(&self) -> bool {
        self.is_stroke
    }

    #[inline]
    pub fn set_is_stroke(&mut self, is_stroke: bool) {
        self.is_stroke = is_stroke;
    }

    #[inline]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    #[inline]
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    #[inline]
    pub fn miter_limit(&self) -> f32 {
        self.miter_limit
    }

    #[inline]
    pub fn set_miter_limit(&mut self, limit: f32) {
        self.miter_limit = limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let paint = Paint::new();
        assert_eq!(paint.color(), Color::BLACK);
        assert!(paint.shader().is_none());
        assert!(!paint.is_stroke());
        assert_eq!(paint.stroke_width(), 1.0);
        assert_eq!(paint.miter_limit(), 4.0);
    }
}
