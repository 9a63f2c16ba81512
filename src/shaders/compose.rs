// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::blend::div255;
use crate::shaders::Shader;
use crate::{PremultipliedColorU8, Transform};

/// The maximum span length the canvas ever asks a shader to fill in one call.
pub(crate) const MAX_SHADE_ROW: usize = 256;

/// Multiplicatively composes two shaders: each output channel is the two shaders'
/// premultiplied channels multiplied and divided by 255 ("modulate" composition).
#[derive(Clone)]
pub struct ComposeShader<'a> {
    shader_1: Shader<'a>,
    shader_2: Shader<'a>,
}

impl<'a> ComposeShader<'a> {
    pub fn new(shader_1: Shader<'a>, shader_2: Shader<'a>) -> Self {
        ComposeShader { shader_1, shader_2 }
    }

    pub(crate) fn set_context(&mut self, ctm: &Transform, alpha: f32) -> bool {
        self.shader_1.set_context(ctm, alpha) && self.shader_2.set_context(ctm, alpha)
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, count: usize, out: &mut [PremultipliedColorU8]) {
        assert!(count <= MAX_SHADE_ROW);
        let mut other = [PremultipliedColorU8::from_rgba(0, 0, 0, 0); MAX_SHADE_ROW];

        self.shader_1.shade_row(x, y, count, out);
        self.shader_2.shade_row(x, y, count, &mut other);

        for (o, p1) in out.iter_mut().take(count).zip(other.iter()) {
            *o = PremultipliedColorU8::from_rgba(
                div255(o.red() as u32 * p1.red() as u32) as u8,
                div255(o.green() as u32 * p1.green() as u32) as u8,
                div255(o.blue() as u32 * p1.blue() as u32) as u8,
                div255(o.alpha() as u32 * p1.alpha() as u32) as u8,
            );
        }
    }
}
