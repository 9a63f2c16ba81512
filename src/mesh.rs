// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Builds a per-triangle shader for the mesh drawer and the quad-patch convenience
//! wrapper over it.

use crate::shaders::{BitmapProxyShader, ColorTriangleShader, ComposeShader};
use crate::{Color, Point, Shader};

/// One triangle's vertex data, resolved (through an optional index buffer) to
/// absolute positions and optional per-vertex color/texture-coordinate triples.
pub(crate) struct Triangle {
    pub points: [Point; 3],
    pub colors: Option<[Color; 3]>,
    pub tex: Option<[Point; 3]>,
}

/// Builds the shader a single mesh triangle draws with, per the mesh drawer's rule:
/// colors and tex both present composes a color-triangle shader with a bitmap proxy
/// around the paint's shader; only one of them present uses that shader alone;
/// neither present means the triangle is skipped (`None`).
pub(crate) fn triangle_shader<'a>(tri: &Triangle, paint_shader: Option<&Shader<'a>>) -> Option<Shader<'a>> {
    match (tri.colors, tri.tex) {
        (Some(colors), Some(tex)) => {
            let tri_shader = ColorTriangleShader::new(
                tri.points[0], tri.points[1], tri.points[2],
                colors[0], colors[1], colors[2],
            );
            let tex_shader = BitmapProxyShader::new(paint_shader.cloned()?, tri.points, tex)?;
            Some(Shader::Compose(Box::new(ComposeShader::new(
                Shader::Proxy(Box::new(tex_shader)),
                Shader::ColorTriangle(tri_shader),
            ))))
        }
        (Some(colors), None) => Some(Shader::ColorTriangle(ColorTriangleShader::new(
            tri.points[0], tri.points[1], tri.points[2],
            colors[0], colors[1], colors[2],
        ))),
        (None, Some(tex)) => {
            let tex_shader = BitmapProxyShader::new(paint_shader.cloned()?, tri.points, tex)?;
            Some(Shader::Proxy(Box::new(tex_shader)))
        }
        (None, None) => None,
    }
}

/// Resolves triangle `i` of a mesh (optionally indexed) into absolute vertex data.
pub(crate) fn resolve_triangle(
    i: usize,
    points: &[Point],
    indices: Option<&[u32]>,
    colors: Option<&[Color]>,
    tex: Option<&[Point]>,
) -> Triangle {
    let idx = |slot: usize| -> usize {
        match indices {
            Some(indices) => indices[i * 3 + slot] as usize,
            None => i * 3 + slot,
        }
    };

    let (i0, i1, i2) = (idx(0), idx(1), idx(2));

    Triangle {
        points: [points[i0], points[i1], points[i2]],
        colors: colors.map(|c| [c[i0], c[i1], c[i2]]),
        tex: tex.map(|t| [t[i0], t[i1], t[i2]]),
    }
}

/// Bilinearly interpolates across a quad patch with corners in top-left, top-right,
/// bottom-right, bottom-left winding, subdividing it into `n * n` quads (`2 * n * n`
/// triangles), and returns the flattened per-triangle vertex buffers (points, and
/// optionally colors and/or texture coordinates) ready for the mesh drawer.
///
/// Weights follow the standard bilinear form `(1-u)(1-v)*P00 + u(1-v)*P10 +
/// (1-u)v*P01 + uv*P11`.
pub(crate) fn tessellate_quad_patch(
    corners: [Point; 4],
    colors: Option<[Color; 4]>,
    tex: Option<[Point; 4]>,
    n: u32,
) -> (Vec<Point>, Option<Vec<Color>>, Option<Vec<Point>>) {
    let n = n.max(1);
    let steps = n + 1;

    let mut grid_points = Vec::with_capacity((steps * steps) as usize);
    let mut grid_colors = colors.map(|_| Vec::with_capacity((steps * steps) as usize));
    let mut grid_tex = tex.map(|_| Vec::with_capacity((steps * steps) as usize));

    for row in 0..steps {
        let v = row as f32 / n as f32;
        for col in 0..steps {
            let u = col as f32 / n as f32;
            grid_points.push(bilinear_point(corners, u, v));
            if let (Some(c), Some(grid)) = (colors, grid_colors.as_mut()) {
                grid.push(bilinear_color(c, u, v));
            }
            if let (Some(t), Some(grid)) = (tex, grid_tex.as_mut()) {
                grid.push(bilinear_point(t, u, v));
            }
        }
    }

    let mut out_points = Vec::with_capacity((6 * n * n) as usize);
    let mut out_colors = grid_colors.is_some().then(Vec::new);
    let mut out_tex = grid_tex.is_some().then(Vec::new);

    for row in 0..n {
        for col in 0..n {
            let tl = (row * steps + col) as usize;
            let tr = tl + 1;
            let bl = ((row + 1) * steps + col) as usize;
            let br = bl + 1;

            for &(a, b, c) in &[(tl, tr, br), (tl, br, bl)] {
                out_points.push(grid_points[a]);
                out_points.push(grid_points[b]);
                out_points.push(grid_points[c]);
                if let (Some(grid), Some(out)) = (grid_colors.as_ref(), out_colors.as_mut()) {
                    out.push(grid[a]);
                    out.push(grid[b]);
                    out.push(grid[c]);
                }
                if let (Some(grid), Some(out)) = (grid_tex.as_ref(), out_tex.as_mut()) {
                    out.push(grid[a]);
                    out.push(grid[b]);
                    out.push(grid[c]);
                }
            }
        }
    }

    (out_points, out_colors, out_tex)
}

fn bilinear_point(corners: [Point; 4], u: f32, v: f32) -> Point {
    let [p00, p10, p11, p01] = corners;
    p00 * ((1.0 - u) * (1.0 - v))
        + p10 * (u * (1.0 - v))
        + p01 * ((1.0 - u) * v)
        + p11 * (u * v)
}

fn bilinear_color(corners: [Color; 4], u: f32, v: f32) -> Color {
    let [c00, c10, c11, c01] = corners;
    let w00 = (1.0 - u) * (1.0 - v);
    let w10 = u * (1.0 - v);
    let w01 = (1.0 - u) * v;
    let w11 = u * v;
    Color::from_rgba(
        c00.red() * w00 + c10.red() * w10 + c01.red() * w01 + c11.red() * w11,
        c00.green() * w00 + c10.green() * w10 + c01.green() * w01 + c11.green() * w11,
        c00.blue() * w00 + c10.blue() * w10 + c01.blue() * w01 + c11.blue() * w11,
        c00.alpha() * w00 + c10.alpha() * w10 + c01.alpha() * w01 + c11.alpha() * w11,
    )
}
