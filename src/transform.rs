// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use strict_num::FiniteF32;

use crate::Point;
use crate::scalar::{ScalarExt, SCALAR_NEARLY_ZERO};

#[derive(Copy, Clone, PartialEq, Default)]
struct TransformFlags(u8);

impl TransformFlags {
    const IDENTITY: Self  = TransformFlags(0x00);
    const TRANSLATE: Self = TransformFlags(0x01);
    const SCALE: Self     = TransformFlags(0x02);
    const SKEW: Self      = TransformFlags(0x04);

    #[inline] fn has_translate(self) -> bool { self.0 & 0x01 != 0 }
    #[inline] fn has_scale(self) -> bool { self.0 & 0x02 != 0 }
    #[inline] fn has_skew(self) -> bool { self.0 & 0x04 != 0 }
}

impl std::ops::BitOr for TransformFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, other: Self) -> Self::Output {
        TransformFlags(self.0 | other.0)
    }
}

impl std::ops::BitOrAssign for TransformFlags {
    #[inline]
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0
    }
}

/// An affine transformation matrix: `[sx kx tx; ky sy ty]`.
///
/// # Guarantees
///
/// - All values are finite.
#[derive(Copy, Clone)]
pub struct Transform {
    sx: FiniteF32, kx: FiniteF32, tx: FiniteF32,
    ky: FiniteF32, sy: FiniteF32, ty: FiniteF32,
    flags: TransformFlags,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform::identity()
    }
}

fn finite(v: f32) -> FiniteF32 {
    FiniteF32::new(v).expect("value produced by internal matrix algebra must stay finite")
}

impl Transform {
    /// Creates an identity transform.
    #[inline]
    pub fn identity() -> Self {
        Transform {
            sx: finite(1.0), kx: finite(0.0), tx: finite(0.0),
            ky: finite(0.0), sy: finite(1.0), ty: finite(0.0),
            flags: TransformFlags::IDENTITY,
        }
    }

    /// Creates a new `Transform` from a full row-major set of coefficients.
    ///
    /// # Checks
    ///
    /// All values must be finite.
    #[inline]
    pub fn from_row(sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) -> Option<Self> {
        let mut m = Transform {
            sx: FiniteF32::new(sx)?,
            ky: FiniteF32::new(ky)?,
            kx: FiniteF32::new(kx)?,
            sy: FiniteF32::new(sy)?,
            tx: FiniteF32::new(tx)?,
            ty: FiniteF32::new(ty)?,
            flags: TransformFlags::IDENTITY,
        };
        m.compute_flags();
        Some(m)
    }

    /// Creates a new translating Transform.
    #[inline]
    pub fn from_translate(tx: f32, ty: f32) -> Option<Self> {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a new scaling Transform.
    ///
    /// `sx` and `sy` may be zero (a degenerate, non-invertible scale); this is allowed
    /// at construction and only surfaces as a failure from `invert`.
    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Option<Self> {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a new rotating Transform, `angle` in radians, about the origin.
    #[inline]
    pub fn from_rotate(angle: f32) -> Option<Self> {
        let (sin, cos) = angle.sin_cos();
        Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Returns all six coefficients as `(sx, ky, kx, sy, tx, ty)`.
    #[inline]
    pub fn get_row(&self) -> (f32, f32, f32, f32, f32, f32) {
        (self.sx.get(), self.ky.get(), self.kx.get(), self.sy.get(), self.tx.get(), self.ty.get())
    }

    #[inline]
    fn get_row_safe(&self) -> (FiniteF32, FiniteF32, FiniteF32, FiniteF32, FiniteF32, FiniteF32) {
        (self.sx, self.ky, self.kx, self.sy, self.tx, self.ty)
    }

    /// Checks that transform is identity. Free: the type is detected on creation.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.flags == TransformFlags::IDENTITY
    }

    #[inline]
    fn is_scale_translate(&self) -> bool {
        !self.flags.has_skew()
    }

    #[inline]
    fn has_scale(&self) -> bool {
        self.flags.has_scale()
    }

    #[inline]
    fn compute_flags(&mut self) {
        self.flags = TransformFlags::IDENTITY;

        if self.sx != finite(1.0) || self.sy != finite(1.0) {
            self.flags |= TransformFlags::SCALE;
        }
        if self.tx != finite(0.0) || self.ty != finite(0.0) {
            self.flags |= TransformFlags::TRANSLATE;
        }
        if self.kx != finite(0.0) || self.ky != finite(0.0) {
            self.flags |= TransformFlags::SKEW;
        }
    }

    /// Pre-concats: returns `self · other` (`other` is applied first).
    #[inline]
    #[must_use]
    pub fn pre_concat(&self, other: &Self) -> Self {
        concat(self, other)
    }

    /// Post-concats: returns `other · self` (`self` is applied first).
    #[inline]
    #[must_use]
    pub fn post_concat(&self, other: &Self) -> Self {
        concat(other, self)
    }

    /// Maps a single point through this transform.
    ///
    /// Safe to call with `src` and a later read of the same binding — there is no
    /// aliasing hazard since this takes `Point` by value.
    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        if self.is_identity() {
            p
        } else if self.is_scale_translate() {
            let (sx, _, _, sy, tx, ty) = self.get_row();
            Point::from_xy(p.x * sx + tx, p.y * sy + ty)
        } else {
            let (sx, ky, kx, sy, tx, ty) = self.get_row();
            Point::from_xy(p.x * sx + p.y * kx + tx, p.x * ky + p.y * sy + ty)
        }
    }

    /// Maps every point in `points` in place.
    pub fn map_points(&self, points: &mut [Point]) {
        for p in points {
            *p = self.map_point(*p);
        }
    }

    /// Returns the inverse transform, or `None` if this transform is singular
    /// (determinant `sx*sy - kx*ky` is zero).
    pub fn invert(&self) -> Option<Self> {
        if self.is_identity() {
            return Some(*self);
        }

        invert(self)
    }
}

impl std::cmp::PartialEq for Transform {
    fn eq(&self, other: &Transform) -> bool {
        self.flags == other.flags &&
        self.sx == other.sx && self.ky == other.ky && self.kx == other.kx &&
        self.sy == other.sy && self.tx == other.tx && self.ty == other.ty
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("sx", &self.sx).field("ky", &self.ky).field("kx", &self.kx)
            .field("sy", &self.sy).field("tx", &self.tx).field("ty", &self.ty)
            .finish()
    }
}

fn invert(ts: &Transform) -> Option<Transform> {
    debug_assert!(!ts.is_identity());

    if ts.is_scale_translate() {
        let (sx, _, _, sy, tx, ty) = ts.get_row();
        if ts.has_scale() {
            if sx == 0.0 || sy == 0.0 {
                return None;
            }
            let inv_x = 1.0 / sx;
            let inv_y = 1.0 / sy;
            Transform::from_row(inv_x, 0.0, 0.0, inv_y, -tx * inv_x, -ty * inv_y)
        } else {
            Transform::from_translate(-tx, -ty)
        }
    } else {
        let inv_det = inv_determinant(ts)?;
        compute_inv(ts, inv_det)
    }
}

// Computed in f64 to keep precision since the determinant is cubic in the matrix
// components (tiny skews otherwise round off to a false zero).
fn inv_determinant(ts: &Transform) -> Option<f64> {
    let (sx, ky, kx, sy, _, _) = ts.get_row();
    let det = dcross(sx as f64, sy as f64, kx as f64, ky as f64);

    let tolerance = SCALAR_NEARLY_ZERO * SCALAR_NEARLY_ZERO * SCALAR_NEARLY_ZERO;
    if (det as f32).is_nearly_zero(tolerance) {
        None
    } else {
        Some(1.0 / det)
    }
}

fn compute_inv(ts: &Transform, inv_det: f64) -> Option<Transform> {
    let (sx, ky, kx, sy, tx, ty) = ts.get_row();

    Transform::from_row(
        (sy as f64 * inv_det) as f32,
        (-ky as f64 * inv_det) as f32,
        (-kx as f64 * inv_det) as f32,
        (sx as f64 * inv_det) as f32,
        dcross_dscale(kx, ty, sy, tx, inv_det),
        dcross_dscale(ky, tx, sx, ty, inv_det),
    )
}

fn dcross(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * b - c * d
}

fn dcross_dscale(a: f32, b: f32, c: f32, d: f32, scale: f64) -> f32 {
    (dcross(a as f64, b as f64, c as f64, d as f64) * scale) as f32
}

fn concat(a: &Transform, b: &Transform) -> Transform {
    if a.is_identity() {
        *b
    } else if b.is_identity() {
        *a
    } else if !a.flags.has_skew() && !b.flags.has_skew() {
        let (a_sx, _, _, a_sy, a_tx, a_ty) = a.get_row_safe();
        let (b_sx, _, _, b_sy, b_tx, b_ty) = b.get_row_safe();
        let mut m = Transform {
            sx: a_sx * b_sx, kx: finite(0.0), tx: a_sx * b_tx + a_tx,
            ky: finite(0.0), sy: a_sy * b_sy, ty: a_sy * b_ty + a_ty,
            flags: TransformFlags::IDENTITY,
        };
        m.compute_flags();
        m
    } else {
        let (a_sx, a_ky, a_kx, a_sy, a_tx, a_ty) = a.get_row();
        let (b_sx, b_ky, b_kx, b_sy, b_tx, b_ty) = b.get_row();
        let mut m = Transform {
            sx: mul_add_mul(a_sx, b_sx, a_kx, b_ky),
            ky: mul_add_mul(a_ky, b_sx, a_sy, b_ky),
            kx: mul_add_mul(a_sx, b_kx, a_kx, b_sy),
            sy: mul_add_mul(a_ky, b_kx, a_sy, b_sy),
            tx: mul_add_mul(a_sx, b_tx, a_kx, b_ty) + finite(a_tx),
            ty: mul_add_mul(a_ky, b_tx, a_sy, b_ty) + finite(a_ty),
            flags: TransformFlags::IDENTITY,
        };
        m.compute_flags();
        m
    }
}

// All six outputs are computed into locals before assembling the result, so this
// (and `concat` above) is safe to use even when the caller aliases a source matrix
// with the destination.
fn mul_add_mul(a: f32, b: f32, c: f32, d: f32) -> FiniteF32 {
    finite((f64::from(a) * f64::from(b) + f64::from(c) * f64::from(d)) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips() {
        let ts = Transform::identity();
        assert!(ts.is_identity());
        assert_eq!(ts.map_point(Point::from_xy(3.0, 4.0)), Point::from_xy(3.0, 4.0));
    }

    #[test]
    fn rotate_by_half_pi_twice_cancels() {
        let ts = Transform::from_rotate(std::f32::consts::FRAC_PI_2)
            .unwrap()
            .pre_concat(&Transform::from_rotate(-std::f32::consts::FRAC_PI_2).unwrap());
        let (sx, ky, kx, sy, tx, ty) = ts.get_row();
        assert!((sx - 1.0).abs() < 1e-5);
        assert!(ky.abs() < 1e-5);
        assert!(kx.abs() < 1e-5);
        assert!((sy - 1.0).abs() < 1e-5);
        assert!(tx.abs() < 1e-5);
        assert!(ty.abs() < 1e-5);

        let p = ts.map_point(Point::from_xy(1.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }

    #[test]
    fn invert_of_singular_transform_is_none() {
        assert_eq!(Transform::from_scale(0.0, 1.0).unwrap().invert(), None);
    }

    #[test]
    fn invert_round_trips() {
        let ts = Transform::from_row(2.0, 0.5, -0.3, 1.5, 10.0, -5.0).unwrap();
        let back = ts.invert().unwrap().invert().unwrap();
        let (sx, ky, kx, sy, tx, ty) = ts.get_row();
        let (sx2, ky2, kx2, sy2, tx2, ty2) = back.get_row();
        assert!((sx - sx2).abs() < 1e-4);
        assert!((ky - ky2).abs() < 1e-4);
        assert!((kx - kx2).abs() < 1e-4);
        assert!((sy - sy2).abs() < 1e-4);
        assert!((tx - tx2).abs() < 1e-3);
        assert!((ty - ty2).abs() < 1e-3);
    }

    #[test]
    fn concat_applies_right_operand_first() {
        let scale = Transform::from_scale(2.0, 2.0).unwrap();
        let translate = Transform::from_translate(10.0, 0.0).unwrap();
        // pre_concat(scale, translate) models "translate, then scale".
        let combined = scale.pre_concat(&translate);
        assert_eq!(combined.map_point(Point::from_xy(1.0, 1.0)), Point::from_xy(22.0, 2.0));
    }
}
