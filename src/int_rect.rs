// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::convert::TryFrom;

/// An integer rectangle on the device pixel grid — the clip rectangle the edge builder
/// clips every segment against.
///
/// # Guarantees
///
/// - Width and height are >= 1.
/// - `x + width` and `y + height` do not overflow `i32`.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct IntRect {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl IntRect {
    /// Creates a new `IntRect`.
    #[inline]
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        x.checked_add(i32::try_from(width).ok()?)?;
        y.checked_add(i32::try_from(height).ok()?)?;
        Some(IntRect { x, y, width, height })
    }

    #[inline]
    pub fn x(&self) -> i32 { self.x }
    #[inline]
    pub fn y(&self) -> i32 { self.y }
    #[inline]
    pub fn width(&self) -> u32 { self.width }
    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn left(&self) -> i32 { self.x }
    #[inline]
    pub fn top(&self) -> i32 { self.y }
    #[inline]
    pub fn right(&self) -> i32 { self.x + self.width as i32 }
    #[inline]
    pub fn bottom(&self) -> i32 { self.y + self.height as i32 }

    /// Converts into the floating-point `Rect` covering the same pixels.
    #[inline]
    pub(crate) fn to_rect(&self) -> crate::Rect {
        crate::Rect::from_ltrb(
            self.x as f32,
            self.y as f32,
            self.right() as f32,
            self.bottom() as f32,
        ).expect("an IntRect's edges are always finite and ordered")
    }
}
