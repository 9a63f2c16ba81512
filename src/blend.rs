// Copyright 2006 The Android Open Source Project
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Source-over compositing of premultiplied pixels.

use crate::PremultipliedColorU8;

/// Divides `p` by 255, rounding to the nearest integer.
///
/// Exact for `0 <= p <= 255*255`: `p / 255 == (p * 65793 + (1 << 23)) >> 24`.
#[inline]
pub(crate) fn div255(p: u32) -> u32 {
    (p * 65793 + (1 << 23)) >> 24
}

/// Blends a single premultiplied source pixel over a premultiplied destination pixel,
/// using the source-over rule: `R = S + (255 - S.a) * D / 255` per channel.
///
/// Fast paths: a fully opaque source returns `src` unchanged; a fully transparent
/// source returns `dst` unchanged.
#[inline]
pub fn blend(src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let sa = src.alpha();
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let isa = 255 - sa as u32;
    PremultipliedColorU8::from_rgba(
        (src.red() as u32 + div255(isa * dst.red() as u32)) as u8,
        (src.green() as u32 + div255(isa * dst.green() as u32)) as u8,
        (src.blue() as u32 + div255(isa * dst.blue() as u32)) as u8,
        (sa as u32 + div255(isa * dst.alpha() as u32)) as u8,
    )
}

/// Blends `src` over every pixel in `dst`, in place.
pub fn blend_row(src: PremultipliedColorU8, dst: &mut [PremultipliedColorU8]) {
    if src.alpha() == 255 {
        fill_row(src, dst);
        return;
    }
    if src.alpha() == 0 {
        return;
    }

    for d in dst {
        *d = blend(src, *d);
    }
}

/// Blends each pixel of `src` over the matching pixel of `dst`, in place.
///
/// Panics if the slices differ in length.
pub fn blend_rows(src: &[PremultipliedColorU8], dst: &mut [PremultipliedColorU8]) {
    assert_eq!(src.len(), dst.len());

    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = blend(*s, *d);
    }
}

/// Overwrites every pixel in `dst` with `src`, without reading `dst`.
///
/// Valid only when `src` is known to be fully opaque; use this instead of `blend_row`
/// when the caller already knows `src.alpha() == 255` to skip the branch per pixel.
#[inline]
pub fn fill_row(src: PremultipliedColorU8, dst: &mut [PremultipliedColorU8]) {
    for d in dst {
        *d = src;
    }
}
