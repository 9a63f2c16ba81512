// Copyright Daniel J. Steffey -- 2016
// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Turns stroked polylines into filled, closed contours: a butt-capped quad per
//! segment plus a miter or bevel joint at every interior vertex.

use crate::{Contour, Point};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Cap {
    None,
    Start,
    End,
    Both,
}

/// Synthesizes the filled contours that reproduce stroking `contours` with the given
/// `width` and `miter_limit`. Every returned contour is closed.
pub(crate) fn stroke_contours(contours: &[Contour], width: f32, miter_limit: f32) -> Vec<Vec<Point>> {
    let mut out = Vec::new();
    for contour in contours {
        stroke_one(contour, width, miter_limit, &mut out);
    }
    out
}

fn stroke_one(contour: &Contour, width: f32, miter_limit: f32, out: &mut Vec<Vec<Point>>) {
    let pts = contour.points();
    let k = pts.len();
    if k < 2 {
        return;
    }
    if k == 2 {
        out.push(quad(pts[0], pts[1], width, Cap::Both));
        return;
    }

    let closed = contour.is_closed();
    let n = if closed { k } else { k - 1 };
    let w2 = width / 2.0;

    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % k];
        if (b - a).length() == 0.0 {
            continue;
        }

        let cap = if !closed && i == 0 {
            Cap::Start
        } else if !closed && i == n - 1 {
            Cap::End
        } else {
            Cap::None
        };

        if cap == Cap::End {
            // The final segment of an open polyline: cap B, no joint follows.
            out.push(quad(a, b, width, cap));
            continue;
        }

        out.push(quad(a, b, width, cap));

        // The joint at B needs the next point C.
        let c = pts[(i + 2) % k];
        if let Some(joint) = joint_at(a, b, c, w2, miter_limit) {
            out.push(joint);
        }
    }
}

/// A butt-capped (or uncapped) quad around the segment `a -> b`.
fn quad(a: Point, b: Point, width: f32, cap: Cap) -> Vec<Point> {
    let ab = b - a;
    let length = ab.length();
    debug_assert!(length > 0.0);
    let dir = Point::from_xy(ab.x / length, ab.y / length);

    let w2 = width / 2.0;
    let (a, b) = match cap {
        Cap::None => (a, b),
        Cap::Start => (a - dir * w2, b),
        Cap::End => (a, b + dir * w2),
        Cap::Both => (a - dir * w2, b + dir * w2),
    };

    let perp = dir.left_perpendicular() * w2;
    vec![a + perp, b + perp, b - perp, a - perp]
}

/// Computes the joint at `b`, where the incoming segment is `a -> b` and the outgoing
/// segment is `b -> c`. Returns `None` for a degenerate or perfectly straight joint.
fn joint_at(a: Point, b: Point, c: Point, w2: f32, miter_limit: f32) -> Option<Vec<Point>> {
    let ab = (b - a).normalized()?;
    let bc = (c - b).normalized()?;

    let bq = ab.left_perpendicular();
    let br = bc.left_perpendicular();

    let q = b + bq * w2;
    let r = b + br * w2;

    let bp = bq + br;
    let bp = bp.normalized()?;

    let ab_dot_bc = (-ab).dot(bc);
    let turn = (-ab).cross(bc);
    if turn == 0.0 {
        return None;
    }

    let bp_length = w2 * (2.0 / (1.0 - ab_dot_bc)).sqrt();

    if bp_length > miter_limit * w2 {
        // Bevel: the BQR triangle, bent to whichever side the turn favors.
        let (q, r) = if turn > 0.0 { (b + bq * -w2, b + br * -w2) } else { (q, r) };
        Some(vec![b, q, r])
    } else {
        // Miter: the BQPR quad.
        if turn > 0.0 {
            let p = b + bp * -bp_length;
            let q = b + bq * -w2;
            let r = b + br * -w2;
            Some(vec![b, q, p, r])
        } else {
            let p = b + bp * bp_length;
            Some(vec![b, r, p, q])
        }
    }
}
