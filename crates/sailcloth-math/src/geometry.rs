//! Guarded geometric primitives.
//!
//! Every function here has a defined result for degenerate input
//! (zero-length edges, zero-area triangles, collapsed UVs). A NaN that
//! leaks into the point grid is never recovered from, so callers rely on
//! these guards instead of calling `normalize()` directly.

use glam::{Vec2, Vec3};
use sailcloth_types::constants::{DEGENERATE_LENGTH, EPSILON};

/// Unnormalized normal of triangle `(a, b, c)`: `(b - a) × (c - a)`.
///
/// The magnitude is twice the triangle area, so summing these gives an
/// area-weighted average.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Normalizes `v`, or returns zero when `|v| <= DEGENERATE_LENGTH`.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > DEGENERATE_LENGTH {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Splits a separation vector into `(unit direction, length)`.
///
/// Returns `None` for coincident endpoints (`|d| <= EPSILON`).
#[inline]
pub fn direction_and_length(d: Vec3) -> Option<(Vec3, f32)> {
    let len = d.length();
    if len > EPSILON {
        Some((d / len, len))
    } else {
        None
    }
}

/// Cross product of two triangle edges, or `None` when the triangle has
/// no usable orientation.
///
/// The test is relative: `|e1 × e2| <= EPSILON * |e1| * |e2|`, i.e. the
/// sine of the angle between the edges vanishes. A triangle that is merely
/// small keeps its normal.
#[inline]
pub fn edge_normal(e1: Vec3, e2: Vec3) -> Option<Vec3> {
    let n = e1.cross(e2);
    if n.length() <= EPSILON * e1.length() * e2.length() {
        return None;
    }
    Some(n)
}

/// Solves the tangent-space system of one triangle.
///
/// `e1`, `e2` are position edges from the first vertex, `duv1`, `duv2` the
/// matching UV edges. Returns the (unnormalized) tangent along increasing
/// `u`, or `None` when the UV edges are parallel or vanish. Like
/// [`edge_normal`], the determinant is compared against the UV edge
/// lengths, so fine UV spacing on large grids still yields tangents.
#[inline]
pub fn triangle_tangent(e1: Vec3, e2: Vec3, duv1: Vec2, duv2: Vec2) -> Option<Vec3> {
    let det = duv1.x * duv2.y - duv2.x * duv1.y;
    if det.abs() <= EPSILON * duv1.length() * duv2.length() {
        return None;
    }
    Some((e1 * duv2.y - e2 * duv1.y) / det)
}
