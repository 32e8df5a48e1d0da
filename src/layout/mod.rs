//! Geometry computations.
//!
//! Everything here is a pure function of the output resolution, the shared cut ratio and view
//! sizes. Applying the results to views lives in [`Session::relayout()`].
//!
//! Tiled views use a master/stack arrangement. The first tiled view (the master) sits on the
//! left; when it is alone it covers the whole output. Every other tiled view goes into the stack
//! on the right, `trunc(W * cut)` pixels wide, split vertically into equal rows. Whatever height
//! the integer division leaves over is given to the topmost stack row, so the rows always add up
//! to exactly the output height.
//!
//! [`Session::relayout()`]: crate::session::Session::relayout

use smithay::utils::{Logical, Point, Rectangle, Size};


/// Lower bound of a parented view's size, relative to its root ancestor.
pub const PARENT_MIN_FRACTION: f64 = 0.6;
/// Upper bound of a parented view's size, relative to its root ancestor.
pub const PARENT_MAX_FRACTION: f64 = 0.8;

/// Clamps a cut ratio to its valid range.
pub fn clamp_cut(cut: f64) -> f64 {
    if cut.is_nan() {
        return 0.;
    }
    cut.clamp(0., 1.)
}

/// Width of the stack column for this cut.
pub fn stack_width(width: i32, cut: f64) -> i32 {
    (f64::from(width) * clamp_cut(cut)) as i32
}

/// Geometries of `count` tiled views, in tiling order.
pub fn tile(resolution: Size<i32, Logical>, cut: f64, count: usize) -> Vec<Rectangle<i32, Logical>> {
    if count == 0 {
        return Vec::new();
    }

    let w = resolution.w.max(0);
    let h = resolution.h.max(0);
    let slave = stack_width(w, cut);

    let stacked = i32::try_from(count - 1).unwrap_or(i32::MAX);
    let height = h / stacked.max(1);
    let remainder = h - height.saturating_mul(stacked);
    let first_height = if remainder > 0 {
        height + remainder
    } else {
        height
    };

    let mut geometries = Vec::with_capacity(count);

    let master_width = if count > 1 { w - slave } else { w };
    geometries.push(Rectangle::new(
        Point::from((0, 0)),
        Size::from((master_width, h)),
    ));

    let mut y = 0;
    for _ in 1..count {
        let row_height = if y == 0 { first_height } else { height };
        geometries.push(Rectangle::new(
            Point::from((w - slave, y)),
            Size::from((slave, row_height)),
        ));
        y += row_height;
    }

    geometries
}

/// Geometry of a fullscreen view.
pub fn fullscreen(resolution: Size<i32, Logical>) -> Rectangle<i32, Logical> {
    Rectangle::new(Point::from((0, 0)), resolution)
}

/// Centers a view of the given size on the output.
pub fn center(resolution: Size<i32, Logical>, size: Size<i32, Logical>) -> Rectangle<i32, Logical> {
    let x = f64::from(resolution.w) * 0.5 - f64::from(size.w) * 0.5;
    let y = f64::from(resolution.h) * 0.5 - f64::from(size.h) * 0.5;
    Rectangle::new(Point::from((x as i32, y as i32)), size)
}

/// Sizes a child view against its root ancestor and centers it on its parent.
///
/// Each axis of `requested` is clamped between 60% and 80% of the root's size.
pub fn constrain_to_parent(
    requested: Size<i32, Logical>,
    root: Size<i32, Logical>,
    parent: Rectangle<i32, Logical>,
) -> Rectangle<i32, Logical> {
    let clamp_axis = |requested: i32, root: i32| {
        let root = f64::from(root);
        f64::from(requested)
            .max(root * PARENT_MIN_FRACTION)
            .min(root * PARENT_MAX_FRACTION) as i32
    };

    let w = clamp_axis(requested.w, root.w);
    let h = clamp_axis(requested.h, root.h);

    let x = parent.loc.x + (f64::from(parent.size.w) * 0.5 - f64::from(w) * 0.5) as i32;
    let y = parent.loc.y + (f64::from(parent.size.h) * 0.5 - f64::from(h) * 0.5) as i32;

    Rectangle::new(Point::from((x, y)), Size::from((w, h)))
}
