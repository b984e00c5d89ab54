//! Grid traversal along one family of grid lines.
//!
//! A ray crosses two interleaved families of grid lines: horizontal lines
//! (constant y, struck on a north or south face) and vertical lines
//! (constant x, struck on an east or west face). Each family is walked on
//! its own so the caller knows which face the nearer hit belongs to.

use crate::grid::{Cell, Grid};

/// Subtracted from the start line on the negative branch so `floor` picks
/// the cell on the far side of the line instead of the one being left.
pub const BOUNDARY_EPSILON: f64 = 1e-6;

/// Result of walking one axis family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    /// Raw (radial) distance from the origin to the crossing point.
    pub depth: f64,
    /// World-space crossing point.
    pub x: f64,
    pub y: f64,
    /// Wall type that was struck, `0` when nothing was found within the step budget.
    pub tile: u8,
}

impl Trace {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.tile != 0
    }

    fn miss() -> Self {
        Self {
            depth: f64::INFINITY,
            x: f64::NAN,
            y: f64::NAN,
            tile: 0,
        }
    }
}

/// Walk crossings of horizontal grid lines, stepping y by +-1.
pub fn trace_horizontal(
    grid: &Grid,
    origin: (f64, f64),
    sin_a: f64,
    cos_a: f64,
    max_depth: u32,
) -> Trace {
    if sin_a.abs() < f64::EPSILON {
        return Trace::miss(); // parallel to the lines
    }
    let (ox, oy) = origin;
    let row = oy.floor();

    let (mut y, dy) = if sin_a > 0.0 {
        (row + 1.0, 1.0)
    } else {
        (row - BOUNDARY_EPSILON, -1.0)
    };

    let mut depth = (y - oy) / sin_a;
    let mut x = ox + depth * cos_a;

    let delta_depth = dy / sin_a;
    let dx = delta_depth * cos_a;

    walk(grid, max_depth, &mut depth, &mut x, &mut y, delta_depth, dx, dy)
}

/// Walk crossings of vertical grid lines, stepping x by +-1.
pub fn trace_vertical(
    grid: &Grid,
    origin: (f64, f64),
    sin_a: f64,
    cos_a: f64,
    max_depth: u32,
) -> Trace {
    if cos_a.abs() < f64::EPSILON {
        return Trace::miss();
    }
    let (ox, oy) = origin;
    let col = ox.floor();

    let (mut x, dx) = if cos_a > 0.0 {
        (col + 1.0, 1.0)
    } else {
        (col - BOUNDARY_EPSILON, -1.0)
    };

    let mut depth = (x - ox) / cos_a;
    let mut y = oy + depth * sin_a;

    let delta_depth = dx / cos_a;
    let dy = delta_depth * sin_a;

    walk(grid, max_depth, &mut depth, &mut x, &mut y, delta_depth, dx, dy)
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn walk(
    grid: &Grid,
    max_depth: u32,
    depth: &mut f64,
    x: &mut f64,
    y: &mut f64,
    delta_depth: f64,
    dx: f64,
    dy: f64,
) -> Trace {
    for _ in 0..max_depth {
        let tile = grid.tile_at(Cell::containing(*x, *y));
        if tile != 0 {
            return Trace {
                depth: *depth,
                x: *x,
                y: *y,
                tile,
            };
        }
        *x += dx;
        *y += dy;
        *depth += delta_depth;
    }
    Trace::miss()
}
