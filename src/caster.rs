use log::trace;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::context::RenderContext;
use crate::grid::Grid;
use crate::pose::Pose;
use crate::projection::Projection;
use crate::tracer::{Trace, trace_horizontal, trace_vertical};

/// Which family of grid lines the winning crossing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Horizontal grid line: north or south face.
    Horizontal,
    /// Vertical grid line: east or west face.
    Vertical,
}

/// Resolved wall hit for one screen column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub ray_index: usize,
    pub ray_angle: f64,
    /// Perpendicular (fish-eye corrected) distance to the projection plane.
    pub distance: f64,
    pub tile_type: u8,
    /// Position across the struck face in [0, 1).
    pub texture_offset: f64,
    pub side: Side,
    /// Wall slice height in pixels.
    pub projected_height: f64,
}

/// Fractional part in [0, 1), also for negative inputs.
#[inline]
fn unit_fract(v: f64) -> f64 {
    let f = v.rem_euclid(1.0);
    if f >= 1.0 { 0.0 } else { f }
}

/// Texture coordinate across the struck face. Flipped for south- and
/// west-facing faces so textures read the same way from every side.
#[inline]
fn face_offset(trace: &Trace, side: Side, sin_a: f64, cos_a: f64) -> f64 {
    match side {
        Side::Vertical => {
            let v = unit_fract(trace.y);
            if cos_a > 0.0 { v } else { unit_fract(1.0 - v) }
        }
        Side::Horizontal => {
            let u = unit_fract(trace.x);
            if sin_a > 0.0 { unit_fract(1.0 - u) } else { u }
        }
    }
}

/// Cast the ray for screen column `ray_index`. `None` means background.
pub fn cast_ray(
    projection: &Projection,
    grid: &Grid,
    pose: &Pose,
    ray_index: usize,
) -> Option<Hit> {
    let origin = (pose.x, pose.y);
    let ray_angle = projection.ray_angle(pose.angle(), ray_index);
    let sin_a = ray_angle.sin();
    let cos_a = ray_angle.cos();

    let hor = trace_horizontal(grid, origin, sin_a, cos_a, projection.max_depth);
    let vert = trace_vertical(grid, origin, sin_a, cos_a, projection.max_depth);

    let (trace, side) = if vert.depth < hor.depth {
        (vert, Side::Vertical)
    } else {
        (hor, Side::Horizontal)
    };
    if !trace.is_hit() {
        return None;
    }

    let texture_offset = face_offset(&trace, side, sin_a, cos_a);

    // remove fish-eye
    let distance = trace.depth * (pose.angle() - ray_angle).cos();
    if distance >= projection.visible_depth() {
        return None;
    }

    Some(Hit {
        ray_index,
        ray_angle,
        distance,
        tile_type: trace.tile,
        texture_offset,
        side,
        projected_height: projection.column_height(distance),
    })
}

/// Cast every column of a frame. The output is indexed by ray: entry `i`
/// belongs to screen column strip `i` no matter which worker computed it.
pub fn cast_frame(ctx: &RenderContext, grid: &Grid, pose: &Pose) -> Vec<Option<Hit>> {
    let projection = &ctx.projection;
    let pose = *pose;

    let hits: Vec<Option<Hit>> = (0..projection.num_rays)
        .into_par_iter()
        .map(|i| cast_ray(projection, grid, &pose, i))
        .collect();

    trace!(
        "cast {} rays, {} hits",
        hits.len(),
        hits.iter().filter(|h| h.is_some()).count()
    );
    hits
}
