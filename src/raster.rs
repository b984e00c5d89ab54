//! Software rasterizer for draw commands.
//!
//! Fills a packed `u32` framebuffer (see [`crate::material::pack_rgb`]).

use crate::context::RenderContext;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::material::{Material, pack_rgb};
use crate::pose::Pose;
use crate::projector::{DrawCommand, Sample};

pub fn clear(buf: &mut [u32], color: u32) {
    buf.fill(color);
}

/// Clear to the context background and draw every command.
pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    ctx: &RenderContext,
    commands: &[DrawCommand],
) -> Result<()> {
    debug_assert_eq!(buf.len(), width * height);
    clear(buf, ctx.background);

    for cmd in commands {
        draw_column(buf, width, height, ctx, cmd)?;
    }
    Ok(())
}

/// Draw one wall slice, clipped to the framebuffer.
pub fn draw_column(
    buf: &mut [u32],
    width: usize,
    height: usize,
    ctx: &RenderContext,
    cmd: &DrawCommand,
) -> Result<()> {
    let x0 = cmd.screen_x as usize;
    let x1 = (x0 + cmd.width as usize).min(width);
    if x0 >= x1 || cmd.height <= 0.0 {
        return Ok(());
    }

    // Clamp to screen
    let top = cmd.screen_y_top;
    let bottom = top + cmd.height;
    let y0 = top.floor().max(0.0) as usize;
    let y1 = (bottom.ceil().max(0.0) as usize).min(height);
    if y0 >= y1 {
        return Ok(());
    }

    match cmd.sample {
        Sample::Flat(color) => {
            for y in y0..y1 {
                let row = y * width;
                buf[row + x0..row + x1].fill(color);
            }
        }
        Sample::Texture { u } => {
            let texture = match ctx.materials.get(cmd.tile_type) {
                Some(Material::Textured(t)) => t,
                _ => {
                    return Err(Error::MissingAsset {
                        tile_type: cmd.tile_type,
                    });
                }
            };
            let size = texture.size();
            let u0 = u.max(0.0) as usize;
            // texels per screen pixel, vertically
            let v_step = size as f32 / cmd.height;
            for y in y0..y1 {
                let v = ((y as f32 + 0.5 - top) * v_step) as usize;
                let row = y * width;
                for (dx, x) in (x0..x1).enumerate() {
                    buf[row + x] = texture.sample(u0 + dx, v);
                }
            }
        }
    }
    Ok(())
}

/// Top-down overlay: wall outlines, the player and its heading.
pub fn draw_minimap(
    buf: &mut [u32],
    width: usize,
    height: usize,
    grid: &Grid,
    pose: &Pose,
    cell_px: usize,
) {
    let white = pack_rgb(255, 255, 255);
    let green = pack_rgb(0, 200, 0);
    let red = pack_rgb(255, 0, 0);
    let cell = cell_px as f64;

    for (c, _) in grid.walls() {
        if c.col < 0 || c.row < 0 {
            continue;
        }
        let x = c.col as usize * cell_px;
        let y = c.row as usize * cell_px;
        outline_rect(buf, width, height, x, y, cell_px, cell_px, white);
    }

    let px = pose.x * cell;
    let py = pose.y * cell;

    // heading
    let (s, c) = pose.angle().sin_cos();
    for k in 0..width {
        let t = k as f64;
        put_pixel(buf, width, height, px + t * c, py + t * s, red);
    }

    let r = (cell * 0.15).max(2.0);
    let ri = r.ceil() as i64;
    for oy in -ri..=ri {
        for ox in -ri..=ri {
            if (ox * ox + oy * oy) as f64 <= r * r {
                put_pixel(buf, width, height, px + ox as f64, py + oy as f64, green);
            }
        }
    }
}

#[inline]
fn put_pixel(buf: &mut [u32], width: usize, height: usize, x: f64, y: f64, color: u32) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x < width && y < height {
        buf[y * width + x] = color;
    }
}

#[allow(clippy::too_many_arguments)]
fn outline_rect(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    let x1 = (x + w).min(width);
    let y1 = (y + h).min(height);
    for yy in y..y1 {
        for xx in x..x1 {
            let edge = xx - x < 2 || yy - y < 2 || x + w - xx <= 2 || y + h - yy <= 2;
            if edge {
                buf[yy * width + xx] = color;
            }
        }
    }
}
