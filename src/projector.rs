use log::warn;

use crate::caster::Hit;
use crate::context::RenderContext;
use crate::error::{Error, Result};
use crate::material::{Material, shade};

/// How the rasterizer fills a column strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Fill with one packed colour.
    Flat(u32),
    /// Sample a `width`-wide strip of the tile's texture starting at texel column `u`.
    Texture { u: f32 },
}

/// One screen-space wall slice, renderer agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub ray_index: usize,
    pub screen_x: u32,
    /// May be negative when the slice is taller than the screen.
    pub screen_y_top: f32,
    pub width: u32,
    pub height: f32,
    pub tile_type: u8,
    pub sample: Sample,
}

/// Turn one resolved hit into a draw command.
pub fn project(ctx: &RenderContext, hit: &Hit) -> Result<DrawCommand> {
    let projection = &ctx.projection;
    let column_width = projection.column_width;

    let Some(material) = ctx.materials.get(hit.tile_type) else {
        warn!(
            "column {}: no material for tile type {}",
            hit.ray_index, hit.tile_type
        );
        return Err(Error::MissingAsset {
            tile_type: hit.tile_type,
        });
    };

    let sample = match material {
        Material::Solid(color) => Sample::Flat(*color),
        Material::Shaded(color) => Sample::Flat(shade(*color, ctx.falloff(hit.distance))),
        Material::Textured(texture) => {
            let span = texture.size().saturating_sub(column_width) as f64;
            Sample::Texture {
                u: (hit.texture_offset * span) as f32,
            }
        }
    };

    let height = hit.projected_height;
    Ok(DrawCommand {
        ray_index: hit.ray_index,
        screen_x: (hit.ray_index * column_width) as u32,
        screen_y_top: (projection.screen_center_y() - 0.5 * height) as f32,
        width: column_width as u32,
        height: height as f32,
        tile_type: hit.tile_type,
        sample,
    })
}

/// Project a whole frame of hits, left to right. Background columns produce nothing.
pub fn project_frame(ctx: &RenderContext, hits: &[Option<Hit>]) -> Result<Vec<DrawCommand>> {
    hits.iter().flatten().map(|hit| project(ctx, hit)).collect()
}
