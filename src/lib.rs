//! Grid ray-casting engine.
//!
//! Projects a 2-D tile grid into a first-person view: one ray per screen
//! column strip, two DDA walks per ray, fish-eye corrected depth, and a
//! renderer-agnostic draw command per visible wall slice.
//!
//! Modules:
//! - `grid`: sparse tile map
//! - `pose`: player state and motion integration
//! - `projection`: per-frame constants derived from screen size and FOV
//! - `tracer`: single-family grid traversal
//! - `caster`: per-column ray resolution
//! - `projector`: hits to draw commands
//! - `raster`, `present`: reference consumers of draw commands

pub mod caster;
pub mod config;
pub mod context;
pub mod error;
pub mod grid;
pub mod material;
pub mod pose;
pub mod present;
pub mod projection;
pub mod projector;
pub mod raster;
pub mod tracer;

pub use caster::{Hit, Side, cast_frame, cast_ray};
pub use config::{ConfigSource, EngineConfig};
pub use context::RenderContext;
pub use error::{ConfigError, Error, Result};
pub use grid::{Cell, Grid};
pub use material::{Material, MaterialTable, Texture};
pub use pose::{InputState, MotionConfig, Pose};
pub use projection::Projection;
pub use projector::{DrawCommand, Sample, project, project_frame};

/// Cast and project one frame. Commands come back ordered left to right.
pub fn draw_commands(ctx: &RenderContext, grid: &Grid, pose: &Pose) -> Result<Vec<DrawCommand>> {
    let hits = cast_frame(ctx, grid, pose);
    project_frame(ctx, &hits)
}
