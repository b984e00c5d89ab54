//! Engine configuration, loaded from TOML.
//!
//! Every section and field is optional; defaults reproduce the classic
//! 800x600 demo with its 7x6 map.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::RenderContext;
use crate::error::Result;
use crate::grid::Grid;
use crate::material::MaterialTable;
use crate::pose::{MotionConfig, Pose};
use crate::projection::Projection;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub view: ViewConfig,
    pub player: PlayerConfig,
    pub map: MapConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Screen and ray parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view in degrees
    pub fov_degrees: f64,
    pub num_rays: usize,
    /// DDA steps per axis family before a ray gives up
    pub max_depth: u32,
    /// Edge length of generated wall textures, in texels
    pub texture_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 60.0,
            num_rays: 400,
            max_depth: 30,
            texture_size: 256,
        }
    }
}

/// Start pose and movement tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: f64,
    pub y: f64,
    /// Radians, 0 looks along +x
    pub angle: f64,
    /// Grid units per millisecond
    pub speed: f64,
    /// Radians per millisecond
    pub rot_speed: f64,
    pub normalize_diagonal: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let motion = MotionConfig::default();
        Self {
            x: 1.5,
            y: 5.0,
            angle: 0.0,
            speed: motion.speed_per_ms,
            rot_speed: motion.rot_speed_per_ms,
            normalize_diagonal: motion.normalize_diagonal,
        }
    }
}

/// Tile layout, row-major; 0 is empty floor
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    pub rows: Vec<Vec<i64>>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            rows: vec![
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 1, 2, 3, 0, 0],
                vec![0, 4, 0, 5, 0, 0],
                vec![0, 6, 0, 7, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 1, 0],
                vec![0, 0, 0, 0, 0, 0],
            ],
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Packed 0xRRGGBB clear colour
    pub background: u32,
    /// Sample generated textures instead of flat palette colours
    pub textured: bool,
    pub minimap: bool,
    /// Minimap cell edge in pixels
    pub minimap_cell: usize,
    /// Brightness falloff coefficient for shaded walls
    pub flat_falloff: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: 0x000000,
            textured: true,
            minimap: false,
            minimap_cell: 40,
            flat_falloff: 0.00002,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter (trace, debug, info, warn, error); RUST_LOG overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` when it exists, otherwise use the built-in defaults.
    /// The source is returned so the caller can report it once logging is up.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::from_file(path)?;
            Ok((config, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn build_grid(&self) -> Result<Grid> {
        Ok(Grid::from_rows(&self.map.rows)?)
    }

    pub fn projection(&self) -> Result<Projection> {
        let v = &self.view;
        Ok(Projection::from_degrees(
            v.width,
            v.height,
            v.fov_degrees,
            v.num_rays,
            v.max_depth,
        )?)
    }

    pub fn motion(&self) -> MotionConfig {
        MotionConfig {
            speed_per_ms: self.player.speed,
            rot_speed_per_ms: self.player.rot_speed,
            normalize_diagonal: self.player.normalize_diagonal,
        }
    }

    pub fn start_pose(&self) -> Pose {
        Pose::new(self.player.x, self.player.y, self.player.angle)
    }

    /// Projection plus the classic material table.
    pub fn render_context(&self) -> Result<RenderContext> {
        let materials = MaterialTable::classic(self.render.textured, self.view.texture_size);
        Ok(RenderContext::new(self.projection()?, materials)
            .with_background(self.render.background)
            .with_flat_falloff(self.render.flat_falloff))
    }
}
