//! Error types for the raycaster

use thiserror::Error;

/// Rejected engine input, detected when the grid, config or a texture is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid has no rows")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile identifier {value} at ({col}, {row})")]
    InvalidTile { col: usize, row: usize, value: i64 },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Raycaster error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No material registered for tile type {tile_type}")]
    MissingAsset { tile_type: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
