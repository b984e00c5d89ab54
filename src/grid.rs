use std::collections::HashMap;

use log::debug;

use crate::error::ConfigError;

/// Integer tile coordinate. `col` grows east (x), `row` grows south (y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell containing a world-space point. Uses floor so negative
    /// coordinates land in negative cells instead of aliasing onto 0.
    #[inline]
    pub fn containing(x: f64, y: f64) -> Self {
        Self {
            col: x.floor() as i32,
            row: y.floor() as i32,
        }
    }
}

/// Sparse, immutable tile map. Only wall cells are stored; a missing key is empty floor.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    tiles: HashMap<Cell, u8>,
    width: usize,  // columns in the source layout
    height: usize, // rows in the source layout
}

impl Grid {
    /// Parse a rectangular layout of small integers. `0` is empty, `1..=255` are wall types.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let Some(first) = rows.first() else {
            return Err(ConfigError::EmptyGrid);
        };
        let width = first.as_ref().len();

        let mut tiles = HashMap::new();
        for (j, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ConfigError::RaggedRow {
                    row: j,
                    expected: width,
                    found: row.len(),
                });
            }
            for (i, &value) in row.iter().enumerate() {
                let id = u8::try_from(value).map_err(|_| ConfigError::InvalidTile {
                    col: i,
                    row: j,
                    value,
                })?;
                if id != 0 {
                    tiles.insert(Cell::new(i as i32, j as i32), id);
                }
            }
        }

        debug!(
            "grid built: {}x{} layout, {} wall cells",
            width,
            rows.len(),
            tiles.len()
        );

        Ok(Self {
            tiles,
            width,
            height: rows.len(),
        })
    }

    /// Build directly from populated cells. Zero identifiers are dropped.
    pub fn from_cells<I: IntoIterator<Item = (Cell, u8)>>(cells: I) -> Self {
        let tiles: HashMap<Cell, u8> = cells.into_iter().filter(|&(_, id)| id != 0).collect();
        let width = tiles.keys().map(|c| c.col + 1).max().unwrap_or(0).max(0) as usize;
        let height = tiles.keys().map(|c| c.row + 1).max().unwrap_or(0).max(0) as usize;
        Self {
            tiles,
            width,
            height,
        }
    }

    /// Wall type at a cell, `0` if the cell is empty or outside the layout.
    #[inline]
    pub fn tile_at(&self, cell: Cell) -> u8 {
        self.tiles.get(&cell).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.tiles.contains_key(&cell)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wall_count(&self) -> usize {
        self.tiles.len()
    }

    /// Populated cells in no particular order.
    pub fn walls(&self) -> impl Iterator<Item = (Cell, u8)> + '_ {
        self.tiles.iter().map(|(&c, &id)| (c, id))
    }
}
