use std::fs;
use std::path::Path;

use crate::error::MapError;

pub const MAP_WIDTH: usize = 16;
pub const MAP_HEIGHT: usize = 16;

/// Maximum distance a ray travels before giving up.
pub const MAP_DEPTH: f32 = 16.0;

const DEFAULT_ROOM: &str = concat!(
    "################",
    "#..............#",
    "#.........#....#",
    "#.........######",
    "#...##.........#",
    "#...##.........#",
    "#...##.........#",
    "#...##.........#",
    "#...##.........#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#######........#",
    "#..............#",
    "################",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Empty,
}

impl Cell {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Empty),
            _ => None,
        }
    }
}

/// Immutable row-major tile grid.
#[derive(Debug, Clone)]
pub struct GridMap {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl GridMap {
    /// Builds a map from exactly `width * height` characters of `#` and `.`.
    pub fn from_flat(width: usize, height: usize, text: &str) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(MapError::TooLarge { width, height })?;
        let found = text.chars().count();
        if found != expected {
            return Err(MapError::DimensionMismatch { expected, found });
        }

        let cells = text
            .chars()
            .enumerate()
            .map(|(index, ch)| Cell::from_char(ch).ok_or(MapError::InvalidCell { ch, index }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Parses the line-per-row form used by map files. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let width = first.chars().count();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        Self::from_flat(width, rows.len(), &rows.concat())
    }

    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn default_room() -> Self {
        Self {
            cells: DEFAULT_ROOM
                .chars()
                .map(|ch| if ch == '#' { Cell::Wall } else { Cell::Empty })
                .collect(),
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[self.cell_index(col, row)])
    }

    /// Anything outside the grid counts as solid.
    #[inline]
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.get(col, row).is_none_or(|cell| cell == Cell::Wall)
    }

    /// Where the player starts: the middle of the map, or the first empty
    /// cell when the middle is solid.
    pub fn spawn_point(&self) -> Result<[f32; 2], MapError> {
        let mid = [self.width as f32 / 2.0, self.height as f32 / 2.0];
        if !self.is_wall(mid[0].floor() as i32, mid[1].floor() as i32) {
            return Ok(mid);
        }
        self.first_empty().ok_or(MapError::NoEmptyCell)
    }

    /// Centre of the first empty cell in row-major order.
    pub fn first_empty(&self) -> Option<[f32; 2]> {
        let index = self.cells.iter().position(|&cell| cell == Cell::Empty)?;
        let col = index % self.width;
        let row = index / self.width;
        Some([col as f32 + 0.5, row as f32 + 0.5])
    }
}
