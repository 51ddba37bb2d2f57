//! Axis-aligned occupancy grid the rays are marched against.

use crate::error::{SetupError, SetupResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '0' | '.' | ' ' => Some(Cell::Empty),
            '1' | '#' => Some(Cell::Wall),
            _ => None,
        }
    }
}

/// Static 2D grid of cells, stored row-major (`y` then `x`).
///
/// Map units are cells: cell `(i, j)` covers `[i, i + 1) x [j, j + 1)`.
#[derive(Clone, Debug)]
pub struct OccupancyMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl OccupancyMap {
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> SetupResult<Self> {
        if width == 0 || height == 0 {
            return Err(SetupError::MalformedMap(format!(
                "map must have at least one cell, got {width}x{height}"
            )));
        }
        if cells.len() != width * height {
            return Err(SetupError::MalformedMap(format!(
                "expected {} cells for {width}x{height}, got {}",
                width * height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses text rows, `'1'`/`'#'` for walls and `'0'`/`'.'`/space for empty cells.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> SetupResult<Self> {
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * rows.len());

        for (j, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(SetupError::MalformedMap(format!(
                    "row {j} has {len} cells, expected {width}"
                )));
            }
            for (i, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| {
                    SetupError::MalformedMap(format!("unknown cell {ch:?} at ({i}, {j})"))
                })?;
                cells.push(cell);
            }
        }

        Self::new(width, rows.len(), cells)
    }

    /// Empty interior enclosed by a one cell thick wall.
    pub fn bordered(width: usize, height: usize) -> SetupResult<Self> {
        let cells = (0..height)
            .flat_map(|j| {
                (0..width).map(move |i| {
                    if i == 0 || j == 0 || i + 1 == width || j + 1 == height {
                        Cell::Wall
                    } else {
                        Cell::Empty
                    }
                })
            })
            .collect();
        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the continuous point lies inside the grid extent.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    /// Cell at integer coordinates, `None` out of range.
    #[inline]
    pub fn cell(&self, i: i64, j: i64) -> Option<Cell> {
        if i < 0 || j < 0 || i >= self.width as i64 || j >= self.height as i64 {
            return None;
        }
        Some(self.cells[j as usize * self.width + i as usize])
    }

    /// Out-of-range cells count as walls.
    #[inline]
    pub fn is_wall(&self, i: i64, j: i64) -> bool {
        self.cell(i, j).is_none_or(|c| c == Cell::Wall)
    }

    /// Wall test for the cell containing the continuous point.
    #[inline]
    pub fn is_wall_at(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        self.is_wall(x.floor() as i64, y.floor() as i64)
    }

    pub fn set(&mut self, i: usize, j: usize, cell: Cell) {
        if i < self.width && j < self.height {
            self.cells[j * self.width + i] = cell;
        }
    }
}
