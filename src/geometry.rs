// =============================================================================
// GEOMETRY.RS: Grid coordinates and distance helpers
//
// Everything in the level speaks in one of two spaces:
// - cell space: integer (column, row) addresses into the grid
// - pixel space: positions inside the rendered map, tile_w × tile_h per cell
// =============================================================================

/// A grid cell address. `x` is the column, `y` is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of a grid in cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub columns: i32,
    pub rows: i32,
}

impl GridSize {
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    /// Total number of cells. Zero for degenerate sizes.
    #[inline]
    pub fn area(&self) -> usize {
        if self.columns <= 0 || self.rows <= 0 {
            return 0;
        }
        (self.columns as usize).saturating_mul(self.rows as usize)
    }

    /// Number of cells when every row-major index fits in an `i32`.
    pub fn checked_area(&self) -> Option<usize> {
        if self.columns <= 0 || self.rows <= 0 {
            return Some(0);
        }
        self.columns.checked_mul(self.rows).map(|n| n as usize)
    }

    /// Row-major index of `cell`, or `None` when it lies outside the grid.
    #[inline]
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| (cell.y * self.columns + cell.x) as usize)
    }
}

/// Calculate Manhattan distance between two cells.
/// The distance traveling only along grid axes (no diagonals), which is
/// exactly the cost of a 4-directional path on an open grid.
#[inline]
pub fn distance_manhattan(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

// =============================================================================
// DIRECTIONS
// =============================================================================

/// The four cardinal directions. Rows grow downward, so `North` is `-y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
        }
    }
}

/// Neighbour expansion order used by the path search.
pub const CARDINALS: [Direction; 4] = [
    Direction::East,
    Direction::North,
    Direction::West,
    Direction::South,
];

// =============================================================================
// PIXEL <-> CELL
// =============================================================================

/// Convert a pixel position to the cell containing it.
///
/// Division rounds toward negative infinity, so pixels left of or above the
/// map land on column/row -1 and read as off the grid.
#[inline]
pub fn pixel_to_cell(px: i32, py: i32, tile_w: i32, tile_h: i32) -> Cell {
    Cell::new(px.div_euclid(tile_w), py.div_euclid(tile_h))
}

/// Top-left pixel of `cell`.
#[inline]
pub fn cell_to_pixel(cell: Cell, tile_w: i32, tile_h: i32) -> [f32; 2] {
    [cell.x as f32 * tile_w as f32, cell.y as f32 * tile_h as f32]
}
