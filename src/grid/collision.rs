use tracing::{trace, warn};

use crate::geometry::{Cell, GridSize};
use crate::tilemap::ObstacleRect;

/// Marker for a walkable cell.
pub const FREE: i32 = -1;
/// Marker for a cell covered by a map collision body.
pub const STATIC_BODY: i32 = 0;
/// Marker for a cell occupied by a dynamic entity this tick.
pub const DYNAMIC_BODY: i32 = 1;

// =============================================================================
// COLLISION GRID
// =============================================================================
///
/// Rows × columns of blocked/free markers.
///
/// The grid keeps two layers: the static bodies rasterized from the map,
/// and the merged view (static + this tick's dynamic occupancy) that every
/// query reads. [`refresh`](Self::refresh) rebuilds the merged view
/// wholesale, so occupancy never leaks from one tick into the next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionGrid {
    size: GridSize,
    static_cells: Vec<i32>,
    cells: Vec<i32>,
}

impl CollisionGrid {
    /// An all-free grid.
    pub fn new(size: GridSize) -> Self {
        let cells = vec![FREE; size.area()];
        Self { size, static_cells: cells.clone(), cells }
    }

    /// Rasterize map collision bodies into a fresh grid.
    ///
    /// Cells of a body that fall outside the grid are dropped.
    pub fn from_obstacles(size: GridSize, tile_w: i32, tile_h: i32, obstacles: &[ObstacleRect]) -> Self {
        let mut grid = Self::new(size);
        let mut clipped = 0u64;

        for body in obstacles {
            let block = body.block(tile_w, tile_h);
            let inside = block.clip(size);
            clipped = clipped.saturating_add(block.area().saturating_sub(inside.area()));
            for cell in inside.cells() {
                if let Some(i) = size.index_of(cell) {
                    grid.static_cells[i] = STATIC_BODY;
                }
            }
        }
        if clipped > 0 {
            warn!(clipped, "collision bodies extend past the map; outside cells dropped");
        }

        grid.cells.clone_from(&grid.static_cells);
        grid
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn columns(&self) -> i32 {
        self.size.columns
    }

    pub fn rows(&self) -> i32 {
        self.size.rows
    }

    /// Current marker at `cell`, `None` outside the grid.
    pub fn marker(&self, cell: Cell) -> Option<i32> {
        self.size.index_of(cell).map(|i| self.cells[i])
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.size.contains(cell)
    }

    /// True for blocked cells and for anything outside the grid.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.marker(cell).is_none_or(|m| m != FREE)
    }

    /// True when `cell` is blocked by a map body, ignoring occupancy.
    pub fn is_statically_blocked(&self, cell: Cell) -> bool {
        self.size.index_of(cell).is_none_or(|i| self.static_cells[i] != FREE)
    }

    /// Overlay this tick's dynamic occupancy on the static bodies.
    pub fn refresh(&mut self, occupied: &[Cell]) {
        self.cells.clone_from(&self.static_cells);
        for &cell in occupied {
            match self.size.index_of(cell) {
                Some(i) => self.cells[i] = DYNAMIC_BODY,
                None => trace!(x = cell.x, y = cell.y, "ignoring occupancy outside the grid"),
            }
        }
    }

    /// All blocked cells in row-major order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.size.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| **m != FREE)
            .map(move |(i, _)| Cell::new(i as i32 % columns, i as i32 / columns))
    }

    /// Drop every cell; the grid becomes 0 × 0.
    pub fn clear(&mut self) {
        self.size = GridSize::default();
        self.static_cells.clear();
        self.cells.clear();
    }
}
