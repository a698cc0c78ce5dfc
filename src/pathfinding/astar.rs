use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use crate::geometry::{CARDINALS, Cell, distance_manhattan};
use crate::grid::CollisionGrid;

// =============================================================================
// GRID POINT
// =============================================================================

/// A search node: a cell plus its bookkeeping.
///
/// `id` is `y * columns + x` and is negative for cells outside the grid.
/// Two points are equal when their coordinates match, whatever their costs.
#[derive(Copy, Clone, Debug)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
    pub id: i32,
    /// Steps taken from the start to reach this point.
    pub weight: u32,
    /// Frontier ordering key.
    pub priority: i32,
}

impl GridPoint {
    /// Point at `cell` for a grid with the given dimensions.
    pub fn new(cell: Cell, grid: &CollisionGrid) -> Self {
        let id = if grid.in_bounds(cell) { cell.y * grid.columns() + cell.x } else { -1 };
        Self { x: cell.x, y: cell.y, id, weight: 0, priority: 0 }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    pub fn is_valid(&self) -> bool {
        self.id >= 0
    }
}

impl PartialEq for GridPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for GridPoint {}

// =============================================================================
// PATH
// =============================================================================

/// Cells to walk, nearest-to-start first. Never contains the start cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: VecDeque<Cell>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next cell to step onto.
    pub fn pop_next(&mut self) -> Option<Cell> {
        self.steps.pop_front()
    }

    pub fn peek(&self) -> Option<Cell> {
        self.steps.front().copied()
    }

    /// Final cell of the path.
    pub fn goal(&self) -> Option<Cell> {
        self.steps.back().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.steps.iter()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

impl FromIterator<Cell> for Path {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}

// =============================================================================
// SEARCH
// =============================================================================
///
/// Best-first search over 4 cardinal neighbours (east, north, west, south).
///
/// The frontier pops the lowest Manhattan distance to the goal, ties going to
/// whichever node was queued first. A neighbour is queued when it has never
/// been reached, or when it is reached more cheaply than before; either way
/// its back-pointer and recorded cost are updated. The search stops as soon as
/// the goal is popped.
///
/// Returns an empty path when start equals end, when either end lies outside
/// the grid, or when the goal cannot be reached. Blocked cells are never
/// entered; the start cell itself is allowed to be occupied.
pub fn find_path(grid: &CollisionGrid, start: Cell, end: Cell) -> Path {
    let start = GridPoint::new(start, grid);
    let end = GridPoint::new(end, grid);

    if !start.is_valid() || !end.is_valid() || start == end {
        return Path::new();
    }

    // Min-heap on (priority, insertion sequence).
    let mut frontier: BinaryHeap<Reverse<(i32, u64, i32)>> = BinaryHeap::new();
    let mut points: HashMap<i32, GridPoint> = HashMap::new();
    let mut came_from: HashMap<i32, i32> = HashMap::new();
    let mut cost_so_far: HashMap<i32, u32> = HashMap::new();
    let mut sequence = 0u64;

    came_from.insert(start.id, start.id);
    cost_so_far.insert(start.id, 0);
    points.insert(start.id, start);
    frontier.push(Reverse((0, sequence, start.id)));

    while let Some(Reverse((_, _, id))) = frontier.pop() {
        if id == end.id {
            break;
        }
        let current = points[&id];

        for neighbor in neighbors(grid, &current) {
            let known = cost_so_far.get(&neighbor.id).copied();
            if known.is_some_and(|cost| neighbor.weight >= cost) {
                continue;
            }

            let mut neighbor = neighbor;
            neighbor.priority = distance_manhattan(neighbor.cell(), end.cell());
            sequence += 1;
            frontier.push(Reverse((neighbor.priority, sequence, neighbor.id)));
            came_from.insert(neighbor.id, current.id);
            cost_so_far.insert(neighbor.id, neighbor.weight);
            points.insert(neighbor.id, neighbor);
        }
    }

    reconstruct_path(&came_from, &points, start.id, end.id)
}

/// In-bounds, unblocked cardinal neighbours carrying `point.weight + 1`.
fn neighbors(grid: &CollisionGrid, point: &GridPoint) -> Vec<GridPoint> {
    let mut result = Vec::with_capacity(4);
    for dir in CARDINALS {
        let cell = point.cell().step(dir);
        if grid.is_blocked(cell) {
            continue;
        }
        let mut next = GridPoint::new(cell, grid);
        next.weight = point.weight + 1;
        result.push(next);
    }
    result
}

/// Walk back-pointers from goal to start.
///
/// A missing back-pointer or a loop means there is no path; any partial walk
/// is discarded.
fn reconstruct_path(
    came_from: &HashMap<i32, i32>,
    points: &HashMap<i32, GridPoint>,
    start: i32,
    goal: i32,
) -> Path {
    let mut reversed = Vec::new();
    let mut current = goal;

    while current != start {
        if reversed.len() > points.len() {
            return Path::new();
        }
        let Some(point) = points.get(&current) else {
            return Path::new();
        };
        reversed.push(point.cell());
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => return Path::new(),
        }
    }

    reversed.into_iter().rev().collect()
}
