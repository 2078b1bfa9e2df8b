use std::collections::{HashSet, VecDeque};

use super::action::Direction;

/// A cell on the game grid
///
/// Coordinates are signed so a head that left the grid can still be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Move cell one unit in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake of `length` cells whose head is at `head`, trailing away from `heading`
    pub fn new(head: Cell, heading: Direction, length: usize) -> Self {
        let (dcol, drow) = heading.opposite().delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(dcol * i, drow * i))
            .collect();

        Self { body }
    }

    /// Build a snake from explicit cells, head first
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty; a snake always has a head.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Check if any segment, head and tail included, occupies `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head; the tail is kept only when growing
    pub(crate) fn slither(&mut self, new_head: Cell, grow: bool) {
        if !grow {
            self.body.pop_back();
        }
        self.body.push_front(new_head);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub columns: usize,
    pub rows: usize,
    pub snake: Snake,
    pub obstacles: HashSet<Cell>,
    /// Direction committed on the last tick
    pub direction: Direction,
    /// Direction that the next tick will commit
    pub pending_direction: Direction,
    pub score: u32,
    pub best_score: u32,
    pub running: bool,
    /// Successful advances since the game started
    pub ticks: u32,
}

impl GameState {
    /// Create a new running game state with no obstacles
    pub fn new(columns: usize, rows: usize, snake: Snake, direction: Direction) -> Self {
        Self {
            columns,
            rows,
            snake,
            obstacles: HashSet::new(),
            direction,
            pending_direction: direction,
            score: 0,
            best_score: 0,
            running: true,
            ticks: 0,
        }
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0
            && (cell.col as i64) < self.columns as i64
            && cell.row >= 0
            && (cell.row as i64) < self.rows as i64
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    /// Check if a cell holds the snake or an obstacle
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell) || self.is_occupied_by_snake(cell)
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// In-grid cells holding neither the snake nor an obstacle, in row-major order
    pub fn free_cells(&self) -> Vec<Cell> {
        (0..self.rows as i32)
            .flat_map(|row| (0..self.columns as i32).map(move |col| Cell::new(col, row)))
            .filter(|cell| !self.is_occupied(*cell))
            .collect()
    }
}
