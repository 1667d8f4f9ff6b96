/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

#![warn(missing_docs)]

//! Maze grid model and move validation.
//!
//! This is a library for a wall-and-corridor grid maze. It owns the static
//! wall layout plus the start and goal cells, and resolves every
//! (position, direction) pair to exactly one [`MoveOutcome`]. It holds no
//! mutable agent state; callers that track an agent do so on top of
//! [`attempt_move`].

use serde::{Deserialize, Serialize};

/// Maze construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// Grid has a zero dimension.
    #[error("grid must have non-zero dimensions")]
    EmptyGrid,

    /// Layout byte is neither 0 (open) nor 1 (wall).
    #[error("bad cell value {value} at {position}")]
    BadCellValue {
        /// Position of the offending byte.
        position: Position,
        /// The byte itself.
        value: u8,
    },

    /// Start cell is out of bounds or a wall.
    #[error("start cell {0} is out of bounds or a wall")]
    BlockedStart(Position),

    /// Goal cell is out of bounds or a wall.
    #[error("goal cell {0} is out of bounds or a wall")]
    BlockedGoal(Position),
}

/// Maze cell. Part of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Walkable cell.
    Open,

    /// Blocked cell.
    Wall,
}

/// Grid position as a (row, column) pair, 0-indexed.
///
/// Coordinates are signed so that candidate positions one step outside the
/// grid (row −1, say) are representable; [`Grid::is_open`] answers `false`
/// for them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, top row is 0.
    pub row: i32,

    /// Column index, leftmost column is 0.
    pub col: i32,
}

impl Position {
    /// Create a position.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four directional commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Row − 1.
    Up,

    /// Row + 1.
    Down,

    /// Column − 1.
    Left,

    /// Column + 1.
    Right,
}

impl Direction {
    /// All four directions, for iteration.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit (row, column) delta for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Immutable wall layout. This only contains the cells, not the start, goal,
/// or any agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

// print out cells with row and column numbers which start at 0.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::with_capacity((self.cols * 2 + 3) * (self.rows + 1));

        for col in 0..self.cols {
            if col == 0 {
                s.push_str("  ");
            }
            s.push_str(&format!("{}", col % 10));
            if col == self.cols - 1 {
                s.push('\n');
            } else {
                s.push(' ');
            }
        }

        for row in 0..self.rows {
            s.push_str(&format!("{} ", row % 10));
            for col in 0..self.cols {
                let c = match self.cells[row * self.cols + col] {
                    Cell::Open => '.',
                    Cell::Wall => '#',
                };
                s.push(c);
                if col < self.cols - 1 {
                    s.push(' ');
                }
            }
            if row < self.rows - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}

impl Grid {
    /// Build a grid from a literal layout matrix, 0 = open and 1 = wall.
    pub fn from_rows<const R: usize, const C: usize>(
        layout: [[u8; C]; R],
    ) -> Result<Self, MazeError> {
        if R == 0 || C == 0 {
            return Err(MazeError::EmptyGrid);
        }
        let mut cells = Vec::with_capacity(R * C);
        for (row, line) in layout.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let cell = match value {
                    0 => Cell::Open,
                    1 => Cell::Wall,
                    _ => {
                        return Err(MazeError::BadCellValue {
                            position: Position::new(row as i32, col as i32),
                            value,
                        })
                    }
                };
                cells.push(cell);
            }
        }
        Ok(Self {
            cells,
            rows: R,
            cols: C,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `pos` lies inside the grid rectangle.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// Get a cell. `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[pos.row as usize * self.cols + pos.col as usize])
    }

    /// Whether `pos` is an in-bounds open cell. False for any out-of-bounds
    /// position regardless of the grid contents.
    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Open)
    }
}

/// A grid plus its distinguished start and goal cells, both guaranteed
/// in-bounds and open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    start: Position,
    goal: Position,
}

impl Maze {
    /// Create a maze, validating that start and goal are open cells.
    pub fn new(grid: Grid, start: Position, goal: Position) -> Result<Self, MazeError> {
        if !grid.is_open(start) {
            return Err(MazeError::BlockedStart(start));
        }
        if !grid.is_open(goal) {
            return Err(MazeError::BlockedGoal(goal));
        }
        Ok(Self { grid, start, goal })
    }

    /// The fixed 10×10 layout, start (0, 0), goal (9, 9).
    pub fn classic() -> Self {
        let grid = Grid::from_rows([
            [0, 0, 0, 0, 1, 0, 1, 0, 0, 1],
            [1, 1, 0, 1, 0, 1, 1, 0, 1, 0],
            [0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
            [0, 1, 0, 1, 0, 0, 0, 1, 0, 1],
            [1, 0, 1, 0, 0, 1, 0, 1, 1, 0],
            [0, 1, 0, 1, 0, 0, 0, 0, 0, 1],
            [0, 0, 0, 0, 1, 0, 1, 0, 0, 1],
            [1, 1, 0, 1, 0, 1, 1, 0, 0, 0],
            [0, 1, 0, 1, 0, 1, 0, 0, 1, 0],
            [0, 1, 1, 0, 0, 0, 1, 1, 1, 0],
        ])
        .expect("classic layout is well-formed");
        Maze::new(grid, Position::new(0, 0), Position::new(9, 9))
            .expect("classic start and goal are open")
    }

    /// The wall layout.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The start cell.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The goal cell.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Whether `pos` is an in-bounds open cell of this maze's grid.
    pub fn is_open(&self, pos: Position) -> bool {
        self.grid.is_open(pos)
    }
}

/// Resolution of one move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Candidate cell is out of bounds or a wall; the agent stays put.
    Rejected,

    /// Candidate cell is open and is not the goal.
    Advanced(Position),

    /// Candidate cell is open and is the goal.
    Reached(Position),
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::Rejected => write!(f, "Rejected"),
            MoveOutcome::Advanced(pos) => write!(f, "Advanced{}", pos),
            MoveOutcome::Reached(pos) => write!(f, "Reached{}", pos),
        }
    }
}

/// Translate `pos` one step in `direction`. Pure arithmetic; the result may
/// be out of bounds.
pub fn next_position(pos: Position, direction: Direction) -> Position {
    let (dr, dc) = direction.delta();
    Position::new(pos.row + dr, pos.col + dc)
}

/// Resolve a move attempt from `pos` in `direction` against `maze`.
///
/// Total and deterministic: every input, in or out of bounds, yields exactly
/// one outcome and nothing is mutated.
pub fn attempt_move(maze: &Maze, pos: Position, direction: Direction) -> MoveOutcome {
    let candidate = next_position(pos, direction);
    if !maze.is_open(candidate) {
        return MoveOutcome::Rejected;
    }
    if candidate == maze.goal() {
        MoveOutcome::Reached(candidate)
    } else {
        MoveOutcome::Advanced(candidate)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_classic_dimensions_and_endpoints() {
        let maze = Maze::classic();
        assert_eq!(maze.grid().rows(), 10);
        assert_eq!(maze.grid().cols(), 10);
        assert_eq!(maze.start(), Position::new(0, 0));
        assert_eq!(maze.goal(), Position::new(9, 9));
        assert!(maze.is_open(maze.start()));
        assert!(maze.is_open(maze.goal()));
    }

    #[test]
    fn test_from_rows_rejects_bad_cell_value() {
        let result = Grid::from_rows([[0, 1], [2, 0]]);
        assert_eq!(
            result,
            Err(MazeError::BadCellValue {
                position: Position::new(1, 0),
                value: 2,
            })
        );
    }

    #[test]
    fn test_maze_rejects_blocked_start() {
        let grid = Grid::from_rows([[1, 0], [0, 0]]).expect("grid");
        assert_eq!(
            Maze::new(grid, Position::new(0, 0), Position::new(1, 1)),
            Err(MazeError::BlockedStart(Position::new(0, 0)))
        );
    }

    #[test]
    fn test_maze_rejects_out_of_bounds_goal() {
        let grid = Grid::from_rows([[0, 0], [0, 0]]).expect("grid");
        assert_eq!(
            Maze::new(grid, Position::new(0, 0), Position::new(2, 0)),
            Err(MazeError::BlockedGoal(Position::new(2, 0)))
        );
    }

    #[test]
    fn test_is_open_false_out_of_bounds_regardless_of_contents() {
        let grid = Grid::from_rows([[0, 0], [0, 0]]).expect("grid");
        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(2, 0),
            Position::new(0, 2),
            Position::new(-3, -3),
        ] {
            assert!(!grid.is_open(pos), "pos: {}", pos);
            assert_eq!(grid.get(pos), None, "pos: {}", pos);
        }
    }

    #[test]
    fn test_down_from_start_hits_wall() {
        let maze = Maze::classic();
        let outcome = attempt_move(&maze, maze.start(), Direction::Down);
        assert_eq!(outcome, MoveOutcome::Rejected);
    }

    #[test]
    fn test_right_from_start_advances() {
        let maze = Maze::classic();
        let outcome = attempt_move(&maze, maze.start(), Direction::Right);
        assert_eq!(outcome, MoveOutcome::Advanced(Position::new(0, 1)));
    }

    #[test]
    fn test_up_from_start_is_out_of_bounds() {
        let maze = Maze::classic();
        assert_eq!(
            next_position(maze.start(), Direction::Up),
            Position::new(-1, 0)
        );
        let outcome = attempt_move(&maze, maze.start(), Direction::Up);
        assert_eq!(outcome, MoveOutcome::Rejected);
    }

    #[test]
    fn test_down_onto_goal_reaches() {
        let maze = Maze::classic();
        let outcome = attempt_move(&maze, Position::new(8, 9), Direction::Down);
        assert_eq!(outcome, MoveOutcome::Reached(Position::new(9, 9)));
    }

    #[test]
    fn test_attempt_move_is_deterministic() {
        let maze = Maze::classic();
        for direction in Direction::ALL {
            let first = attempt_move(&maze, maze.start(), direction);
            let second = attempt_move(&maze, maze.start(), direction);
            assert_eq!(first, second, "direction: {}", direction);
        }
    }

    #[test]
    fn test_start_may_equal_goal() {
        let grid = Grid::from_rows([[0, 1], [1, 1]]).expect("grid");
        let maze =
            Maze::new(grid, Position::new(0, 0), Position::new(0, 0)).expect("degenerate maze");
        assert_eq!(maze.start(), maze.goal());
    }

    #[test]
    fn test_grid_display_marks_walls() {
        let grid = Grid::from_rows([[0, 1], [1, 0]]).expect("grid");
        let rendered = format!("{}", grid);
        assert_eq!(rendered, "  0 1\n0 . #\n1 # .");
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn test_next_position_moves_one_coordinate_by_one(
            row in -100i32..100,
            col in -100i32..100,
            direction in any_direction(),
        ) {
            let pos = Position::new(row, col);
            let next = next_position(pos, direction);
            let row_step = (next.row - pos.row).abs();
            let col_step = (next.col - pos.col).abs();
            prop_assert_eq!(row_step + col_step, 1);
            prop_assert!(row_step == 1 || col_step == 1);
        }

        #[test]
        fn test_attempt_move_never_lands_on_a_wall(
            row in -1i32..11,
            col in -1i32..11,
            direction in any_direction(),
        ) {
            let maze = Maze::classic();
            match attempt_move(&maze, Position::new(row, col), direction) {
                MoveOutcome::Rejected => {}
                MoveOutcome::Advanced(next) | MoveOutcome::Reached(next) => {
                    prop_assert!(maze.is_open(next));
                }
            }
        }

        #[test]
        fn test_reached_only_on_goal(
            row in -1i32..11,
            col in -1i32..11,
            direction in any_direction(),
        ) {
            let maze = Maze::classic();
            match attempt_move(&maze, Position::new(row, col), direction) {
                MoveOutcome::Reached(next) => prop_assert_eq!(next, maze.goal()),
                MoveOutcome::Advanced(next) => prop_assert_ne!(next, maze.goal()),
                MoveOutcome::Rejected => {}
            }
        }
    }
}
