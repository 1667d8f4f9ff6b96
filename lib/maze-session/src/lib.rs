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

//! Maze play session: agent position, score, and feedback.
//!
//! [`Session`] is the single owner of the mutable per-session state. One
//! call to [`Session::step`] processes one directional command to
//! completion: validate against the maze, move on success, record the
//! outcome. The UI only reads from the session between steps.

use maze_logic::{attempt_move, Direction, Maze, MoveOutcome, Position};
use serde::{Deserialize, Serialize};

/// Points awarded for a valid move (including the one reaching the goal).
pub const MOVE_REWARD: i64 = 10;

/// Points deducted for an invalid move.
pub const MOVE_PENALTY: i64 = 5;

/// Status of the most recent move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    /// No move attempted yet.
    None,

    /// Last move was valid.
    Correct,

    /// Last move was rejected.
    Wrong,

    /// Last move landed on the goal.
    GoalReached,
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feedback::None => Ok(()),
            Feedback::Correct => write!(f, "Correct Move!"),
            Feedback::Wrong => write!(f, "Wrong Move!"),
            Feedback::GoalReached => write!(f, "You've Reached the Goal!"),
        }
    }
}

/// Score counter plus the feedback message for the latest attempt.
///
/// The score is unbounded and may go negative; it only ever changes by
/// [`MOVE_REWARD`] or [`MOVE_PENALTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: i64,
    feedback: Feedback,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreTracker {
    /// Fresh tracker: score 0, no feedback.
    pub fn new() -> Self {
        Self {
            score: 0,
            feedback: Feedback::None,
        }
    }

    /// Fold one move outcome into the score and return the new feedback.
    pub fn record(&mut self, outcome: MoveOutcome) -> Feedback {
        self.feedback = match outcome {
            MoveOutcome::Rejected => {
                self.score -= MOVE_PENALTY;
                Feedback::Wrong
            }
            MoveOutcome::Advanced(_) => {
                self.score += MOVE_REWARD;
                Feedback::Correct
            }
            MoveOutcome::Reached(_) => {
                self.score += MOVE_REWARD;
                Feedback::GoalReached
            }
        };
        self.feedback
    }

    /// Current score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Feedback for the latest attempt.
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }
}

/// Whole-session phase. Reaching the goal is recorded but gates nothing:
/// movement and scoring continue unchanged afterwards, and there is no
/// reset short of restarting the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Goal not reached yet.
    Playing,

    /// Goal reached at least once.
    Reached,
}

/// One play session over a fixed maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    maze: Maze,
    position: Position,
    tracker: ScoreTracker,
    phase: Phase,
}

impl Session {
    /// Start a session with the agent on the maze's start cell.
    pub fn new(maze: Maze) -> Self {
        let position = maze.start();
        Self {
            maze,
            position,
            tracker: ScoreTracker::new(),
            phase: Phase::Playing,
        }
    }

    /// Process one directional command: validate, move on success, score.
    ///
    /// This is the only place the agent position changes, immediately after
    /// [`attempt_move`] has validated the candidate cell.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = attempt_move(&self.maze, self.position, direction);
        match outcome {
            MoveOutcome::Rejected => {}
            MoveOutcome::Advanced(next) | MoveOutcome::Reached(next) => {
                debug_assert!(self.maze.is_open(next));
                self.position = next;
            }
        }
        self.tracker.record(outcome);
        if let MoveOutcome::Reached(_) = outcome {
            self.phase = Phase::Reached;
        }
        outcome
    }

    /// The maze being played.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Current agent position. Always an in-bounds open cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current score.
    pub fn score(&self) -> i64 {
        self.tracker.score()
    }

    /// Feedback for the latest attempt.
    pub fn feedback(&self) -> Feedback {
        self.tracker.feedback()
    }

    /// Whole-session phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}
