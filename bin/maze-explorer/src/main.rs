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

//! Desktop window for the maze session: grid rendering, a d-pad of four
//! directional buttons, and score/feedback readouts in the window title and
//! on stdout.

use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use maze_logic::{Cell, Direction, Maze, Position};
use maze_session::Session;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const CELL_SIZE: usize = 60;
const GRID_ROWS: usize = 10;
const GRID_COLS: usize = 10;

const GRID_WIDTH: usize = GRID_COLS * CELL_SIZE;
const GRID_HEIGHT: usize = GRID_ROWS * CELL_SIZE;

const PAD: usize = 10;
const PANEL_HEIGHT: usize = 3 * CELL_SIZE + 4 * PAD;

const WIDTH: usize = GRID_WIDTH;
const HEIGHT: usize = GRID_HEIGHT + PANEL_HEIGHT;

const AGENT_INSET: usize = 10;

const WHITE: u32 = 0x00FFFFFF;
const BLACK: u32 = 0x00080808;
const GRAY: u32 = 0x00909090;
const BLUE: u32 = 0x003B6FD6;
const GREEN: u32 = 0x002E9E4F;
const RED: u32 = 0x00D63B3B;
const PANEL: u32 = 0x00E8E8E8;
const BUTTON: u32 = 0x00C8C8C8;
const GLYPH: u32 = 0x00303030;

// ---------------------------------------------------------------------------
// Drawing primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

impl Rect {
    fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

fn fill_rect(buffer: &mut [u32], rect: Rect, color: u32) {
    for row in rect.y..rect.y + rect.h {
        let start = row * WIDTH + rect.x;
        buffer[start..start + rect.w].fill(color);
    }
}

fn fill_circle(buffer: &mut [u32], cx: usize, cy: usize, radius: usize, color: u32) {
    let r2 = (radius * radius) as isize;
    for y in cy - radius..=cy + radius {
        let dy = y as isize - cy as isize;
        for x in cx - radius..=cx + radius {
            let dx = x as isize - cx as isize;
            if dx * dx + dy * dy <= r2 {
                buffer[y * WIDTH + x] = color;
            }
        }
    }
}

// Triangle glyph pointing in `direction`, inset inside the button rect.
fn draw_arrow(buffer: &mut [u32], rect: Rect, direction: Direction, color: u32) {
    let inset = rect.w / 4;
    let size = rect.w - 2 * inset;
    let x0 = rect.x + inset;
    let y0 = rect.y + inset;
    match direction {
        Direction::Up => {
            for i in 0..size {
                let half = i / 2;
                let cx = x0 + size / 2;
                let start = (y0 + i) * WIDTH + cx - half;
                buffer[start..start + 2 * half + 1].fill(color);
            }
        }
        Direction::Down => {
            for i in 0..size {
                let half = (size - 1 - i) / 2;
                let cx = x0 + size / 2;
                let start = (y0 + i) * WIDTH + cx - half;
                buffer[start..start + 2 * half + 1].fill(color);
            }
        }
        Direction::Left => {
            for j in 0..size {
                let half = j / 2;
                let cy = y0 + size / 2;
                for y in cy - half..=cy + half {
                    buffer[y * WIDTH + x0 + j] = color;
                }
            }
        }
        Direction::Right => {
            for j in 0..size {
                let half = (size - 1 - j) / 2;
                let cy = y0 + size / 2;
                for y in cy - half..=cy + half {
                    buffer[y * WIDTH + x0 + j] = color;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn tile_rect(pos: Position) -> Rect {
    Rect {
        x: pos.col as usize * CELL_SIZE,
        y: pos.row as usize * CELL_SIZE,
        w: CELL_SIZE,
        h: CELL_SIZE,
    }
}

fn draw_maze(buffer: &mut [u32], maze: &Maze) {
    for row in 0..maze.grid().rows() {
        for col in 0..maze.grid().cols() {
            let pos = Position::new(row as i32, col as i32);
            let color = match maze.grid().get(pos) {
                Some(Cell::Wall) => BLACK,
                _ => WHITE,
            };
            fill_rect(buffer, tile_rect(pos), color);
        }
    }

    // Gridlines over the tiles.
    for row in 1..GRID_ROWS {
        let start = row * CELL_SIZE * WIDTH;
        buffer[start..start + GRID_WIDTH].fill(GRAY);
    }
    for col in 1..GRID_COLS {
        for y in 0..GRID_HEIGHT {
            buffer[y * WIDTH + col * CELL_SIZE] = GRAY;
        }
    }

    fill_rect(buffer, tile_rect(maze.start()), BLUE);
    fill_rect(buffer, tile_rect(maze.goal()), GREEN);
}

fn draw_agent(buffer: &mut [u32], pos: Position) {
    let rect = tile_rect(pos);
    let cx = rect.x + CELL_SIZE / 2;
    let cy = rect.y + CELL_SIZE / 2;
    fill_circle(buffer, cx, cy, CELL_SIZE / 2 - AGENT_INSET, RED);
}

fn draw_panel(buffer: &mut [u32], buttons: &[(Rect, Direction); 4]) {
    fill_rect(
        buffer,
        Rect {
            x: 0,
            y: GRID_HEIGHT,
            w: WIDTH,
            h: PANEL_HEIGHT,
        },
        PANEL,
    );
    for (rect, direction) in buttons {
        fill_rect(buffer, *rect, BUTTON);
        draw_arrow(buffer, *rect, *direction, GLYPH);
    }
}

fn render(buffer: &mut [u32], session: &Session, buttons: &[(Rect, Direction); 4]) {
    draw_maze(buffer, session.maze());
    draw_agent(buffer, session.position());
    draw_panel(buffer, buttons);
}

// ---------------------------------------------------------------------------
// Input dispatch
// ---------------------------------------------------------------------------

// D-pad below the grid: up centered on the top row, left/right flanking the
// middle row, down centered on the bottom row.
fn dpad_buttons() -> [(Rect, Direction); 4] {
    let center_x = (WIDTH - CELL_SIZE) / 2;
    let top = GRID_HEIGHT + PAD;
    let middle = top + CELL_SIZE + PAD;
    let bottom = middle + CELL_SIZE + PAD;
    let square = |x, y| Rect {
        x,
        y,
        w: CELL_SIZE,
        h: CELL_SIZE,
    };
    [
        (square(center_x, top), Direction::Up),
        (square(center_x - CELL_SIZE - PAD, middle), Direction::Left),
        (square(center_x + CELL_SIZE + PAD, middle), Direction::Right),
        (square(center_x, bottom), Direction::Down),
    ]
}

const KEY_BINDINGS: [(Key, Direction); 4] = [
    (Key::Up, Direction::Up),
    (Key::Down, Direction::Down),
    (Key::Left, Direction::Left),
    (Key::Right, Direction::Right),
];

fn clicked_direction(buttons: &[(Rect, Direction); 4], mx: f32, my: f32) -> Option<Direction> {
    let (px, py) = (mx as usize, my as usize);
    buttons
        .iter()
        .find(|(rect, _)| rect.contains(px, py))
        .map(|(_, direction)| *direction)
}

fn pressed_direction(window: &Window) -> Option<Direction> {
    KEY_BINDINGS
        .iter()
        .find(|(key, _)| window.is_key_pressed(*key, KeyRepeat::No))
        .map(|(_, direction)| *direction)
}

fn title(session: &Session) -> String {
    let feedback = session.feedback();
    if format!("{}", feedback).is_empty() {
        format!("Maze Explorer | Score: {}", session.score())
    } else {
        format!("Maze Explorer | Score: {} | {}", session.score(), feedback)
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

fn main() -> Result<(), minifb::Error> {
    let maze = Maze::classic();
    assert_eq!(maze.grid().rows(), GRID_ROWS);
    assert_eq!(maze.grid().cols(), GRID_COLS);
    let mut session = Session::new(maze);

    let buttons = dpad_buttons();
    let mut buffer = vec![WHITE; WIDTH * HEIGHT];

    let mut window = Window::new(&title(&session), WIDTH, HEIGHT, WindowOptions::default())?;
    window.limit_update_rate(Some(Duration::from_micros(16600)));

    println!("{}", session.maze().grid());

    let mut mouse_was_down = false;
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut direction = pressed_direction(&window);

        let mouse_down = window.get_mouse_down(MouseButton::Left);
        if mouse_down && !mouse_was_down && direction.is_none() {
            if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Clamp) {
                direction = clicked_direction(&buttons, mx, my);
            }
        }
        mouse_was_down = mouse_down;

        // One event is processed to completion before the next frame:
        // validate, mutate, record, redraw.
        if let Some(direction) = direction {
            let outcome = session.step(direction);
            println!(
                "{} -> {} | score: {} | {}",
                direction,
                outcome,
                session.score(),
                session.feedback()
            );
            window.set_title(&title(&session));
        }

        render(&mut buffer, &session, &buttons);
        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpad_buttons_sit_inside_the_panel() {
        for (rect, _) in dpad_buttons() {
            assert!(rect.y >= GRID_HEIGHT);
            assert!(rect.y + rect.h <= HEIGHT);
            assert!(rect.x + rect.w <= WIDTH);
        }
    }

    #[test]
    fn test_dpad_buttons_do_not_overlap() {
        let buttons = dpad_buttons();
        for (i, (a, _)) in buttons.iter().enumerate() {
            for (b, _) in buttons.iter().skip(i + 1) {
                let disjoint = a.x + a.w <= b.x
                    || b.x + b.w <= a.x
                    || a.y + a.h <= b.y
                    || b.y + b.h <= a.y;
                assert!(disjoint);
            }
        }
    }

    #[test]
    fn test_click_resolves_to_button_direction() {
        let buttons = dpad_buttons();
        for (rect, direction) in &buttons {
            let mx = (rect.x + rect.w / 2) as f32;
            let my = (rect.y + rect.h / 2) as f32;
            assert_eq!(clicked_direction(&buttons, mx, my), Some(*direction));
        }
    }

    #[test]
    fn test_click_outside_buttons_resolves_to_none() {
        let buttons = dpad_buttons();
        assert_eq!(clicked_direction(&buttons, 0.0, 0.0), None);
        assert_eq!(clicked_direction(&buttons, 1.0, (HEIGHT - 1) as f32), None);
    }

    #[test]
    fn test_title_carries_score_and_feedback() {
        let mut session = Session::new(Maze::classic());
        assert_eq!(title(&session), "Maze Explorer | Score: 0");
        session.step(Direction::Down);
        assert_eq!(title(&session), "Maze Explorer | Score: -5 | Wrong Move!");
    }
}
