//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tictactoe::{Cell, Position};

use crate::app::App;

const CELL_WIDTH: u16 = 11;
const CELL_HEIGHT: u16 = 5;
const GAP: u16 = 1;
const GRID_WIDTH: u16 = CELL_WIDTH * 3 + GAP * 2;
const GRID_HEIGHT: u16 = CELL_HEIGHT * 3 + GAP * 2;
const BUTTON_WIDTH: u16 = 16;
const BUTTON_HEIGHT: u16 = 3;

/// Something on screen the mouse can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A board cell.
    Cell(Position),
    /// The "New Game" button.
    NewGame,
}

/// Screen areas of every widget, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Whose-turn label.
    pub turn: Rect,
    /// Board cells, indexed by [`Position::index`].
    pub cells: [Rect; 9],
    /// "New Game" button.
    pub new_game: Rect,
    /// Key help line.
    pub help: Rect,
}

impl BoardLayout {
    /// Lays the screen out inside `area` (the whole frame, border included).
    pub fn new(area: Rect) -> Self {
        let inner = area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),             // Turn label
                Constraint::Length(1),             // Spacer
                Constraint::Length(GRID_HEIGHT),   // Board
                Constraint::Length(1),             // Spacer
                Constraint::Length(BUTTON_HEIGHT), // New Game
                Constraint::Min(1),                // Help
            ])
            .split(inner);

        let grid = center_rect(rows[2], GRID_WIDTH, GRID_HEIGHT);
        let mut cells = [Rect::default(); 9];
        for pos in Position::ALL {
            let x = grid.x + pos.col() as u16 * (CELL_WIDTH + GAP);
            let y = grid.y + pos.row() as u16 * (CELL_HEIGHT + GAP);
            cells[pos.index()] = clip(Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT), grid);
        }

        Self {
            turn: rows[0],
            cells,
            new_game: center_rect(rows[4], BUTTON_WIDTH, BUTTON_HEIGHT),
            help: Rect::new(rows[5].x, rows[5].y, rows[5].width, rows[5].height.min(1)),
        }
    }

    /// Returns what sits under the terminal cell at `column`, `row`.
    pub fn hit(&self, column: u16, row: u16) -> Option<Target> {
        if contains(self.new_game, column, row) {
            return Some(Target::NewGame);
        }
        Position::ALL
            .into_iter()
            .find(|pos| contains(self.cells[pos.index()], column, row))
            .map(Target::Cell)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Cuts `rect` down to `bounds`; a rect entirely outside collapses to zero size.
fn clip(rect: Rect, bounds: Rect) -> Rect {
    let clipped = rect.intersection(bounds);
    if clipped.is_empty() {
        Rect::new(bounds.x, bounds.y, 0, 0)
    } else {
        clipped
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App, layout: &BoardLayout) {
    let frame_block = Block::default()
        .title(app.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL);
    frame.render_widget(frame_block, frame.area());

    let turn = Paragraph::new(format!("Player {}", app.state().current_player()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(turn, layout.turn);

    for pos in Position::ALL {
        draw_cell(frame, app, pos, layout.cells[pos.index()]);
    }

    let button = Paragraph::new("New Game")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, layout.new_game);

    let help = Paragraph::new("click / arrows+enter / 1-9 place   n new game   q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, layout.help);
}

fn draw_cell(frame: &mut Frame, app: &App, pos: Position, area: Rect) {
    let palette = app.palette();
    let cell = app.state().cell(pos);
    let background = match cell {
        Cell::X => palette.x,
        Cell::O => palette.o,
        Cell::Empty => palette.empty,
    };

    let mut block = Block::default().style(Style::default().bg(background));
    if pos == app.cursor() {
        block = block
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(palette.cursor).add_modifier(Modifier::BOLD));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::default(); usize::from(inner.height.saturating_sub(1) / 2)];
    lines.push(Line::from(cell.to_string()));
    let mark = Paragraph::new(lines)
        .style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(mark, inner);
}
