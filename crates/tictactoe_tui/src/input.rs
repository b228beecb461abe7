//! Translation of terminal events into user intents.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tictactoe::Position;

use crate::ui::{BoardLayout, Target};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Place the current player's mark.
    Place(Position),
    /// Place the current player's mark under the keyboard cursor.
    PlaceAtCursor,
    /// Move the keyboard cursor one cell.
    MoveCursor(Direction),
    /// Start a new game.
    Reset,
    /// Leave the application.
    Quit,
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards row 2.
    Down,
    /// Towards column 0.
    Left,
    /// Towards column 2.
    Right,
}

/// Maps a key press to an intent.
pub fn key_intent(key: KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Intent::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Char('n') | KeyCode::Char('r') => Some(Intent::Reset),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::PlaceAtCursor),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::MoveCursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::MoveCursor(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Intent::MoveCursor(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Intent::MoveCursor(Direction::Right)),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|digit| (digit as usize).checked_sub(1))
            .and_then(Position::from_index)
            .map(Intent::Place),
        _ => None,
    }
}

/// Maps a left click to an intent using the last drawn layout.
pub fn mouse_intent(mouse: MouseEvent, layout: &BoardLayout) -> Option<Intent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    match layout.hit(mouse.column, mouse.row)? {
        Target::Cell(pos) => Some(Intent::Place(pos)),
        Target::NewGame => Some(Intent::Reset),
    }
}

/// Moves the cursor one cell, staying put at the board edge.
pub fn move_cursor(cursor: Position, direction: Direction) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => (row + 1, col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, col + 1),
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> Option<Intent> {
        key_intent(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_digits_map_to_positions() {
        assert_eq!(press(KeyCode::Char('1')), Some(Intent::Place(Position::TopLeft)));
        assert_eq!(press(KeyCode::Char('5')), Some(Intent::Place(Position::Center)));
        assert_eq!(press(KeyCode::Char('9')), Some(Intent::Place(Position::BottomRight)));
        assert_eq!(press(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Char('q')), Some(Intent::Quit));
        assert_eq!(press(KeyCode::Esc), Some(Intent::Quit));
        assert_eq!(press(KeyCode::Char('n')), Some(Intent::Reset));
        assert_eq!(press(KeyCode::Enter), Some(Intent::PlaceAtCursor));
        assert_eq!(
            key_intent(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Intent::Quit)
        );
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_intent(key), None);
    }

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, Direction::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, Direction::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, Direction::Down), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::BottomRight, Direction::Left), Position::BottomCenter);
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, Direction::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, Direction::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, Direction::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::MiddleRight, Direction::Right), Position::MiddleRight);
    }

    #[test]
    fn test_mouse_clicks() {
        let layout = BoardLayout::new(Rect::new(0, 0, 80, 30));
        let click = |column, row, kind| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let center = layout.cells[Position::Center.index()];
        let button = layout.new_game;
        let left = MouseEventKind::Down(MouseButton::Left);

        assert_eq!(
            mouse_intent(click(center.x, center.y, left), &layout),
            Some(Intent::Place(Position::Center))
        );
        assert_eq!(
            mouse_intent(click(button.x + 2, button.y + 1, left), &layout),
            Some(Intent::Reset)
        );
        assert_eq!(mouse_intent(click(0, 0, left), &layout), None);
        assert_eq!(
            mouse_intent(
                click(center.x, center.y, MouseEventKind::Down(MouseButton::Right)),
                &layout
            ),
            None
        );
    }
}
