//! Application state and intent dispatch.

use std::rc::Rc;
use tictactoe::{Game, GameState, Position};
use tracing::{debug, info, instrument, trace};

use crate::config::Palette;
use crate::input::{self, Intent};

/// Main application state.
///
/// The game owns the board; the app only adds what the screen needs on top
/// of it and a redraw flag raised by the game's change notifications.
pub struct App {
    game: Game,
    cursor: Position,
    title: String,
    palette: Palette,
    redraw: Rc<std::cell::Cell<bool>>,
    should_quit: bool,
}

impl App {
    /// Creates a new application with a fresh game.
    #[instrument(skip(palette))]
    pub fn new(title: String, palette: Palette) -> Self {
        let mut game = Game::new();
        let redraw = Rc::new(std::cell::Cell::new(true));
        let flag = Rc::clone(&redraw);
        game.subscribe(move |state: &GameState| {
            trace!(current_player = %state.current_player(), "Game changed");
            flag.set(true);
        });

        Self {
            game,
            cursor: Position::Center,
            title,
            palette,
            redraw,
            should_quit: false,
        }
    }

    /// Applies a user intent.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Place(pos) => {
                self.set_cursor(pos);
                self.game.place(pos);
            }
            Intent::PlaceAtCursor => {
                self.game.place(self.cursor);
            }
            Intent::MoveCursor(direction) => {
                self.set_cursor(input::move_cursor(self.cursor, direction));
            }
            Intent::Reset => {
                info!("New game");
                self.game.reset();
            }
            Intent::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
        }
    }

    fn set_cursor(&mut self, cursor: Position) {
        if cursor != self.cursor {
            debug!(from = %self.cursor, to = %cursor, "Cursor moved");
            self.cursor = cursor;
            self.request_redraw();
        }
    }

    /// Schedules a redraw, e.g. after a terminal resize.
    pub fn request_redraw(&self) {
        self.redraw.set(true);
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn take_redraw(&self) -> bool {
        self.redraw.replace(false)
    }

    /// Gets the current game state.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Gets the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the frame title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Gets the cell colours.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", self.game.state())
            .field("cursor", &self.cursor)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use tictactoe::{Cell, Player};

    fn app() -> App {
        App::new("test".to_string(), Palette::default())
    }

    #[test]
    fn test_starts_with_pending_redraw() {
        let app = app();
        assert!(app.take_redraw());
        assert!(!app.take_redraw());
    }

    #[test]
    fn test_place_at_cursor() {
        let mut app = app();
        app.dispatch(Intent::MoveCursor(Direction::Up));
        app.dispatch(Intent::MoveCursor(Direction::Left));
        app.dispatch(Intent::PlaceAtCursor);

        assert_eq!(app.cursor(), Position::TopLeft);
        assert_eq!(app.state().cell(Position::TopLeft), Cell::X);
        assert_eq!(app.state().current_player(), Player::O);
    }

    #[test]
    fn test_game_change_raises_redraw() {
        let mut app = app();
        app.take_redraw();

        app.dispatch(Intent::PlaceAtCursor);

        assert!(app.take_redraw());
    }

    #[test]
    fn test_ignored_placement_does_not_redraw() {
        let mut app = app();
        app.dispatch(Intent::PlaceAtCursor);
        app.take_redraw();

        app.dispatch(Intent::PlaceAtCursor);

        assert!(!app.take_redraw());
        assert_eq!(app.state().current_player(), Player::O);
    }

    #[test]
    fn test_click_moves_cursor_and_places() {
        let mut app = app();
        app.dispatch(Intent::Place(Position::BottomRight));

        assert_eq!(app.cursor(), Position::BottomRight);
        assert_eq!(app.state().cell(Position::BottomRight), Cell::X);
    }

    #[test]
    fn test_reset_and_quit() {
        let mut app = app();
        app.dispatch(Intent::Place(Position::TopLeft));
        app.dispatch(Intent::Place(Position::TopRight));
        app.dispatch(Intent::Reset);

        assert_eq!(app.state(), &GameState::new());
        assert!(!app.should_quit());

        app.dispatch(Intent::Quit);
        assert!(app.should_quit());
    }
}
