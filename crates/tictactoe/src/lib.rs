//! Tic-tac-toe state model.
//!
//! A UI-agnostic owner of the board and turn flag. Presentation code reads
//! [`Game::state`], forwards user intent through [`Game::place`] and
//! [`Game::reset`], and learns about changes by subscribing an observer.
//!
//! There is no win or draw detection: play continues until the board fills
//! up, after which every placement is ignored until the game is reset.
//!
//! # Example
//!
//! ```
//! use tictactoe::{Cell, Game, GameState, Player, Position};
//!
//! let mut game = Game::new();
//! game.subscribe(|state: &GameState| println!("{} to move", state.current_player()));
//!
//! game.place(Position::Center);
//! assert_eq!(game.state().cell(Position::Center), Cell::X);
//! assert_eq!(game.state().current_player(), Player::O);
//!
//! game.reset();
//! assert_eq!(game.state(), &GameState::new());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
pub mod invariants;
mod observer;
mod position;
mod types;

pub use game::Game;
pub use observer::{GameObserver, ObserverId};
pub use position::Position;
pub use types::{Board, Cell, GameSnapshot, GameState, InvalidState, Placement, Player};
