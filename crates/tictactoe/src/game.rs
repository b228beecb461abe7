//! The game state owner.

use super::invariants;
use super::observer::{GameObserver, ObserverId, Observers};
use super::position::Position;
use super::types::{GameState, Placement};
use tracing::{debug, error, instrument};

/// Tic-tac-toe game: owns the [`GameState`] and notifies observers of every
/// change.
///
/// There is no terminal state. Once the board is full every placement is
/// ignored until [`Game::reset`] is called.
#[derive(Debug, Default)]
pub struct Game {
    state: GameState,
    observers: Observers,
}

impl Game {
    /// Creates a new game: empty board, X to move, no observers.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Places the current player's mark at `position`.
    ///
    /// If the cell is already taken the call changes nothing and observers
    /// are not notified.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn place(&mut self, position: Position) -> Placement {
        let placement = self.state.place(position);
        match placement {
            Placement::Placed { .. } => {
                debug!(%placement, "Mark placed");
                self.changed();
            }
            Placement::Occupied { .. } => debug!(%placement, "Placement ignored"),
        }
        placement
    }

    /// Clears the board and gives the turn back to X.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state.reset();
        debug!("Game reset");
        self.changed();
    }

    /// Registers an observer, called after every state change.
    #[instrument(skip_all)]
    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: GameObserver + 'static,
    {
        let id = self.observers.add(Box::new(observer));
        debug!(%id, "Observer subscribed");
        id
    }

    /// Removes an observer. Returns false if it was not subscribed.
    #[instrument(skip(self))]
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Number of subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn changed(&mut self) {
        if cfg!(debug_assertions) {
            if let Err(violations) = invariants::check(&self.state) {
                for violation in &violations {
                    error!(%violation, "Game state invariant violated");
                }
                panic!("game state invariants violated: {violations:?}");
            }
        }
        self.observers.notify(&self.state);
    }
}
