//! Change notification for the game state.

use super::types::GameState;
use derive_more::Display;

/// Receives the new state after every mutation of a [`Game`](crate::Game).
///
/// Any `FnMut(&GameState)` closure is an observer.
pub trait GameObserver {
    /// Called after the state changed.
    fn state_changed(&mut self, state: &GameState);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameState),
{
    fn state_changed(&mut self, state: &GameState) {
        (*self)(state)
    }
}

/// Handle returned by [`Game::subscribe`](crate::Game::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("observer#{_0}")]
pub struct ObserverId(u64);

/// Observers in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    entries: Vec<(ObserverId, Box<dyn GameObserver>)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, state: &GameState) {
        for (_, observer) in &mut self.entries {
            observer.state_changed(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<ObserverId> = self.entries.iter().map(|(id, _)| *id).collect();
        f.debug_struct("Observers").field("ids", &ids).finish()
    }
}
