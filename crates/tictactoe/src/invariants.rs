//! Invariants of the game state.
//!
//! Marks are placed strictly in alternation starting with X, so every
//! reachable state has as many X marks as O marks, or one more, and the
//! turn flag follows from the counts.

use super::types::{GameState, Player};
use derive_more::Display;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: &'static str,
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(results: &[(bool, &'static str)]) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<InvariantViolation> = results
        .iter()
        .filter(|(holds, _)| !*holds)
        .map(|&(_, description)| InvariantViolation { description })
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ])
    }
}

/// X has as many marks as O, or exactly one more.
pub struct MarkBalanceInvariant;

impl Invariant<GameState> for MarkBalanceInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.marks(Player::X);
        let o = state.marks(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X marks equal O marks or exceed them by one"
    }
}

/// X is to move exactly when both players have the same number of marks.
pub struct TurnOrderInvariant;

impl Invariant<GameState> for TurnOrderInvariant {
    fn holds(state: &GameState) -> bool {
        let balanced = state.marks(Player::X) == state.marks(Player::O);
        balanced == (state.current_player() == Player::X)
    }

    fn description() -> &'static str {
        "X moves when mark counts are equal, O otherwise"
    }
}

/// All game state invariants as a composable set.
pub type GameInvariants = (MarkBalanceInvariant, TurnOrderInvariant);

/// Checks every game state invariant.
pub fn check(state: &GameState) -> Result<(), Vec<InvariantViolation>> {
    GameInvariants::check_all(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Cell, GameSnapshot, Position};
    use Cell::{Empty as E, O, X};

    fn snapshot(cells: [Cell; 9], current_player: Player) -> GameSnapshot {
        GameSnapshot {
            board: Board::from_cells(cells),
            current_player,
        }
    }

    #[test]
    fn test_initial_state_holds() {
        assert!(check(&GameState::new()).is_ok());
    }

    #[test]
    fn test_holds_after_placements() {
        let mut state = GameState::new();
        for pos in [Position::TopLeft, Position::Center, Position::BottomRight] {
            state.place(pos);
            assert!(check(&state).is_ok());
        }
    }

    #[test]
    fn test_rejects_two_extra_x() {
        let result = GameState::try_from(snapshot([X, X, E, E, E, E, E, E, E], Player::O));
        let err = result.unwrap_err();
        assert_eq!(err.x_marks, 2);
        assert_eq!(err.o_marks, 0);
    }

    #[test]
    fn test_rejects_o_ahead() {
        let result = GameState::try_from(snapshot([O, E, E, E, E, E, E, E, E], Player::X));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_wrong_turn() {
        let result = GameState::try_from(snapshot([X, E, E, E, E, E, E, E, E], Player::X));
        assert!(result.is_err());
    }

    #[test]
    fn test_accepts_balanced_board() {
        let state = GameState::try_from(snapshot([X, O, E, E, E, E, E, E, E], Player::X))
            .expect("Balanced board with X to move");
        assert_eq!(state.cell(Position::TopCenter), Cell::O);
    }

    #[test]
    fn test_set_collects_only_failures() {
        struct NeverHolds;
        impl Invariant<GameState> for NeverHolds {
            fn holds(_: &GameState) -> bool {
                false
            }
            fn description() -> &'static str {
                "never holds"
            }
        }

        type Pair = (MarkBalanceInvariant, NeverHolds);
        let violations = Pair::check_all(&GameState::new()).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to_string(), "never holds");
    }
}
