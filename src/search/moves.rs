use std::fmt;

/// A static value at or beyond this magnitude means one side has won.
pub const WINNING_VALUE: i32 = 1000;

/// Bound lying outside every score the search can produce.
pub const INFINITY: i32 = 100_000;

/// One legal transition, as produced by a move generator.
///
/// `value` is the static evaluation (player 1's perspective) assigned when the
/// move was generated. `inherited_value` is written by the search once the
/// subtree below the move has been resolved; before that it means nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move<A> {
    pub action: A,
    pub player1: bool,
    pub value: i32,
    pub inherited_value: i32,
    pub selected: bool,
}

impl<A> Move<A> {
    pub fn new(action: A, player1: bool, value: i32) -> Self {
        Self { action, player1, value, inherited_value: 0, selected: false }
    }

    pub fn is_player1(&self) -> bool { self.player1 }

    pub fn with_inherited_value(mut self, value: i32) -> Self {
        self.inherited_value = value;
        self
    }
}

impl<A: fmt::Display> fmt::Display for Move<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = if self.player1 { "P1" } else { "P2" };
        write!(f, "{} {} value={} inherited={}", who, self.action, self.value, self.inherited_value)
    }
}

/// Candidate moves in generator preference order.
pub type MoveList<A> = Vec<Move<A>>;

/// Player 1 opens the game, so with no previous move it is player 1's turn.
pub fn player1_to_move<A>(last_move: Option<&Move<A>>) -> bool {
    last_move.map_or(true, |m| !m.player1)
}

/// Converts a player-1 score into the frame of the player about to move.
pub fn perspective_value(worth: i32, player1_to_move: bool) -> i32 {
    if player1_to_move { worth } else { -worth }
}

/// Panics when a static evaluation escapes the win sentinels.
pub(crate) fn check_bounded(worth: i32) -> i32 {
    assert!(
        (-WINNING_VALUE..=WINNING_VALUE).contains(&worth),
        "static evaluation {worth} outside [-{WINNING_VALUE}, {WINNING_VALUE}]"
    );
    worth
}
