use std::collections::VecDeque;
use std::fmt;

use crate::search::moves::{check_bounded, player1_to_move, Move, MoveList, INFINITY};
use crate::search::searchable::Searchable;
use crate::search::strategy::{Node, Searcher};
use crate::search::tree::{NodeId, TreeObserver};
use crate::search::window::SearchWindow;

// Plain minimax: every value stays in player 1's frame, player 1 maximizes and
// player 2 minimizes. No memory, no scout.
impl<A: Clone + fmt::Debug + PartialEq> Searcher<A> {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn minimax_internal<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        depth: i32,
        ply: u32,
        window: SearchWindow,
        obs: &mut dyn TreeObserver<A>,
        parent: Option<NodeId>,
    ) -> Node<A> {
        let done = s.done(last_move, false);
        if depth <= 0 || done {
            if self.do_quiescent_search(s, depth, done, last_move) {
                let stand_pat = self.absolute_worth(s, last_move);
                let urgent = s.generate_urgent_moves(last_move, &self.options.weights);
                if !urgent.is_empty() {
                    return self.minimax_best_move(s, last_move, depth, ply, urgent, window, Some(stand_pat), obs, parent);
                }
            }
            return Node::leaf(self.absolute_worth(s, last_move));
        }
        let moves = s.generate_moves(last_move, &self.options.weights);
        if moves.is_empty() {
            return Node::leaf(self.absolute_worth(s, last_move));
        }
        self.minimax_best_move(s, last_move, depth, ply, moves, window, None, obs, parent)
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax_best_move<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        depth: i32,
        ply: u32,
        moves: MoveList<A>,
        window: SearchWindow,
        stand_pat: Option<i32>,
        obs: &mut dyn TreeObserver<A>,
        parent: Option<NodeId>,
    ) -> Node<A> {
        let pruning = self.options.alpha_beta;
        let maximize = player1_to_move(last_move);
        let (mut alpha, mut beta) = (window.alpha, window.beta);
        let mut best_value = if maximize { -INFINITY } else { INFINITY };
        let mut best: Option<Move<A>> = None;
        let mut best_id: Option<NodeId> = None;

        if let Some(stand) = stand_pat {
            best_value = stand;
            if pruning {
                if maximize {
                    if stand >= beta { return Node::leaf(stand); }
                    alpha = alpha.max(stand);
                } else {
                    if stand <= alpha { return Node::leaf(stand); }
                    beta = beta.min(stand);
                }
            }
        }

        let total = moves.len();
        let mut remaining: VecDeque<Move<A>> = moves.into();
        while let Some(mut the_move) = remaining.pop_front() {
            if self.pause_requested() {
                self.interrupted = true;
                break;
            }
            self.moves_considered += 1;
            if ply == 0 { self.update_percent_done(total - remaining.len(), total); }

            let current = SearchWindow::new(alpha, beta);
            s.make_internal_move(&the_move);
            let child = obs.add_node(parent, &the_move, &current);
            let value = self.minimax_internal(s, Some(&the_move), depth - 1, ply + 1, current, obs, child).value;
            s.undo_internal_move(&the_move);
            // A child cut short by cancellation has no trustworthy value
            if self.interrupted { break; }

            the_move.inherited_value = value;
            if let Some(id) = child { obs.node_searched(id, &the_move); }

            let better = if maximize { value > best_value } else { value < best_value };
            if better {
                best_value = value;
                best = Some(the_move);
                best_id = child;
                if pruning {
                    if maximize { alpha = alpha.max(value); } else { beta = beta.min(value); }
                    if alpha >= beta {
                        obs.add_pruned(parent, remaining.make_contiguous(), value, &window);
                        break;
                    }
                }
            }
        }

        if best.is_none() && stand_pat.is_none() {
            return Node::leaf(self.absolute_worth(s, last_move));
        }
        if let Some(id) = best_id { obs.node_selected(id); }
        if let Some(b) = best.as_mut() { b.selected = true; }
        Node { value: best_value, best }
    }

    fn absolute_worth<S: Searchable<Action = A>>(&self, s: &S, last_move: Option<&Move<A>>) -> i32 {
        check_bounded(s.worth(last_move, &self.options.weights))
    }
}
