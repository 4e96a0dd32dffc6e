#![allow(dead_code)]

use gamesearch::search::{player1_to_move, HashKey, Move, MoveList, Searchable, Weights};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug, Default)]
pub struct ScriptedNode {
    /// Static worth, player 1's perspective.
    pub worth: i32,
    pub children: Vec<usize>,
    pub urgent: Vec<usize>,
    pub jeopardy: bool,
    pub terminal: bool,
    pub key: u64,
}

/// Hand-built game tree. Actions are node ids; node 0 is the root and player 1
/// moves first.
#[derive(Clone, Debug)]
pub struct ScriptedTree {
    pub nodes: Vec<ScriptedNode>,
    path: Vec<usize>,
}

impl ScriptedTree {
    pub fn new(root_worth: i32) -> Self {
        Self { nodes: vec![ScriptedNode { worth: root_worth, key: key_of(0), ..ScriptedNode::default() }], path: vec![0] }
    }

    /// Adds a child of `parent`, returning its id.
    pub fn add(&mut self, parent: usize, worth: i32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ScriptedNode { worth, key: key_of(id), ..ScriptedNode::default() });
        self.nodes[parent].children.push(id);
        id
    }

    /// Adds a node reachable only as an urgent reply from `parent`.
    pub fn add_urgent(&mut self, parent: usize, worth: i32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ScriptedNode { worth, key: key_of(id), ..ScriptedNode::default() });
        self.nodes[parent].urgent.push(id);
        self.nodes[parent].jeopardy = true;
        id
    }

    /// Complete tree with `branching` children per node down to `depth`, leaf
    /// worths drawn from `seed`. Interior worths are zero.
    pub fn uniform(branching: usize, depth: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut t = Self::new(0);
        let mut frontier = vec![0usize];
        for level in 0..depth {
            let mut next = Vec::new();
            for &p in &frontier {
                for _ in 0..branching {
                    let worth = if level + 1 == depth { rng.gen_range(-90..=90) } else { 0 };
                    next.push(t.add(p, worth));
                }
            }
            frontier = next;
        }
        t
    }

    pub fn current(&self) -> usize { *self.path.last().unwrap() }

    pub fn at_root(&self) -> bool { self.path.len() == 1 }

    fn moves_to(&self, ids: &[usize], last_move: Option<&Move<usize>>) -> MoveList<usize> {
        let p1 = player1_to_move(last_move);
        ids.iter().map(|&c| Move::new(c, p1, self.nodes[c].worth)).collect()
    }
}

fn key_of(id: usize) -> u64 { (id as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15) }

impl Searchable for ScriptedTree {
    type Action = usize;

    fn generate_moves(&mut self, last_move: Option<&Move<usize>>, _weights: &Weights) -> MoveList<usize> {
        let ids = self.nodes[self.current()].children.clone();
        self.moves_to(&ids, last_move)
    }

    fn generate_urgent_moves(&mut self, last_move: Option<&Move<usize>>, _weights: &Weights) -> MoveList<usize> {
        let ids = self.nodes[self.current()].urgent.clone();
        self.moves_to(&ids, last_move)
    }

    fn in_jeopardy(&self, _last_move: Option<&Move<usize>>, _weights: &Weights) -> bool {
        self.nodes[self.current()].jeopardy
    }

    fn done(&mut self, _last_move: Option<&Move<usize>>, _record_result: bool) -> bool {
        self.nodes[self.current()].terminal
    }

    fn worth(&self, _last_move: Option<&Move<usize>>, _weights: &Weights) -> i32 { self.nodes[self.current()].worth }

    fn hash_key(&self) -> HashKey { HashKey(self.nodes[self.current()].key) }

    fn make_internal_move(&mut self, m: &Move<usize>) {
        let cur = &self.nodes[self.current()];
        assert!(cur.children.contains(&m.action) || cur.urgent.contains(&m.action), "{} is not a move here", m.action);
        self.path.push(m.action);
    }

    fn undo_internal_move(&mut self, m: &Move<usize>) {
        assert_eq!(self.current(), m.action, "undo out of order");
        self.path.pop();
    }
}
