use std::fmt;

use serde::Serialize;

use crate::search::moves::Move;
use crate::search::window::SearchWindow;

pub type NodeId = usize;

/// Receives the shape of the game tree as the search expands it.
///
/// `parent` is `None` for children of the root position.
pub trait TreeObserver<A> {
    /// A child is about to be searched with `window` (parent's frame).
    fn add_node(&mut self, parent: Option<NodeId>, m: &Move<A>, window: &SearchWindow) -> Option<NodeId>;

    /// The child's inherited value is now known.
    fn node_searched(&mut self, _id: NodeId, _m: &Move<A>) {}

    /// The node picked `id` as its best child.
    fn node_selected(&mut self, _id: NodeId) {}

    /// Siblings skipped after a cutoff at `value`.
    fn add_pruned(&mut self, _parent: Option<NodeId>, _pruned: &[Move<A>], _value: i32, _window: &SearchWindow) {}

    /// False when events are discarded, letting the search skip buffering them.
    fn records(&self) -> bool { true }
}

pub struct NoopObserver;

impl<A> TreeObserver<A> for NoopObserver {
    fn add_node(&mut self, _parent: Option<NodeId>, _m: &Move<A>, _window: &SearchWindow) -> Option<NodeId> { None }

    fn records(&self) -> bool { false }
}

enum Event<A> {
    Add { parent: Option<NodeId>, m: Move<A>, window: SearchWindow },
    Searched { id: NodeId, m: Move<A> },
    Selected(NodeId),
    Pruned { parent: Option<NodeId>, moves: Vec<Move<A>>, value: i32, window: SearchWindow },
}

/// Buffers one search pass so it can be forwarded or thrown away afterwards.
///
/// Ids handed out are local to the buffer; a `None` parent stands for the
/// anchor given to `replay`.
pub(crate) struct PendingTree<A> {
    events: Vec<Event<A>>,
    added: usize,
}

impl<A> PendingTree<A> {
    pub(crate) fn new() -> Self { Self { events: Vec::new(), added: 0 } }

    pub(crate) fn is_empty(&self) -> bool { self.events.is_empty() }

    /// Forward the buffered pass to `obs`, hanging its top level under `anchor`.
    pub(crate) fn replay(self, obs: &mut dyn TreeObserver<A>, anchor: Option<NodeId>) {
        let mut ids: Vec<Option<NodeId>> = Vec::with_capacity(self.added);
        let resolve = |ids: &[Option<NodeId>], p: Option<NodeId>| match p {
            None => anchor,
            Some(local) => ids.get(local).copied().flatten(),
        };
        for event in self.events {
            match event {
                Event::Add { parent, m, window } => {
                    let id = obs.add_node(resolve(&ids, parent), &m, &window);
                    ids.push(id);
                }
                Event::Searched { id, m } => {
                    if let Some(id) = resolve(&ids, Some(id)) { obs.node_searched(id, &m); }
                }
                Event::Selected(id) => {
                    if let Some(id) = resolve(&ids, Some(id)) { obs.node_selected(id); }
                }
                Event::Pruned { parent, moves, value, window } => {
                    obs.add_pruned(resolve(&ids, parent), &moves, value, &window);
                }
            }
        }
    }
}

impl<A: Clone> TreeObserver<A> for PendingTree<A> {
    fn add_node(&mut self, parent: Option<NodeId>, m: &Move<A>, window: &SearchWindow) -> Option<NodeId> {
        self.events.push(Event::Add { parent, m: m.clone(), window: *window });
        self.added += 1;
        Some(self.added - 1)
    }

    fn node_searched(&mut self, id: NodeId, m: &Move<A>) {
        self.events.push(Event::Searched { id, m: m.clone() });
    }

    fn node_selected(&mut self, id: NodeId) { self.events.push(Event::Selected(id)); }

    fn add_pruned(&mut self, parent: Option<NodeId>, pruned: &[Move<A>], value: i32, window: &SearchWindow) {
        self.events.push(Event::Pruned { parent, moves: pruned.to_vec(), value, window: *window });
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub action: String,
    pub player1: bool,
    pub value: i32,
    pub inherited_value: i32,
    pub window: SearchWindow,
    pub pruned: bool,
    pub selected: bool,
}

/// Records every expanded and pruned node; serializes to JSON for inspection.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TreeRecorder {
    nodes: Vec<TreeNode>,
}

impl TreeRecorder {
    pub fn new() -> Self { Self::default() }

    pub fn nodes(&self) -> &[TreeNode] { &self.nodes }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn children(&self, parent: Option<NodeId>) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter().filter(move |n| n.parent == parent)
    }

    pub fn pruned_count(&self) -> usize { self.nodes.iter().filter(|n| n.pruned).count() }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }

    fn push<A: fmt::Display>(&mut self, parent: Option<NodeId>, m: &Move<A>, window: &SearchWindow, pruned: bool) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            id,
            parent,
            action: m.action.to_string(),
            player1: m.player1,
            value: m.value,
            inherited_value: m.inherited_value,
            window: *window,
            pruned,
            selected: false,
        });
        id
    }
}

impl<A: fmt::Display> TreeObserver<A> for TreeRecorder {
    fn add_node(&mut self, parent: Option<NodeId>, m: &Move<A>, window: &SearchWindow) -> Option<NodeId> {
        Some(self.push(parent, m, window, false))
    }

    fn node_searched(&mut self, id: NodeId, m: &Move<A>) {
        if let Some(node) = self.nodes.get_mut(id) { node.inherited_value = m.inherited_value; }
    }

    fn node_selected(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) { node.selected = true; }
    }

    fn add_pruned(&mut self, parent: Option<NodeId>, pruned: &[Move<A>], _value: i32, window: &SearchWindow) {
        for m in pruned { self.push(parent, m, window, true); }
    }
}
