//! Canonical story graph
//!
//! These types are only constructed by [`crate::story::normalize`]; nothing
//! downstream of the normalizer sees raw story JSON.

use crate::domain::value_objects::NodeId;
use std::collections::HashMap;

/// A selectable choice with a label and a target inside the same graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    label: String,
    target: NodeId,
}

impl Choice {
    pub(crate) fn new(label: String, target: NodeId) -> Self {
        Self { label, target }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }
}

/// One narrative beat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    id: NodeId,
    text: String,
    options: Vec<Choice>,
}

impl SceneNode {
    pub(crate) fn new(id: NodeId, text: String, options: Vec<Choice>) -> Self {
        Self { id, text, options }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[Choice] {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut Vec<Choice> {
        &mut self.options
    }
}

/// Normalized node graph; nodes keep the order they were declared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGraph {
    start: NodeId,
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, SceneNode>,
}

impl StoryGraph {
    pub(crate) fn new(start: NodeId) -> Self {
        Self {
            start,
            order: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// Insert a node; a repeated id keeps its first position but takes the later content
    pub(crate) fn insert(&mut self, node: SceneNode) {
        let id = node.id().clone();
        if self.nodes.insert(id.clone(), node).is_none() {
            self.order.push(id);
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.values_mut()
    }

    /// Declared start node; may be absent from `nodes`
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    pub fn node(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn first_node_id(&self) -> Option<&NodeId> {
        self.order.first()
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Where a fresh session starts: the declared start, else the first declared node
    pub fn entry_node_id(&self) -> Option<&NodeId> {
        if self.contains(&self.start) {
            Some(&self.start)
        } else {
            self.first_node_id()
        }
    }
}
