//! Arena-backed host document.

use std::collections::HashMap;

use crate::element::{Element, NodeId};
use crate::error::DomError;

/// Where a dispatched notification was fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Node(NodeId),
    /// The global scope.
    Window,
}

/// A notification fired through [`Document::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub target: EventTarget,
    pub name: String,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

/// The page a widget is mounted into.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
/// only detaches it; its id stays valid but it is no longer reachable from
/// the root. Destroying a node frees its slot, and a later
/// [`create`](Self::create) may hand the same id out again.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: NodeId,
    active: Option<NodeId>,
    scroll_targets: HashMap<NodeId, NodeId>,
    events: Vec<DispatchedEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only a `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node {
                parent: None,
                children: Vec::new(),
                element: Element::new("body"),
            })],
            free: Vec::new(),
            root: NodeId(0),
            active: None,
            scroll_targets: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // -------------------------------------------------------------------------
    // Node access
    // -------------------------------------------------------------------------

    /// Add a detached node to the arena, reusing a freed slot if there is one.
    pub fn create(&mut self, element: Element) -> NodeId {
        let node = Node {
            parent: None,
            children: Vec::new(),
            element,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::UnknownNode(id))
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.node(node).map(|n| &n.element)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.node_mut(node).ok().map(|n| &mut n.element)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Direct children of `node` with the given tag name.
    pub fn children_by_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&child| self.get(child).is_some_and(|el| el.is(tag)))
            .collect()
    }

    /// `node` and all its descendants, in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.get(node).is_none() {
            return out;
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|n| self.get(n))
            .map(|el| el.text.as_str())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Insert `node` as the previous sibling of `reference`.
    pub fn insert_before(&mut self, node: NodeId, reference: NodeId) -> Result<(), DomError> {
        self.ensure(reference)?;
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        self.check_insert(parent, node)?;
        self.detach(node);

        let siblings = &mut self.node_mut(parent)?.children;
        let at = siblings
            .iter()
            .position(|&s| s == reference)
            .unwrap_or(siblings.len());
        siblings.insert(at, node);
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `node` and its subtree from the tree.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.ensure(node)?;
        if self.parent(node).is_none() {
            return Err(DomError::Detached(node));
        }
        if let Some(active) = self.active
            && self.contains(node, active)
        {
            self.active = None;
        }
        self.detach(node);
        Ok(())
    }

    /// Detach every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) -> Result<(), DomError> {
        self.ensure(node)?;
        if let Some(active) = self.active
            && active != node
            && self.contains(node, active)
        {
            self.active = None;
        }
        let children = std::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            if let Ok(child) = self.node_mut(child) {
                child.parent = None;
            }
        }
        self.scroll_targets.remove(&node);
        Ok(())
    }

    /// Remove `node` and its subtree and free their slots.
    ///
    /// Unlike [`remove`](Self::remove) this also works on detached nodes. The
    /// root cannot be destroyed.
    pub fn destroy(&mut self, node: NodeId) -> Result<(), DomError> {
        self.ensure(node)?;
        if node == self.root {
            return Err(DomError::Detached(node));
        }
        let doomed = self.descendants(node);
        if let Some(active) = self.active
            && doomed.contains(&active)
        {
            self.active = None;
        }
        self.scroll_targets
            .retain(|container, item| !doomed.contains(container) && !doomed.contains(item));
        self.detach(node);
        for id in doomed {
            self.nodes[id.0] = None;
            self.free.push(id);
        }
        Ok(())
    }

    /// Destroy every child of `node`.
    pub fn destroy_children(&mut self, node: NodeId) -> Result<(), DomError> {
        self.ensure(node)?;
        for child in self.children(node).to_vec() {
            self.destroy(child)?;
        }
        self.scroll_targets.remove(&node);
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.node_mut(node).ok().and_then(|n| n.parent.take());
        if let Some(parent) = parent
            && let Ok(parent) = self.node_mut(parent)
        {
            parent.children.retain(|&c| c != node);
        }
    }

    fn ensure(&self, node: NodeId) -> Result<(), DomError> {
        self.node(node)
            .map(|_| ())
            .ok_or(DomError::UnknownNode(node))
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.ensure(parent)?;
        self.ensure(child)?;
        if self.contains(child, parent) {
            return Err(DomError::Cycle { node: child });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// True if `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Find an attached element by its `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.get(n).and_then(|el| el.id.as_deref()) == Some(id))
    }

    /// Attached elements whose attribute `attr` equals `value`, in document order.
    pub fn query_attr(&self, attr: &str, value: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.get(n).and_then(|el| el.get_attr(attr)) == Some(value))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Move focus to `node`. Returns true if focus changed.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if self.get(node).is_none() || self.active == Some(node) {
            return false;
        }
        log::debug!("[document] focus {node}");
        self.active = Some(node);
        true
    }

    /// Clear focus. Returns true if something was focused.
    pub fn blur(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Scroll `container` so that `item` is visible.
    pub fn scroll_into_view(&mut self, container: NodeId, item: NodeId) {
        self.scroll_targets.insert(container, item);
    }

    pub fn scroll_target(&self, container: NodeId) -> Option<NodeId> {
        self.scroll_targets.get(&container).copied()
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Fire a named notification. Listeners read it from the event log.
    pub fn dispatch(&mut self, target: EventTarget, name: impl Into<String>) {
        let name = name.into();
        log::debug!("[document] dispatch {name} on {target:?}");
        self.events.push(DispatchedEvent { target, name });
    }

    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut self.events)
    }
}
