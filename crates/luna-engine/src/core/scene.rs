use glam::Mat4;

use crate::api::types::NodeId;
use crate::components::node::Node;

/// Node storage with parent/child links.
///
/// A flat Vec with linear lookup; the viewer holds a few dozen nodes.
/// Every node has at most one parent, and removing a node removes its
/// whole subtree. Ids are never reused, so a rebuilt subtree always has
/// fresh ids.
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    next_id: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(32),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// Add `node` under `parent` (or as a root) and return its id.
    pub fn insert(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let parent = match parent {
            Some(p) if self.contains(p) => Some(p),
            Some(p) => {
                log::warn!("parent {:?} not in scene, inserting {:?} as a root", p, id);
                None
            }
            None => None,
        };

        node.id = id;
        node.parent = parent;
        node.children.clear();
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.get_mut(p) {
                    parent_node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }

    /// Remove a node and all its descendants. Returns how many were removed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.get(id).map(|n| n.parent) else {
            return 0;
        };
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.get_mut(p) {
                    parent_node.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            if let Some(node) = self.get(doomed[i]) {
                doomed.extend_from_slice(&node.children);
            }
            i += 1;
        }
        let before = self.nodes.len();
        self.nodes.retain(|n| !doomed.contains(&n.id));
        before - self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Local matrices multiplied from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.get(id)?;
        let mut m = node.transform.matrix();
        while let Some(p) = node.parent {
            node = self.get(p)?;
            m = node.transform.matrix() * m;
        }
        Some(m)
    }

    /// Depth-first visit of every node with its world matrix, parents first.
    pub fn walk(&self, mut visit: impl FnMut(&Node, Mat4)) {
        for &root in &self.roots {
            self.walk_from(root, Mat4::IDENTITY, &mut visit);
        }
    }

    fn walk_from(&self, id: NodeId, parent: Mat4, visit: &mut impl FnMut(&Node, Mat4)) {
        let Some(node) = self.get(id) else { return };
        let world = parent * node.transform.matrix();
        visit(node, world);
        for &child in &node.children {
            self.walk_from(child, world, visit);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node. Ids keep counting up.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::{NodeKind, BodyKind};
    use glam::{Quat, Vec3};

    fn body() -> Node {
        Node::new(NodeKind::Body(BodyKind::Moon))
    }

    #[test]
    fn insert_links_parent_and_child() {
        let mut g = SceneGraph::new();
        let root = g.insert(None, Node::new(NodeKind::WorldRoot));
        let child = g.insert(Some(root), body());
        assert_eq!(g.children(root), &[child]);
        assert_eq!(g.get(child).and_then(|n| n.parent), Some(root));
        assert_eq!(g.roots(), &[root]);
    }

    #[test]
    fn missing_parent_becomes_root() {
        let mut g = SceneGraph::new();
        let id = g.insert(Some(NodeId(99)), body());
        assert_eq!(g.roots(), &[id]);
    }

    #[test]
    fn remove_takes_the_subtree() {
        let mut g = SceneGraph::new();
        let root = g.insert(None, Node::new(NodeKind::WorldRoot));
        let a = g.insert(Some(root), Node::new(NodeKind::OrbitPivot));
        let b = g.insert(Some(a), body());
        let _c = g.insert(Some(b), Node::new(NodeKind::Axis));
        let keep = g.insert(Some(root), Node::new(NodeKind::Starfield));

        assert_eq!(g.remove(a), 3);
        assert_eq!(g.len(), 2);
        assert!(!g.contains(b));
        assert_eq!(g.children(root), &[keep]);
        assert_eq!(g.remove(a), 0);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut g = SceneGraph::new();
        let a = g.insert(None, body());
        g.remove(a);
        let b = g.insert(None, body());
        assert_ne!(a, b);
        g.clear();
        let c = g.insert(None, body());
        assert!(c > b);
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut g = SceneGraph::new();
        let pivot = g.insert(
            None,
            Node::new(NodeKind::OrbitPivot).with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        );
        let moon = g.insert(Some(pivot), body().with_translation(Vec3::new(4.0, 0.0, 0.0)));
        let m = g.world_matrix(moon).unwrap();
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn walk_visits_parents_first() {
        let mut g = SceneGraph::new();
        let root = g.insert(None, Node::new(NodeKind::SceneRoot));
        let world = g.insert(Some(root), Node::new(NodeKind::WorldRoot));
        g.insert(Some(world), body());
        let mut order = Vec::new();
        g.walk(|n, _| order.push(n.kind));
        assert_eq!(
            order,
            vec![NodeKind::SceneRoot, NodeKind::WorldRoot, NodeKind::Body(BodyKind::Moon)]
        );
    }
}
