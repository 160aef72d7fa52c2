//! Flat scene graph backed by a slot map

use crate::foundation::math::{Pose, Vec3};
use crate::physics::Aabb;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a node attached to a scene graph
    pub struct NodeId;
}

/// Box-shaped visual node
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    /// Debug name ("Starship", "Obstacle", ...)
    pub name: String,
    /// World pose of the node
    pub pose: Pose,
    /// Full box size (width, height, depth) in local space
    pub size: Vec3,
    /// Linear RGB color
    pub color: [f32; 3],
}

impl VisualNode {
    /// Create a box node at the origin
    pub fn new_box(name: impl Into<String>, size: Vec3, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            pose: Pose::identity(),
            size,
            color,
        }
    }

    /// Builder pattern: Set pose
    pub const fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// World-space AABB of the box under its current pose
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_oriented_box(self.pose.position, self.size * 0.5, &self.pose.rotation)
    }
}

/// Container of visual nodes
///
/// Nodes are stored in a slot map so that a removed node's id can never be
/// confused with a later node.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, VisualNode>,
}

impl SceneGraph {
    /// Create a new empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a node and return its id
    pub fn add(&mut self, node: VisualNode) -> NodeId {
        let name = node.name.clone();
        let id = self.nodes.insert(node);
        log::trace!("Attached node {name} as {id:?}");
        id
    }

    /// Detach a node, returning it if it was attached
    pub fn remove(&mut self, id: NodeId) -> Option<VisualNode> {
        let node = self.nodes.remove(id);
        if let Some(node) = &node {
            log::trace!("Detached node {} ({id:?})", node.name);
        }
        node
    }

    /// Whether a node is attached
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up an attached node
    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    /// Move an attached node; returns `false` if the node is not attached
    pub fn set_pose(&mut self, id: NodeId, pose: Pose) -> bool {
        self.nodes.get_mut(id).map(|node| node.pose = pose).is_some()
    }

    /// World-space bounds of an attached node
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        self.nodes.get(id).map(VisualNode::world_bounds)
    }

    /// Iterate over attached nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &VisualNode)> {
        self.nodes.iter()
    }

    /// Number of attached nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_and_remove() {
        let mut scene = SceneGraph::new();
        let id = scene.add(VisualNode::new_box("Obstacle", Vec3::new(3.0, 8.0, 3.0), [0.53, 0.27, 0.13]));

        assert!(scene.contains(id));
        assert_eq!(scene.len(), 1);

        let removed = scene.remove(id).expect("node was attached");
        assert_eq!(removed.name, "Obstacle");
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_set_pose_moves_bounds() {
        let mut scene = SceneGraph::new();
        let id = scene.add(VisualNode::new_box("Starship", Vec3::new(1.0, 1.0, 3.0), [0.0, 1.0, 0.0]));

        assert!(scene.set_pose(id, Pose::from_position(Vec3::new(0.0, 0.5, 3.0))));
        let bounds = scene.world_bounds(id).unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(-0.5, 0.0, 1.5));
        assert_relative_eq!(bounds.max, Vec3::new(0.5, 1.0, 4.5));
    }

    #[test]
    fn test_rotated_node_bounds() {
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let node = VisualNode::new_box("Starship", Vec3::new(1.0, 1.0, 3.0), [0.0, 1.0, 0.0])
            .with_pose(Pose::from_position_rotation(Vec3::zeros(), yaw));

        assert_relative_eq!(node.world_bounds().size(), Vec3::new(3.0, 1.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_detached_node_cannot_move() {
        let mut scene = SceneGraph::new();
        let id = scene.add(VisualNode::new_box("Obstacle", Vec3::new(1.0, 1.0, 1.0), [1.0, 1.0, 1.0]));
        scene.remove(id);

        assert!(!scene.set_pose(id, Pose::identity()));
        assert!(scene.world_bounds(id).is_none());
    }
}
