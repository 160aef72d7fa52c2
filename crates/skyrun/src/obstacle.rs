//! Static corridor obstacles

use crate::placement::ObstaclePlacement;
use skyrun_engine::foundation::math::{Pose, Vec3};
use skyrun_engine::physics::{Aabb, BodyDesc, BodyHandle, PhysicsWorld};
use skyrun_engine::scene::{NodeId, SceneGraph, VisualNode};

const TOWER_COLOR: [f32; 3] = [0.53, 0.27, 0.13];

/// Immovable box-shaped tower
#[derive(Debug)]
pub struct Obstacle {
    pose: Pose,
    size: Vec3,
    body: Option<BodyHandle>,
    node: Option<NodeId>,
    destroyed: bool,
}

impl Obstacle {
    /// Create a tower at `position` (its center) bound to a fixed body
    pub fn new(world: &mut dyn PhysicsWorld, position: Vec3, size: Vec3) -> Self {
        let body = world.create_body(BodyDesc::fixed().with_translation(position));
        Self {
            pose: Pose::from_position(position),
            size,
            body: Some(body),
            node: None,
            destroyed: false,
        }
    }

    /// Create a tower from a layout slot
    pub fn from_placement(world: &mut dyn PhysicsWorld, placement: &ObstaclePlacement) -> Self {
        Self::new(world, placement.position, placement.size)
    }

    /// Attach the tower's visual node to a scene graph
    pub fn attach_visual(&mut self, scene: &mut SceneGraph) -> Option<NodeId> {
        if self.destroyed {
            return None;
        }
        if let Some(old) = self.node.take() {
            scene.remove(old);
        }
        let id = scene.add(VisualNode::new_box("Obstacle", self.size, TOWER_COLOR).with_pose(self.pose));
        self.node = Some(id);
        Some(id)
    }

    /// World-space bounds of the tower
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pose.position, self.size)
    }

    /// Tower center
    pub const fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Tower size (width, height, depth)
    pub const fn size(&self) -> Vec3 {
        self.size
    }

    /// Fixed body binding, `None` after destruction
    pub const fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Visual node, `None` when detached
    pub const fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Whether the tower has been destroyed
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Release the body and detach the visual node; idempotent
    pub fn destroy(&mut self, world: &mut dyn PhysicsWorld, scene: &mut SceneGraph) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(body) = self.body.take() {
            if let Err(err) = world.remove_body(body) {
                log::warn!("remove_body failed for obstacle: {err}");
            }
        }
        if let Some(node) = self.node.take() {
            scene.remove(node);
        }
    }
}
