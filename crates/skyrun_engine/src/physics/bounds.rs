//! Axis-aligned bounding boxes

use crate::foundation::math::{Quat, Vec3};

/// Axis-aligned bounding box for broad overlap tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create an AABB centered at a point with a full size (width, height, depth)
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_extents(center, size * 0.5)
    }

    /// World-space AABB enclosing a box of `extents` rotated by `rotation`
    ///
    /// Each world half extent is the row of `|R|` dotted with the local half
    /// extents, which is exact for the box's eight corners.
    pub fn from_oriented_box(center: Vec3, extents: Vec3, rotation: &Quat) -> Self {
        let abs_rotation = rotation.to_rotation_matrix().matrix().abs();
        Self::from_center_extents(center, abs_rotation * extents)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Boxes that only touch along a face still count as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Smallest AABB enclosing both boxes
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn aabb(x: [f32; 2], y: [f32; 2], z: [f32; 2]) -> Aabb {
        Aabb::new(Vec3::new(x[0], y[0], z[0]), Vec3::new(x[1], y[1], z[1]))
    }

    #[test]
    fn test_overlapping_boxes() {
        let ship = aabb([-0.5, 0.5], [0.0, 1.0], [2.0, 4.0]);
        let tower = aabb([-1.5, 1.5], [0.0, 10.0], [3.0, 6.0]);

        assert!(ship.intersects(&tower));
        assert!(tower.intersects(&ship));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let ship = aabb([-0.5, 0.5], [0.0, 1.0], [2.0, 4.0]);
        let tower = aabb([-1.5, 1.5], [0.0, 10.0], [10.0, 13.0]);

        assert!(!ship.intersects(&tower));
        assert!(!tower.intersects(&ship));
    }

    #[test]
    fn test_touching_faces_intersect() {
        let a = aabb([0.0, 1.0], [0.0, 1.0], [0.0, 1.0]);
        let b = aabb([1.0, 2.0], [0.0, 1.0], [0.0, 1.0]);

        assert!(a.intersects(&b));
    }

    #[test]
    fn test_center_and_size() {
        let tower = Aabb::from_center_size(Vec3::new(2.0, 5.0, -15.0), Vec3::new(3.0, 10.0, 3.0));

        assert_relative_eq!(tower.min, Vec3::new(0.5, 0.0, -16.5));
        assert_relative_eq!(tower.max, Vec3::new(3.5, 10.0, -13.5));
        assert_relative_eq!(tower.center(), Vec3::new(2.0, 5.0, -15.0));
        assert_relative_eq!(tower.size(), Vec3::new(3.0, 10.0, 3.0));
        assert!(tower.contains_point(Vec3::new(2.0, 0.0, -15.0)));
    }

    #[test]
    fn test_oriented_box_identity_matches_axis_box() {
        let extents = Vec3::new(0.5, 0.5, 1.5);
        let oriented = Aabb::from_oriented_box(Vec3::zeros(), extents, &Quat::identity());

        assert_relative_eq!(oriented.min, -extents, epsilon = 1e-6);
        assert_relative_eq!(oriented.max, extents, epsilon = 1e-6);
    }

    #[test]
    fn test_oriented_box_quarter_turn_swaps_axes() {
        let extents = Vec3::new(0.5, 0.5, 1.5);
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let oriented = Aabb::from_oriented_box(Vec3::zeros(), extents, &yaw);

        assert_relative_eq!(oriented.extents(), Vec3::new(1.5, 0.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_oriented_box_grows_when_diagonal() {
        let extents = Vec3::new(0.5, 0.5, 1.5);
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_4);
        let oriented = Aabb::from_oriented_box(Vec3::zeros(), extents, &yaw);

        let expected = (0.5 + 1.5) * std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(oriented.extents().x, expected, epsilon = 1e-5);
        assert_relative_eq!(oriented.extents().z, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_union() {
        let a = aabb([0.0, 1.0], [0.0, 1.0], [0.0, 1.0]);
        let b = aabb([-2.0, 0.5], [0.5, 3.0], [0.2, 0.4]);

        let both = a.union(&b);
        assert_relative_eq!(both.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_relative_eq!(both.max, Vec3::new(1.0, 3.0, 1.0));
    }
}
