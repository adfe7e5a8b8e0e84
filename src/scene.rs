//! Minimal scene graph handed to the renderer alongside the live camera.
//!
//! The rig only needs bounds (for framing); drawing is the renderer's
//! business. Node kinds are a closed enum, so "is this drawable?" is a
//! match rather than a property lookup.

use glam::{Mat4, Vec3};

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two opposite corners, in either order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, p| {
            acc.union(&Self::new(*p, *p))
        }))
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box centre.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the sphere through the corners, centred on [`center`](Self::center).
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }

    /// Axis-aligned box around this box after `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
        .map(|c| transform.transform_point3(c));
        // Non-empty array, so from_points always yields a box.
        Self::from_points(&corners).unwrap_or(*self)
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A scene-graph node.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// A single drawable mesh.
    Mesh {
        /// Debug name.
        name: String,
        /// Local-space bounds.
        bounds: Aabb,
    },
    /// One mesh drawn many times.
    InstancedMesh {
        /// Debug name.
        name: String,
        /// Local-space bounds of one instance.
        bounds: Aabb,
        /// Per-instance transforms.
        instances: Vec<Mat4>,
    },
    /// A transformed collection of children.
    Group {
        /// Debug name.
        name: String,
        /// Transform applied to every child.
        transform: Mat4,
        /// Child nodes.
        children: Vec<SceneNode>,
    },
}

impl SceneNode {
    /// A mesh node.
    #[must_use]
    pub fn mesh(name: impl Into<String>, bounds: Aabb) -> Self {
        Self::Mesh {
            name: name.into(),
            bounds,
        }
    }

    /// An untransformed group.
    #[must_use]
    pub fn group(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Group {
            name: name.into(),
            transform: Mat4::IDENTITY,
            children,
        }
    }

    /// Debug name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Mesh { name, .. }
            | Self::InstancedMesh { name, .. }
            | Self::Group { name, .. } => name,
        }
    }

    /// Whether this node draws geometry itself.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        matches!(self, Self::Mesh { .. } | Self::InstancedMesh { .. })
    }

    /// Number of draw items below (and including) this node; instanced
    /// meshes count once per instance.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        match self {
            Self::Mesh { .. } => 1,
            Self::InstancedMesh { instances, .. } => instances.len(),
            Self::Group { children, .. } => {
                children.iter().map(Self::draw_count).sum()
            }
        }
    }

    /// World-space bounds of everything drawable below this node, or
    /// `None` if nothing is.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.bounds_under(&Mat4::IDENTITY)
    }

    fn bounds_under(&self, parent: &Mat4) -> Option<Aabb> {
        match self {
            Self::Mesh { bounds, .. } => Some(bounds.transformed(parent)),
            Self::InstancedMesh {
                bounds, instances, ..
            } => instances
                .iter()
                .map(|instance| bounds.transformed(&(*parent * *instance)))
                .reduce(|a, b| a.union(&b)),
            Self::Group {
                transform,
                children,
                ..
            } => {
                let world = *parent * *transform;
                children
                    .iter()
                    .filter_map(|child| child.bounds_under(&world))
                    .reduce(|a, b| a.union(&b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn corners_may_come_in_any_order() {
        let aabb = Aabb::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn empty_points_have_no_bounds() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn group_transform_moves_child_bounds() {
        let scene = SceneNode::Group {
            name: "room".into(),
            transform: Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)),
            children: vec![SceneNode::mesh("table", unit_box())],
        };
        let bounds = scene.world_bounds().unwrap();
        assert!((bounds.center() - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn instanced_bounds_cover_every_instance() {
        let node = SceneNode::InstancedMesh {
            name: "chairs".into(),
            bounds: unit_box(),
            instances: vec![
                Mat4::from_translation(Vec3::new(-5.0, 0.0, 0.0)),
                Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)),
            ],
        };
        let bounds = node.world_bounds().unwrap();
        assert_eq!(bounds.min.x, -6.0);
        assert_eq!(bounds.max.x, 6.0);
        assert_eq!(node.draw_count(), 2);
    }

    #[test]
    fn empty_group_has_no_bounds() {
        let scene = SceneNode::group("empty", vec![SceneNode::group("inner", vec![])]);
        assert!(scene.world_bounds().is_none());
        assert!(!scene.is_drawable());
        assert_eq!(scene.draw_count(), 0);
    }

    #[test]
    fn rotation_grows_axis_aligned_bounds() {
        let rotated = unit_box().transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        assert!(rotated.max.x > 1.4);
        assert!((rotated.max.y - 1.0).abs() < 1e-6);
    }
}
