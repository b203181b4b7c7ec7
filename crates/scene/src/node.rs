use crate::material::Material;
use glam::Vec3;
use matstudio_common::Transform;

/// Per-frame rotation increment applied about X and Y, in radians.
pub const SPIN_STEP: f32 = 0.01;

/// The one drawable node in the scene: a box with a material.
///
/// Rotation and scale are panel-bound; `spin` additionally advances the
/// rotation each frame. Wraparound past 2π is not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeNode {
    pub transform: Transform,
    /// Box edge lengths, fixed at construction.
    pub dimensions: Vec3,
    pub material: Material,
}

impl CubeNode {
    /// The studio box: 3.0 × 1.8 × 2.0 at the origin.
    pub fn studio_box() -> Self {
        Self {
            transform: Transform::default(),
            dimensions: Vec3::new(3.0, 1.8, 2.0),
            material: Material::default(),
        }
    }

    /// Advance the idle spin by one frame: +0.01 rad about X and Y.
    pub fn spin(&mut self) {
        self.transform.rotation.x += SPIN_STEP;
        self.transform.rotation.y += SPIN_STEP;
    }
}

impl Default for CubeNode {
    fn default() -> Self {
        Self::studio_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_box_dimensions() {
        let cube = CubeNode::studio_box();
        assert_eq!(cube.dimensions, Vec3::new(3.0, 1.8, 2.0));
        assert_eq!(cube.transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn spin_advances_x_and_y_by_step() {
        let mut cube = CubeNode::studio_box();
        let before = cube.transform.rotation;
        cube.spin();
        assert!((cube.transform.rotation.x - before.x - SPIN_STEP).abs() < 1e-7);
        assert!((cube.transform.rotation.y - before.y - SPIN_STEP).abs() < 1e-7);
        assert_eq!(cube.transform.rotation.z, before.z);
    }

    #[test]
    fn spin_accumulates_over_many_frames() {
        let mut cube = CubeNode::studio_box();
        let mut expected = 0.0f32;
        for _ in 0..1000 {
            cube.spin();
            expected += SPIN_STEP;
        }
        // Same f32 accumulation sequence as the loop itself.
        assert_eq!(cube.transform.rotation.x, expected);
        assert_eq!(cube.transform.rotation.y, expected);
    }

    #[test]
    fn spin_does_not_touch_scale() {
        let mut cube = CubeNode::studio_box();
        cube.transform.scale = Vec3::new(2.0, 0.5, 1.5);
        cube.spin();
        assert_eq!(cube.transform.scale, Vec3::new(2.0, 0.5, 1.5));
    }
}
