use glam::{EulerRot, Mat4, Quat, Vec3};

/// Spatial transform: position, per-axis Euler rotation (radians), scale.
///
/// Euler angles rather than a quaternion: the panel exposes one slider per
/// rotation axis and the spin step advances two axes independently, so the
/// axes must stay addressable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix for this transform (XYZ rotation order).
    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_applies_scale() {
        let t = Transform {
            scale: Vec3::new(2.0, 2.0, 2.0),
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::ONE);
        assert_eq!(p, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn matrix_is_finite_for_arbitrary_rotation() {
        let t = Transform {
            rotation: Vec3::new(1.3, -2.7, 0.4),
            ..Transform::default()
        };
        let m = t.matrix();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
