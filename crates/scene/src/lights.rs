use glam::Vec3;

/// The kind of a light, with kind-specific data inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Parallel light shining from `position` toward the origin.
    Directional,
    /// Sky/ground gradient light; `ground` is the color from below.
    Hemisphere { ground: [f32; 3] },
    /// Uniform light with no direction.
    Ambient,
    /// Omnidirectional light at `position`.
    Point,
}

/// One light in the rig. Only `intensity` is panel-bound; color and
/// placement are fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub position: Vec3,
    pub intensity: f32,
}

/// The five-light studio rig: two directionals, hemisphere fill, ambient,
/// and a point rim light. Lights are independent of one another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub key: Light,
    pub fill: Light,
    pub ambient: Light,
    pub rim: Light,
    pub intense: Light,
}

impl LightRig {
    /// The studio placement: a white key from the upper right, a soft
    /// hemisphere fill, dim ambient, a rim point behind, and a second
    /// high-intensity directional from the left.
    pub fn studio() -> Self {
        Self {
            key: Light {
                kind: LightKind::Directional,
                color: [1.0, 1.0, 1.0],
                position: Vec3::new(5.0, 5.0, 5.0),
                intensity: 1.0,
            },
            fill: Light {
                kind: LightKind::Hemisphere {
                    ground: [0x44 as f32 / 255.0; 3],
                },
                color: [1.0, 1.0, 1.0],
                position: Vec3::ZERO,
                intensity: 0.5,
            },
            ambient: Light {
                kind: LightKind::Ambient,
                color: [0x40 as f32 / 255.0; 3],
                position: Vec3::ZERO,
                intensity: 0.5,
            },
            rim: Light {
                kind: LightKind::Point,
                color: [1.0, 1.0, 1.0],
                position: Vec3::new(-5.0, 3.0, -5.0),
                intensity: 1.0,
            },
            intense: Light {
                kind: LightKind::Directional,
                color: [1.0, 1.0, 1.0],
                position: Vec3::new(-3.0, 4.0, 2.0),
                intensity: 2.5,
            },
        }
    }

    /// All five lights in panel order.
    pub fn lights(&self) -> [&Light; 5] {
        [&self.key, &self.fill, &self.ambient, &self.rim, &self.intense]
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::studio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_rig_matches_placement() {
        let rig = LightRig::studio();
        assert_eq!(rig.key.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(rig.key.intensity, 1.0);
        assert_eq!(rig.rim.position, Vec3::new(-5.0, 3.0, -5.0));
        assert_eq!(rig.intense.intensity, 2.5);
        assert!(matches!(rig.fill.kind, LightKind::Hemisphere { .. }));
        assert!(matches!(rig.ambient.kind, LightKind::Ambient));
        assert!(matches!(rig.rim.kind, LightKind::Point));
    }

    #[test]
    fn intensities_are_independent() {
        let mut rig = LightRig::studio();
        rig.key.intensity = 4.0;
        assert_eq!(rig.fill.intensity, 0.5);
        assert_eq!(rig.ambient.intensity, 0.5);
        assert_eq!(rig.rim.intensity, 1.0);
        assert_eq!(rig.intense.intensity, 2.5);
    }

    #[test]
    fn lights_returns_panel_order() {
        let rig = LightRig::studio();
        let all = rig.lights();
        assert_eq!(all.len(), 5);
        assert!(matches!(all[0].kind, LightKind::Directional));
        assert!(matches!(all[4].kind, LightKind::Directional));
    }
}
