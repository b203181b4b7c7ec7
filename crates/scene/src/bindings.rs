//! Panel bindings: the declared set of numeric controls over the scene.
//!
//! Each binding couples one widget to one field through a clamped setter,
//! so the clamp invariant holds no matter which widget (or test) writes.

use crate::Scene;
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

/// One numeric field on the scene that the panel exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Roughness,
    Metalness,
    NormalScaleX,
    NormalScaleY,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    KeyIntensity,
    FillIntensity,
    AmbientIntensity,
    RimIntensity,
    IntenseIntensity,
}

impl Binding {
    /// "Material Settings" section, minus the nested normal-scale pair.
    pub const MATERIAL: [Self; 2] = [Self::Roughness, Self::Metalness];

    /// "Normal Scale" subsection.
    pub const NORMAL_SCALE: [Self; 2] = [Self::NormalScaleX, Self::NormalScaleY];

    /// "Mesh Settings" section.
    pub const MESH: [Self; 6] = [
        Self::RotationX,
        Self::RotationY,
        Self::RotationZ,
        Self::ScaleX,
        Self::ScaleY,
        Self::ScaleZ,
    ];

    /// "Lighting Settings" section.
    pub const LIGHTING: [Self; 5] = [
        Self::KeyIntensity,
        Self::FillIntensity,
        Self::AmbientIntensity,
        Self::RimIntensity,
        Self::IntenseIntensity,
    ];

    /// Every binding, for exhaustive iteration in tests.
    pub const ALL: [Self; 15] = [
        Self::Roughness,
        Self::Metalness,
        Self::NormalScaleX,
        Self::NormalScaleY,
        Self::RotationX,
        Self::RotationY,
        Self::RotationZ,
        Self::ScaleX,
        Self::ScaleY,
        Self::ScaleZ,
        Self::KeyIntensity,
        Self::FillIntensity,
        Self::AmbientIntensity,
        Self::RimIntensity,
        Self::IntenseIntensity,
    ];

    /// Widget label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Roughness => "Roughness",
            Self::Metalness => "Metalness",
            Self::NormalScaleX => "X",
            Self::NormalScaleY => "Y",
            Self::RotationX => "Rotation X",
            Self::RotationY => "Rotation Y",
            Self::RotationZ => "Rotation Z",
            Self::ScaleX => "Scale X",
            Self::ScaleY => "Scale Y",
            Self::ScaleZ => "Scale Z",
            Self::KeyIntensity => "Key Light",
            Self::FillIntensity => "Fill Light",
            Self::AmbientIntensity => "Ambient Light",
            Self::RimIntensity => "Rim Light",
            Self::IntenseIntensity => "Intense Light",
        }
    }

    /// Allowed [min, max] for this control.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Self::Roughness | Self::Metalness => 0.0..=1.0,
            Self::NormalScaleX | Self::NormalScaleY => 0.0..=2.0,
            Self::RotationX | Self::RotationY | Self::RotationZ => 0.0..=TAU,
            Self::ScaleX | Self::ScaleY | Self::ScaleZ => 0.1..=3.0,
            Self::FillIntensity | Self::AmbientIntensity => 0.0..=2.0,
            Self::KeyIntensity | Self::RimIntensity | Self::IntenseIntensity => 0.0..=5.0,
        }
    }

    /// Slider increment.
    pub fn step(self) -> f64 {
        match self {
            Self::ScaleX
            | Self::ScaleY
            | Self::ScaleZ
            | Self::KeyIntensity
            | Self::FillIntensity
            | Self::AmbientIntensity
            | Self::RimIntensity
            | Self::IntenseIntensity => 0.1,
            _ => 0.01,
        }
    }

    /// Read the bound field.
    pub fn get(self, scene: &Scene) -> f32 {
        let m = &scene.cube.material;
        let t = &scene.cube.transform;
        match self {
            Self::Roughness => m.roughness,
            Self::Metalness => m.metalness,
            Self::NormalScaleX => m.normal_scale.x,
            Self::NormalScaleY => m.normal_scale.y,
            Self::RotationX => t.rotation.x,
            Self::RotationY => t.rotation.y,
            Self::RotationZ => t.rotation.z,
            Self::ScaleX => t.scale.x,
            Self::ScaleY => t.scale.y,
            Self::ScaleZ => t.scale.z,
            Self::KeyIntensity => scene.lights.key.intensity,
            Self::FillIntensity => scene.lights.fill.intensity,
            Self::AmbientIntensity => scene.lights.ambient.intensity,
            Self::RimIntensity => scene.lights.rim.intensity,
            Self::IntenseIntensity => scene.lights.intense.intensity,
        }
    }

    /// Write the bound field, clamped to `range()`.
    pub fn set(self, scene: &mut Scene, value: f32) {
        let range = self.range();
        let value = value.clamp(*range.start(), *range.end());
        let m = &mut scene.cube.material;
        let t = &mut scene.cube.transform;
        match self {
            Self::Roughness => m.roughness = value,
            Self::Metalness => m.metalness = value,
            Self::NormalScaleX => m.normal_scale.x = value,
            Self::NormalScaleY => m.normal_scale.y = value,
            Self::RotationX => t.rotation.x = value,
            Self::RotationY => t.rotation.y = value,
            Self::RotationZ => t.rotation.z = value,
            Self::ScaleX => t.scale.x = value,
            Self::ScaleY => t.scale.y = value,
            Self::ScaleZ => t.scale.z = value,
            Self::KeyIntensity => scene.lights.key.intensity = value,
            Self::FillIntensity => scene.lights.fill.intensity = value,
            Self::AmbientIntensity => scene.lights.ambient.intensity = value,
            Self::RimIntensity => scene.lights.rim.intensity = value,
            Self::IntenseIntensity => scene.lights.intense.intensity = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_binding_clamps_low_and_high() {
        for b in Binding::ALL {
            let mut scene = Scene::studio();
            let range = b.range();

            b.set(&mut scene, f32::NEG_INFINITY);
            assert_eq!(b.get(&scene), *range.start(), "{b:?} low clamp");

            b.set(&mut scene, 1e9);
            assert_eq!(b.get(&scene), *range.end(), "{b:?} high clamp");
        }
    }

    #[test]
    fn in_range_values_round_trip() {
        for b in Binding::ALL {
            let mut scene = Scene::studio();
            let range = b.range();
            let mid = (range.start() + range.end()) / 2.0;
            b.set(&mut scene, mid);
            assert_eq!(b.get(&scene), mid, "{b:?} round trip");
        }
    }

    #[test]
    fn ranges_are_well_formed() {
        for b in Binding::ALL {
            let range = b.range();
            assert!(range.start() < range.end(), "{b:?} range");
            assert!(b.step() > 0.0, "{b:?} step");
        }
    }

    #[test]
    fn sections_partition_all_bindings() {
        let mut grouped: Vec<Binding> = Vec::new();
        grouped.extend(Binding::MATERIAL);
        grouped.extend(Binding::NORMAL_SCALE);
        grouped.extend(Binding::MESH);
        grouped.extend(Binding::LIGHTING);
        assert_eq!(grouped.len(), Binding::ALL.len());
        for b in Binding::ALL {
            assert!(grouped.contains(&b), "{b:?} missing from sections");
        }
    }

    #[test]
    fn set_touches_only_its_field() {
        let mut scene = Scene::studio();
        let snapshot = scene;
        Binding::Roughness.set(&mut scene, 0.25);
        assert_eq!(scene.cube.material.roughness, 0.25);
        assert_eq!(scene.cube.transform, snapshot.cube.transform);
        assert_eq!(scene.lights, snapshot.lights);
    }

    #[test]
    fn rotation_max_is_full_turn() {
        assert_eq!(*Binding::RotationX.range().end(), TAU);
    }
}
