use glam::Vec2;
use matstudio_common::{parse_hex, ColorParseError};

/// A handle referencing a texture uploaded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Surface-appearance description for the cube.
///
/// Texture slots stay `None` until the corresponding load completes; a
/// failed load leaves the slot unset for the process lifetime and the
/// renderer substitutes a neutral default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGB tint multiplied over the color map.
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// Strength of the normal map, per tangent-space axis.
    pub normal_scale: Vec2,
    pub color_map: Option<TextureId>,
    pub roughness_map: Option<TextureId>,
    pub normal_map: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            normal_scale: Vec2::ONE,
            color_map: None,
            roughness_map: None,
            normal_map: None,
        }
    }
}

impl Material {
    /// Apply a `#rrggbb` tint. Invalid input leaves the color unchanged.
    pub fn set_tint_hex(&mut self, hex: &str) -> Result<(), ColorParseError> {
        self.base_color = parse_hex(hex)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_untextured_white() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0]);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.normal_scale, Vec2::ONE);
        assert!(m.color_map.is_none());
        assert!(m.roughness_map.is_none());
        assert!(m.normal_map.is_none());
    }

    #[test]
    fn tint_from_valid_hex() {
        let mut m = Material::default();
        m.set_tint_hex("#ff0000").unwrap();
        assert_eq!(m.base_color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn invalid_hex_keeps_previous_tint() {
        let mut m = Material::default();
        m.set_tint_hex("#00ff00").unwrap();
        assert!(m.set_tint_hex("not-a-color").is_err());
        assert_eq!(m.base_color, [0.0, 1.0, 0.0]);
    }
}
