use crate::lights::LightRig;
use crate::node::CubeNode;

/// The live scene: one cube and the five-light studio rig.
///
/// Owned by the main thread. Panel bindings and the render loop mutate it
/// directly; the renderer reads it once per draw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scene {
    pub cube: CubeNode,
    pub lights: LightRig,
}

impl Scene {
    /// The startup scene: studio box plus studio rig.
    pub fn studio() -> Self {
        Self {
            cube: CubeNode::studio_box(),
            lights: LightRig::studio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_scene_composition() {
        let scene = Scene::studio();
        assert_eq!(scene.cube.dimensions.x, 3.0);
        assert_eq!(scene.lights.lights().len(), 5);
    }
}
