//! wgpu render backend for the matstudio viewer.
//!
//! Renders the single textured cube lit by the five-light rig. Unset
//! texture slots fall back to neutral 1x1 defaults so a frame drawn
//! before the loads finish is well-defined.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Camera damping advances only in `OrbitCamera::update`, once per frame.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::CubeRenderer;
