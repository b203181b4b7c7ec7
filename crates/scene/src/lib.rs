//! Live scene model for the matstudio viewer.
//!
//! The scene is plain mutable state owned by the main thread: panel
//! bindings write into it, the render loop reads it and advances the
//! spin, the renderer consumes it each draw.
//!
//! # Invariants
//! - Every numeric binding clamps writes to its declared [min, max].
//! - Fields are independent; no write touches another field.

pub mod bindings;
pub mod lights;
pub mod material;
pub mod node;

mod scene;

pub use bindings::Binding;
pub use lights::{Light, LightKind, LightRig};
pub use material::{Material, TextureId};
pub use node::{CubeNode, SPIN_STEP};
pub use scene::Scene;
