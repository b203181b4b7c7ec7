//! Shared types for the matstudio viewer.
//!
//! # Invariants
//! - Rotation is stored as per-axis Euler angles (radians) because every
//!   consumer binds or animates the axes independently.
//! - Colors are [0,1] floats per channel.

pub mod color;
pub mod types;

pub use color::{parse_hex, to_hex, ColorParseError};
pub use types::Transform;
