//! # engine_math
//!
//! Math types for the engine. Re-exports [`glam`] for linear algebra and
//! defines the [`Transform`] component.

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{Mat4, Quat, Vec3};

pub use transform::Transform;
