//! 3D transform component.
//!
//! [`Transform`] holds position, rotation, and scale as three vectors.
//! Rotation is stored as Euler angles in radians and composed in a fixed
//! order: scale, then rotate about X, then Y, then Z, then translate.

use std::f32::consts::TAU;

use engine_component::Component;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A 3D transform representing position, per-axis rotation, and scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// Position (translation).
    pub position: Vec3,
    /// Rotation about the X, Y and Z axes, in radians.
    pub rotation: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a new transform with the given position and default rotation/scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a transform whose rotation is given in turns (1.0 = 360°).
    #[must_use]
    pub fn from_turns(position: Vec3, turns: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: turns * TAU,
            scale,
        }
    }

    /// The combined rotation, X applied first and Z last.
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_rotation_z(self.rotation.z)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_x(self.rotation.x)
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {
    fn type_name() -> &'static str {
        "Transform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::IDENTITY;
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_from_turns_converts_to_radians() {
        let t = Transform::from_turns(Vec3::ZERO, Vec3::new(0.5, 0.25, 0.0), Vec3::ONE);
        assert!((t.rotation.x - std::f32::consts::PI).abs() < 1e-6);
        assert!((t.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(t.rotation.z, 0.0);
    }

    #[test]
    fn test_matrix_scales_before_translating() {
        let t = Transform::from_turns(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, Vec3::splat(2.0));
        let p = t.to_matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-6));
    }

    #[test]
    fn test_matrix_rotates_x_before_z() {
        // Quarter turn about X maps +Y to +Z; a following quarter turn about Z
        // leaves +Z untouched.
        let t = Transform::from_turns(Vec3::ZERO, Vec3::new(0.25, 0.0, 0.25), Vec3::ONE);
        let p = t.to_matrix().transform_point3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_matrix_rotates_before_translating() {
        let t = Transform::from_turns(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 0.25), Vec3::ONE);
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 1.0, 5.0), 1e-5));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let json = serde_json::to_string(&t).unwrap();
        let restored: Transform = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }
}
