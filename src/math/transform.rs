use glam::{EulerRot, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Composes `child`, expressed in this transform's space, into the space
    /// this transform lives in. Scale is combined component-wise, so shear from
    /// non-uniform parent scale is not represented.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.position
    }

    /// Inverse of [`Transform::transform_point`]. Zero scale axes collapse to 0.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        let unrotated = self.rotation.inverse() * (point - self.position);
        unrotated * safe_recip(self.scale)
    }

    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }

    /// Heading around the world up axis, in radians.
    pub fn yaw(&self) -> f32 {
        yaw_of(self.rotation)
    }
}

/// Yaw component of `rotation` in Y-X-Z order (yaw, pitch, roll).
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    yaw
}

/// Returns `rotation` with its yaw swapped for `yaw`, keeping pitch and roll.
pub fn with_yaw(rotation: Quat, yaw: f32) -> Quat {
    let (_, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
}

fn safe_recip(scale: Vec3) -> Vec3 {
    Vec3::new(
        if scale.x != 0.0 { 1.0 / scale.x } else { 0.0 },
        if scale.y != 0.0 { 1.0 / scale.y } else { 0.0 },
        if scale.z != 0.0 { 1.0 / scale.z } else { 0.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn inverse_point_undoes_transform_point() {
        let t = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.3),
            Vec3::new(2.0, 1.0, 0.5),
        );
        let p = Vec3::new(-0.4, 5.0, 1.25);
        let back = t.inverse_transform_point(t.transform_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-4);
    }

    #[test]
    fn composed_child_lands_in_parent_frame() {
        let parent = Transform::from_position_rotation(Vec3::X, Quat::from_rotation_z(FRAC_PI_2));
        let child = Transform::from_position(Vec3::X);
        let world = parent.mul_transform(&child);
        assert_relative_eq!(world.position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(world.position.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn with_yaw_keeps_tilt() {
        let tilted = Quat::from_rotation_y(0.4) * Quat::from_rotation_x(0.25);
        let turned = with_yaw(tilted, -1.1);
        assert_relative_eq!(yaw_of(turned), -1.1, epsilon = 1e-4);
        let (_, pitch, _) = turned.to_euler(EulerRot::YXZ);
        assert_relative_eq!(pitch, 0.25, epsilon = 1e-4);
    }
}
