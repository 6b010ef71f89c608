// Rotation helpers shared by ray-traced planes and the orbiting light.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Direction a light orbits away from when its axis allows it.
const ORBIT_REFERENCE: Vec3 = Vec3::NEG_Z;

/// Replacement reference when the axis is close to [`ORBIT_REFERENCE`].
const ORBIT_FALLBACK: Vec3 = Vec3::X;

/// Build a rotation matrix from Euler angles in degrees.
///
/// X is applied first, then Y, then Z (`Rz * Ry * Rx`).
pub fn euler_rotation(degrees: Vec3) -> Mat4 {
    Mat4::from_rotation_z(degrees.z.to_radians())
        * Mat4::from_rotation_y(degrees.y.to_radians())
        * Mat4::from_rotation_x(degrees.x.to_radians())
}

/// Euler angles (degrees, same order as [`euler_rotation`]) that rotate +Y onto `normal`.
///
/// A zero-length normal yields no rotation.
pub fn euler_degrees_from_normal(normal: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let rotation = Quat::from_rotation_arc(Vec3::Y, normal);
    let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Rotate the orbit reference direction around `axis` by `angle` radians.
///
/// The reference is swapped for a perpendicular one when it is nearly
/// parallel to the axis, so the orbit never collapses to a point.
/// Returns `None` for a zero-length axis.
pub fn orbit_direction(axis: Vec3, angle: f32) -> Option<Vec3> {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return None;
    }

    let reference = if ORBIT_REFERENCE.dot(axis).abs() > 0.99 {
        ORBIT_FALLBACK
    } else {
        ORBIT_REFERENCE
    };

    Some(Quat::from_axis_angle(axis, angle) * reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_euler_rotation_identity() {
        let m = euler_rotation(Vec3::ZERO);
        assert_vec_close(m.transform_vector3(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn test_euler_rotation_applies_x_before_z() {
        // X by 90 takes +Y to +Z, then Z by 90 leaves +Z alone.
        let m = euler_rotation(Vec3::new(90.0, 0.0, 90.0));
        assert_vec_close(m.transform_vector3(Vec3::Y), Vec3::Z);

        // Z by 90 alone takes +Y to -X.
        let m = euler_rotation(Vec3::new(0.0, 0.0, 90.0));
        assert_vec_close(m.transform_vector3(Vec3::Y), Vec3::NEG_X);
    }

    #[test]
    fn test_normal_round_trip() {
        let normals = [
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::new(1.0, 1.0, 0.0).normalize(),
            Vec3::new(-0.3, 0.5, 0.8).normalize(),
        ];

        for normal in normals {
            let angles = euler_degrees_from_normal(normal);
            let rotated = euler_rotation(angles).transform_vector3(Vec3::Y);
            assert_vec_close(rotated, normal);
        }
    }

    #[test]
    fn test_zero_normal_has_no_rotation() {
        assert_eq!(euler_degrees_from_normal(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_orbit_direction_at_zero_angle() {
        let direction = orbit_direction(Vec3::Y, 0.0).unwrap();
        assert_vec_close(direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_orbit_direction_quarter_turn() {
        // Rotating -Z by +90 degrees about +Y gives -X.
        let direction = orbit_direction(Vec3::Y, std::f32::consts::FRAC_PI_2).unwrap();
        assert_vec_close(direction, Vec3::NEG_X);
    }

    #[test]
    fn test_orbit_direction_swaps_parallel_reference() {
        let direction = orbit_direction(Vec3::Z, 0.0).unwrap();
        assert_vec_close(direction, Vec3::X);
    }

    #[test]
    fn test_orbit_direction_zero_axis() {
        assert!(orbit_direction(Vec3::ZERO, 1.0).is_none());
    }
}
