// Re-export glam for convenience
pub use glam::*;

// Pixlab math types
mod camera;
mod interval;
mod ray;
mod rotation;

pub use camera::{screen_coordinate, Arcball, Camera};
pub use interval::Interval;
pub use ray::Ray;
pub use rotation::{euler_degrees_from_normal, euler_rotation, orbit_direction};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat2_inverse_solves_edge_system() {
        let edges = Mat2::from_cols(Vec2::new(2.0, 0.0), Vec2::new(0.0, 4.0));
        let solved = edges.inverse() * Vec2::new(1.0, 1.0);
        assert_eq!(solved, Vec2::new(0.5, 0.25));
    }
}
