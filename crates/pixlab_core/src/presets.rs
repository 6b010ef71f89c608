//! Ready-made scenes for each lab.

use glam::{Vec2, Vec3, Vec4};
use rand::Rng;

use crate::primitives::{
    PlanarTransform, RotationAxis, TransformIcosphere, Triangle, Vertex,
};
use crate::ray_object::{Material, RaySceneObject};
use crate::scene::Scene;

/// Size of the region lab presets scatter primitives over.
pub const LAB_REGION: Vec2 = Vec2::new(256.0, 128.0);

const ICOSPHERE_SCALE: f32 = 25.0;

/// 60 white points at random integer pixels in the lab region.
pub fn lab02_points(scene: &mut Scene, rng: &mut impl Rng) {
    for _ in 0..60 {
        let x = rng.gen_range(0..LAB_REGION.x as i32);
        let y = rng.gen_range(0..LAB_REGION.y as i32);
        scene.add_point(Vertex::at(Vec3::new(x as f32, y as f32, 0.0)));
    }
}

/// Fan of ten grey triangles arranged as a cut gem.
pub fn lab03_triangles(scene: &mut Scene) {
    const GEM: [([f32; 6], u8); 10] = [
        ([128.0, 64.0, 160.0, 72.0, 128.0, 96.0], 173),
        ([128.0, 64.0, 128.0, 96.0, 96.0, 72.0], 137),
        ([128.0, 64.0, 96.0, 72.0, 108.0, 40.0], 90),
        ([128.0, 64.0, 108.0, 41.0, 148.0, 41.0], 108),
        ([128.0, 64.0, 148.0, 41.0, 160.0, 72.0], 137),
        ([160.0, 72.0, 148.0, 88.0, 128.0, 96.0], 156),
        ([128.0, 96.0, 108.0, 88.0, 96.0, 72.0], 77),
        ([96.0, 72.0, 96.0, 54.0, 108.0, 40.0], 77),
        ([108.0, 40.0, 128.0, 34.0, 148.0, 40.0], 77),
        ([148.0, 41.0, 160.0, 54.0, 160.0, 72.0], 118),
    ];

    for ([x0, y0, x1, y1, x2, y2], grey) in GEM {
        scene.add_triangle(Triangle::new(
            Vec3::new(x0, y0, 0.0),
            Vec3::new(x1, y1, 0.0),
            Vec3::new(x2, y2, 0.0),
            Vec3::splat(grey as f32 / 255.0),
        ));
    }
}

/// A single static icosphere in the middle of the lab region.
pub fn lab04_icosphere(scene: &mut Scene) {
    scene.add_icosphere(TransformIcosphere::new(PlanarTransform::new(
        Vec3::new(128.0, 64.0, 0.0),
        Vec3::splat(ICOSPHERE_SCALE),
    )));
}

/// Ten spinning, falling icospheres at random positions.
pub fn lab04_random_icospheres(scene: &mut Scene, rng: &mut impl Rng) {
    for _ in 0..10 {
        let translation = Vec3::new(
            rng.gen_range(0.0..=LAB_REGION.x),
            rng.gen_range(0.0..=LAB_REGION.y),
            0.0,
        );
        let axis = RotationAxis::ALL[rng.gen_range(0..RotationAxis::ALL.len())];

        scene.add_icosphere(TransformIcosphere::new(PlanarTransform {
            translation,
            rotation: Vec4::ZERO,
            scale: Vec3::splat(ICOSPHERE_SCALE),
            axis,
            auto_spin: true,
            auto_fall: true,
        }));
    }
}

/// Closed box of five planes around a sphere resting on the floor.
pub fn ray_tracer_room(scene: &mut Scene) {
    let grey = Vec3::splat(0.6);
    let red = Vec3::new(1.0, 0.2, 0.2);
    let blue = Vec3::new(0.1, 0.2, 0.8);

    let walls = [
        (Vec3::new(0.0, -2.0, 0.0), Vec3::Y, grey),
        (Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, grey),
        (Vec3::new(-2.0, 0.0, 0.0), Vec3::X, red),
        (Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_X, red),
        (Vec3::new(0.0, 0.0, -2.0), Vec3::Z, blue),
    ];

    for (position, normal, color) in walls {
        scene.add_ray_object(
            RaySceneObject::plane(position, normal, Vec2::splat(4.0))
                .with_material(Material::new(color)),
        );
    }

    scene.add_ray_object(
        RaySceneObject::sphere(Vec3::new(0.0, -1.0, 0.0), 1.0)
            .with_material(Material::new(Vec3::new(0.0, 1.0, 1.0))),
    );

    scene.light.ambient_intensity = 0.15;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray_object::RayShape;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lab02_points_in_region() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(2);
        lab02_points(&mut scene, &mut rng);

        assert_eq!(scene.points.len(), 60);
        for point in scene.points.values() {
            assert!(point.position.x >= 0.0 && point.position.x < 256.0);
            assert!(point.position.y >= 0.0 && point.position.y < 128.0);
            assert_eq!(point.position.x.fract(), 0.0);
            assert_eq!(point.color, Vec3::ONE);
        }
    }

    #[test]
    fn test_lab03_triangles_are_invertible() {
        let mut scene = Scene::new();
        lab03_triangles(&mut scene);

        assert_eq!(scene.triangles.len(), 10);
        for triangle in scene.triangles.values() {
            let centroid = triangle
                .vertices
                .iter()
                .map(|v| v.position.truncate())
                .sum::<Vec2>()
                / 3.0;
            assert!(triangle.barycentric(centroid).is_some());
        }
    }

    #[test]
    fn test_lab04_random_icospheres_animate() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(4);
        lab04_random_icospheres(&mut scene, &mut rng);

        assert_eq!(scene.icospheres.len(), 10);
        assert!(scene
            .icospheres
            .values()
            .all(|ico| ico.transform.auto_spin && ico.transform.auto_fall));
    }

    #[test]
    fn test_room_layout() {
        let mut scene = Scene::new();
        ray_tracer_room(&mut scene);

        let planes = scene
            .ray_objects
            .values()
            .filter(|obj| obj.shape == RayShape::Plane)
            .count();
        assert_eq!(planes, 5);
        assert_eq!(scene.ray_objects.len(), 6);
        assert_eq!(scene.light.ambient_intensity, 0.15);
    }
}
