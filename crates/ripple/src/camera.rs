use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Quad extents in world units (a 16:9 panel centered on the origin).
pub const QUAD_WIDTH: f32 = 16.0;
pub const QUAD_HEIGHT: f32 = 9.0;

/// Vertical field of view in degrees.
const FOV_Y_DEGREES: f32 = 75.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;
/// Camera distance from the quad along +Z.
const CAMERA_DISTANCE: f32 = 4.0;

/// Perspective camera looking at the quad from a fixed position on the Z axis.
///
/// Only the aspect ratio changes at runtime (on resize); field of view,
/// clip planes, and position are startup constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCamera {
    position: Vec3,
    fov_y_radians: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl SurfaceCamera {
    /// Creates the camera for the given viewport aspect ratio.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            fov_y_radians: FOV_Y_DEGREES.to_radians(),
            aspect: aspect.max(f32::EPSILON),
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the projection aspect ratio. Idempotent.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(f32::EPSILON);
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Casts a ray from the camera through a normalized device coordinate.
    ///
    /// `ndc` uses the usual convention: (-1,-1) bottom-left, (1,1) top-right.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray {
            origin: self.position,
            direction: (far_point - self.position).normalize(),
        }
    }
}

/// A world-space ray used for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Model matrix for the quad under the given pitch/yaw rotation.
///
/// `rotation.x` is pitch (about X), `rotation.y` is yaw (about Y).
pub fn quad_model(rotation: Vec2) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, 0.0)
}

/// Intersects a ray against the rotated quad.
///
/// Returns the hit's surface UV in [0,1]² (u rightward, v upward), or `None`
/// when the ray is parallel to the quad, points away from it, or lands
/// outside its extents.
pub fn intersect_quad(ray: &Ray, rotation: Vec2) -> Option<Vec2> {
    let inverse = quad_model(rotation).inverse();
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    if direction.z.abs() <= f32::EPSILON {
        return None;
    }
    let t = -origin.z / direction.z;
    if t <= 0.0 {
        return None;
    }

    let hit = origin + direction * t;
    if hit.x.abs() > QUAD_WIDTH / 2.0 || hit.y.abs() > QUAD_HEIGHT / 2.0 {
        return None;
    }

    Some(Vec2::new(
        hit.x / QUAD_WIDTH + 0.5,
        hit.y / QUAD_HEIGHT + 0.5,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> SurfaceCamera {
        SurfaceCamera::new(16.0 / 9.0)
    }

    #[test]
    fn center_ray_hits_quad_center() {
        let ray = camera().ray_from_ndc(Vec2::ZERO);
        let uv = intersect_quad(&ray, Vec2::ZERO).expect("center ray should hit");
        assert!((uv.x - 0.5).abs() < 1e-5);
        assert!((uv.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn off_center_rays_land_on_the_matching_side() {
        let cam = camera();
        let right = intersect_quad(&cam.ray_from_ndc(Vec2::new(0.5, 0.0)), Vec2::ZERO)
            .expect("right ray should hit");
        assert!(right.x > 0.5);

        let upper = intersect_quad(&cam.ray_from_ndc(Vec2::new(0.0, 0.5)), Vec2::ZERO)
            .expect("upper ray should hit");
        assert!(upper.y > 0.5);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 4.0),
            direction: Vec3::Z,
        };
        assert_eq!(intersect_quad(&ray, Vec2::ZERO), None);
    }

    #[test]
    fn ray_passing_beside_the_quad_misses() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 4.0),
            direction: Vec3::new(0.999, 0.0, -0.04).normalize(),
        };
        assert_eq!(intersect_quad(&ray, Vec2::ZERO), None);
    }

    #[test]
    fn rotation_shifts_the_hit_point() {
        // Off-center ray; the center ray passes through the rotation pivot
        // and hits (0.5, 0.5) under any yaw.
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::new(0.4, 0.0));
        let straight = intersect_quad(&ray, Vec2::ZERO).unwrap();
        let tilted = intersect_quad(&ray, Vec2::new(0.0, 0.3)).unwrap();
        assert!((straight.x - tilted.x).abs() > 1e-4);
    }

    #[test]
    fn resize_only_changes_aspect() {
        let mut cam = camera();
        let before = cam.view();
        cam.set_aspect(1.0);
        assert_eq!(cam.aspect(), 1.0);
        assert_eq!(cam.view(), before);
    }
}
