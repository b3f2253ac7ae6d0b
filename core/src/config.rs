use glam::{Mat4, Vec3};
use palette::Srgb;

use crate::{
    scene::entity::PerspectiveProjection,
    transform::{self, DIAGONAL_DEGREES, STRETCH, TILT_DEGREES},
};

/// Everything `Scene::setup` needs besides the GPU and the assets themselves.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub mesh: String,
    pub texture: String,

    pub camera_eye: Vec3,
    pub projection: PerspectiveProjection,
    pub light_position: Vec3,
    pub light_color: Srgb,
    pub clear_color: Srgb,

    pub world: WorldTransformConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vertex_shader: "vertex.wgsl".into(),
            fragment_shader: "fragment.wgsl".into(),
            mesh: "teapot.obj".into(),
            texture: "flower.ppm".into(),
            camera_eye: Vec3::new(60., 0., 0.),
            projection: PerspectiveProjection::default(),
            light_position: Vec3::new(100., 0., 0.),
            light_color: Srgb::new(1., 1., 1.),
            clear_color: Srgb::new(0.05, 0.05, 0.08),
            world: WorldTransformConfig::default(),
        }
    }
}

/// Parameters of the object's world matrix.
///
/// With `enabled == false` the object is drawn untransformed.
#[derive(Debug, Clone, Copy)]
pub struct WorldTransformConfig {
    pub enabled: bool,
    pub scale: Vec3,
    pub tilt_degrees: f64,
    pub diagonal_degrees: f64,
}

impl Default for WorldTransformConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: STRETCH,
            tilt_degrees: TILT_DEGREES,
            diagonal_degrees: DIAGONAL_DEGREES,
        }
    }
}

impl WorldTransformConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn compute_matrix(&self) -> Mat4 {
        if self.enabled {
            transform::compose_world_matrix(self.scale, self.tilt_degrees, self.diagonal_degrees)
        } else {
            Mat4::IDENTITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_fixed_rig() {
        let config = SceneConfig::default();
        assert_eq!(config.camera_eye, Vec3::new(60., 0., 0.));
        assert_eq!(config.light_position, Vec3::new(100., 0., 0.));
        assert_eq!(config.vertex_shader, "vertex.wgsl");
        assert_eq!(config.fragment_shader, "fragment.wgsl");
        assert!(config.world.enabled);
    }

    #[test]
    fn world_matrix_respects_the_enabled_flag() {
        let enabled = WorldTransformConfig::default();
        assert_eq!(
            enabled.compute_matrix(),
            transform::compose_world_matrix(STRETCH, TILT_DEGREES, DIAGONAL_DEGREES)
        );
        assert_eq!(WorldTransformConfig::disabled().compute_matrix(), Mat4::IDENTITY);
    }
}
