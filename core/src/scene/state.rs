use glam::Vec3;

use crate::{
    config::SceneConfig,
    scene::entity::{Camera, Light},
    transform, SceneError, SceneResult,
};

/// CPU side of the scene: the camera rig and the animation clock.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub light: Light,
    accumulated_time: f32,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: Camera {
                eye: config.camera_eye,
                projection: config.projection,
                ..Default::default()
            },
            light: Light {
                position: config.light_position,
                color: config.light_color,
            },
            accumulated_time: 0.,
        }
    }

    #[inline]
    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    /// Sets the camera aspect ratio from the viewport size in pixels.
    pub fn screen(&mut self, width: i32, height: i32) -> SceneResult<()> {
        if width <= 0 || height <= 0 {
            return Err(SceneError::InvalidViewport { width, height });
        }

        self.camera.projection.aspect_ratio = width as f32 / height as f32;
        Ok(())
    }

    /// One animation step.
    ///
    /// The eye orbits world Y by `delta` radians, the frame delta itself
    /// rather than the accumulated angle, so the trajectory depends on the
    /// frame rate. The bobbing offset reads the clock before it advances.
    pub fn advance(&mut self, delta: f32) {
        self.camera.eye = transform::orbit_matrix(delta) * self.camera.eye
            + Vec3::new(0., self.accumulated_time.sin() / 10., 0.);
        self.accumulated_time += delta;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const EPSILON: f32 = 1e-4;

    fn state() -> SceneState {
        SceneState::new(&SceneConfig::default())
    }

    #[test]
    fn screen_sets_aspect_ratio() {
        let mut state = state();
        for (w, h) in [(1920, 1080), (1, 1), (480, 800), (3, 7)] {
            state.screen(w, h).unwrap();
            assert!((state.camera.aspect() - w as f32 / h as f32).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn screen_rejects_degenerate_viewports() {
        let mut state = state();
        state.screen(800, 600).unwrap();

        for (w, h) in [(800, 0), (0, 600), (800, -1)] {
            match state.screen(w, h) {
                Err(SceneError::InvalidViewport { width, height }) => {
                    assert_eq!((width, height), (w, h))
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
        // Left untouched.
        assert!((state.camera.aspect() - 800. / 600.).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut state = state();
        for _ in 0..100 {
            state.advance(0.);
        }
        assert_eq!(state.camera.eye, Vec3::new(60., 0., 0.));
        assert_eq!(state.accumulated_time(), 0.);
    }

    #[test]
    fn first_quarter_turn_has_no_offset() {
        let mut state = state();
        state.advance(FRAC_PI_2);
        assert!(state.camera.eye.abs_diff_eq(Vec3::new(0., 0., -60.), EPSILON));
        assert!((state.accumulated_time() - FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn clock_accumulates_and_offset_uses_previous_time() {
        let mut state = state();
        let dt = 0.016;
        let steps = 120;

        for step in 1..=steps {
            let before = state.clone();
            state.advance(dt);

            let rotated = transform::orbit_matrix(dt) * before.camera.eye;
            let offset = state.camera.eye.y - rotated.y;
            let expected = ((step - 1) as f32 * dt).sin() / 10.;
            assert!((offset - expected).abs() < EPSILON, "step {step}");
        }

        assert!((state.accumulated_time() - steps as f32 * dt).abs() < EPSILON);
    }

    #[test]
    fn split_frames_diverge_from_one_long_frame() {
        // Two half steps and one full step reach different eyes once the
        // bobbing offset kicks in.
        let mut split = state();
        split.advance(0.5);
        split.advance(0.5);

        let mut single = state();
        single.advance(1.);

        assert!(!split.camera.eye.abs_diff_eq(single.camera.eye, EPSILON));
        assert!((split.accumulated_time() - single.accumulated_time()).abs() < EPSILON);
    }
}
