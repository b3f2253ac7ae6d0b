//! The fixed transforms of the scene.
//!
//! Matrices are written as row-major literals and fed to
//! [`Mat4::from_cols_array`], which reads them column by column, exactly like
//! a GL-style matrix constructor does. Every literal is therefore transposed
//! once more before it is used as a transform. Keep the products and
//! transposes below as they are: reordering them changes the result.

use glam::{Mat3, Mat4, Vec3};

pub const TILT_DEGREES: f64 = 45.;
pub const DIAGONAL_DEGREES: f64 = 90.;
pub const STRETCH: Vec3 = Vec3::new(1., 2., 1.);

/// Row-major literal of the rotation about X by `degrees`.
///
/// The angle is converted and the trigonometry evaluated in double precision
/// before narrowing to `f32`.
pub fn rotation_x_literal(degrees: f64) -> [f32; 16] {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin() as f32, radians.cos() as f32);

    #[rustfmt::skip]
    let literal = [
        1., 0.,   0.,   0.,
        0., cos,  -sin, 0.,
        0., sin,  cos,  0.,
        0., 0.,   0.,   1.,
    ];
    literal
}

/// `R(θ) = [[1, 0, 0], [0, cos θ, -sin θ], [0, sin θ, cos θ]]` in homogeneous
/// form, θ in degrees.
pub fn rotation_x(degrees: f64) -> Mat4 {
    Mat4::from_cols_array(&rotation_x_literal(degrees)).transpose()
}

pub fn scale_literal(scale: Vec3) -> [f32; 16] {
    #[rustfmt::skip]
    let literal = [
        scale.x, 0.,      0.,      0.,
        0.,      scale.y, 0.,      0.,
        0.,      0.,      scale.z, 0.,
        0.,      0.,      0.,      1.,
    ];
    literal
}

/// Change of basis that turns the X axis into the `(1, 0, 1)` diagonal.
pub fn change_of_basis_literal() -> [f32; 16] {
    let k = (1. / 2f64.sqrt()) as f32;

    #[rustfmt::skip]
    let literal = [
        k,  0., -k, 0.,
        0., 1., 0., 0.,
        k,  0., k,  0.,
        0., 0., 0., 1.,
    ];
    literal
}

/// Rotation by `degrees` about the diagonal axis, i.e. a rotation about X
/// conjugated by [`change_of_basis_literal`].
pub fn diagonal_rotation(degrees: f64) -> Mat4 {
    let basis = Mat4::from_cols_array(&change_of_basis_literal());
    let rotation = Mat4::from_cols_array(&rotation_x_literal(degrees));
    (basis.transpose() * rotation * basis).transpose()
}

/// World matrix of the object: scale first, then tilt about X, then rotate
/// about the diagonal axis.
pub fn compose_world_matrix(scale: Vec3, tilt_degrees: f64, diagonal_degrees: f64) -> Mat4 {
    let scale = Mat4::from_cols_array(&scale_literal(scale)).transpose();
    let tilt = rotation_x(tilt_degrees);
    let diagonal = diagonal_rotation(diagonal_degrees);

    diagonal * tilt * scale
}

/// `[[cos, 0, sin], [0, 1, 0], [-sin, 0, cos]]`, the per-frame orbit about
/// world Y.
#[inline]
pub fn orbit_matrix(radians: f32) -> Mat3 {
    Mat3::from_rotation_y(radians)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{Vec4, Vec4Swizzles};

    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vec4_approx_eq(a: Vec4, b: Vec4) -> bool {
        a.abs_diff_eq(b, EPSILON)
    }

    #[test]
    fn rotation_x_matches_the_textbook_form() {
        let m = rotation_x(90.);
        assert!(vec4_approx_eq(m.row(0), Vec4::new(1., 0., 0., 0.)));
        assert!(vec4_approx_eq(m.row(1), Vec4::new(0., 0., -1., 0.)));
        assert!(vec4_approx_eq(m.row(2), Vec4::new(0., 1., 0., 0.)));
        assert!(vec4_approx_eq(m.row(3), Vec4::W));

        // Y rotates onto Z.
        let p = m * Vec4::new(0., 1., 0., 1.);
        assert!(vec4_approx_eq(p, Vec4::new(0., 0., 1., 1.)));

        assert!(rotation_x(30.).abs_diff_eq(Mat4::from_rotation_x(30f32.to_radians()), EPSILON));
    }

    #[test]
    fn diagonal_rotation_keeps_its_axis() {
        let k = std::f32::consts::FRAC_1_SQRT_2;
        let axis = Vec4::new(k, 0., k, 0.);
        assert!(vec4_approx_eq(diagonal_rotation(90.) * axis, axis));

        // Y is perpendicular to the axis and ends up on the other side of it.
        let y = diagonal_rotation(90.) * Vec4::Y;
        assert!(vec4_approx_eq(y, Vec4::new(-k, 0., k, 0.)));
    }

    #[test]
    fn world_matrix_matches_reference() {
        let k = std::f32::consts::FRAC_1_SQRT_2;
        let world = compose_world_matrix(STRETCH, TILT_DEGREES, DIAGONAL_DEGREES);

        // Hand-computed: rotate(90°, diagonal) · rotate_x(45°) · scale(1, 2, 1).
        let rows = [
            Vec4::new(0.5, k - 1., 0.5 + 0.5 * k, 0.),
            Vec4::new(k, -1., -0.5, 0.),
            Vec4::new(0.5, 1. + k, 0.5 * k - 0.5, 0.),
            Vec4::W,
        ];
        for (i, row) in rows.into_iter().enumerate() {
            assert!(
                vec4_approx_eq(world.row(i), row),
                "row {i}: {} != {row}",
                world.row(i)
            );
        }
    }

    #[test]
    fn world_matrix_applies_scale_first() {
        let world = compose_world_matrix(STRETCH, TILT_DEGREES, DIAGONAL_DEGREES);
        let manual = diagonal_rotation(DIAGONAL_DEGREES)
            * rotation_x(TILT_DEGREES)
            * Mat4::from_scale(STRETCH);
        assert!(world.abs_diff_eq(manual, EPSILON));

        // A rigid transform would keep unit length; the stretch along Y must survive.
        let stretched = world * Vec4::Y;
        assert!((stretched.xyz().length() - 2.).abs() < EPSILON);
    }

    #[test]
    fn neutral_parameters_give_identity() {
        assert!(compose_world_matrix(Vec3::ONE, 0., 0.).abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }

    #[test]
    fn orbit_quarter_turn_moves_x_onto_negative_z() {
        let eye = orbit_matrix(FRAC_PI_2) * Vec3::new(60., 0., 0.);
        assert!(eye.abs_diff_eq(Vec3::new(0., 0., -60.), 1e-4));
    }
}
