use glam::Vec4;
use palette::{LinSrgb, Srgb};
use wgpu::Color;

/// Conversions of authored sRGB colors into what the GPU expects.
pub trait SrgbExt {
    fn to_linear_vec4(self) -> Vec4;
    fn to_wgpu_color(self) -> Color;
}

impl SrgbExt for Srgb {
    fn to_linear_vec4(self) -> Vec4 {
        let linear: LinSrgb = self.into_linear();
        Vec4::new(linear.red, linear.green, linear.blue, 1.)
    }

    fn to_wgpu_color(self) -> Color {
        let linear = self.to_linear_vec4().as_dvec4();
        Color {
            r: linear.x,
            g: linear.y,
            b: linear.z,
            a: linear.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_survive_linearization() {
        assert_eq!(Srgb::new(1., 0., 1.).to_linear_vec4(), Vec4::new(1., 0., 1., 1.));
        assert_eq!(Srgb::new(0., 0., 0.).to_wgpu_color(), Color::BLACK);
    }
}
