use std::num::NonZeroU64;

use bytemuck::Pod;

pub mod mesh;
pub mod program;
pub mod resource;
pub mod shader;

/// Plain data that can be copied into a GPU buffer as is.
///
/// Derive it with `#[derive(ShaderData)]` on `#[repr(C)]` structs whose
/// layout matches the WGSL declaration.
pub trait ShaderData: Sized + Pod {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    #[inline]
    fn min_binding_size() -> Option<NonZeroU64> {
        NonZeroU64::new(std::mem::size_of::<Self>() as u64)
    }
}
