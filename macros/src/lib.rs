mod shader_data;

/// Marks a `#[repr(C)]` struct as plain data the renderer may copy into GPU
/// buffers verbatim.
#[proc_macro_derive(ShaderData)]
pub fn derive_shader_data(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    shader_data::expand_shader_data(syn::parse_macro_input!(input as syn::DeriveInput)).into()
}
