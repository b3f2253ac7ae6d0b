use proc_macro2::TokenStream;
use syn::{Attribute, Data, DeriveInput};

fn is_repr_c(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("repr"))
        .any(|attr| {
            let mut repr_c = false;
            // `align(..)` and friends are not interesting here, stop at the first error.
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("C") {
                    repr_c = true;
                }
                Ok(())
            });
            repr_c
        })
}

pub fn expand_shader_data(input: DeriveInput) -> TokenStream {
    let ty = &input.ident;

    if !matches!(input.data, Data::Struct(_)) {
        return syn::Error::new_spanned(ty, "ShaderData can only be derived for structs")
            .to_compile_error();
    }

    if !is_repr_c(&input.attrs) {
        return syn::Error::new_spanned(ty, "ShaderData requires #[repr(C)]").to_compile_error();
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote::quote! {
        impl #impl_generics crate::render::ShaderData for #ty #ty_generics #where_clause {}
    }
}
