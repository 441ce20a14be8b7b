use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, LitStr, Type, parse_macro_input};

/// Derives `FormModel` for a struct with named fields, generating a
/// `<Model>Fields` accessor struct and one zero-sized lens per field.
///
/// A lens carries the field's display name, used when validation rules
/// phrase their messages. It defaults to the Rust identifier and can be
/// overridden per field:
///
/// ```ignore
/// #[derive(Clone, FormModel)]
/// struct Signup {
///     #[form(name = "firstName")]
///     first_name: SharedString,
/// }
/// ```
#[proc_macro_derive(FormModel, attributes(form))]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

struct FieldSpec {
    ident: Ident,
    ty: Type,
    display_name: String,
}

impl FieldSpec {
    fn parse(field: &Field) -> syn::Result<Option<Self>> {
        let Some(ident) = field.ident.clone() else {
            return Ok(None);
        };
        let display_name = display_name_attr(field)?.unwrap_or_else(|| ident.to_string());
        Ok(Some(Self {
            ident,
            ty: field.ty.clone(),
            display_name,
        }))
    }
}

fn display_name_attr(field: &Field) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("form") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported form attribute, expected `name`"))
            }
        })?;
    }
    Ok(name)
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "FormModel derive currently supports only non-generic structs",
        ));
    }

    let named_fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "FormModel derive requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "FormModel derive is only supported on structs",
            ));
        }
    };

    let mut specs = Vec::new();
    for field in named_fields {
        if let Some(spec) = FieldSpec::parse(field)? {
            specs.push(spec);
        }
    }

    let model_ident = &input.ident;
    let fields_struct_ident = format_ident!("{model_ident}Fields");
    let form_crate = form_crate_path();

    let mut lens_defs = Vec::new();
    let mut fields_methods = Vec::new();

    for spec in &specs {
        let FieldSpec {
            ident: field_ident,
            ty: field_ty,
            display_name,
        } = spec;
        let field_key = field_ident.to_string();
        let lens_ident = format_ident!("{model_ident}{}Lens", to_pascal_case(&field_key));

        lens_defs.push(quote! {
            #[derive(Clone, Copy, Debug, Default)]
            pub struct #lens_ident;

            impl #form_crate::form::FieldLens<#model_ident> for #lens_ident {
                type Value = #field_ty;

                fn key(self) -> #form_crate::form::FieldKey {
                    #form_crate::form::FieldKey::new(#field_key)
                }

                fn name(self) -> &'static str {
                    #display_name
                }

                fn get<'a>(self, model: &'a #model_ident) -> &'a Self::Value {
                    &model.#field_ident
                }

                fn set(self, model: &mut #model_ident, value: Self::Value) {
                    model.#field_ident = value;
                }
            }
        });

        fields_methods.push(quote! {
            pub const fn #field_ident(&self) -> #lens_ident {
                #lens_ident
            }
        });
    }

    Ok(quote! {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#fields_methods)*
        }

        impl #form_crate::form::FormModel for #model_ident {
            type Fields = #fields_struct_ident;

            fn fields() -> Self::Fields {
                #fields_struct_ident
            }
        }

        #(#lens_defs)*
    })
}

fn form_crate_path() -> TokenStream2 {
    match crate_name("contact_form") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::contact_form),
    }
}

fn to_pascal_case(input: &str) -> String {
    let mut out = String::new();
    for segment in input.split('_') {
        if segment.is_empty() {
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
