//! Procedural macros for the gourd server core.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Implements the plugin event payload plumbing for a struct.
///
/// The generated implementation names the event after the struct, so every
/// event type dispatches through its own handler list.
///
/// # Example
///
/// ```ignore
/// #[derive(Event, Clone)]
/// pub struct PlayerBedLeaveEvent {
///     pub player: Arc<Player>,
/// }
/// ```
#[proc_macro_derive(Event)]
pub fn event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    quote! {
        impl crate::plugin::Payload for #name {
            fn get_name_static() -> &'static str {
                stringify!(#name)
            }

            fn get_name(&self) -> &'static str {
                stringify!(#name)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any_arc(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<dyn ::std::any::Any + ::std::marker::Send + ::std::marker::Sync>
            {
                self
            }
        }
    }
    .into()
}

/// Marks an event struct as cancellable.
///
/// Appends a `pub cancelled: bool` field and implements the cancellation
/// accessors over it. Must be written above the `derive` attribute so the
/// derives see the added field.
///
/// # Example
///
/// ```ignore
/// #[cancellable]
/// #[derive(Event, Clone)]
/// pub struct PlayerBedEnterEvent { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn cancellable(_args: TokenStream, input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);
    let name = input.ident.clone();

    match &mut input.data {
        Data::Struct(data) => match &mut data.fields {
            Fields::Named(fields) => {
                let cancelled_field = syn::Field::parse_named
                    .parse2(quote! {
                        /// Whether the event is cancelled.
                        pub cancelled: bool
                    })
                    .expect("a static field definition always parses");
                fields.named.push(cancelled_field);
            }
            _ => {
                return syn::Error::new_spanned(
                    &name,
                    "cancellable only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&name, "cancellable can only be applied to structs")
                .to_compile_error()
                .into();
        }
    }

    quote! {
        #input

        impl crate::plugin::Cancellable for #name {
            fn cancelled(&self) -> bool {
                self.cancelled
            }

            fn set_cancelled(&mut self, cancelled: bool) {
                self.cancelled = cancelled;
            }
        }
    }
    .into()
}

/// Implements `BlockMetadata` for a block behaviour, registering it for
/// every block carrying the given tag.
///
/// # Example
///
/// ```ignore
/// #[gourd_block_from_tag("minecraft:beds")]
/// pub struct BedBlock;
/// ```
#[proc_macro_attribute]
pub fn gourd_block_from_tag(args: TokenStream, input: TokenStream) -> TokenStream {
    let tag = parse_macro_input!(args as LitStr);
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    quote! {
        #input

        impl crate::block::BlockMetadata for #name {
            fn ids() -> ::std::boxed::Box<[u16]> {
                match ::gourd_data::tag::block_ids(#tag) {
                    Some(ids) => ids.into(),
                    None => panic!("unknown block tag {}", #tag),
                }
            }
        }
    }
    .into()
}
