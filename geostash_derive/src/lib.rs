//! Procedural macros shared by the geostash crates.
//!
//! The only macro is [`macro@context`], an attribute that attaches a formatted message to every
//! error returned from the annotated function:
//!
//! ```rust,ignore
//! #[context("reading shapefile '{}'", path.display())]
//! fn read(path: &Path) -> anyhow::Result<Vec<Record>> { ... }
//! ```
//!
//! The function must return `Result<_, anyhow::Error>` (or a type that `anyhow::Error` converts
//! into). Arguments referenced in the message are captured by reference unless the attribute
//! starts with `move,`.

mod args;

use crate::args::ContextArgs;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let ContextArgs {
		move_token,
		format_args,
	} = parse_macro_input!(args);
	let mut function = parse_macro_input!(input as syn::ItemFn);

	let body = &function.block;
	let output = &function.sig.output;
	let err = Ident::new("err", Span::mixed_site());

	let wrapped = if function.sig.asyncness.is_some() {
		let output = match output {
			syn::ReturnType::Default => {
				return syn::Error::new_spanned(function, "#[context] functions must return a Result")
					.to_compile_error()
					.into();
			}
			syn::ReturnType::Type(_, ty) => ty,
		};
		let result = Ident::new("result", Span::mixed_site());
		quote! {
			let #result: #output = async #move_token { #body }.await;
			#result.map_err(|#err| #err.context(format!(#format_args)).into())
		}
	} else {
		let once = Ident::new("once", Span::mixed_site());
		quote! {
			// Owning a non-`Copy` value makes the closure `FnOnce`, which keeps borrowck happy
			// when the body moves out of its captures.
			let #once = ::core::iter::empty::<()>();
			(#move_token || #output {
				::core::mem::drop(#once);
				#body
			})().map_err(|#err| #err.context(format!(#format_args)).into())
		}
	};
	function.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(wrapped), None)];

	function.into_token_stream().into()
}
