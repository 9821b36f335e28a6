mod error_kind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `ErrorKind` trait of `eqt-error` for the given struct.
///
/// The contents of the report are given by the `error` attribute:
/// ```ignore
/// use eqt_attrs::ErrorKind;
/// use eqt_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("the {} side of the equation is empty", self.side),
///     labels = ["add a term here"],
///     note = "every equation needs something on both sides of the `=` sign",
/// )]
/// pub struct EmptySide {
///     side: &'static str,
/// }
/// ```
///
/// | Tag       | Required | Value                                                         |
/// | --------- | -------- | ------------------------------------------------------------- |
/// | `message` | yes      | The headline of the report.                                   |
/// | `labels`  | no       | An array with one label per span of the error, in span order. |
/// | `help`    | no       | What the student can do to fix the problem.                   |
/// | `note`    | no       | Extra background shown below the help.                        |
///
/// Each value is an expression evaluated inside `build_report`, so it may read the fields of the
/// error through `self`. Anything implementing [`ToString`] is accepted. A label that renders to
/// an empty string marks its span without a message.
///
/// The generated code names the `ariadne` and `eqt_error` crates, so both must be dependencies of
/// the deriving crate, and the `ErrorKind` trait must be in scope.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_kind::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
