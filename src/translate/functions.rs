//! Callable bindings for `extern` prototypes and function-pointer typedefs.
//!
//! Every wrapper resolves its native symbol through the shared dylib handle
//! at call time. Functions documented with the library's boolean or
//! pointer failure conventions are re-emitted as raising wrappers so the
//! sentinel never leaks past the boundary; the failure text comes from the
//! native `get_error()` accessor.

use crate::doc::{docstring_or_empty, format_docblock};
use crate::ident::{drop_prefix, snake_case};
use crate::types;
use regex::Regex;
use std::sync::LazyLock;

/// The mapped spelling of an immutable C string.
const STRING_PTR: &str = "Ptr[c_char, mut = False]";

// Rewrites the success/failure sentence once the section is renamed.
static RE_SUCCESS_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"True on success.*?false (.*)").unwrap());

/// One argument at the binding boundary: its native signature entry, the
/// exposed Mojo signature entry, and the call-site expression.
struct BoundArg {
    native: String,
    exposed: String,
    pass: String,
}

fn bind_arguments(raw: &str) -> Vec<BoundArg> {
    let mut bound = Vec::new();
    for piece in raw.split(',') {
        let piece = piece.trim();
        if piece.is_empty() || piece == "void" {
            continue;
        }
        match types::bind_variable(piece) {
            Some(var) => {
                let native = format!("{}: {}", var.name, var.ty);
                if var.ty == STRING_PTR {
                    // Owned text at the boundary; raw pointer only at the
                    // native call site.
                    bound.push(BoundArg {
                        exposed: format!("owned {}: String", var.name),
                        pass: format!("{}.unsafe_cstr_ptr()", var.name),
                        native,
                    });
                } else {
                    bound.push(BoundArg {
                        exposed: native.clone(),
                        pass: var.name,
                        native,
                    });
                }
            }
            None => bound.push(BoundArg {
                native: piece.to_string(),
                exposed: piece.to_string(),
                pass: piece.to_string(),
            }),
        }
    }
    bound
}

fn join(bound: &[BoundArg], pick: impl Fn(&BoundArg) -> String) -> String {
    bound.iter().map(pick).collect::<Vec<_>>().join(", ")
}

pub fn translate(doc: Option<&str>, ret: &str, name: &str, args: &str, attrs: &str) -> String {
    // Variadic prototypes have no portable binding; drop them.
    if attrs.contains("VARARG") {
        return String::new();
    }

    let formatted = doc.and_then(format_docblock);
    let mojo_name = snake_case(&drop_prefix(name));
    let native_ret = types::mojo_return_type(ret);
    let mojo_ret = if native_ret == STRING_PTR {
        "String".to_string()
    } else {
        native_ret.clone()
    };

    let bound = bind_arguments(args);
    let native_args = join(&bound, |a| a.native.clone());
    let mojo_args = join(&bound, |a| a.exposed.clone());
    let pass_args = join(&bound, |a| a.pass.clone());

    let mut call = format!(
        "_get_dylib_function[lib, \"{name}\", fn ({native_args}) -> {native_ret}]()({pass_args})"
    );
    if mojo_ret == "String" {
        call = format!("String(unsafe_from_utf8_ptr={call})");
    }

    let doc_text = formatted.as_deref().unwrap_or("");
    if doc_text.contains("Returns:\n        True on success") && mojo_ret == "Bool" {
        let raises_doc = doc_text.replace("Returns", "Raises");
        let raises_doc = RE_SUCCESS_CLAUSE.replace_all(&raises_doc, "Raises ${1}");
        return raising_wrapper(
            Some(raises_doc.into_owned()),
            name,
            &mojo_name,
            &mojo_args,
            "None",
            &call,
        );
    }
    if doc_text.contains("on failure;")
        && (mojo_ret.starts_with("Ptr") || mojo_ret.starts_with("String"))
    {
        return raising_wrapper(formatted, name, &mojo_name, &mojo_args, &mojo_ret, &call);
    }
    value_wrapper(formatted, name, &mojo_name, &mojo_args, &mojo_ret, &call)
}

/// Raising form: a falsy native result becomes an error carrying the
/// library's own last-error text. A non-`None` payload travels out through
/// an `out` parameter.
fn raising_wrapper(
    doc: Option<String>,
    native_name: &str,
    mojo_name: &str,
    args: &str,
    ret: &str,
    call: &str,
) -> String {
    let out_param = if ret == "None" {
        String::new()
    } else if args.is_empty() {
        format!("out ret: {ret}")
    } else {
        format!(", out ret: {ret}")
    };
    let doc = docstring_or_empty(doc, native_name, "    ");
    format!(
        "\nfn {mojo_name}({args}{out_param}) raises: \n    {doc}\n    ret = {call}\n    if not ret:\n        raise String(unsafe_from_utf8_ptr=get_error())\n\n"
    )
}

fn value_wrapper(
    doc: Option<String>,
    native_name: &str,
    mojo_name: &str,
    args: &str,
    ret: &str,
    call: &str,
) -> String {
    let doc = docstring_or_empty(doc, native_name, "    ");
    format!(
        "\nfn {mojo_name}({args}) -> {ret}: \n    {doc}\n    return {call}\n\n"
    )
}

/// A named callable-type alias for a function-pointer typedef.
pub fn translate_typedef(
    doc: Option<&str>,
    ret: &str,
    pointer: bool,
    name: &str,
    args: &str,
) -> String {
    let formatted = doc.and_then(format_docblock);
    let mojo_ret = types::mojo_return_type(ret);
    let mojo_args = types::mojo_arguments(args);
    let mut fn_type = format!("fn ({mojo_args}) -> {mojo_ret}");
    if pointer {
        fn_type = format!("Ptr[{fn_type}]");
    }
    let doc = docstring_or_empty(formatted, name, "");
    format!("\nalias {} = {}\n{}\n\n", drop_prefix(name), fn_type, doc)
}
