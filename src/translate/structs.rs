//! Struct translation: value types, opaque handles, pointer-only handles.

use crate::doc::{docstring_or_empty, format_docblock};
use crate::ident::drop_prefix;
use crate::special;
use crate::types;
use anyhow::{bail, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// One member declaration, with an optional doc comment before or after it.
static RE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^ */\*\*?\s*([\s\S]*?)\s*\*/\n)?    (.+?); *(?:/\*\*< ([\s\S]*?) \*/)?")
        .unwrap()
});

// Several names declared on one line share a type.
static RE_MULTI_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"    (.+?)((?: \*?\w+?,)+ \w+;)").unwrap());

static RE_MULTI_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" (\w+?)[,;]").unwrap());

// A nested anonymous struct or union opens a block the field splitter
// cannot decompose.
static RE_NESTED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(?:union|struct)\s*\{?\s*$").unwrap());

pub fn translate_struct(doc: Option<&str>, name: &str, body: &str) -> Result<String> {
    let formatted = doc.and_then(format_docblock);
    if let Some(text) = special::override_for(name, formatted.as_deref()) {
        return Ok(text);
    }
    if RE_NESTED_BLOCK.is_match(body) {
        bail!("cannot decompose nested members of {name}; add a special-case translation");
    }
    let body = RE_FIELD.replace_all(body, translate_field);
    Ok(value_struct(name, formatted, &body))
}

pub fn translate_typedef_struct(doc: Option<&str>, name: &str, body: &str) -> Result<String> {
    let formatted = doc.and_then(format_docblock);
    if let Some(text) = special::override_for(name, formatted.as_deref()) {
        return Ok(text);
    }
    if RE_NESTED_BLOCK.is_match(body) {
        bail!("cannot decompose nested members of {name}; add a special-case translation");
    }
    let body = RE_MULTI_FIELD.replace_all(body, split_multifield);
    let body = RE_FIELD.replace_all(&body, translate_field);
    let body = special::patch_fields(name, body.into_owned());
    Ok(value_struct(name, formatted, &body))
}

pub fn translate_opaque(doc: Option<&str>, name: &str) -> String {
    let doc = docstring_or_empty(doc.and_then(format_docblock), name, "    ");
    format!(
        "\n@fieldwise_init\nstruct {}(Copyable, Movable):\n    {}\n    pass\n",
        drop_prefix(name),
        doc
    )
}

pub fn translate_ptr(doc: Option<&str>, name: &str) -> String {
    let doc = docstring_or_empty(doc.and_then(format_docblock), name, "");
    format!("\nalias {} = Ptr[NoneType]\n{}\n", drop_prefix(name), doc)
}

fn value_struct(name: &str, formatted: Option<String>, body: &str) -> String {
    format!(
        "\n@fieldwise_init\nstruct {}(Copyable, Movable):\n    {}\n    \n{}\n",
        drop_prefix(name),
        docstring_or_empty(formatted, name, "    "),
        body
    )
}

fn translate_field(caps: &Captures) -> String {
    let field = &caps[2];
    let var = types::mojo_function_pointer(field)
        .or_else(|| types::mojo_variable(field))
        .unwrap_or_else(|| field.to_string());
    let doc = caps
        .get(1)
        .or_else(|| caps.get(3))
        .and_then(|d| format_docblock(d.as_str()));
    match doc {
        Some(doc) => format!("    var {var}\n    \"\"\"{doc}\"\"\""),
        None => format!("    var {var}"),
    }
}

fn split_multifield(caps: &Captures) -> String {
    let mut out = String::new();
    for name in RE_MULTI_NAME.captures_iter(&caps[2]) {
        out.push_str(&format!("    {} {};\n", &caps[1], &name[1]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_become_vars() {
        let out = translate_typedef_struct(None, "SDL_Point", "    int x;\n    int y;").unwrap();
        assert!(out.contains("struct Point(Copyable, Movable):"), "got: {out}");
        assert!(out.contains("    var x: c_int"), "got: {out}");
        assert!(out.contains("    var y: c_int"), "got: {out}");
    }

    #[test]
    fn multi_name_field_expanded() {
        let out = translate_typedef_struct(None, "SDL_FPoint", "    float x, y;").unwrap();
        assert!(out.contains("    var x: c_float"), "got: {out}");
        assert!(out.contains("    var y: c_float"), "got: {out}");
    }

    #[test]
    fn field_doc_before_declaration() {
        let body = "    /** the horizontal offset */\n    int x;";
        let out = translate_typedef_struct(None, "SDL_Point", body).unwrap();
        assert!(
            out.contains("    var x: c_int\n    \"\"\"The horizontal offset.\"\"\""),
            "got: {out}"
        );
    }

    #[test]
    fn field_doc_after_declaration() {
        let body = "    int x;  /**< the horizontal offset */";
        let out = translate_typedef_struct(None, "SDL_Point", body).unwrap();
        assert!(
            out.contains("    var x: c_int\n    \"\"\"The horizontal offset.\"\"\""),
            "got: {out}"
        );
    }

    #[test]
    fn function_pointer_field() {
        let body = "    void (SDLCALL *callback)(void *userdata);";
        let out = translate_typedef_struct(None, "SDL_Hook", body).unwrap();
        assert!(
            out.contains("    var callback: fn (userdata: Ptr[NoneType, mut = True]) -> None"),
            "got: {out}"
        );
    }

    #[test]
    fn nested_union_requires_override() {
        let body = "    int kind;\n    union\n    {\n        int button;\n    } value;";
        let err = translate_typedef_struct(None, "SDL_Unknown", body).unwrap_err();
        assert!(err.to_string().contains("SDL_Unknown"), "got: {err}");
    }

    #[test]
    fn gamepad_binding_uses_override() {
        let body = "    int input_type;\n    union\n    {\n        int button;\n    } input;";
        let out = translate_typedef_struct(None, "SDL_GamepadBinding", body).unwrap();
        assert!(out.contains("struct GamepadBinding(Copyable, Movable):"), "got: {out}");
        assert!(out.contains("struct GamepadBindingInputAxis"), "got: {out}");
    }

    #[test]
    fn storage_interface_copy_renamed() {
        let body = "    bool (SDLCALL *copy)(void *userdata);";
        let out = translate_typedef_struct(None, "SDL_StorageInterface", body).unwrap();
        assert!(out.contains("var copy_file: fn"), "got: {out}");
        assert!(!out.contains("var copy: fn"), "got: {out}");
    }

    #[test]
    fn opaque_struct_is_empty_type() {
        let out = translate_opaque(None, "SDL_Camera");
        assert_eq!(
            out,
            "\n@fieldwise_init\nstruct Camera(Copyable, Movable):\n    \n    pass\n"
        );
    }

    #[test]
    fn pointer_struct_is_alias() {
        let out = translate_ptr(None, "SDL_GLContext");
        assert_eq!(out, "\nalias GLContext = Ptr[NoneType]\n\n");
    }
}
