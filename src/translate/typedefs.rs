//! Primitive typedefs and their trailing macro-constant groups.
//!
//! `typedef Uint32 SDL_InitFlags;` plus a `#define` run becomes a trivial
//! wrapper struct over the mapped primitive: one `alias` per parameter-less
//! define, one static method per parameterized define. A pointer typedef
//! collapses to an opaque pointer alias.

use crate::doc::{docstring_or_empty, format_docblock};
use crate::ident::drop_prefix;
use crate::types::map_base;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// One `#define`, optionally parameterized, optionally documented.
static RE_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#define (\w+)(?:\(([^\n]+?)\))??  *(.+?) *(?:/\*\*< (.*?) \*/)?\n").unwrap()
});

static RE_UINT64_WRAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SDL_UINT64_C\((\w*)\)").unwrap());

static RE_INT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(0x[0-9A-Fa-f]+|\d+)u\b").unwrap());

static RE_SDL_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bSDL(\w*)\b").unwrap());

pub fn translate(
    doc: Option<&str>,
    base: &str,
    pointer: bool,
    name: &str,
    defines: &str,
) -> String {
    let formatted = doc.and_then(format_docblock);
    let mojo_name = drop_prefix(name);

    if pointer {
        let doc = docstring_or_empty(formatted, name, "");
        return format!("alias {mojo_name} = Ptr[NoneType]\n{doc}");
    }

    let ty = map_base(base);
    let defs = RE_DEFINE.replace_all(defines, |caps: &Captures| translate_define(caps, &ty));
    let doc = docstring_or_empty(formatted, name, "    ");
    format!(
        "\n@register_passable(\"trivial\")\nstruct {mojo_name}(Intable):\n    {doc}\n    var value: {ty}\n\n    @always_inline\n    fn __init__(out self, value: {ty}):\n        self.value = value\n\n    @always_inline\n    fn __int__(self) -> Int:\n        return Int(self.value)\n\n    @always_inline\n    fn __or__(lhs, rhs: Self) -> Self:\n        return Self(lhs.value | rhs.value)\n\n{defs}\n"
    )
}

fn translate_define(caps: &Captures, ty: &str) -> String {
    let name = drop_prefix(&caps[1]);
    let expr = RE_UINT64_WRAP.replace_all(&caps[3], "$1");
    let expr = RE_INT_SUFFIX.replace_all(&expr, "$1");
    let expr = strip_outer_parens(&expr);
    let expr = RE_SDL_IDENT.replace_all(expr, "Self.SDL${1}.value");
    let expr = drop_prefix(&expr);

    if let Some(params) = caps.get(2) {
        let params = params.as_str();
        return format!(
            "\n    @always_inline\n    @staticmethod\n    fn {name}({params}: {ty}) -> {ty}:\n        return {expr}\n\n"
        );
    }
    match caps.get(4).and_then(|d| format_docblock(d.as_str())) {
        Some(doc) => format!("    alias {name} = Self({expr})\n    \"\"\"{doc}\"\"\"\n"),
        None => format!("    alias {name} = Self({expr})\n"),
    }
}

/// Drop a fully enclosing parenthesis pair (repeatedly), leaving partial
/// grouping intact.
fn strip_outer_parens(expr: &str) -> &str {
    let mut expr = expr;
    while wraps_whole(expr) {
        expr = &expr[1..expr.len() - 1];
    }
    expr
}

fn wraps_whole(expr: &str) -> bool {
    if !(expr.starts_with('(') && expr.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in expr.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == expr.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
