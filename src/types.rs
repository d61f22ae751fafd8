//! C type spellings → Mojo type expressions.
//!
//! Type descriptors are recomputed from the raw spelling at every use site
//! (field, argument, return value); nothing here is cached between
//! declarations.

use crate::ident::{drop_prefix, snake_case};
use regex::Regex;
use std::sync::LazyLock;

// -- Declaration shapes -------------------------------------------------------

// Return position: `const char *`, `SDL_Window *`, `float`
static RE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(const )?(.+?) ?(\**)(?:\[(.*?)\])?$").unwrap());

// Variable position: `const char *title`, `float matrix[16]`
static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(const )?(.+) (\**)(\w+?)(?:\[(.*?)\])?$").unwrap());

// Function-pointer member: `void (SDLCALL *callback)(void *userdata)`
static RE_FN_POINTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?) \(SDLCALL \*(\w*)\)\((.*?)\)").unwrap());

/// A C type expression decomposed for mapping.
#[derive(Debug)]
pub struct CType {
    pub is_const: bool,
    pub base: String,
    pub ptrs: usize,
    /// Fixed-array extent, carried through unevaluated (may name a constant).
    pub array: Option<String>,
}

/// A translated variable declaration: Mojo name plus Mojo type text.
#[derive(Debug)]
pub struct Variable {
    pub name: String,
    pub ty: String,
}

// -- Primitive mapping --------------------------------------------------------

fn builtin_type(spelling: &str) -> Option<&'static str> {
    Some(match spelling {
        "void" => "NoneType",
        "SDL_FunctionPointer" => "fn () -> None",
        "SDL_Time" => "Int64",
        "intptr_t" => "Int",
        "char" => "c_char",
        "unsigned char" => "c_uint",
        "int" => "c_int",
        "unsigned int" => "c_uint",
        "short" => "c_short",
        "unsigned short" => "c_ushort",
        "long" => "c_long",
        "long long" => "c_long_long",
        "size_t" => "c_size_t",
        "ssize_t" => "c_ssize_t",
        "float" => "c_float",
        "double" => "c_double",
        "uint8_t" | "Uint8" => "UInt8",
        "uint16_t" | "Uint16" => "UInt16",
        "uint32_t" | "Uint32" => "UInt32",
        "uint64_t" | "Uint64" => "UInt64",
        "int8_t" | "Sint8" => "Int8",
        "int16_t" | "Sint16" => "Int16",
        "int32_t" | "Sint32" => "Int32",
        "int64_t" | "Sint64" => "Int64",
        "bool" => "Bool",
        _ => return None,
    })
}

/// Map a bare base spelling, passing unknown names through unchanged.
/// Unknown spellings are assumed to be other declarations in the binding set.
pub fn map_base(spelling: &str) -> String {
    match builtin_type(spelling) {
        Some(mapped) => mapped.to_string(),
        None => spelling.to_string(),
    }
}

// -- Parsing ------------------------------------------------------------------

fn ctype_from(is_const: bool, base: &str, ptrs: usize, array: Option<String>) -> CType {
    // Inner const qualifiers on multi-level pointers carry no information
    // the pointer wrapper can express; strip them before lookup.
    let base = base.replace(" *const", "").replace(" * const", "");
    CType { is_const, base, ptrs, array }
}

/// Parse a type spelling as it appears in return position.
pub fn parse_return(spelling: &str) -> Option<CType> {
    let caps = RE_RETURN.captures(spelling)?;
    Some(ctype_from(
        caps.get(1).is_some(),
        &caps[2],
        caps[3].len(),
        caps.get(4).map(|m| m.as_str().to_string()),
    ))
}

/// Parse a variable declaration (`type name` with optional stars and extent).
pub fn parse_variable(decl: &str) -> Option<(String, CType)> {
    let caps = RE_VARIABLE.captures(decl)?;
    let ty = ctype_from(
        caps.get(1).is_some(),
        &caps[2],
        caps[3].len(),
        caps.get(5).map(|m| m.as_str().to_string()),
    );
    Some((caps[4].to_string(), ty))
}

// -- Rendering ----------------------------------------------------------------

/// Render a parsed C type as a Mojo type expression.
pub fn mojo_type(ty: &CType) -> String {
    let mutability = if ty.is_const { "False" } else { "True" };
    let mut result = map_base(&ty.base);
    for _ in 0..ty.ptrs {
        result = format!("Ptr[{result}, mut = {mutability}]");
    }
    if let Some(extent) = &ty.array {
        result = format!("ArrayHelper[{result}, {extent}, mut = {mutability}].result");
    }
    drop_prefix(&result)
}

/// Render a return-position spelling; a bare `void` means no value.
pub fn mojo_return_type(spelling: &str) -> String {
    if spelling == "void" {
        return "None".to_string();
    }
    match parse_return(spelling) {
        Some(ty) => mojo_type(&ty),
        None => drop_prefix(spelling),
    }
}

/// Translate a variable declaration into its Mojo name and type.
pub fn bind_variable(decl: &str) -> Option<Variable> {
    let (name, ty) = parse_variable(decl)?;
    Some(Variable {
        name: snake_case(&drop_prefix(&name)),
        ty: mojo_type(&ty),
    })
}

/// Translate a variable declaration into `name: Type` form.
pub fn mojo_variable(decl: &str) -> Option<String> {
    bind_variable(decl).map(|v| format!("{}: {}", v.name, v.ty))
}

/// Translate a function-pointer member declaration into `name: fn (...) -> ret`.
pub fn mojo_function_pointer(decl: &str) -> Option<String> {
    let caps = RE_FN_POINTER.captures(decl)?;
    let ret = mojo_return_type(&caps[1]);
    let args = mojo_arguments(&caps[3]);
    Some(format!(
        "{}: fn ({}) -> {}",
        snake_case(&drop_prefix(&caps[2])),
        args,
        ret
    ))
}

/// Translate a comma-separated C argument list. A lone `void` means no
/// arguments; anything unparseable passes through verbatim.
pub fn mojo_arguments(raw: &str) -> String {
    raw.split(',')
        .filter_map(|arg| {
            let arg = arg.trim();
            if arg.is_empty() || arg == "void" {
                return None;
            }
            Some(mojo_variable(arg).unwrap_or_else(|| arg.to_string()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
