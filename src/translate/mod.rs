//! Construct dispatch: one translation rule per declaration shape.
//!
//! Each recognized match is consumed immediately and becomes a fragment of
//! Mojo source text; fragments concatenate in source order.

pub mod enums;
pub mod functions;
pub mod heading;
pub mod structs;
pub mod typedefs;
pub mod unions;

use crate::recognize::{scan, Decl, Match};
use anyhow::Result;

/// Translate one recognized construct.
pub fn translate(m: &Match) -> Result<String> {
    let doc = m.doc.as_deref();
    Ok(match &m.decl {
        Decl::Heading { license, filedoc } => heading::translate(license, filedoc),
        Decl::Typedef { base, pointer, name, defines } => {
            typedefs::translate(doc, base, *pointer, name, defines)
        }
        Decl::Enum { name, body } => enums::translate(doc, name, body),
        Decl::Struct { name, body } => structs::translate_struct(doc, name, body)?,
        Decl::OpaqueStruct { name } => structs::translate_opaque(doc, name),
        Decl::PtrStruct { name } => structs::translate_ptr(doc, name),
        Decl::TypedefStruct { name, body } => {
            structs::translate_typedef_struct(doc, name, body)?
        }
        Decl::Union { name, body } => unions::translate(name, body),
        Decl::Function { ret, name, args, attrs } => {
            functions::translate(doc, ret, name, args, attrs)
        }
        Decl::FunctionTypedef { ret, pointer, name, args } => {
            functions::translate_typedef(doc, ret, *pointer, name, args)
        }
    })
}

/// Translate a whole header into one Mojo module body.
pub fn translate_header(source: &str) -> Result<String> {
    let mut out = String::new();
    for m in scan(source) {
        out.push_str(&translate(&m)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_keep_source_order() {
        let src = "typedef struct SDL_Camera SDL_Camera;\n\ntypedef struct SDL_GLContextState *SDL_GLContext;\n";
        let out = translate_header(src).unwrap();
        let camera = out.find("struct Camera").unwrap();
        let context = out.find("alias GLContext").unwrap();
        assert!(camera < context);
    }

    #[test]
    fn same_input_same_output() {
        let src = "typedef enum SDL_Scale\n{\n    SDL_SCALE_A = 1,\n    SDL_SCALE_B\n} SDL_Scale;\n";
        assert_eq!(translate_header(src).unwrap(), translate_header(src).unwrap());
    }
}
