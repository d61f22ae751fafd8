//! Declaration recognition over raw header text.
//!
//! One linear scan, left to right, committing at most one construct per
//! position and skipping everything else silently. The rules are tried in a
//! fixed priority order at each line start; that order is part of the
//! contract, because several shapes are textual prefixes of others (an
//! opaque `typedef struct X X;` shares its prefix with a body-carrying
//! `typedef struct X {...} X;`). Name-equality constraints are explicit
//! post-match checks, and a failed check falls through to the next rule.

use regex::{Captures, Regex};
use std::sync::LazyLock;

// -- Shape patterns, in priority order ----------------------------------------

// License banner plus the `# CategoryX` file comment, file start only.
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A/\*\n(.*?)\n\*/\n.*?\n/\*\*\n \* # Category(.*?)\n \*/").unwrap()
});

// A structured doc comment; attaches to the construct that starts on the
// very next line.
static RE_DOC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*\n(.*?)\n \*/\n").unwrap());

// `typedef Uint32 SDL_Thing;` plus an optional contiguous `#define` run
// naming its value space.
static RE_TYPEDEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"typedef (\w+) (\*)?(\w+);\n*((?:#define[^\n]*\n)*)").unwrap());

static RE_ENUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)typedef enum (\w+?)\n\{\n(.*?)\n\} (\w+);").unwrap());

static RE_STRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)struct (\w+?)[\n| ]\{\n(.*?)\n\};").unwrap());

static RE_OPAQUE_STRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"typedef struct (\w+?) (\w+);").unwrap());

static RE_PTR_STRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"typedef struct (\w+) \*(\w+);").unwrap());

static RE_TYPEDEF_STRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)typedef struct (\w+?)[\n| ]\{\n(.+?)\n\} (\w+);").unwrap());

static RE_UNION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)typedef union (\w+?)\n\{\n(.+?)\n\} (\w+);").unwrap());

static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)extern SDL_DECLSPEC (.+?) SDLCALL (\w+?)\((.+?)\)( [^\n]*)?;").unwrap()
});

static RE_FN_TYPEDEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)typedef (?:const )?(.+?) ?(\*)?\(SDLCALL \*(\w+)\)\((.+?)\);").unwrap()
});

// -- Recognized declarations --------------------------------------------------

/// One recognized construct with its captured fields.
#[derive(Debug)]
pub enum Decl {
    Heading { license: String, filedoc: String },
    Typedef { base: String, pointer: bool, name: String, defines: String },
    Enum { name: String, body: String },
    Struct { name: String, body: String },
    OpaqueStruct { name: String },
    PtrStruct { name: String },
    TypedefStruct { name: String, body: String },
    Union { name: String, body: String },
    Function { ret: String, name: String, args: String, attrs: String },
    FunctionTypedef { ret: String, pointer: bool, name: String, args: String },
}

/// A committed match: the construct plus the doc comment immediately
/// preceding it, when there was one.
#[derive(Debug)]
pub struct Match {
    pub doc: Option<String>,
    pub decl: Decl,
}

// -- Scanning -----------------------------------------------------------------

/// Scan a whole header, producing every recognized construct in source order.
pub fn scan(source: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut pos = 0;

    if let Some(caps) = RE_HEADING.captures(source) {
        matches.push(Match {
            doc: None,
            decl: Decl::Heading {
                license: caps[1].to_string(),
                filedoc: caps[2].to_string(),
            },
        });
        pos = line_start_after(source, caps.get(0).map_or(0, |m| m.end()));
    }

    while pos < source.len() {
        // A doc comment binds only when a construct starts right behind it.
        if source[pos..].starts_with("/**\n") {
            if let Some(caps) = captures_at(&RE_DOC_COMMENT, source, pos) {
                let doc_end = caps.get(0).map_or(pos, |m| m.end());
                if let Some((decl, end)) = match_construct_at(source, doc_end) {
                    matches.push(Match {
                        doc: Some(caps[1].to_string()),
                        decl,
                    });
                    pos = line_start_after(source, end);
                    continue;
                }
            }
        }
        if let Some((decl, end)) = match_construct_at(source, pos) {
            matches.push(Match { doc: None, decl });
            pos = line_start_after(source, end);
        } else {
            pos = next_line(source, pos);
        }
    }
    matches
}

/// Try every construct rule at `pos`, in priority order.
fn match_construct_at(source: &str, pos: usize) -> Option<(Decl, usize)> {
    let rest = &source[pos..];

    if rest.starts_with("typedef ") {
        if let Some(caps) = captures_at(&RE_TYPEDEF, source, pos) {
            return Some((
                Decl::Typedef {
                    base: caps[1].to_string(),
                    pointer: caps.get(2).is_some(),
                    name: caps[3].to_string(),
                    defines: caps.get(4).map_or(String::new(), |m| m.as_str().to_string()),
                },
                end_of(&caps),
            ));
        }
        if let Some(caps) = captures_at(&RE_ENUM, source, pos) {
            if caps[1] == caps[3] {
                return Some((
                    Decl::Enum { name: caps[1].to_string(), body: caps[2].to_string() },
                    end_of(&caps),
                ));
            }
        }
        if let Some(caps) = captures_at(&RE_OPAQUE_STRUCT, source, pos) {
            if caps[1] == caps[2] {
                return Some((Decl::OpaqueStruct { name: caps[1].to_string() }, end_of(&caps)));
            }
        }
        if let Some(caps) = captures_at(&RE_PTR_STRUCT, source, pos) {
            return Some((Decl::PtrStruct { name: caps[2].to_string() }, end_of(&caps)));
        }
        if let Some(caps) = captures_at(&RE_TYPEDEF_STRUCT, source, pos) {
            if caps[1] == caps[3] {
                return Some((
                    Decl::TypedefStruct { name: caps[1].to_string(), body: caps[2].to_string() },
                    end_of(&caps),
                ));
            }
        }
        if let Some(caps) = captures_at(&RE_UNION, source, pos) {
            if caps[1] == caps[3] {
                return Some((
                    Decl::Union { name: caps[1].to_string(), body: caps[2].to_string() },
                    end_of(&caps),
                ));
            }
        }
        if let Some(caps) = captures_at(&RE_FN_TYPEDEF, source, pos) {
            return Some((
                Decl::FunctionTypedef {
                    ret: caps[1].to_string(),
                    pointer: caps.get(2).is_some(),
                    name: caps[3].to_string(),
                    args: caps[4].to_string(),
                },
                end_of(&caps),
            ));
        }
        return None;
    }

    if rest.starts_with("struct ") {
        if let Some(caps) = captures_at(&RE_STRUCT, source, pos) {
            let name = caps[1].to_string();
            let mut end = end_of(&caps);
            // Some headers forward-alias the struct behind an internal-only
            // guard; the marker belongs to the same construct.
            let marker =
                format!("\n#endif /* !SDL_INTERNAL */\n\ntypedef struct {name} {name};");
            if source[end..].starts_with(&marker) {
                end += marker.len();
            }
            return Some((Decl::Struct { name, body: caps[2].to_string() }, end));
        }
        return None;
    }

    if rest.starts_with("extern ") {
        if let Some(caps) = captures_at(&RE_FUNCTION, source, pos) {
            return Some((
                Decl::Function {
                    ret: caps[1].to_string(),
                    name: caps[2].to_string(),
                    args: caps[3].to_string(),
                    attrs: caps.get(4).map_or(String::new(), |m| m.as_str().to_string()),
                },
                end_of(&caps),
            ));
        }
    }
    None
}

/// Capture a pattern only when its match begins exactly at `pos`.
fn captures_at<'t>(re: &Regex, text: &'t str, pos: usize) -> Option<Captures<'t>> {
    re.captures_at(text, pos)
        .filter(|caps| caps.get(0).is_some_and(|m| m.start() == pos))
}

fn end_of(caps: &Captures) -> usize {
    caps.get(0).map_or(0, |m| m.end())
}

/// The scan cursor always sits at a line start.
fn line_start_after(source: &str, end: usize) -> usize {
    if end == 0 || source[..end].ends_with('\n') {
        end
    } else {
        next_line(source, end)
    }
}

fn next_line(source: &str, pos: usize) -> usize {
    match source[pos..].find('\n') {
        Some(offset) => pos + offset + 1,
        None => source.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_wins_over_body_struct() {
        let src = "typedef struct SDL_Camera SDL_Camera;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        assert!(matches!(&matches[0].decl, Decl::OpaqueStruct { name } if name == "SDL_Camera"));
    }

    #[test]
    fn mismatched_alias_is_skipped() {
        let src = "typedef struct SDL_Camera SDL_Video;\n";
        assert!(scan(src).is_empty());
    }

    #[test]
    fn pointer_struct_typedef() {
        let src = "typedef struct SDL_GLContextState *SDL_GLContext;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        assert!(matches!(&matches[0].decl, Decl::PtrStruct { name } if name == "SDL_GLContext"));
    }

    #[test]
    fn struct_with_body() {
        let src = "typedef struct SDL_Point\n{\n    int x;\n    int y;\n} SDL_Point;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        match &matches[0].decl {
            Decl::TypedefStruct { name, body } => {
                assert_eq!(name, "SDL_Point");
                assert_eq!(body, "    int x;\n    int y;");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn enum_requires_matching_tag() {
        let src = "typedef enum SDL_Scale\n{\n    SDL_SCALE_NONE\n} SDL_Scale;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        assert!(matches!(&matches[0].decl, Decl::Enum { name, .. } if name == "SDL_Scale"));
    }

    #[test]
    fn typedef_with_define_run() {
        let src = "typedef Uint32 SDL_InitFlags;\n\n#define SDL_INIT_AUDIO  0x00000010u\n#define SDL_INIT_VIDEO  0x00000020u\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        match &matches[0].decl {
            Decl::Typedef { base, pointer, name, defines } => {
                assert_eq!(base, "Uint32");
                assert!(!pointer);
                assert_eq!(name, "SDL_InitFlags");
                assert_eq!(defines.lines().count(), 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn doc_attaches_without_blank_line() {
        let src = "/**\n * A window.\n */\ntypedef struct SDL_Window SDL_Window;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].doc.as_deref(), Some(" * A window."));
    }

    #[test]
    fn doc_detaches_across_blank_line() {
        let src = "/**\n * Stray comment.\n */\n\ntypedef struct SDL_Window SDL_Window;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].doc.is_none());
    }

    #[test]
    fn function_prototype_with_attribute() {
        let src = "extern SDL_DECLSPEC void SDLCALL SDL_Log(const char *fmt, ...) SDL_PRINTF_VARARG_FUNC(1);\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        match &matches[0].decl {
            Decl::Function { name, attrs, .. } => {
                assert_eq!(name, "SDL_Log");
                assert!(attrs.contains("VARARG"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn multi_line_prototype() {
        let src = "extern SDL_DECLSPEC bool SDLCALL SDL_GetTextureSize(SDL_Texture *texture,\n    float *w, float *h);\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        match &matches[0].decl {
            Decl::Function { ret, name, args, attrs } => {
                assert_eq!(ret, "bool");
                assert_eq!(name, "SDL_GetTextureSize");
                assert!(args.contains("float *h"));
                assert!(attrs.is_empty());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn function_pointer_typedef() {
        let src = "typedef void (SDLCALL *SDL_AudioCallback)(void *userdata, int len);\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        match &matches[0].decl {
            Decl::FunctionTypedef { ret, pointer, name, args } => {
                assert_eq!(ret, "void");
                assert!(!pointer);
                assert_eq!(name, "SDL_AudioCallback");
                assert_eq!(args, "void *userdata, int len");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn plain_struct_with_internal_marker() {
        let src = "struct SDL_Finger\n{\n    float x;\n};\n#endif /* !SDL_INTERNAL */\n\ntypedef struct SDL_Finger SDL_Finger;\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1, "marker must be part of the struct match");
        assert!(matches!(&matches[0].decl, Decl::Struct { name, .. } if name == "SDL_Finger"));
    }

    #[test]
    fn unrecognized_text_skipped() {
        let src = "#include <SDL3/SDL_stdinc.h>\n\n// stray\nint not_a_decl;\n";
        assert!(scan(src).is_empty());
    }

    #[test]
    fn heading_only_at_file_start() {
        let src = "/*\n  Zlib license text\n*/\n\n#ifndef SDL_x_h_\n/**\n * # CategoryX\n *\n * Docs.\n */\n";
        let matches = scan(src);
        assert_eq!(matches.len(), 1);
        match &matches[0].decl {
            Decl::Heading { license, filedoc } => {
                assert_eq!(license, "  Zlib license text");
                assert!(filedoc.contains("Docs."));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
