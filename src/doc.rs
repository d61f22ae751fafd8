//! Structured C doc comments → Mojo docstrings.
//!
//! SDL documents declarations with `/** ... */` blocks carrying backslash
//! directives. `\param`, `\returns` and `\threadsafety` become Args /
//! Returns / Safety sections; every other directive is dropped with its
//! body. The free prose keeps its paragraph structure.

use crate::ident::{capitalize, snake_case};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Comment-continuation leaders: ` * ` at the start of each line.
static RE_LEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ *\* ?").unwrap());

// One tagged section: the directive line plus any continuation lines,
// which are recognized by their leading space.
static RE_CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\\(\w+) ([^\n]*\n?(?: [^\n]*\n)*)").unwrap());

// Continuation-line indentation inside a tag body.
static RE_TAG_CONT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n +").unwrap());

// Runs of blank lines.
static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n *\n *\n").unwrap());

/// Format a raw comment body into docstring prose, or `None` when there is
/// nothing to say.
pub fn format_docstring(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let stripped = RE_LEADER.replace_all(raw, "");

    let mut first_param = true;
    let translated = RE_CATEGORY.replace_all(&stripped, |caps: &Captures| {
        translate_category(caps, &mut first_param)
    });

    let escaped = translated.replace('\\', "\\\\");
    let collapsed = RE_BLANK_RUN.replace_all(escaped.trim(), "\n\n");
    if collapsed.is_empty() {
        return None;
    }

    // First sentence ends with a period, inserted before the first paragraph
    // break if the source forgot one.
    let mut text = collapsed.into_owned();
    let end = text.find("\n\n").unwrap_or(text.len());
    if end > 0 && !text[..end].ends_with('.') {
        text.insert(end, '.');
    }
    Some(capitalize(&text))
}

fn translate_category(caps: &Captures, first_param: &mut bool) -> String {
    let body = &caps[2];
    match &caps[1] {
        "param" => {
            let split = body.find(' ').unwrap_or(body.len());
            let name = snake_case(&body[..split]);
            let desc = capitalize(body[split..].trim_matches(' '));
            // Continuation lines align under the description column.
            let indent = format!("\n{}", " ".repeat(name.len() + 6));
            let desc = RE_TAG_CONT.replace_all(&desc, indent.as_str());
            let header = if *first_param { "Args:\n" } else { "" };
            *first_param = false;
            format!("{header}    {name}: {desc}")
        }
        "returns" => {
            let cap = capitalize(body);
            let desc = RE_TAG_CONT.replace_all(&cap, "\n    ");
            format!("\nReturns:\n    {desc}")
        }
        "threadsafety" => {
            let cap = capitalize(body);
            let desc = RE_TAG_CONT.replace_all(&cap, "\n    ");
            format!("Safety:\n    {desc}")
        }
        _ => String::new(),
    }
}

/// Docstring form for embedding at declaration indent: continuation lines
/// gain four spaces.
pub fn format_docblock(raw: &str) -> Option<String> {
    format_docstring(raw).map(|doc| doc.replace('\n', "\n    "))
}

/// Comment form for text that cannot live in a docstring: every line becomes
/// a `# ` comment at member indent.
pub fn format_comment_block(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let prose = RE_CATEGORY.replace_all(raw, "");
    let prose = prose.trim();
    if prose.is_empty() {
        return None;
    }
    Some(
        prose
            .lines()
            .map(|line| format!("    # {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Wrap formatted prose in a docstring with the upstream reference footer,
/// built from the declaration's original name.
pub fn doc_template(doc: &str, name: &str, ind: &str) -> String {
    format!("\"\"\"{doc}\n\n{ind}Docs: https://wiki.libsdl.org/SDL3/{name}.\n{ind}\"\"\"\n")
}

/// The docstring text for a declaration slot, or empty when the declaration
/// carries no comment (the block is omitted entirely, never left blank).
pub fn docstring_or_empty(doc: Option<String>, name: &str, ind: &str) -> String {
    match doc {
        Some(doc) => doc_template(&doc, name, ind),
        None => String::new(),
    }
}
