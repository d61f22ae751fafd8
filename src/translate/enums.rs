//! Enum translation: a trivial wrapper struct with one alias per member.
//!
//! The auto-increment state lives in an [`EnumCounter`] constructed fresh for
//! every enum body, so translating two enums (or the same enum twice) can
//! never bleed values across calls.

use crate::doc::{docstring_or_empty, format_comment_block, format_docblock};
use crate::ident::drop_prefix;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// One member line: name, optional explicit value, optional trailing comment.
static RE_MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^    ([\w]+?)(?: *= (-?[\w]+?))?,?(?:\n|$| */\*(?:\*<)?(.*?)\*/)").unwrap()
});

// Comments left between members after member translation.
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms) */\*(?:([^\n]*)\*/\n|\*?(.*?)\*/)").unwrap());

// A conditional member pair: `#if cond` branch, `#else` branch.
static RE_IF_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^    #if ([^\n]+)\n((?:[^\n]+\n)+?)    #else\n((?:[^\n]+\n)+?)    #endif")
        .unwrap()
});

static RE_IF_MEMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+) = (\w+)").unwrap());

// Doxygen grouping markers carry no prose.
static RE_DOXY_MARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[{}]").unwrap());

/// Auto-increment state for one enum body. An explicit literal resets both
/// the next value and the base its successors print in.
struct EnumCounter {
    value: i64,
    hex: bool,
}

pub fn translate(doc: Option<&str>, name: &str, body: &str) -> String {
    let mut counter = EnumCounter { value: 0, hex: false };

    let body = RE_IF_BLOCK.replace_all(body, translate_conditional);
    let body = RE_MEMBER.replace_all(&body, |caps: &Captures| {
        translate_member(caps, &mut counter)
    });
    let body = RE_COMMENT.replace_all(&body, translate_comment);

    let doc = docstring_or_empty(doc.and_then(format_docblock), name, "    ");
    format!(
        "\n@register_passable(\"trivial\")\nstruct {}(Indexer, Intable):\n    {}\n    var value: UInt32\n\n    @always_inline\n    fn __init__(out self, value: Int):\n        self.value = value\n\n    @always_inline\n    fn __int__(self) -> Int:\n        return Int(self.value)\n    \n    @always_inline\n    fn __eq__(lhs, rhs: Self) -> Bool:\n        return lhs.value == rhs.value\n    \n    @always_inline(\"nodebug\")\n    fn __index__(self) -> __mlir_type.index:\n        return Int(self).value\n{}\n",
        drop_prefix(name),
        doc,
        body
    )
}

fn translate_member(caps: &Captures, counter: &mut EnumCounter) -> String {
    let mut name = caps[1].to_string();
    // A purely numeric member name is not a valid identifier downstream.
    if name.chars().all(|c| c.is_ascii_digit()) {
        name.insert(0, 'N');
    }

    let value = match caps.get(2) {
        Some(raw) => {
            let literal = raw.as_str().replace('u', "");
            match parse_int(&literal) {
                Some(parsed) => {
                    counter.value = parsed + 1;
                    counter.hex = literal.trim_start_matches('-').starts_with("0x")
                        || literal.trim_start_matches('-').starts_with("0X");
                    format!("Self({literal})")
                }
                // Not a literal: the value names another member.
                None => format!("Self.{}", raw.as_str()),
            }
        }
        None => {
            let rendered = if counter.hex {
                render_hex(counter.value)
            } else {
                counter.value.to_string()
            };
            counter.value += 1;
            format!("Self({rendered})")
        }
    };

    let line = drop_prefix(&format!("    alias {name} = {value}\n"));
    match caps.get(3).and_then(|d| format_docblock(d.as_str())) {
        Some(doc) => format!("{line}    \"\"\"{doc}\"\"\""),
        None => line,
    }
}

/// Paired `#if`/`#else` members select by a runtime endianness check.
fn translate_conditional(caps: &Captures) -> String {
    let cond = match &caps[1] {
        "SDL_BYTEORDER == SDL_BIG_ENDIAN" => "is_big_endian()",
        "SDL_BYTEORDER == SDL_LIL_ENDIAN" => "is_little_endian()",
        other => other,
    };
    let mut out = String::new();
    for (true_side, false_side) in RE_IF_MEMBER
        .captures_iter(&caps[2])
        .zip(RE_IF_MEMBER.captures_iter(&caps[3]))
    {
        out.push_str(&format!(
            "    alias {} = Self.{} if {} else Self.{}\n",
            &true_side[1], &false_side[2], cond, &true_side[2]
        ));
    }
    drop_prefix(&out)
}

fn translate_comment(caps: &Captures) -> String {
    if let Some(single) = caps.get(1) {
        if RE_DOXY_MARK.is_match(single.as_str()) {
            return String::new();
        }
        return match format_comment_block(single.as_str()) {
            Some(text) => format!("{text}\n"),
            None => String::new(),
        };
    }
    caps.get(2)
        .and_then(|m| format_comment_block(m.as_str()))
        .unwrap_or_default()
}

fn parse_int(literal: &str) -> Option<i64> {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}

fn render_hex(value: i64) -> String {
    if value < 0 {
        format!("-0x{:x}", -value)
    } else {
        format!("0x{:x}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_increment_follows_base() {
        let body = "    SDL_FOO = 1,\n    SDL_BAR,\n    SDL_BAZ = 0x10,\n    SDL_QUX";
        let out = translate(None, "SDL_Sample", body);
        assert!(out.contains("    alias FOO = Self(1)\n"), "got: {out}");
        assert!(out.contains("    alias BAR = Self(2)\n"), "got: {out}");
        assert!(out.contains("    alias BAZ = Self(0x10)\n"), "got: {out}");
        assert!(out.contains("    alias QUX = Self(0x11)\n"), "got: {out}");
    }

    #[test]
    fn counter_is_fresh_per_call() {
        let first = translate(None, "SDL_A", "    SDL_X = 0x10,\n    SDL_Y");
        assert!(first.contains("alias Y = Self(0x11)"));
        // A second enum starts over in decimal from zero.
        let second = translate(None, "SDL_B", "    SDL_P,\n    SDL_Q");
        assert!(second.contains("alias P = Self(0)"), "got: {second}");
        assert!(second.contains("alias Q = Self(1)"), "got: {second}");
    }

    #[test]
    fn negative_values() {
        let body = "    SDL_UNSET = -1,\n    SDL_FIRST";
        let out = translate(None, "SDL_Sample", body);
        assert!(out.contains("    alias UNSET = Self(-1)\n"), "got: {out}");
        assert!(out.contains("    alias FIRST = Self(0)\n"), "got: {out}");
    }

    #[test]
    fn member_alias_to_sibling() {
        let body = "    SDL_EVENT_QUIT = 0x100,\n    SDL_EVENT_FIRST = SDL_EVENT_QUIT,";
        let out = translate(None, "SDL_EventType", body);
        assert!(
            out.contains("    alias EVENT_FIRST = Self.EVENT_QUIT\n"),
            "got: {out}"
        );
    }

    #[test]
    fn numeric_member_name_prefixed() {
        let body = "    SDL_HAT_CENTERED = 0,\n    1024 = 1,";
        let out = translate(None, "SDL_Sample", body);
        assert!(out.contains("    alias N1024 = Self(1)\n"), "got: {out}");
    }

    #[test]
    fn member_doc_attached() {
        let body = "    SDL_SCALE_NEAREST = 1,  /**< nearest pixel sampling */\n    SDL_SCALE_LINEAR";
        let out = translate(None, "SDL_ScaleMode", body);
        assert!(
            out.contains("    alias SCALE_NEAREST = Self(1)\n    \"\"\"Nearest pixel sampling.\"\"\""),
            "got: {out}"
        );
        assert!(out.contains("    alias SCALE_LINEAR = Self(2)\n"), "got: {out}");
    }

    #[test]
    fn endianness_pair_selects_false_branch_when_true() {
        let body = "    #if SDL_BYTEORDER == SDL_BIG_ENDIAN\n    SDL_AUDIO_S16 = SDL_AUDIO_S16BE,\n    #else\n    SDL_AUDIO_S16 = SDL_AUDIO_S16LE,\n    #endif";
        let out = translate(None, "SDL_AudioFormat", body);
        assert!(
            out.contains("    alias AUDIO_S16 = Self.AUDIO_S16LE if is_big_endian() else Self.AUDIO_S16BE\n"),
            "got: {out}"
        );
    }

    #[test]
    fn stray_comment_becomes_hash_comment() {
        let body = "    /* padding for alignment */\n    SDL_FIRST = 1,";
        let out = translate(None, "SDL_Sample", body);
        assert!(out.contains("    # padding for alignment\n"), "got: {out}");
    }

    #[test]
    fn doxygen_group_markers_dropped() {
        let body = "    /* @{ */\n    SDL_FIRST = 1,\n    /* @} */\n";
        let out = translate(None, "SDL_Sample", body);
        assert!(!out.contains("@{"), "got: {out}");
        assert!(!out.contains('#'), "got: {out}");
    }

    #[test]
    fn wrapper_shape() {
        let out = translate(None, "SDL_Sample", "    SDL_ONLY");
        assert!(out.contains("struct Sample(Indexer, Intable):"));
        assert!(out.contains("fn __index__(self) -> __mlir_type.index:"));
    }
}
