//! Identifier style conversion between SDL's CamelCase and Mojo snake_case.

/// Names whose case boundaries do not follow the usual camel-case rules,
/// or that would look wrong after a mechanical split.
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("UVplane", "UVPlane"),
    ("UVpitch", "UVPitch"),
    ("Yplane", "YPlane"),
    ("Ypitch", "YPitch"),
    ("VSync", "Vsync"),
    ("9Grid", "_9grid"),
];

/// Convert a CamelCase identifier to snake_case.
///
/// A word boundary falls between a lowercase letter or digit and an uppercase
/// letter, and between an uppercase run and its last member when the next
/// letter is lowercase (`GPUDevice` → `gpu_device`).
pub fn snake_case(name: &str) -> String {
    let mut name = name.to_string();
    for (from, to) in SPECIAL_CASES {
        if name.contains(from) {
            name = name.replace(from, to);
        }
    }

    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let after_word = (prev.is_ascii_lowercase() || prev.is_ascii_digit())
                && c.is_ascii_uppercase();
            let before_word = prev.is_ascii_uppercase()
                && c.is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if after_word || before_word {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Uppercase the first character, leaving the rest of the string untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Remove every `SDL_` prefix from a piece of text.
pub fn drop_prefix(s: &str) -> String {
    s.replace("SDL_", "")
}
