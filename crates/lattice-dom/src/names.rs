//! Custom tag name validation

/// Names the platform reserves and refuses to define
const RESERVED: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Validate a custom element tag name.
///
/// Must contain a hyphen, start with a lowercase ASCII letter, stay within
/// the name character set, and not collide with a reserved name.
pub fn is_valid_custom_name(name: &str) -> bool {
    if !name.contains('-') {
        return false;
    }

    if !name
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase())
        .unwrap_or(false)
    {
        return false;
    }

    if RESERVED.contains(&name) {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}
