//! Zip code splitting
//!
//! The zip fields are 9 bytes wide and hold either a plain 5-digit zip or a
//! zip+4 written without separator.

/// Length of a zip code that carries a plus-four extension
const ZIP_PLUS_FOUR_LENGTH: usize = 9;

/// Length of the base zip code
const BASE_ZIP_LENGTH: usize = 5;

/// Split a raw zip field into its base zip and plus-four extension
///
/// - 9 characters: base zip from the first five, extension from the last
///   four (0 when the extension is not numeric)
/// - anything else: the whole value is the base zip, no extension
///
/// When the base zip is not numeric both values are discarded.
pub fn split_zip(raw: &str) -> (Option<u32>, Option<u32>) {
    let chars: Vec<char> = raw.chars().collect();

    let (base, plus_four) = if chars.len() == ZIP_PLUS_FOUR_LENGTH {
        let base: String = chars[..BASE_ZIP_LENGTH].iter().collect();
        let extension: String = chars[BASE_ZIP_LENGTH..].iter().collect();
        (base, Some(parse_digits(&extension).unwrap_or(0)))
    } else {
        (raw.to_string(), None)
    };

    match parse_digits(&base) {
        Some(zip) => (Some(zip), plus_four),
        None => (None, None),
    }
}

/// Parse a non-empty, all-digit string
pub(crate) fn parse_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
