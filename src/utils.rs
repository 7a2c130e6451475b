//! Utility functions for previews, rounding and timing

use std::time::Instant;

/// Maximum characters kept in a title preview
pub const TITLE_PREVIEW_CHARS: usize = 50;

/// Maximum characters kept in a body preview
pub const BODY_PREVIEW_CHARS: usize = 100;

/// Marker appended to a preview that was cut
pub const ELLIPSIS: &str = "...";

/// Cap `text` at `max_chars` characters, appending `...` only when it was cut
///
/// Text of exactly `max_chars` characters is returned unchanged. Lengths are
/// counted in Unicode scalar values, so multi-byte text is never split inside
/// a character.
///
/// # Examples
///
/// ```
/// use api_join::utils::preview;
///
/// assert_eq!(preview("hello world", 5), "hello...");
/// assert_eq!(preview("hello", 5), "hello");
/// ```
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Round to two decimal places, halves rounded away from zero
///
/// # Examples
///
/// ```
/// use api_join::utils::round_to_hundredths;
///
/// assert_eq!(round_to_hundredths(1.0 / 3.0), 0.33);
/// assert_eq!(round_to_hundredths(1.5), 1.5);
/// ```
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fractional milliseconds elapsed since `start`
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Whole milliseconds elapsed since `start`
pub fn elapsed_whole_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
