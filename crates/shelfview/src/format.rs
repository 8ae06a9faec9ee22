//! Display formatters: currency, truncation, markup escaping, star ratings.

use serde_json::Value;

/// Appended to every formatted amount.
pub const CURRENCY_SUFFIX: &str = " сум";

/// Inserted between groups of three digits.
pub const GROUP_SEPARATOR: char = ' ';

/// Total number of star glyphs in a rating.
pub const STAR_COUNT: u32 = 5;

const STAR_FILLED: char = '★';
const STAR_EMPTY: char = '☆';
const ELLIPSIS: char = '…';

/// Format a raw price value as a grouped, rounded amount with the currency
/// suffix.
///
/// `null` yields an empty string. Values that do not coerce to a finite
/// number are returned as their text, unchanged.
pub fn format_currency(value: &Value) -> String {
    if value.is_null() {
        return String::new();
    }
    match coerce_number(value) {
        Some(n) if n.is_finite() => {
            let mut out = group_digits(round_half_up(n));
            out.push_str(CURRENCY_SUFFIX);
            out
        }
        _ => value_text(value),
    }
}

/// Shorten `text` to at most `max_len` characters, marking the cut with a
/// single ellipsis.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Replace `& < > " '` with entity references.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a rating as filled stars followed by empty ones, five in total.
///
/// The rating is rounded and clamped to `[0, 5]`; non-finite input counts as 0.
pub fn render_stars(value: f64) -> String {
    let filled = if value.is_finite() {
        round_half_up(value).clamp(0.0, STAR_COUNT as f64) as u32
    } else {
        0
    };
    let mut out = String::with_capacity(STAR_COUNT as usize * 3);
    out.extend(std::iter::repeat(STAR_FILLED).take(filled as usize));
    out.extend(std::iter::repeat(STAR_EMPTY).take((STAR_COUNT - filled) as usize));
    out
}

/// Numeric reading of a loosely typed JSON value.
///
/// Strings are trimmed and parsed (an empty string reads as 0), booleans read
/// as 1 or 0, containers do not coerce.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!n.is_nan()).then_some(n)
}

/// Plain text of a JSON value: strings without quotes, everything else as JSON.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Round half toward positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(n: f64) -> f64 {
    (n + 0.5).floor()
}

fn group_digits(rounded: f64) -> String {
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}
