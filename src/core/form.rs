use crate::models::{FormFields, PlayerQuery};
use thiserror::Error;

/// Errors raised while turning form text into a [`PlayerQuery`]
#[derive(Debug, Error)]
pub enum FormError {
    #[error("field `{field}` is not a JSON array of strings: {source}")]
    InvalidJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Read access to the player form's input values by element id
///
/// Implemented by whatever hosts the form; the handler never reaches into
/// global page state. Unknown or missing fields read as `None`.
pub trait FormSource {
    fn value(&self, id: &str) -> Option<String>;
}

impl FormSource for FormFields {
    fn value(&self, id: &str) -> Option<String> {
        FormFields::value(self, id).map(str::to_string)
    }
}

impl FormSource for std::collections::HashMap<String, String> {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Build a [`PlayerQuery`] from the form
///
/// Array fields must hold JSON arrays of strings. Numeric fields are read
/// with leading-prefix float parsing, so `"12 miles"` yields 12.
pub fn parse_form<F: FormSource + ?Sized>(form: &F) -> Result<PlayerQuery, FormError> {
    let read = |id: &str| form.value(id).unwrap_or_default();

    let desired_services = parse_string_array("desiredServices", &read("desiredServices"))?;
    let level = read("level");
    let rank = parse_number("rank", &read("rank"))?;
    let max_budget_per_session = parse_number("budget", &read("budget"))?;
    let travel_distance = parse_number("travel", &read("travel"))?;
    let goals = parse_string_array("goals", &read("goals"))?;
    let languages = parse_string_array("languages", &read("languages"))?;

    Ok(PlayerQuery {
        desired_services,
        level,
        rank,
        max_budget_per_session,
        travel_distance,
        goals,
        languages,
    })
}

fn parse_string_array(field: &'static str, text: &str) -> Result<Vec<String>, FormError> {
    serde_json::from_str(text).map_err(|source| FormError::InvalidJson { field, source })
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, FormError> {
    parse_float_prefix(text)
        .filter(|n| n.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// Parse the longest decimal float prefix of `text`
///
/// Leading whitespace is skipped and trailing garbage ignored. Returns `None`
/// when no digits are found. `Infinity` is recognised so callers can decide
/// whether to accept it.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
