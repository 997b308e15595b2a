use serde_json::{Number, Value};

/// Infers a JSON value out of a raw csv cell.
///
/// - empty -> `null`
/// - `true`/`false` (any case) -> boolean
/// - integer without a leading zero -> integer
/// - decimal -> float
/// - anything else -> string
///
/// Integers with a leading zero (e.g. `0501234567`) stay strings so phone numbers survive.
pub fn infer_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }

    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if is_integer_literal(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n.into());
        }
    }

    if is_decimal_literal(raw) {
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_owned())
}

/// A cell that is always kept as text, `null` when empty.
pub fn text_cell(raw: &str) -> Value {
    if raw.is_empty() {
        Value::Null
    } else {
        Value::String(raw.to_owned())
    }
}

/// Text that is `None` when the cell was empty
pub fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_owned())
}

/// Renders a value the way it's sent over the wire in string-typed fields.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn split_sign(raw: &str) -> &str {
    raw.strip_prefix('-').unwrap_or(raw)
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = split_sign(raw);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

fn is_decimal_literal(raw: &str) -> bool {
    let Some((int, frac)) = split_sign(raw).split_once('.') else {
        return false;
    };

    !int.is_empty()
        && !frac.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
        && (int == "0" || !int.starts_with('0'))
}
