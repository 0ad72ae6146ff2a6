//! Loose, JavaScript-style views of request JSON values.
//!
//! Request fields are accepted as raw `serde_json::Value`s and read the way a
//! JavaScript handler would read them: truthiness checks, template-literal
//! string conversion and `Number()` coercion. `None` stands for `undefined`.

use serde_json::{Number, Value};

/// Falsy values are `undefined`, `null`, `false`, `0` and `""`.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// String conversion as performed by a template literal.
pub fn to_display_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_to_string(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => array_to_string(items),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// `Number(value)`.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => string_to_number(s),
        Some(Value::Array(items)) => string_to_number(&array_to_string(items)),
        Some(Value::Object(_)) => f64::NAN,
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // -0 prints as "0"
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// `Array.prototype.join(",")`: `null` elements become empty strings.
fn array_to_string(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            other => to_display_string(Some(other)),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn string_to_number(raw: &str) -> f64 {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }

    if let Some(n) = parse_radix_literal(s) {
        return n;
    }

    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    if is_decimal_literal(unsigned) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// `0x` / `0o` / `0b` literals (unsigned only). Malformed digits give NaN.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)?.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// `digits[.digits][e[+-]digits]`, where either side of the point may be empty
/// but not both. Rejects the words `inf`/`nan` that `f64::from_str` accepts.
fn is_decimal_literal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    if int.is_empty() && frac.is_empty() {
        return false;
    }
    if !all_digits(int) || !all_digits(frac) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}
