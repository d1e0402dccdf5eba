//! Number parsing and display formatting
//!
//! The widget's display and history strings follow browser number semantics:
//! `parseFloat`-style prefix parsing, `Number#toString` rendering, and comma
//! grouping applied to every run of digits.

/// Parses the longest numeric prefix of `input`
///
/// Leading whitespace and a sign are accepted, `Infinity` is recognised, and
/// anything without a leading number yields NaN. `"1.2.3"` parses as `1.2`.
#[must_use]
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let bytes = rest.as_bytes();
    let len = bytes.len();
    let digits_from = |start: usize| {
        let mut end = start;
        while end < len && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let int_end = digits_from(0);
    let int_digits = &rest[..int_end];
    let mut cursor = int_end;

    let mut frac_digits = "";
    if cursor < len && bytes[cursor] == b'.' {
        let frac_end = digits_from(cursor + 1);
        frac_digits = &rest[cursor + 1..frac_end];
        cursor = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return f64::NAN;
    }

    let mut exponent = String::new();
    if cursor < len && (bytes[cursor] == b'e' || bytes[cursor] == b'E') {
        let mut exp_start = cursor + 1;
        let mut exp_sign = "";
        if exp_start < len && (bytes[exp_start] == b'+' || bytes[exp_start] == b'-') {
            exp_sign = &rest[exp_start..=exp_start];
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            exponent = format!("e{}{}", exp_sign, &rest[exp_start..exp_end]);
        }
    }

    let mut literal = String::with_capacity(int_digits.len() + frac_digits.len() + 8);
    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }
    literal.push_str(&exponent);

    literal.parse::<f64>().map_or(f64::NAN, |value| sign * value)
}

/// Renders a number the way a browser's `Number#toString` does
///
/// Integral values print without a fraction, non-finite values print as
/// `Infinity`/`-Infinity`/`NaN`, and magnitudes of at least 1e21 or below
/// 1e-6 use exponent notation (`1.5e+21`, `1e-7`).
#[must_use]
pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => scientific,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Inserts thousands separators into every run of digits
///
/// Equivalent to replacing `\B(?=(\d{3})+(?!\d))` with `,`: fractional digit
/// runs are grouped too (`1234.5678` becomes `1,234.5,678`), and a run that
/// directly follows a letter may receive a leading comma.
#[must_use]
pub fn group_thousands(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 3);
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }

        for pos in start..end {
            let remaining = end - pos;
            let not_boundary = pos > start || (pos > 0 && is_word_char(chars[pos - 1]));
            if not_boundary && remaining >= 3 && remaining % 3 == 0 {
                out.push(',');
            }
            out.push(chars[pos]);
        }
        i = end;
    }

    out
}

/// Formats a number with browser stringification plus digit grouping
#[must_use]
pub fn format_number(value: f64) -> String {
    group_thousands(&format_js_number(value))
}

/// Rounds up to the next multiple of `step` (`ceil(value / step) * step`)
#[must_use]
pub fn round_up_to(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}
