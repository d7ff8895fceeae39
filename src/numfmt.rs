// src/numfmt.rs

// Enough fraction digits to print any finite f64 exactly.
const EXACT_DIGITS: usize = 1100;

/// `|v|` with `decimals` fraction digits, ties rounded away from zero
/// on the exact binary value (`0.125` → `0.13`, `1.005` → `1.00`).
fn round_half_up(v: f64, decimals: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, v.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();
    if frac_part.as_bytes().get(decimals).map_or(false, |&d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - decimals;
    let mut out: String = digits[..split].iter().map(|&b| b as char).collect();
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&b| b as char));
    }
    out
}

/// Fixed-point with `decimals` fraction digits, like `Number.prototype.toFixed`.
/// NaN prints as `NaN`.
pub fn fixed(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    let body = round_half_up(v, decimals);
    // -0.0 prints as "0"
    if v < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// en-US digit grouping with at most `max_decimals` fraction digits, trailing zeros dropped.
pub fn grouped(v: f64, max_decimals: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞".into() } else { "-∞".into() };
    }

    let raw = round_half_up(v, max_decimals);
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (raw.as_str(), ""),
    };

    let mut out = group_thousands(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    let is_zero = out.chars().all(|c| c == '0' || c == '.' || c == ',');
    if v < 0.0 && !is_zero {
        out.insert(0, '-');
    }
    out
}

/// Axis tick text: grouped integer part, exactly `decimals` fraction digits.
pub fn tick_label(v: f64, decimals: usize) -> String {
    let raw = fixed(v, decimals);
    if v.is_nan() {
        return raw;
    }
    let (sign, body) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let mut out = String::from(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let n = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Population-style grouping: up to three fraction digits.
pub fn population(v: f64) -> String {
    grouped(v, 3)
}
