//! Lenient numeric readers for operator-entered text.
//!
//! Form fields arrive as free text. Both readers skip leading whitespace, take
//! the longest numeric prefix and ignore whatever follows, so `"4.5 g/dL"`
//! reads as 4.5. Text without a leading number reads as `None`, which callers
//! treat as "never triggers".

/// Read a decimal number: optional sign, digits, optional fraction and exponent.
pub(crate) fn leading_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = skip_digits(bytes, end);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_end = skip_digits(bytes, exp_end);
        if exp_digits_end > exp_end {
            end = exp_digits_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Read a whole number from the leading digits, truncating any fraction.
///
/// `"89.9"` reads as 89. Returned as `f64` so arbitrarily long digit runs
/// still produce a value.
pub(crate) fn leading_integer(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }

    let magnitude = s[start..end].parse::<f64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}
