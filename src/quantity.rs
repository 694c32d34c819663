/// Largest count a single day may record. Keeps totals and averages finite.
pub const MAX_QUANTITY: f64 = 1_000_000_000.0;

/// Whether `value` can be stored as a day's count.
pub fn in_range(value: f64) -> bool {
    (0.0..=MAX_QUANTITY).contains(&value)
}

/// Parses the longest leading decimal number in `raw`, ignoring whatever follows.
///
/// `"12 ovos"` reads as `12`, `"  3.5"` as `3.5`, and `"abc"` or `""` as `None`.
/// Infinite results are rejected and `-0` comes back as `0`.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let input = raw.trim_start();
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value: f64 = input[..end].parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value + 0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
