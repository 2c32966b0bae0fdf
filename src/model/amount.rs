/// Parse a free-form amount the way a browser number field hands it over.
///
/// Leading whitespace is skipped and the longest numeric prefix is taken, so `"12abc"` is `12.0`
/// and `"1e3x"` is `1000.0`. Input without a leading number (including the empty string) is
/// `NaN`. Never fails; validation is left to whoever reads the amount.
pub fn parse_amount(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Destination amount for `amount` at `rate` (destination per source).
pub fn converted_amount(amount: f64, rate: f64) -> f64 {
    amount * rate
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbtest::arbtest;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount("  12.5"), 12.5);
        assert_eq!(parse_amount("-3"), -3.0);
        assert_eq!(parse_amount("+4"), 4.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("7."), 7.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("2.5E-1"), 0.25);
        assert_eq!(parse_amount("Infinity"), f64::INFINITY);
        assert_eq!(parse_amount("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_amount_prefix() {
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("3.14.15"), 3.14);
        assert_eq!(parse_amount("5e"), 5.0);
        assert_eq!(parse_amount("5e+"), 5.0);
        assert_eq!(parse_amount("1,000"), 1.0);
    }

    #[test]
    fn test_parse_amount_nan() {
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("   ").is_nan());
        assert!(parse_amount("abc").is_nan());
        assert!(parse_amount(".").is_nan());
        assert!(parse_amount("-").is_nan());
        assert!(parse_amount("e5").is_nan());
        assert!(parse_amount("infinity").is_nan());
    }

    #[test]
    fn test_converted_amount_nan_propagates() {
        assert!(converted_amount(parse_amount("oops"), 83.1).is_nan());
        assert!(converted_amount(10.0, f64::NAN).is_nan());
    }

    #[test]
    fn prop_test_parse_amount_formatted() {
        arbtest(|u| {
            let value: f64 = u.arbitrary()?;
            if !value.is_finite() {
                return Ok(());
            }
            let suffix: String = u.arbitrary()?;
            let suffix = suffix.trim_start_matches(|c: char| {
                c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
            });

            assert_eq!(parse_amount(&value.to_string()), value);
            assert_eq!(parse_amount(&format!("{value}{suffix}")), value);

            Ok(())
        })
        .budget_ms(200)
        .run();
    }
}
