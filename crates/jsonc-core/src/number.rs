//! Number formatting and number-literal scanning.
//!
//! Formatting follows the shape of ECMAScript's `Number::toString`: shortest
//! round-tripping digits, no fraction for integral values, and exponent
//! notation only outside `1e-7 < |n| < 1e21`.

/// Format a finite `f64` as JSON number text. Non-finite values have no JSON
/// representation and format as `null`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    // Covers -0 as well
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits that parse back to the same f64,
    // e.g. "1.2345e3" or "5e-324".
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n_pos = exp + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if n < 0.0 {
        out.push('-');
    }
    if k <= n_pos && n_pos <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (n_pos - k) as usize));
    } else if 0 < n_pos && n_pos <= 21 {
        let (int_part, frac_part) = digits.split_at(n_pos as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if -6 < n_pos && n_pos <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-n_pos) as usize));
        out.push_str(&digits);
    } else {
        let e = n_pos - 1;
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.abs().to_string());
    }
    out
}

/// Length of the longest prefix of `bytes[start..]` matching
/// `-?digits(.digits)?([eE][+-]?digits)?`, or `None` when nothing matches.
///
/// The fraction and exponent groups are optional: a `.` or `e` that is not
/// followed by digits is left unconsumed.
pub fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let digits_at = |i: usize| {
        bytes
            .get(i..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut i = start;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    let int_digits = digits_at(i);
    if int_digits == 0 {
        return None;
    }
    i += int_digits;

    if bytes.get(i) == Some(&b'.') {
        let frac_digits = digits_at(i + 1);
        if frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits_at(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    Some(i - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(1_000_000.0), "1000000");
    }

    #[test]
    fn fractions_use_shortest_digits() {
        assert_eq!(format_number(2.75), "2.75");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(-0.0314), "-0.0314");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn exponent_thresholds() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(5e-324), "5e-324");
    }

    #[test]
    fn non_finite_is_null() {
        assert_eq!(format_number(f64::NAN), "null");
        assert_eq!(format_number(f64::INFINITY), "null");
        assert_eq!(format_number(f64::NEG_INFINITY), "null");
    }

    #[test]
    fn formatted_numbers_parse_back() {
        for n in [1.0 / 3.0, 123456.789, 9007199254740993.0, 2.2250738585072014e-308, 1.7976931348623157e308] {
            assert_eq!(format_number(n).parse::<f64>().unwrap(), n);
        }
    }

    #[test]
    fn scan_full_grammar() {
        assert_eq!(scan_number(b"-3.14E-2", 0), Some(8));
        assert_eq!(scan_number(b"42", 0), Some(2));
        assert_eq!(scan_number(b"1e+5,", 0), Some(4));
    }

    #[test]
    fn scan_stops_before_dangling_groups() {
        assert_eq!(scan_number(b"1.", 0), Some(1));
        assert_eq!(scan_number(b"1.e5", 0), Some(1));
        assert_eq!(scan_number(b"2e", 0), Some(1));
        assert_eq!(scan_number(b"2e+", 0), Some(1));
    }

    #[test]
    fn scan_rejects_missing_digits() {
        assert_eq!(scan_number(b"-", 0), None);
        assert_eq!(scan_number(b"-x", 0), None);
        assert_eq!(scan_number(b".5", 0), None);
    }

    #[test]
    fn scan_from_offset() {
        assert_eq!(scan_number(b"[10,-2]", 1), Some(2));
        assert_eq!(scan_number(b"[10,-2]", 4), Some(2));
        assert_eq!(scan_number(b"[10,-2]", 7), None);
    }
}
