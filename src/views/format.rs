//! Number formatting for labels and cells.

/// `0.50`-style fixed precision.
pub fn fixed(x: f64, precision: usize) -> String {
    format!("{:.*}", precision, x)
}

/// `1.23e-04`-style scientific notation: signed exponent, at least two digits.
pub fn scientific(x: f64, precision: usize) -> String {
    if !x.is_finite() {
        return format!("{}", x);
    }
    let raw = format!("{:.*e}", precision, x);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(e) => format!("{}e{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs()),
            Err(_) => raw,
        },
        None => raw,
    }
}

/// Display text for a coefficient cell; empty when absent.
pub fn cell_text(cell: Option<f64>) -> String {
    cell.map(|v| scientific(v, 2)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(0.5, 2), "0.50");
        assert_eq!(fixed(0.012345, 4), "0.0123");
        assert_eq!(fixed(-1.0, 4), "-1.0000");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(scientific(0.000123, 2), "1.23e-04");
        assert_eq!(scientific(12345.0, 2), "1.23e+04");
        assert_eq!(scientific(0.0, 2), "0.00e+00");
        assert_eq!(scientific(-2.5, 2), "-2.50e+00");
        assert_eq!(scientific(1e-120, 2), "1.00e-120");
        assert_eq!(scientific(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(0.25)), "2.50e-01");
    }
}
