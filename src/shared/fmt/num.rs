//! Number formatting utilities for spoken and displayed prices.

/// Decimal places used when rendering a price.
pub const PRICE_DECIMALS: usize = 2;

/// Format a finite f64 with a fixed number of decimal places.
///
/// Returns `None` for NaN and infinities. A value that rounds to zero is
/// rendered without a sign, so `-0.001` becomes `"0.00"`.
pub fn fixed(amount: f64, decimals: usize) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }

    let formatted = format!("{:.1$}", amount, decimals);
    match formatted.strip_prefix('-') {
        Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => {
            Some(unsigned.to_string())
        }
        _ => Some(formatted),
    }
}

/// Format a price with [`PRICE_DECIMALS`] places.
pub fn price(amount: f64) -> Option<String> {
    fixed(amount, PRICE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rounds() {
        assert_eq!(fixed(5.237, 2).as_deref(), Some("5.24"));
        assert_eq!(fixed(5.0, 2).as_deref(), Some("5.00"));
        assert_eq!(fixed(12.3456, 1).as_deref(), Some("12.3"));
        assert_eq!(fixed(1234.5, 2).as_deref(), Some("1234.50"));
    }

    #[test]
    fn test_fixed_negative() {
        assert_eq!(fixed(-1.5, 2).as_deref(), Some("-1.50"));
        assert_eq!(fixed(-0.256, 2).as_deref(), Some("-0.26"));
    }

    #[test]
    fn test_fixed_negative_zero_has_no_sign() {
        assert_eq!(fixed(-0.001, 2).as_deref(), Some("0.00"));
        assert_eq!(fixed(-0.0, 2).as_deref(), Some("0.00"));
        assert_eq!(fixed(-0.4, 0).as_deref(), Some("0"));
    }

    #[test]
    fn test_fixed_rejects_non_finite() {
        assert_eq!(fixed(f64::NAN, 2), None);
        assert_eq!(fixed(f64::INFINITY, 2), None);
        assert_eq!(fixed(f64::NEG_INFINITY, 2), None);
    }

    #[test]
    fn test_price_uses_two_decimals() {
        assert_eq!(price(3.0).as_deref(), Some("3.00"));
    }
}
