//! Money helpers: 2-dp rounding and display formatting.

/// Round to 2 decimal places (half away from zero).
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `£1,234.56`-style rendering for presentation layers.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}£{grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(45.6209), 45.62);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-1.005), -1.0);
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_money(0.0), "£0.00");
        assert_eq!(format_money(1234.5), "£1,234.50");
        assert_eq!(format_money(5_000_000.0), "£5,000,000.00");
        assert_eq!(format_money(-12.3), "-£12.30");
    }
}
