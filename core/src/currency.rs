//! Rupee amounts as shown on booking records.

/// Parse a display amount such as `"₹3,499"`.
///
/// Everything except digits, `.` and `-` is dropped before parsing.
/// Anything unparseable counts as zero.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Sum of parsed amounts.
pub fn sum_amounts<'a, I>(amounts: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    amounts.into_iter().map(parse_amount).sum()
}

/// Format whole rupees with Indian digit grouping: `₹1,23,456`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{}", rounded.abs() as u64);
    format!("{}₹{}", sign, group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rupee_strings() {
        assert_eq!(parse_amount("₹3,499"), 3499.0);
        assert_eq!(parse_amount("₹1,200"), 1200.0);
        assert_eq!(parse_amount("INR 250.50"), 250.5);
        assert_eq!(parse_amount("-₹100"), -100.0);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("free"), 0.0);
        assert_eq!(parse_amount("1-2"), 0.0);
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum_amounts(["₹3,499", "₹5,999"]), 9498.0);
        assert_eq!(sum_amounts(["₹700", "₹1,200", "n/a"]), 1900.0);
    }

    #[test]
    fn test_format_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(9498.0), "₹9,498");
        assert_eq!(format_inr(123456.0), "₹1,23,456");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
        assert_eq!(format_inr(1899.6), "₹1,900");
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }
}
