/// Форматирует число с разделителями тысяч (запятыми)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Money with two decimals and a leading currency sign: `$1,234.56`, `-$10.00`
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_number(cents / 100), cents % 100)
}

/// Percent with a fixed number of decimals: `-3.33%`
pub fn format_percent(value: f64, decimals: u8) -> String {
    let decimals = usize::from(decimals);
    let rendered = format!("{:.*}", decimals, value);
    // "-0.00" reads as a loss; show it as zero
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        return format!("{}%", &rendered[1..]);
    }
    format!("{}%", rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(300.0), "$300.00");
        assert_eq!(format_money(1234.567), "$1,234.57");
        assert_eq!(format_money(-10.0), "-$10.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(-10.0 / 300.0 * 100.0, 2), "-3.33%");
        assert_eq!(format_percent(12.5, 1), "12.5%");
        assert_eq!(format_percent(-0.0001, 2), "0.00%");
        assert_eq!(format_percent(0.0, 2), "0.00%");
    }
}
