//! Форматирование количеств для таблиц

/// Разделитель тысяч (пробел), дробная часть только если она есть
///
/// # Примеры
///
/// ```
/// use frontend::shared::number_format::format_quantity;
/// assert_eq!(format_quantity(1234.0), "1 234");
/// assert_eq!(format_quantity(1234.5), "1 234.5");
/// ```
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let formatted = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').to_string()
    };

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) if !d.is_empty() => format!("{}{}.{}", sign, grouped, d),
        _ => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(7.0), "7");
        assert_eq!(format_quantity(1234567.0), "1 234 567");
        assert_eq!(format_quantity(-1234.0), "-1 234");
        assert_eq!(format_quantity(12.25), "12.25");
        assert_eq!(format_quantity(f64::NAN), "-");
    }
}
