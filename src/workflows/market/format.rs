//! Display formatting shared by the HTML report, the summary image and the
//! publish title.

/// Square meters per pyeong.
pub const SQM_PER_PYEONG: f64 = 3.3058;

/// Amount units (10,000 KRW) per 억.
const UNITS_PER_EOK: u64 = 10_000;

/// Formats an amount given in units of 10,000 KRW.
///
/// `15000` becomes `"1억 5,000"`, `20000` becomes `"2억"` and `9999` stays
/// `"9,999"`.
pub fn format_price(amount: u64) -> String {
    if amount < UNITS_PER_EOK {
        return with_thousands(amount);
    }

    let whole = amount / UNITS_PER_EOK;
    let remainder = amount % UNITS_PER_EOK;
    if remainder == 0 {
        format!("{whole}억")
    } else {
        format!("{whole}억 {}", with_thousands(remainder))
    }
}

/// Like [`format_price`] but renders a missing statistic as `-`.
pub fn format_optional_price(amount: Option<u64>) -> String {
    amount.map(format_price).unwrap_or_else(|| "-".to_string())
}

pub fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `round(area / 3.3058, 1)`.
pub fn to_pyeong(area_sqm: f64) -> f64 {
    if !area_sqm.is_finite() || area_sqm <= 0.0 {
        return 0.0;
    }
    (area_sqm / SQM_PER_PYEONG * 10.0).round() / 10.0
}

/// `84.97㎡(25.7평)`.
pub fn format_area(area_sqm: f64) -> String {
    if area_sqm <= 0.0 {
        return "-".to_string();
    }
    format!("{}㎡({:.1}평)", trim_float(area_sqm), to_pyeong(area_sqm))
}

/// Cuts `name` to `budget` characters, marking the cut with an ellipsis.
pub fn truncate_name(name: &str, budget: usize) -> String {
    if name.chars().count() <= budget {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(budget).collect();
    truncated.push('…');
    truncated
}

fn trim_float(value: f64) -> String {
    let rendered = format!("{value:.2}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formatting_matches_eok_rules() {
        assert_eq!(format_price(15000), "1억 5,000");
        assert_eq!(format_price(20000), "2억");
        assert_eq!(format_price(9999), "9,999");
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(10000), "1억");
        assert_eq!(format_price(10001), "1억 1");
        assert_eq!(format_price(123_4567), "123억 4,567");
        assert_eq!(format_optional_price(None), "-");
    }

    #[test]
    fn thousands_separator_groups_from_the_right() {
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1234567), "1,234,567");
    }

    #[test]
    fn pyeong_rounds_to_one_decimal() {
        assert_eq!(to_pyeong(99.17), 30.0);
        assert_eq!(to_pyeong(84.97), 25.7);
        assert_eq!(to_pyeong(0.0), 0.0);
        assert_eq!(format_area(84.97), "84.97㎡(25.7평)");
        assert_eq!(format_area(99.17), "99.17㎡(30.0평)");
        assert_eq!(format_area(120.0), "120㎡(36.3평)");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_name("여주자이헤리엇", 10), "여주자이헤리엇");
        assert_eq!(
            truncate_name("여주역세권푸르지오아파트단지", 10),
            "여주역세권푸르지오아…"
        );
    }
}
