use super::mapping::{self, LAND_AREA_FIELDS};
use super::parser::{LandRow, RawTrade, ResidentialRow};
use crate::workflows::market::domain::{PropertyCategory, TransactionRecord};

/// Name used when neither a building name nor a location is available.
const UNKNOWN_NAME: &str = "미상";

pub fn normalize(raw: RawTrade) -> TransactionRecord {
    match raw {
        RawTrade::Residential { category, row } => normalize_residential(category, row),
        RawTrade::Land(row) => normalize_land(row),
    }
}

pub fn normalize_all(raws: Vec<RawTrade>) -> Vec<TransactionRecord> {
    raws.into_iter().map(normalize).collect()
}

fn normalize_residential(category: PropertyCategory, row: ResidentialRow) -> TransactionRecord {
    let dong = clean(row.umd_nm.as_deref());
    let lot_number = clean(row.jibun.as_deref());
    let name = mapping::first_residential(&row, mapping::name_fields(category))
        .map(str::to_string)
        .unwrap_or_else(|| location_name(&dong, &lot_number));
    let area_sqm = parse_area(mapping::first_residential(&row, mapping::area_fields(category)));

    TransactionRecord {
        category,
        name,
        deal_amount: parse_amount(row.deal_amount.as_deref()),
        build_year: parse_optional_int(row.build_year.as_deref()),
        deal_year: parse_int(row.deal_year.as_deref()),
        deal_month: parse_int(row.deal_month.as_deref()).max(0) as u32,
        deal_day: parse_int(row.deal_day.as_deref()).max(0) as u32,
        dong,
        lot_number,
        area_sqm,
        floor: parse_optional_int(row.floor.as_deref()),
        deal_type: non_blank(row.dealing_gbn.as_deref()),
    }
}

fn normalize_land(row: LandRow) -> TransactionRecord {
    let dong = clean(row.umd_nm.as_deref());
    let lot_number = clean(row.jibun.as_deref());
    let name = location_name(&dong, &lot_number);

    TransactionRecord {
        category: PropertyCategory::Land,
        name,
        deal_amount: parse_amount(row.deal_amount.as_deref()),
        build_year: None,
        deal_year: parse_int(row.deal_year.as_deref()),
        deal_month: parse_int(row.deal_month.as_deref()).max(0) as u32,
        deal_day: parse_int(row.deal_day.as_deref()).max(0) as u32,
        area_sqm: parse_area(mapping::first_land(&row, &LAND_AREA_FIELDS)),
        dong,
        lot_number,
        floor: None,
        deal_type: non_blank(row.dealing_gbn.as_deref()),
    }
}

/// `"{dong} {lot}"`, never empty.
fn location_name(dong: &str, lot_number: &str) -> String {
    let joined = format!("{dong} {lot_number}").trim().to_string();
    if joined.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        joined
    }
}

fn clean(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn strip_separators(value: &str) -> String {
    value.trim().replace(',', "")
}

/// Deal amount in units of 10,000 KRW; unparseable or negative input is 0.
pub(crate) fn parse_amount(value: Option<&str>) -> u64 {
    value
        .map(strip_separators)
        .and_then(|digits| digits.parse::<i64>().ok())
        .map(|amount| amount.max(0) as u64)
        .unwrap_or(0)
}

pub(crate) fn parse_area(value: Option<&str>) -> f64 {
    value
        .map(strip_separators)
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|area| area.is_finite() && *area > 0.0)
        .unwrap_or(0.0)
}

fn parse_int(value: Option<&str>) -> i32 {
    parse_optional_int(value).unwrap_or(0)
}

fn parse_optional_int(value: Option<&str>) -> Option<i32> {
    value
        .map(strip_separators)
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse::<i32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residential(category: PropertyCategory, row: ResidentialRow) -> TransactionRecord {
        normalize(RawTrade::Residential { category, row })
    }

    #[test]
    fn synthesizes_name_from_location_when_names_are_blank() {
        let record = residential(
            PropertyCategory::MultiHousehold,
            ResidentialRow {
                apt_nm: Some(String::new()),
                house_nm: Some(" ".to_string()),
                umd_nm: Some("신촌동".to_string()),
                jibun: Some("123-4".to_string()),
                ..ResidentialRow::default()
            },
        );
        assert_eq!(record.name, "신촌동 123-4");
        assert_eq!(record.category, PropertyCategory::MultiHousehold);
    }

    #[test]
    fn land_names_always_come_from_location() {
        let record = normalize(RawTrade::Land(LandRow {
            deal_amount: Some("4,500".to_string()),
            deal_area: Some("1,322.5".to_string()),
            umd_nm: Some("점동면 처리".to_string()),
            jibun: Some("산12".to_string()),
            deal_year: Some("2025".to_string()),
            deal_month: Some("03".to_string()),
            deal_day: Some("7".to_string()),
            ..LandRow::default()
        }));
        assert_eq!(record.name, "점동면 처리 산12");
        assert_eq!(record.deal_amount, 4500);
        assert_eq!(record.area_sqm, 1322.5);
        assert_eq!(record.deal_month, 3);
        assert_eq!(record.floor, None);
        assert_eq!(record.build_year, None);
    }

    #[test]
    fn malformed_numbers_degrade_to_zero() {
        let record = residential(
            PropertyCategory::Apartment,
            ResidentialRow {
                apt_nm: Some("현대".to_string()),
                deal_amount: Some("n/a".to_string()),
                deal_year: Some("twenty".to_string()),
                exclu_use_ar: Some("large".to_string()),
                floor: Some("".to_string()),
                build_year: Some("19xx".to_string()),
                ..ResidentialRow::default()
            },
        );
        assert_eq!(record.deal_amount, 0);
        assert_eq!(record.deal_year, 0);
        assert_eq!(record.area_sqm, 0.0);
        assert_eq!(record.floor, None);
        assert_eq!(record.build_year, None);
    }

    #[test]
    fn amounts_strip_thousands_separators_and_clamp_negatives() {
        assert_eq!(parse_amount(Some("   38,500")), 38500);
        assert_eq!(parse_amount(Some("-10")), 0);
        assert_eq!(parse_amount(None), 0);
        assert_eq!(parse_area(Some("84.97")), 84.97);
    }

    #[test]
    fn residential_fields_carry_through() {
        let record = residential(
            PropertyCategory::Apartment,
            ResidentialRow {
                apt_nm: Some("여주자이".to_string()),
                deal_amount: Some("38,500".to_string()),
                build_year: Some("2019".to_string()),
                deal_year: Some("2025".to_string()),
                deal_month: Some("3".to_string()),
                deal_day: Some("15".to_string()),
                umd_nm: Some("교동".to_string()),
                jibun: Some("501".to_string()),
                exclu_use_ar: Some("84.97".to_string()),
                floor: Some("-1".to_string()),
                dealing_gbn: Some("직거래".to_string()),
                ..ResidentialRow::default()
            },
        );
        assert_eq!(record.name, "여주자이");
        assert_eq!(record.deal_amount, 38500);
        assert_eq!(record.build_year, Some(2019));
        assert_eq!(record.date_key(), (2025, 3, 15));
        assert_eq!(record.floor, Some(-1));
        assert_eq!(record.deal_type.as_deref(), Some("직거래"));
    }
}
