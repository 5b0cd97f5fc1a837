use super::parser::{LandRow, ResidentialRow};
use crate::workflows::market::domain::PropertyCategory;

/// Residential item fields that can stand in for one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResidentialField {
    ApartmentName,
    HouseName,
    MultiHouseName,
    ExclusiveArea,
    TotalFloorArea,
    LegacyTotalFloorArea,
    PlotArea,
}

impl ResidentialField {
    fn read(self, row: &ResidentialRow) -> Option<&str> {
        let value = match self {
            Self::ApartmentName => &row.apt_nm,
            Self::HouseName => &row.house_nm,
            Self::MultiHouseName => &row.mhouse_nm,
            Self::ExclusiveArea => &row.exclu_use_ar,
            Self::TotalFloorArea => &row.total_floor_ar,
            Self::LegacyTotalFloorArea => &row.tot_flr_ar,
            Self::PlotArea => &row.plottage_ar,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LandField {
    DealArea,
    PlotArea,
}

impl LandField {
    fn read(self, row: &LandRow) -> Option<&str> {
        let value = match self {
            Self::DealArea => &row.deal_area,
            Self::PlotArea => &row.plottage_ar,
        };
        value.as_deref()
    }
}

pub(crate) fn name_fields(category: PropertyCategory) -> &'static [ResidentialField] {
    use ResidentialField::*;
    match category {
        PropertyCategory::Apartment => &[ApartmentName, HouseName, MultiHouseName],
        PropertyCategory::MultiHousehold => &[MultiHouseName, HouseName, ApartmentName],
        PropertyCategory::DetachedHouse => &[HouseName, ApartmentName, MultiHouseName],
        PropertyCategory::Land => &[],
    }
}

pub(crate) fn area_fields(category: PropertyCategory) -> &'static [ResidentialField] {
    use ResidentialField::*;
    match category {
        PropertyCategory::Apartment | PropertyCategory::MultiHousehold => {
            &[ExclusiveArea, TotalFloorArea, LegacyTotalFloorArea]
        }
        PropertyCategory::DetachedHouse => &[TotalFloorArea, LegacyTotalFloorArea, PlotArea],
        PropertyCategory::Land => &[],
    }
}

pub(crate) const LAND_AREA_FIELDS: [LandField; 2] = [LandField::DealArea, LandField::PlotArea];

/// First candidate holding a non-blank value.
pub(crate) fn first_residential<'a>(
    row: &'a ResidentialRow,
    fields: &[ResidentialField],
) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| field.read(row))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

pub(crate) fn first_land<'a>(row: &'a LandRow, fields: &[LandField]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| field.read(row))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residential_lookup_skips_blank_candidates() {
        let row = ResidentialRow {
            apt_nm: Some("  ".to_string()),
            mhouse_nm: Some("여주빌라".to_string()),
            ..ResidentialRow::default()
        };
        assert_eq!(
            first_residential(&row, name_fields(PropertyCategory::Apartment)),
            Some("여주빌라")
        );
    }

    #[test]
    fn detached_houses_prefer_floor_area_over_plot() {
        let row = ResidentialRow {
            tot_flr_ar: Some("132.2".to_string()),
            plottage_ar: Some("330".to_string()),
            ..ResidentialRow::default()
        };
        assert_eq!(
            first_residential(&row, area_fields(PropertyCategory::DetachedHouse)),
            Some("132.2")
        );
    }

    #[test]
    fn land_area_falls_back_to_plot_area() {
        let row = LandRow {
            plottage_ar: Some("991".to_string()),
            ..LandRow::default()
        };
        assert_eq!(first_land(&row, &LAND_AREA_FIELDS), Some("991"));
    }
}
