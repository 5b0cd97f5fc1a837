use super::period::ReportPeriod;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Apartment,
    MultiHousehold,
    DetachedHouse,
    Land,
}

impl PropertyCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Apartment,
            Self::MultiHousehold,
            Self::DetachedHouse,
            Self::Land,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::MultiHousehold => "multi_household",
            Self::DetachedHouse => "detached_house",
            Self::Land => "land",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Apartment => 0,
            Self::MultiHousehold => 1,
            Self::DetachedHouse => 2,
            Self::Land => 3,
        }
    }

    pub const fn schema(self) -> RawSchema {
        match self {
            Self::Land => RawSchema::Land,
            Self::Apartment | Self::MultiHousehold | Self::DetachedHouse => RawSchema::Residential,
        }
    }
}

/// Shape of the raw items the source returns for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSchema {
    Residential,
    Land,
}

/// One normalized transaction. Amounts are in units of 10,000 KRW.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub category: PropertyCategory,
    pub name: String,
    pub deal_amount: u64,
    pub build_year: Option<i32>,
    pub deal_year: i32,
    pub deal_month: u32,
    pub deal_day: u32,
    pub dong: String,
    pub lot_number: String,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub deal_type: Option<String>,
}

impl TransactionRecord {
    pub fn deal_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.deal_year, self.deal_month, self.deal_day)
    }

    pub fn pyeong(&self) -> f64 {
        super::format::to_pyeong(self.area_sqm)
    }

    pub(crate) fn date_key(&self) -> (i32, u32, u32) {
        (self.deal_year, self.deal_month, self.deal_day)
    }
}

/// Records of one category in fetch order, current period first.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDataset {
    pub category: PropertyCategory,
    pub period_label: String,
    pub records: Vec<TransactionRecord>,
}

impl CategoryDataset {
    pub fn new(
        category: PropertyCategory,
        period_label: impl Into<String>,
        records: Vec<TransactionRecord>,
    ) -> Self {
        Self {
            category,
            period_label: period_label.into(),
            records,
        }
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// Everything one run renders. Rebuilt from nothing on every run.
#[derive(Debug, Clone)]
pub struct ReportModel {
    pub period: ReportPeriod,
    pub generated_at: NaiveDateTime,
    datasets: Vec<CategoryDataset>,
}

impl ReportModel {
    /// Datasets missing from `datasets` are filled with empty ones so every
    /// category is always present.
    pub fn new(
        period: ReportPeriod,
        generated_at: NaiveDateTime,
        mut datasets: Vec<CategoryDataset>,
    ) -> Self {
        let ordered = PropertyCategory::ordered()
            .into_iter()
            .map(|category| {
                let existing = datasets
                    .iter()
                    .position(|dataset| dataset.category == category);
                match existing {
                    Some(index) => datasets.swap_remove(index),
                    None => CategoryDataset::new(category, period.year_month().label(), Vec::new()),
                }
            })
            .collect();

        Self {
            period,
            generated_at,
            datasets: ordered,
        }
    }

    pub fn datasets(&self) -> &[CategoryDataset] {
        &self.datasets
    }

    pub fn dataset(&self, category: PropertyCategory) -> &CategoryDataset {
        &self.datasets[category.index()]
    }

    pub fn total_records(&self) -> usize {
        self.datasets.iter().map(CategoryDataset::total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }

    pub fn all_records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.datasets
            .iter()
            .flat_map(|dataset| dataset.records.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(category: PropertyCategory, name: &str, amount: u64) -> TransactionRecord {
        TransactionRecord {
            category,
            name: name.to_string(),
            deal_amount: amount,
            build_year: None,
            deal_year: 2025,
            deal_month: 3,
            deal_day: 1,
            dong: "현암동".to_string(),
            lot_number: "1".to_string(),
            area_sqm: 84.9,
            floor: None,
            deal_type: None,
        }
    }

    #[test]
    fn report_model_always_holds_four_ordered_datasets() {
        let period = ReportPeriod::from_date(NaiveDate::from_ymd_opt(2025, 3, 18).expect("date"));
        let land = CategoryDataset::new(
            PropertyCategory::Land,
            period.year_month().label(),
            vec![record(PropertyCategory::Land, "현암동 1", 3000)],
        );
        let generated_at = NaiveDate::from_ymd_opt(2025, 3, 18)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("timestamp");

        let model = ReportModel::new(period, generated_at, vec![land]);

        let categories: Vec<_> = model.datasets().iter().map(|d| d.category).collect();
        assert_eq!(categories, PropertyCategory::ordered().to_vec());
        assert_eq!(model.total_records(), 1);
        assert_eq!(model.dataset(PropertyCategory::Land).total(), 1);
        assert!(model.dataset(PropertyCategory::Apartment).records.is_empty());
    }

    #[test]
    fn invalid_deal_dates_yield_none() {
        let mut trade = record(PropertyCategory::Apartment, "a", 1);
        trade.deal_month = 0;
        assert!(trade.deal_date().is_none());
    }
}
