use super::domain::{CategoryDataset, PropertyCategory, ReportModel, TransactionRecord};
use super::format::truncate_name;
use crate::config::ReportSettings;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Windows and budgets applied while aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyPolicy {
    pub badge_window_days: i64,
    pub recent_window_days: i64,
    pub name_budget: usize,
}

impl Default for RecencyPolicy {
    fn default() -> Self {
        Self {
            badge_window_days: 3,
            recent_window_days: 7,
            name_budget: 10,
        }
    }
}

impl From<&ReportSettings> for RecencyPolicy {
    fn from(settings: &ReportSettings) -> Self {
        Self {
            badge_window_days: settings.badge_window_days,
            recent_window_days: settings.recent_window_days,
            name_budget: settings.name_budget,
        }
    }
}

/// Floor of the mean over strictly positive amounts.
pub fn average_amount(records: &[TransactionRecord]) -> Option<u64> {
    let (sum, count) = records
        .iter()
        .map(|record| record.deal_amount)
        .filter(|amount| *amount > 0)
        .fold((0u128, 0u128), |(sum, count), amount| {
            (sum + u128::from(amount), count + 1)
        });
    if count == 0 {
        return None;
    }
    u64::try_from(sum / count).ok()
}

pub fn max_amount(records: &[TransactionRecord]) -> Option<u64> {
    records.iter().map(|record| record.deal_amount).max()
}

/// Most frequent name and its count; ties go to the name seen first.
pub fn most_frequent_name(records: &[TransactionRecord]) -> Option<(&str, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(&str, usize)> = Vec::new();
    for record in records {
        let name = record.name.as_str();
        match positions.get(name) {
            Some(&index) => tallies[index].1 += 1,
            None => {
                positions.insert(name, tallies.len());
                tallies.push((name, 1));
            }
        }
    }

    // Reverse so `max_by_key`, which keeps the last maximum, lands on the
    // earliest entry.
    tallies.into_iter().rev().max_by_key(|(_, count)| *count)
}

/// Whether the deal happened within `window_days` of `today`.
pub fn within_days(record: &TransactionRecord, today: NaiveDate, window_days: i64) -> bool {
    match record.deal_date() {
        Some(date) => {
            let age = (today - date).num_days();
            (0..=window_days).contains(&age)
        }
        None => false,
    }
}

pub fn is_new(record: &TransactionRecord, today: NaiveDate, policy: &RecencyPolicy) -> bool {
    within_days(record, today, policy.badge_window_days)
}

pub fn recent_count(records: &[TransactionRecord], today: NaiveDate, window_days: i64) -> usize {
    records
        .iter()
        .filter(|record| within_days(record, today, window_days))
        .count()
}

/// Aggregates for one category, always computed over the full dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: PropertyCategory,
    pub total: usize,
    pub average_amount: Option<u64>,
    pub max_amount: Option<u64>,
    pub top_name: Option<String>,
    pub top_name_count: usize,
    pub new_count: usize,
    pub recent_count: usize,
}

impl CategoryStats {
    pub fn compute(dataset: &CategoryDataset, today: NaiveDate, policy: &RecencyPolicy) -> Self {
        let records = dataset.records.as_slice();
        let (top_name, top_name_count) = match most_frequent_name(records) {
            Some((name, count)) => (Some(truncate_name(name, policy.name_budget)), count),
            None => (None, 0),
        };

        Self {
            category: dataset.category,
            total: records.len(),
            average_amount: average_amount(records),
            max_amount: max_amount(records),
            top_name,
            top_name_count,
            new_count: recent_count(records, today, policy.badge_window_days),
            recent_count: recent_count(records, today, policy.recent_window_days),
        }
    }
}

/// Totals across every category, shown in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    pub total: usize,
    pub average_amount: Option<u64>,
    pub max_amount: Option<u64>,
    pub recent_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub overall: OverallStats,
    pub categories: Vec<CategoryStats>,
}

impl ReportStats {
    pub fn compute(model: &ReportModel, today: NaiveDate, policy: &RecencyPolicy) -> Self {
        let categories = model
            .datasets()
            .iter()
            .map(|dataset| CategoryStats::compute(dataset, today, policy))
            .collect();

        let all: Vec<TransactionRecord> = model.all_records().cloned().collect();
        let overall = OverallStats {
            total: all.len(),
            average_amount: average_amount(&all),
            max_amount: max_amount(&all),
            recent_count: recent_count(&all, today, policy.recent_window_days),
        };

        Self {
            overall,
            categories,
        }
    }

    pub fn category(&self, category: PropertyCategory) -> Option<&CategoryStats> {
        self.categories
            .iter()
            .find(|stats| stats.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(name: &str, amount: u64, (year, month, day): (i32, u32, u32)) -> TransactionRecord {
        TransactionRecord {
            category: PropertyCategory::Apartment,
            name: name.to_string(),
            deal_amount: amount,
            build_year: Some(2010),
            deal_year: year,
            deal_month: month,
            deal_day: day,
            dong: "교동".to_string(),
            lot_number: "12".to_string(),
            area_sqm: 59.9,
            floor: Some(3),
            deal_type: None,
        }
    }

    #[test]
    fn average_ignores_non_positive_amounts_and_floors() {
        let records = vec![
            trade("a", 10000, (2025, 3, 1)),
            trade("b", 0, (2025, 3, 1)),
            trade("c", 15001, (2025, 3, 1)),
        ];
        assert_eq!(average_amount(&records), Some(12500));
        assert_eq!(max_amount(&records), Some(15001));
    }

    #[test]
    fn empty_inputs_produce_sentinels() {
        assert_eq!(average_amount(&[]), None);
        assert_eq!(max_amount(&[]), None);
        assert_eq!(most_frequent_name(&[]), None);

        let zero_only = vec![trade("a", 0, (2025, 3, 1))];
        assert_eq!(average_amount(&zero_only), None);
        assert_eq!(max_amount(&zero_only), Some(0));
    }

    #[test]
    fn most_frequent_name_breaks_ties_by_first_seen() {
        let records = vec![
            trade("세종", 1, (2025, 3, 1)),
            trade("한신", 1, (2025, 3, 1)),
            trade("한신", 1, (2025, 3, 1)),
            trade("세종", 1, (2025, 3, 1)),
            trade("금호", 1, (2025, 3, 1)),
        ];
        assert_eq!(most_frequent_name(&records), Some(("세종", 2)));

        let clear_winner = vec![
            trade("세종", 1, (2025, 3, 1)),
            trade("한신", 1, (2025, 3, 1)),
            trade("한신", 1, (2025, 3, 1)),
        ];
        assert_eq!(most_frequent_name(&clear_winner), Some(("한신", 2)));
    }

    #[test]
    fn most_frequent_name_scales_to_large_categories() {
        let mut records: Vec<_> = (0..2_000)
            .map(|index| trade(&format!("단지{}", index % 500), 1, (2025, 3, 1)))
            .collect();
        records.push(trade("단지7", 1, (2025, 3, 1)));

        assert_eq!(most_frequent_name(&records), Some(("단지7", 5)));

        let distinct: Vec<_> = (0..2_000)
            .map(|index| trade(&format!("필지{index}"), 1, (2025, 3, 1)))
            .collect();
        assert_eq!(most_frequent_name(&distinct), Some(("필지0", 1)));
    }

    #[test]
    fn recency_windows_are_inclusive_and_reject_future_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 18).expect("date");
        let policy = RecencyPolicy::default();
        assert!(is_new(&trade("a", 1, (2025, 3, 18)), today, &policy));
        assert!(is_new(&trade("a", 1, (2025, 3, 15)), today, &policy));
        assert!(!is_new(&trade("a", 1, (2025, 3, 14)), today, &policy));
        assert!(!is_new(&trade("a", 1, (2025, 3, 19)), today, &policy));
        assert!(!is_new(&trade("a", 1, (2025, 2, 30)), today, &policy));

        let records = vec![
            trade("a", 1, (2025, 3, 11)),
            trade("a", 1, (2025, 3, 10)),
            trade("a", 1, (2025, 3, 17)),
        ];
        assert_eq!(recent_count(&records, today, 7), 2);
    }

    #[test]
    fn category_stats_truncate_top_name() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 18).expect("date");
        let dataset = CategoryDataset::new(
            PropertyCategory::Apartment,
            "2025년 3월",
            vec![
                trade("여주역세권푸르지오아파트단지", 30000, (2025, 3, 17)),
                trade("여주역세권푸르지오아파트단지", 20000, (2025, 3, 2)),
            ],
        );
        let stats = CategoryStats::compute(&dataset, today, &RecencyPolicy::default());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_amount, Some(25000));
        assert_eq!(stats.top_name.as_deref(), Some("여주역세권푸르지오아…"));
        assert_eq!(stats.top_name_count, 2);
        assert_eq!(stats.new_count, 1);
        assert_eq!(stats.recent_count, 1);
    }
}
