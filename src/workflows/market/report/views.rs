use super::ui_state::{CardId, GestureConfig};
use crate::workflows::market::domain::{PropertyCategory, TransactionRecord};
use crate::workflows::market::format::{format_area, format_optional_price, format_price};
use crate::workflows::market::stats::CategoryStats;
use serde::Serialize;

/// The structured payload embedded in the report; the client builds every
/// card from it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    pub region: &'static str,
    pub period_label: String,
    pub generated_at: String,
    pub active_category: PropertyCategory,
    pub ui: GestureConfig,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: PropertyCategory,
    pub slug: &'static str,
    pub label: &'static str,
    pub accent: &'static str,
    pub period_label: String,
    pub stats: CategoryStatsView,
    pub records: Vec<RecordCardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatsView {
    pub total: usize,
    pub shown: usize,
    pub average_amount: Option<u64>,
    pub average_label: String,
    pub max_amount: Option<u64>,
    pub max_label: String,
    pub top_name: Option<String>,
    pub top_name_count: usize,
    pub new_count: usize,
    pub recent_count: usize,
}

impl CategoryStatsView {
    pub fn from_stats(stats: &CategoryStats, shown: usize) -> Self {
        Self {
            total: stats.total,
            shown,
            average_amount: stats.average_amount,
            average_label: format_optional_price(stats.average_amount),
            max_amount: stats.max_amount,
            max_label: format_optional_price(stats.max_amount),
            top_name: stats.top_name.clone(),
            top_name_count: stats.top_name_count,
            new_count: stats.new_count,
            recent_count: stats.recent_count,
        }
    }
}

/// One card: the record as normalized plus its display strings.
#[derive(Debug, Clone, Serialize)]
pub struct RecordCardView {
    pub id: String,
    #[serde(flatten)]
    pub record: TransactionRecord,
    pub is_new: bool,
    pub pyeong: f64,
    pub price_label: String,
    pub area_label: String,
    pub date_label: String,
    pub floor_label: String,
}

impl RecordCardView {
    pub fn new(card: CardId, record: &TransactionRecord, is_new: bool) -> Self {
        Self {
            id: card.to_string(),
            is_new,
            pyeong: record.pyeong(),
            price_label: format_price(record.deal_amount),
            area_label: format_area(record.area_sqm),
            date_label: format!(
                "{}.{:02}.{:02}",
                record.deal_year, record.deal_month, record.deal_day
            ),
            floor_label: record
                .floor
                .map(|floor| format!("{floor}층"))
                .unwrap_or_else(|| "-".to_string()),
            record: record.clone(),
        }
    }
}
