//! Interactive report rendering: display ordering, per-category truncation,
//! the embedded JSON payload and the HTML around it.

mod assets;
mod html;
pub mod ui_state;
pub mod views;

pub use ui_state::{CardId, GestureConfig, ReportUiState, UiEffect, UiEvent};
pub use views::{CategoryStatsView, CategoryView, RecordCardView, ReportPayload};

pub(crate) use html::escape_html;

use super::domain::{PropertyCategory, ReportModel, TransactionRecord};
use super::stats::{self, RecencyPolicy, ReportStats};
use crate::config::{MarketProfile, ReportSettings};
use chrono::NaiveDate;
use html::{escape_script_json, render_document, render_fragment, HtmlContext};

/// Newest deal first. Records sharing a date keep their fetch order.
pub fn sort_for_display(records: &mut [TransactionRecord]) {
    records.sort_by(|a, b| b.date_key().cmp(&a.date_key()));
}

/// Sorted copy of `records` cut to at most `cap` entries.
pub fn display_slice(records: &[TransactionRecord], cap: usize) -> Vec<TransactionRecord> {
    let mut sorted = records.to_vec();
    sort_for_display(&mut sorted);
    sorted.truncate(cap);
    sorted
}

#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub title: String,
    /// Standalone HTML document.
    pub document: String,
    /// The same report without the surrounding document, for inline posts.
    pub fragment: String,
    pub payload: ReportPayload,
}

#[derive(Debug, Clone)]
pub struct ReportRenderer {
    profile: MarketProfile,
    display_cap: usize,
    policy: RecencyPolicy,
    gesture: GestureConfig,
}

impl ReportRenderer {
    pub fn new(profile: MarketProfile, settings: &ReportSettings) -> Self {
        Self {
            profile,
            display_cap: settings.display_cap,
            policy: RecencyPolicy::from(settings),
            gesture: GestureConfig::from(settings),
        }
    }

    /// Builds the payload from the display slices and renders it. `stats` must
    /// come from the same model; it is never recomputed from the slices.
    pub fn render(
        &self,
        model: &ReportModel,
        stats: &ReportStats,
        today: NaiveDate,
    ) -> Result<RenderedReport, serde_json::Error> {
        let payload = self.payload(model, stats, today);
        let payload_json = escape_script_json(&serde_json::to_string(&payload)?);
        let title = format!("{} 부동산 실거래가", self.profile.region_name);

        let ctx = HtmlContext {
            title: &title,
            heading: &title,
            overall: &stats.overall,
            source_label: self.profile.source_label,
            source_url: self.profile.source_url,
            payload: &payload,
            payload_json: &payload_json,
            recent_window_days: self.policy.recent_window_days,
        };
        let document = render_document(&ctx);
        let fragment = render_fragment(&ctx);

        Ok(RenderedReport {
            title,
            document,
            fragment,
            payload,
        })
    }

    pub fn payload(
        &self,
        model: &ReportModel,
        stats: &ReportStats,
        today: NaiveDate,
    ) -> ReportPayload {
        let categories = model
            .datasets()
            .iter()
            .zip(&stats.categories)
            .map(|(dataset, computed)| {
                let category = dataset.category;
                let spec = self.profile.spec(category);
                let shown = display_slice(&dataset.records, self.display_cap);
                let records = shown
                    .iter()
                    .enumerate()
                    .map(|(index, record)| {
                        RecordCardView::new(
                            CardId::new(category, index),
                            record,
                            stats::is_new(record, today, &self.policy),
                        )
                    })
                    .collect::<Vec<_>>();
                let category_stats = CategoryStatsView::from_stats(computed, records.len());

                CategoryView {
                    category,
                    slug: category.slug(),
                    label: spec.label,
                    accent: spec.accent,
                    period_label: dataset.period_label.clone(),
                    stats: category_stats,
                    records,
                }
            })
            .collect();

        ReportPayload {
            region: self.profile.region_name,
            period_label: model.period.label(),
            generated_at: model.generated_at.format("%Y-%m-%d %H:%M").to_string(),
            active_category: initial_category(model),
            ui: self.gesture,
            categories,
        }
    }
}

/// First category with any records, or the first category when all are empty.
fn initial_category(model: &ReportModel) -> PropertyCategory {
    model
        .datasets()
        .iter()
        .find(|dataset| !dataset.records.is_empty())
        .map(|dataset| dataset.category)
        .unwrap_or(PropertyCategory::Apartment)
}
