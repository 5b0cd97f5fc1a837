use super::domain::{CategoryDataset, PropertyCategory};
use super::period::YearMonth;
use crate::workflows::molit::{self, RawTrade, TradeSource};
use tracing::{info, warn};

/// Requests each category for the current month and, when the month is
/// sparse, appends the previous month once.
#[derive(Debug)]
pub struct FallbackRetriever<'a> {
    source: &'a dyn TradeSource,
    threshold: usize,
}

impl<'a> FallbackRetriever<'a> {
    pub fn new(source: &'a dyn TradeSource, threshold: usize) -> Self {
        Self { source, threshold }
    }

    /// Raw trades for `category`: current-period items first, then
    /// previous-period items when fewer than `threshold` were found.
    pub fn retrieve_raw(&self, category: PropertyCategory, current: YearMonth) -> RetrievedTrades {
        let mut trades = self.fetch_or_empty(category, current);
        let current_count = trades.len();
        let mut fallback = None;

        if current_count < self.threshold {
            let previous = current.previous();
            let older = self.fetch_or_empty(category, previous);
            info!(
                category = category.slug(),
                current = current_count,
                previous = older.len(),
                threshold = self.threshold,
                "current period below threshold; appended previous period"
            );
            trades.extend(older);
            fallback = Some(previous);
        }

        RetrievedTrades {
            category,
            current,
            fallback,
            trades,
        }
    }

    /// Retrieves and normalizes every category, in category order.
    pub fn retrieve_all(&self, current: YearMonth) -> Vec<CategoryDataset> {
        PropertyCategory::ordered()
            .into_iter()
            .map(|category| {
                let retrieved = self.retrieve_raw(category, current);
                let label = retrieved.period_label();
                let records = molit::normalize_all(retrieved.trades);
                info!(
                    category = category.slug(),
                    count = records.len(),
                    "category retrieved"
                );
                CategoryDataset::new(category, label, records)
            })
            .collect()
    }

    fn fetch_or_empty(&self, category: PropertyCategory, period: YearMonth) -> Vec<RawTrade> {
        match self.source.fetch(category, period) {
            Ok(trades) => trades,
            Err(err) => {
                warn!(
                    category = category.slug(),
                    period = %period,
                    error = %err,
                    "transaction fetch failed; continuing with no records"
                );
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedTrades {
    pub category: PropertyCategory,
    pub current: YearMonth,
    pub fallback: Option<YearMonth>,
    pub trades: Vec<RawTrade>,
}

impl RetrievedTrades {
    pub fn period_label(&self) -> String {
        match self.fallback {
            Some(previous) => format!("{} (+{})", self.current.label(), previous.label()),
            None => self.current.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::molit::{ResidentialRow, SourceError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct ScriptedSource {
        responses: HashMap<(PropertyCategory, YearMonth), Vec<&'static str>>,
        failing: Vec<(PropertyCategory, YearMonth)>,
        calls: Mutex<Vec<(PropertyCategory, YearMonth)>>,
    }

    impl ScriptedSource {
        fn with(
            mut self,
            category: PropertyCategory,
            period: YearMonth,
            names: Vec<&'static str>,
        ) -> Self {
            self.responses.insert((category, period), names);
            self
        }

        fn calls(&self) -> Vec<(PropertyCategory, YearMonth)> {
            self.calls.lock().expect("calls mutex").clone()
        }
    }

    impl TradeSource for ScriptedSource {
        fn fetch(
            &self,
            category: PropertyCategory,
            period: YearMonth,
        ) -> Result<Vec<RawTrade>, SourceError> {
            self.calls
                .lock()
                .expect("calls mutex")
                .push((category, period));
            if self.failing.contains(&(category, period)) {
                return Err(SourceError::Runtime("scripted failure".to_string()));
            }
            Ok(self
                .responses
                .get(&(category, period))
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|name| RawTrade::Residential {
                    category,
                    row: ResidentialRow {
                        apt_nm: Some(name.to_string()),
                        ..ResidentialRow::default()
                    },
                })
                .collect())
        }
    }

    fn march() -> YearMonth {
        YearMonth::new(2025, 3).expect("valid")
    }

    fn names(trades: &[RawTrade]) -> Vec<String> {
        molit::normalize_all(trades.to_vec())
            .into_iter()
            .map(|record| record.name)
            .collect()
    }

    #[test]
    fn sparse_period_appends_previous_after_current() {
        let source = ScriptedSource::default()
            .with(PropertyCategory::Apartment, march(), vec!["c1", "c2"])
            .with(
                PropertyCategory::Apartment,
                march().previous(),
                vec!["p1", "p2"],
            );
        let retriever = FallbackRetriever::new(&source, 3);

        let retrieved = retriever.retrieve_raw(PropertyCategory::Apartment, march());

        assert_eq!(names(&retrieved.trades), vec!["c1", "c2", "p1", "p2"]);
        assert_eq!(retrieved.fallback, Some(march().previous()));
        assert_eq!(retrieved.period_label(), "2025년 3월 (+2025년 2월)");
    }

    #[test]
    fn sufficient_period_never_queries_previous() {
        let source = ScriptedSource::default().with(
            PropertyCategory::Apartment,
            march(),
            vec!["c1", "c2", "c3"],
        );
        let retriever = FallbackRetriever::new(&source, 3);

        let retrieved = retriever.retrieve_raw(PropertyCategory::Apartment, march());

        assert_eq!(retrieved.trades.len(), 3);
        assert_eq!(retrieved.fallback, None);
        assert_eq!(source.calls(), vec![(PropertyCategory::Apartment, march())]);
    }

    #[test]
    fn failures_degrade_to_empty_and_still_fall_back() {
        let mut source = ScriptedSource::default().with(
            PropertyCategory::MultiHousehold,
            march().previous(),
            vec!["p1"],
        );
        source
            .failing
            .push((PropertyCategory::MultiHousehold, march()));
        let retriever = FallbackRetriever::new(&source, 3);

        let retrieved = retriever.retrieve_raw(PropertyCategory::MultiHousehold, march());

        assert_eq!(names(&retrieved.trades), vec!["p1"]);
    }

    #[test]
    fn retrieve_all_walks_categories_sequentially() {
        let source = ScriptedSource::default();
        let retriever = FallbackRetriever::new(&source, 3);

        let datasets = retriever.retrieve_all(march());

        assert_eq!(datasets.len(), 4);
        assert!(datasets.iter().all(|dataset| dataset.records.is_empty()));
        let calls = source.calls();
        assert_eq!(calls.len(), 8);
        assert_eq!(calls[0], (PropertyCategory::Apartment, march()));
        assert_eq!(calls[1], (PropertyCategory::Apartment, march().previous()));
        assert_eq!(calls[7], (PropertyCategory::Land, march().previous()));
    }
}
