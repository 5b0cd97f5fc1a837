use super::{parser, RawTrade, SourceError, TradeSource};
use crate::config::{MarketProfile, SourceConfig};
use crate::workflows::market::domain::PropertyCategory;
use crate::workflows::market::period::YearMonth;
use reqwest::Client;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Blocking client for the transaction open API.
///
/// Owns a current-thread runtime so the pipeline stays synchronous; every
/// request is bounded by the configured timeout. `api_key` is the decoded
/// service key, it is percent-encoded on the way out.
pub struct MolitClient {
    http: Client,
    runtime: Runtime,
    config: SourceConfig,
    profile: MarketProfile,
}

impl MolitClient {
    pub fn new(config: SourceConfig, profile: MarketProfile) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| SourceError::Runtime(err.to_string()))?;

        Ok(Self {
            http,
            runtime,
            config,
            profile,
        })
    }

    fn endpoint_url(&self, category: PropertyCategory) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.profile.spec(category).endpoint
        )
    }
}

impl std::fmt::Debug for MolitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MolitClient")
            .field("base_url", &self.config.base_url)
            .field("region_code", &self.profile.region_code)
            .finish_non_exhaustive()
    }
}

impl TradeSource for MolitClient {
    fn fetch(
        &self,
        category: PropertyCategory,
        period: YearMonth,
    ) -> Result<Vec<RawTrade>, SourceError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!(
                category = category.slug(),
                "MOLIT_API_KEY is not configured; no transactions fetched"
            );
            return Ok(Vec::new());
        };

        let url = self.endpoint_url(category);
        let deal_ymd = period.deal_ymd();
        let page_size = self.config.page_size.to_string();
        debug!(category = category.slug(), %url, deal_ymd = %deal_ymd, "requesting transactions");

        let body = self.runtime.block_on(async {
            self.http
                .get(&url)
                .query(&[
                    ("serviceKey", api_key),
                    ("LAWD_CD", self.profile.region_code),
                    ("DEAL_YMD", deal_ymd.as_str()),
                    ("pageNo", "1"),
                    ("numOfRows", page_size.as_str()),
                ])
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        })?;

        Ok(parser::parse_response(category, &body)?)
    }
}
