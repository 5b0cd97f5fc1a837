mod profile;

pub use profile::{CategorySpec, MarketProfile};

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for one batch run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub source: SourceConfig,
    pub publish: PublishConfig,
    pub report: ReportSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let source = SourceConfig {
            api_key: non_empty_var("MOLIT_API_KEY"),
            base_url: non_empty_var("MOLIT_BASE_URL")
                .unwrap_or_else(|| SourceConfig::DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(parse_var("MOLIT_TIMEOUT_SECS", 30u64)?),
            page_size: parse_var("MOLIT_PAGE_SIZE", 1000u32)?,
        };

        let body_mode = match non_empty_var("WP_BODY_MODE") {
            Some(raw) => raw.parse()?,
            None => PublishBodyMode::Inline,
        };
        let publish = PublishConfig {
            base_url: non_empty_var("WP_URL"),
            user: non_empty_var("WP_USER"),
            app_password: non_empty_var("WP_APP_PASSWORD"),
            category_id: Some(parse_var("WP_CATEGORY_ID", 137u64)?).filter(|id| *id > 0),
            body_mode,
        };

        let font_paths = match non_empty_var("REPORT_FONT_PATHS") {
            Some(raw) => raw
                .split(':')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => ReportSettings::default_font_paths(),
        };

        let report = ReportSettings {
            fallback_threshold: parse_var("REPORT_FALLBACK_THRESHOLD", 3usize)?,
            display_cap: parse_var("REPORT_DISPLAY_CAP", 20usize)?,
            badge_window_days: parse_var("REPORT_BADGE_DAYS", 3i64)?,
            recent_window_days: parse_var("REPORT_RECENT_DAYS", 7i64)?,
            name_budget: parse_var("REPORT_NAME_BUDGET", 10usize)?,
            drag_threshold_px: 10.0,
            expand_scroll_delay_ms: 150,
            output_dir: non_empty_var("REPORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            font_paths,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            source,
            publish,
            report,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the transaction open API.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub page_size: u32,
}

impl SourceConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://apis.data.go.kr/1613000";
}

/// How the report markup travels inside the published post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishBodyMode {
    /// The full report markup is the post body.
    Inline,
    /// The report is uploaded separately and the post embeds it.
    Embed,
}

impl FromStr for PublishBodyMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "embed" | "iframe" => Ok(Self::Embed),
            _ => Err(ConfigError::InvalidValue {
                key: "WP_BODY_MODE",
                value: value.to_string(),
            }),
        }
    }
}

/// Publish target. Publishing only happens when every credential is present.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub base_url: Option<String>,
    pub user: Option<String>,
    pub app_password: Option<String>,
    pub category_id: Option<u64>,
    pub body_mode: PublishBodyMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCredentials {
    pub base_url: String,
    pub user: String,
    pub app_password: String,
}

impl PublishConfig {
    pub fn credentials(&self) -> Option<PublishCredentials> {
        Some(PublishCredentials {
            base_url: self.base_url.clone()?.trim_end_matches('/').to_string(),
            user: self.user.clone()?,
            app_password: self.app_password.clone()?,
        })
    }
}

/// Tunables for retrieval, aggregation and rendering.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Below this many current-month records the previous month is appended.
    pub fallback_threshold: usize,
    /// Cards kept per category after sorting.
    pub display_cap: usize,
    pub badge_window_days: i64,
    pub recent_window_days: i64,
    /// Characters of the most-traded name shown before the ellipsis.
    pub name_budget: usize,
    pub drag_threshold_px: f64,
    pub expand_scroll_delay_ms: u32,
    pub output_dir: PathBuf,
    pub font_paths: Vec<PathBuf>,
}

impl ReportSettings {
    pub fn default_font_paths() -> Vec<PathBuf> {
        [
            "/usr/share/fonts/truetype/nanum/NanumGothicBold.ttf",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/Library/Fonts/AppleSDGothicNeo.ttc",
            "C:\\Windows\\Fonts\\malgunbd.ttf",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            fallback_threshold: 3,
            display_cap: 20,
            badge_window_days: 3,
            recent_window_days: 7,
            name_budget: 10,
            drag_threshold_px: 10.0,
            expand_scroll_delay_ms: 150,
            output_dir: PathBuf::from("output"),
            font_paths: Self::default_font_paths(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative number, got '{value}'")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an unsupported value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}
