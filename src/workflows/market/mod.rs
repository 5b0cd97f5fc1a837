//! Monthly market report: retrieval with previous-month fallback,
//! aggregation, the interactive report, the summary image and publishing.

pub mod artifacts;
pub mod domain;
pub mod format;
pub mod image;
pub mod period;
pub mod pipeline;
pub mod publisher;
pub mod report;
pub mod retrieval;
pub mod stats;

pub use artifacts::{ArtifactError, ArtifactWriter, RunArtifacts};
pub use domain::{CategoryDataset, PropertyCategory, ReportModel, TransactionRecord};
pub use image::{ImageError, SummaryImageComposer};
pub use period::{ReportPeriod, YearMonth};
pub use pipeline::{ReportPipeline, RunOutcome};
pub use publisher::{
    PublishBody, PublishError, PublishGateway, PublishRequest, PublishedPost, ReportPublisher,
    UploadedMedia, WordPressClient,
};
pub use report::{RenderedReport, ReportRenderer};
pub use retrieval::FallbackRetriever;
pub use stats::{CategoryStats, OverallStats, RecencyPolicy, ReportStats};
