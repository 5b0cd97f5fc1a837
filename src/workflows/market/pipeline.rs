use super::artifacts::{ArtifactError, ArtifactWriter, RunArtifacts};
use super::domain::ReportModel;
use super::image::SummaryImageComposer;
use super::period::{ReportPeriod, YearMonth};
use super::publisher::{PublishedPost, ReportPublisher};
use super::report::ReportRenderer;
use super::retrieval::FallbackRetriever;
use super::stats::{RecencyPolicy, ReportStats};
use crate::config::{MarketProfile, ReportSettings};
use crate::workflows::molit::TradeSource;
use chrono::NaiveDateTime;
use tracing::{info, warn};

#[derive(Debug)]
pub enum RunOutcome {
    /// No category had a single record; nothing was written or published.
    NothingToReport,
    Produced {
        artifacts: RunArtifacts,
        stats: ReportStats,
        published: Option<PublishedPost>,
    },
}

/// One stateless run: retrieve, normalize, aggregate, render, compose,
/// write and publish.
#[derive(Debug)]
pub struct ReportPipeline {
    source: Box<dyn TradeSource>,
    renderer: ReportRenderer,
    composer: Option<SummaryImageComposer>,
    publisher: Option<ReportPublisher>,
    artifacts: ArtifactWriter,
    fallback_threshold: usize,
    policy: RecencyPolicy,
}

impl ReportPipeline {
    pub fn new(
        source: Box<dyn TradeSource>,
        profile: MarketProfile,
        settings: &ReportSettings,
    ) -> Self {
        Self {
            source,
            renderer: ReportRenderer::new(profile.clone(), settings),
            composer: Some(SummaryImageComposer::new(profile, settings.font_paths.clone())),
            publisher: None,
            artifacts: ArtifactWriter::new(settings.output_dir.clone()),
            fallback_threshold: settings.fallback_threshold,
            policy: RecencyPolicy::from(settings),
        }
    }

    pub fn with_publisher(mut self, publisher: ReportPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn without_image(mut self) -> Self {
        self.composer = None;
        self
    }

    pub fn run(&self, target: YearMonth, now: NaiveDateTime) -> Result<RunOutcome, ArtifactError> {
        let today = now.date();
        let retriever = FallbackRetriever::new(self.source.as_ref(), self.fallback_threshold);
        let datasets = retriever.retrieve_all(target);
        let model = ReportModel::new(ReportPeriod::for_month(target, today), now, datasets);

        if model.is_empty() {
            info!(period = %target, "no transactions found; nothing to report");
            return Ok(RunOutcome::NothingToReport);
        }

        let stats = ReportStats::compute(&model, today, &self.policy);
        let report = self.renderer.render(&model, &stats, today)?;
        let image = self.compose_image(&model);
        let artifacts = self.artifacts.write(&model, &report, image.as_deref())?;

        let published = match &self.publisher {
            Some(publisher) => match publisher.publish(&model, &report, image.as_deref()) {
                Ok(post) => Some(post),
                Err(err) => {
                    warn!(error = %err, "publishing failed; local artifacts kept");
                    None
                }
            },
            None => {
                info!("publishing not configured; local artifacts only");
                None
            }
        };

        info!(
            total = stats.overall.total,
            dir = %artifacts.dir.display(),
            published = published.is_some(),
            "report run finished"
        );
        Ok(RunOutcome::Produced {
            artifacts,
            stats,
            published,
        })
    }

    fn compose_image(&self, model: &ReportModel) -> Option<Vec<u8>> {
        let composer = self.composer.as_ref()?;
        match composer.compose(model) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(error = %err, "summary image skipped");
                None
            }
        }
    }
}
