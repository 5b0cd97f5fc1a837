pub mod wordpress;

pub use wordpress::WordPressClient;

use super::domain::ReportModel;
use super::report::{escape_html, RenderedReport};
use crate::config::{MarketProfile, PublishBodyMode};
use mime::Mime;
use std::fmt::Debug;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub id: u64,
    pub link: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("publish request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("publish runtime unavailable: {0}")]
    Runtime(String),
}

/// Remote site that hosts the post and its media.
pub trait PublishGateway: Debug {
    fn upload_media(
        &self,
        file_name: &str,
        content_type: &Mime,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, PublishError>;

    fn create_post(&self, request: &PublishRequest) -> Result<PublishedPost, PublishError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishBody {
    /// Report markup placed directly in the post.
    Inline(String),
    /// Separately hosted copy of the report, embedded by URL.
    Embed { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub title: String,
    pub body: PublishBody,
    pub category_id: Option<u64>,
    pub featured_media: Option<u64>,
}

impl PublishRequest {
    /// Post content as sent to the gateway.
    pub fn content(&self) -> String {
        match &self.body {
            PublishBody::Inline(html) => html.clone(),
            PublishBody::Embed { url } => format!(
                "<iframe src=\"{}\" title=\"{}\" style=\"width:100%;min-height:1600px;border:0;\" loading=\"lazy\"></iframe>",
                escape_html(url),
                escape_html(&self.title)
            ),
        }
    }
}

/// Shapes the publish payload and drives the gateway. Only post creation can
/// fail; media uploads degrade to a post without them.
#[derive(Debug)]
pub struct ReportPublisher {
    gateway: Box<dyn PublishGateway>,
    profile: MarketProfile,
    category_id: Option<u64>,
    body_mode: PublishBodyMode,
}

impl ReportPublisher {
    pub fn new(
        gateway: Box<dyn PublishGateway>,
        profile: MarketProfile,
        category_id: Option<u64>,
        body_mode: PublishBodyMode,
    ) -> Self {
        Self {
            gateway,
            profile,
            category_id,
            body_mode,
        }
    }

    pub fn title(&self, model: &ReportModel) -> String {
        format!(
            "[부동산] {}년 {:02}월 {} 실거래가 ({}건)",
            model.period.year,
            model.period.month,
            self.profile.region_name,
            model.total_records()
        )
    }

    pub fn publish(
        &self,
        model: &ReportModel,
        report: &RenderedReport,
        image: Option<&[u8]>,
    ) -> Result<PublishedPost, PublishError> {
        let stem = format!("realestate-{}", model.period.year_month().deal_ymd());

        let featured_media = image.and_then(|bytes| {
            self.upload(&format!("{stem}.png"), &mime::IMAGE_PNG, bytes.to_vec())
                .map(|media| media.id)
        });

        let body = match self.body_mode {
            PublishBodyMode::Inline => PublishBody::Inline(report.fragment.clone()),
            PublishBodyMode::Embed => match self.upload(
                &format!("{stem}.html"),
                &mime::TEXT_HTML_UTF_8,
                report.document.clone().into_bytes(),
            ) {
                Some(media) => PublishBody::Embed { url: media.url },
                None => PublishBody::Inline(report.fragment.clone()),
            },
        };

        let request = PublishRequest {
            title: self.title(model),
            body,
            category_id: self.category_id,
            featured_media,
        };
        let post = self.gateway.create_post(&request)?;
        info!(post_id = post.id, link = %post.link, "report published");
        Ok(post)
    }

    fn upload(
        &self,
        file_name: &str,
        content_type: &Mime,
        bytes: Vec<u8>,
    ) -> Option<UploadedMedia> {
        match self.gateway.upload_media(file_name, content_type, bytes) {
            Ok(media) => {
                info!(file_name, media_id = media.id, "media uploaded");
                Some(media)
            }
            Err(err) => {
                warn!(file_name, error = %err, "media upload failed; continuing without it");
                None
            }
        }
    }
}
