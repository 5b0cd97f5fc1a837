use super::{PublishError, PublishGateway, PublishRequest, PublishedPost, UploadedMedia};
use crate::config::PublishCredentials;
use mime::Mime;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// WordPress REST client authenticating with an application password.
///
/// Synchronous facade over reqwest, driven by its own current-thread runtime.
pub struct WordPressClient {
    http: Client,
    runtime: Runtime,
    credentials: PublishCredentials,
}

#[derive(Debug, Serialize)]
struct PostPayload<'a> {
    title: &'a str,
    content: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured_media: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    id: u64,
    source_url: String,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    id: u64,
    #[serde(default)]
    link: String,
}

impl WordPressClient {
    pub fn new(credentials: PublishCredentials, timeout: Duration) -> Result<Self, PublishError> {
        let http = Client::builder().timeout(timeout).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| PublishError::Runtime(err.to_string()))?;

        Ok(Self {
            http,
            runtime,
            credentials,
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/wp-json/wp/v2/{resource}", self.credentials.base_url)
    }
}

impl std::fmt::Debug for WordPressClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordPressClient")
            .field("base_url", &self.credentials.base_url)
            .field("user", &self.credentials.user)
            .finish_non_exhaustive()
    }
}

impl PublishGateway for WordPressClient {
    fn upload_media(
        &self,
        file_name: &str,
        content_type: &Mime,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, PublishError> {
        let url = self.endpoint("media");
        debug!(%url, file_name, size = bytes.len(), "uploading media");

        let media: MediaResponse = self.runtime.block_on(async {
            self.http
                .post(&url)
                .basic_auth(&self.credentials.user, Some(&self.credentials.app_password))
                .header(CONTENT_TYPE, content_type.as_ref())
                .header(
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{file_name}\""),
                )
                .body(bytes)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
        })?;

        Ok(UploadedMedia {
            id: media.id,
            url: media.source_url,
        })
    }

    fn create_post(&self, request: &PublishRequest) -> Result<PublishedPost, PublishError> {
        let url = self.endpoint("posts");
        let payload = PostPayload {
            title: &request.title,
            content: request.content(),
            status: "publish",
            categories: request.category_id.into_iter().collect(),
            featured_media: request.featured_media,
        };
        debug!(%url, title = %request.title, "creating post");

        let post: PostResponse = self.runtime.block_on(async {
            self.http
                .post(&url)
                .basic_auth(&self.credentials.user, Some(&self.credentials.app_password))
                .json(&payload)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
        })?;

        Ok(PublishedPost {
            id: post.id,
            link: post.link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WordPressClient {
        WordPressClient::new(
            PublishCredentials {
                base_url: "https://news.example.org".to_string(),
                user: "editor".to_string(),
                app_password: "abcd efgh".to_string(),
            },
            Duration::from_secs(5),
        )
        .expect("client builds")
    }

    #[test]
    fn endpoints_live_under_rest_root() {
        let client = client();
        assert_eq!(
            client.endpoint("posts"),
            "https://news.example.org/wp-json/wp/v2/posts"
        );
        assert_eq!(
            client.endpoint("media"),
            "https://news.example.org/wp-json/wp/v2/media"
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", client());
        assert!(rendered.contains("editor"));
        assert!(!rendered.contains("abcd"));
    }

    #[test]
    fn post_payload_omits_empty_optionals() {
        let payload = PostPayload {
            title: "t",
            content: "c".to_string(),
            status: "publish",
            categories: Vec::new(),
            featured_media: None,
        };
        let json = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({"title": "t", "content": "c", "status": "publish"})
        );
    }
}
