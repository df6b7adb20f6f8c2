//! YouTube-backed [`VideoIndex`].

use async_trait::async_trait;
use serde::Deserialize;

use super::{VideoError, VideoIndex, VideoMetadata};

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Video index backed by the YouTube Data API v3.
pub struct YouTubeClient {
    api_key: String,
    client: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<VideoMetadata>,
}

#[async_trait]
impl VideoIndex for YouTubeClient {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<VideoMetadata>, VideoError> {
        let max_results = max_results.to_string();
        let resp = self
            .client
            .get(YOUTUBE_SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
                // Long-form videos only.
                ("videoDuration", "long"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| VideoError::Request(format!("YouTube request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(VideoError::Upstream(format!(
                "YouTube API error {status}: {body}"
            )));
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| VideoError::Upstream(format!("YouTube reply parse error: {e}")))?;

        Ok(data.items)
    }
}
