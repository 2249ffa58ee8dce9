use std::time::Duration;

use reqwest::Client;

use crate::{Result, markup::MarkupStripper};

/// Fetches per-topic encyclopedia pages and reduces them to lower-cased paragraph text.
pub struct EncyclopediaClient {
	client: Client,
	api_base: String,
	stripper: MarkupStripper,
}
impl EncyclopediaClient {
	pub fn new(cfg: &lexa_config::Corpus) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(crate::request_headers(&cfg.user_agent, &cfg.default_headers)?)
			.build()?;

		Ok(Self {
			client,
			api_base: cfg.api_base.trim_end_matches('/').to_string(),
			stripper: MarkupStripper::new()?,
		})
	}

	pub fn topic_url(&self, topic: &str) -> String {
		format!("{}/{}", self.api_base, topic.trim().replace(' ', "_"))
	}

	/// Non-2xx responses are logged and their body is still used.
	pub async fn fetch_raw_text(&self, topic: &str) -> Result<String> {
		let url = self.topic_url(topic);

		tracing::debug!(%url, "Sending corpus request.");

		let res = self.client.get(&url).send().await?;
		let status = res.status();

		if status.is_success() {
			tracing::debug!(%status, "Got successful corpus response.");
		} else {
			tracing::warn!(%status, %url, "Got bad corpus response.");
		}

		let html = res.text().await?;

		Ok(self.stripper.paragraph_text(&html).to_lowercase())
	}
}
