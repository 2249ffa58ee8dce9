use std::{sync::Arc, time::Duration};

use serde::Serialize;

use lexa_config::{Corpus, Retrieval, StopWords};
use lexa_text::{LemmaNormalizer, Normalizer, StopWordSet};

use crate::{
	CorpusSource, Error, Result,
	compose::compose,
	rank::{self, QueryMode, RankedCandidate},
	vectorize::VectorSpaceBuilder,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusStatus {
	Available,
	/// The fetch failed or timed out; the answer was computed over an empty corpus.
	Unavailable,
}

#[derive(Clone, Debug, Serialize)]
pub struct Answer {
	pub text: String,
	pub matches: Vec<RankedCandidate>,
	pub corpus: CorpusStatus,
}

#[derive(Clone, Debug)]
pub struct RetrievalSettings {
	pub mode: QueryMode,
	pub stop_words: StopWordSet,
	pub fallback: String,
	pub fetch_timeout: Duration,
}
impl RetrievalSettings {
	pub fn from_config(retrieval: &Retrieval, corpus: &Corpus) -> Result<Self> {
		lexa_config::validate_retrieval(retrieval)?;

		let mode = match retrieval.mode.as_str() {
			lexa_config::MODE_BEST_SINGLE_MATCH =>
				QueryMode::BestSingleMatch { min_score: retrieval.min_best_score },
			_ => QueryMode::TopKAboveThreshold {
				threshold: retrieval.threshold,
				top_k: retrieval.top_k as usize,
			},
		};
		let stop_words = match &retrieval.stop_words {
			StopWords::Named(name) if name == "none" => StopWordSet::none(),
			StopWords::Named(_) => StopWordSet::english(),
			StopWords::Custom(words) => StopWordSet::from_words(words),
		};
		let settings = Self {
			mode,
			stop_words,
			fallback: retrieval.fallback.clone(),
			fetch_timeout: Duration::from_millis(corpus.timeout_ms),
		};

		settings.validate()?;

		Ok(settings)
	}

	pub fn validate(&self) -> Result<()> {
		match self.mode {
			QueryMode::TopKAboveThreshold { threshold, top_k } => {
				if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
					return Err(Error::Configuration {
						message: "Threshold must be a finite number in the range 0.0-1.0."
							.to_string(),
					});
				}
				if top_k == 0 {
					return Err(Error::Configuration {
						message: "Top-k limit must be greater than zero.".to_string(),
					});
				}
			},
			QueryMode::BestSingleMatch { min_score } =>
				if !min_score.is_finite() || !(0.0..1.0).contains(&min_score) {
					return Err(Error::Configuration {
						message: "Best-match floor must be zero or greater and less than 1.0."
							.to_string(),
					});
				},
		}

		if self.fallback.trim().is_empty() {
			return Err(Error::Configuration {
				message: "Fallback answer must be non-empty.".to_string(),
			});
		}
		if self.fetch_timeout.is_zero() {
			return Err(Error::Configuration {
				message: "Corpus fetch timeout must be greater than zero.".to_string(),
			});
		}

		Ok(())
	}
}
impl Default for RetrievalSettings {
	fn default() -> Self {
		Self {
			mode: QueryMode::default(),
			stop_words: StopWordSet::english(),
			fallback: "I'm sorry, I don't know it.".to_string(),
			fetch_timeout: Duration::from_secs(10),
		}
	}
}

/// Answers one query at a time against a freshly vectorized corpus.
pub struct Session {
	settings: RetrievalSettings,
	normalizer: Arc<dyn Normalizer>,
	source: Arc<dyn CorpusSource>,
}
impl Session {
	pub fn new(settings: RetrievalSettings, source: Arc<dyn CorpusSource>) -> Result<Self> {
		settings.validate()?;

		Ok(Self { settings, normalizer: Arc::new(LemmaNormalizer), source })
	}

	pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
		self.normalizer = normalizer;

		self
	}

	pub fn settings(&self) -> &RetrievalSettings {
		&self.settings
	}

	pub async fn respond(&self, query: &str, topic: &str) -> Answer {
		self.respond_from(query, topic, self.source.as_ref()).await
	}

	pub async fn answer(&self, query: &str, topic: &str) -> String {
		self.respond(query, topic).await.text
	}

	/// Like [`Session::respond`], reading the corpus from `source` instead.
	pub async fn respond_from(
		&self,
		query: &str,
		topic: &str,
		source: &dyn CorpusSource,
	) -> Answer {
		let (raw_text, corpus) = match tokio::time::timeout(
			self.settings.fetch_timeout,
			source.fetch_raw_text(topic),
		)
		.await
		{
			Ok(Ok(raw_text)) => (raw_text, CorpusStatus::Available),
			Ok(Err(err)) => {
				tracing::warn!(topic = %topic, error = %err, "Corpus fetch failed.");

				(String::new(), CorpusStatus::Unavailable)
			},
			Err(_) => {
				tracing::warn!(
					topic = %topic,
					timeout_ms = self.settings.fetch_timeout.as_millis() as u64,
					"Corpus fetch timed out."
				);

				(String::new(), CorpusStatus::Unavailable)
			},
		};
		let (text, matches) = self.run(query, &raw_text);

		Answer { text, matches, corpus }
	}

	/// Runs the pipeline over already fetched text.
	pub fn answer_text(&self, query: &str, raw_text: &str) -> String {
		self.run(query, raw_text).0
	}

	fn run(&self, query: &str, raw_text: &str) -> (String, Vec<RankedCandidate>) {
		let segmentation = lexa_text::segment(raw_text);
		let sentences = segmentation.sentences;
		let query_row = sentences.len();
		let mut documents: Vec<&str> = sentences.iter().map(String::as_str).collect();

		documents.push(query);

		let builder = VectorSpaceBuilder::new(self.normalizer.as_ref(), &self.settings.stop_words);
		let matrix = builder.build(&documents);
		let ranked = rank::rank(&matrix, query_row, &self.settings.mode);

		if ranked.is_empty() {
			tracing::warn!(sentences = sentences.len(), "No sufficiently similar sentence found.");
		}

		(compose(&ranked, &sentences, &self.settings.fallback), ranked)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::BoxFuture;

	struct Fixed(&'static str);
	impl CorpusSource for Fixed {
		fn fetch_raw_text<'a>(&'a self, _topic: &'a str) -> BoxFuture<'a, Result<String>> {
			Box::pin(async move { Ok(self.0.to_string()) })
		}
	}

	#[test]
	fn rejects_out_of_range_settings() {
		let settings = RetrievalSettings {
			mode: QueryMode::TopKAboveThreshold { threshold: 1.5, top_k: 5 },
			..RetrievalSettings::default()
		};

		assert!(matches!(
			Session::new(settings, Arc::new(Fixed(""))),
			Err(Error::Configuration { .. })
		));

		let settings = RetrievalSettings {
			mode: QueryMode::BestSingleMatch { min_score: f64::NAN },
			..RetrievalSettings::default()
		};

		assert!(settings.validate().is_err());

		let settings =
			RetrievalSettings { fallback: "  ".to_string(), ..RetrievalSettings::default() };

		assert!(settings.validate().is_err());
	}

	#[test]
	fn answers_from_text_without_a_fetch() {
		let session = Session::new(RetrievalSettings::default(), Arc::new(Fixed("")))
			.expect("Default settings should be valid.");

		assert_eq!(
			session.answer_text("where did the cat sit", "the cat sat on the mat."),
			"The cat sat on the mat."
		);
		assert_eq!(
			session.answer_text("   ", "the cat sat on the mat."),
			"I'm sorry, I don't know it."
		);
	}

	#[tokio::test]
	async fn respond_reports_matches() {
		let session = Session::new(
			RetrievalSettings::default(),
			Arc::new(Fixed("paris is the capital of france. berlin is in germany.")),
		)
		.expect("Default settings should be valid.");
		let answer = session.respond("what is the capital of france", "Europe").await;

		assert_eq!(answer.corpus, CorpusStatus::Available);
		assert_eq!(answer.matches.first().map(|m| m.index), Some(0));
		assert_eq!(answer.text, "Paris is the capital of france.");
	}
}
