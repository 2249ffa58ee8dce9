pub mod compose;
pub mod greeting;
pub mod rank;
pub mod session;
pub mod vectorize;

mod error;

pub use compose::compose;
pub use error::{Error, Result};
pub use greeting::greeting_reply;
pub use rank::{QueryMode, RankedCandidate, cosine_scores, rank, select};
pub use session::{Answer, CorpusStatus, RetrievalSettings, Session};
pub use vectorize::{SparseVector, TermMatrix, VectorSpaceBuilder};

use std::{future::Future, pin::Pin};

use lexa_config::Corpus;
use lexa_providers::{encyclopedia::EncyclopediaClient, file::FileCorpus};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Supplies the raw text the session searches for a topic.
pub trait CorpusSource
where
	Self: Send + Sync,
{
	fn fetch_raw_text<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, Result<String>>;
}

pub enum DefaultCorpusSource {
	Encyclopedia(EncyclopediaClient),
	File(FileCorpus),
}
impl DefaultCorpusSource {
	pub fn from_config(cfg: &Corpus) -> Result<Self> {
		match cfg.source.as_str() {
			lexa_config::SOURCE_ENCYCLOPEDIA =>
				Ok(Self::Encyclopedia(EncyclopediaClient::new(cfg)?)),
			lexa_config::SOURCE_FILE => {
				let Some(root) = cfg.file_root.as_deref() else {
					return Err(Error::Configuration {
						message: "corpus.file_root must be set for the file source.".to_string(),
					});
				};

				Ok(Self::File(FileCorpus::new(root)))
			},
			other => Err(Error::Configuration {
				message: format!("Unknown corpus source {other:?}."),
			}),
		}
	}
}

impl CorpusSource for DefaultCorpusSource {
	fn fetch_raw_text<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			let raw = match self {
				Self::Encyclopedia(client) => client.fetch_raw_text(topic).await?,
				Self::File(corpus) => corpus.read_raw_text(topic).await?,
			};

			Ok(raw)
		})
	}
}
