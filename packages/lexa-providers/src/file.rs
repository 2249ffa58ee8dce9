use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Reads `<root>/<topic>.txt` as the corpus for a topic.
pub struct FileCorpus {
	root: PathBuf,
}
impl FileCorpus {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn topic_path(&self, topic: &str) -> Result<PathBuf> {
		let name = topic.trim();

		if name.is_empty()
			|| name.contains(['/', '\\'])
			|| name.starts_with('.')
			|| name.chars().any(char::is_control)
		{
			return Err(Error::InvalidConfig {
				message: format!("Topic {name:?} cannot be mapped to a corpus file."),
			});
		}

		Ok(self.root.join(format!("{name}.txt")))
	}

	pub async fn read_raw_text(&self, topic: &str) -> Result<String> {
		let path = self.topic_path(topic)?;
		let raw = tokio::fs::read(&path).await.map_err(|err| Error::Io { path, source: err })?;

		Ok(String::from_utf8_lossy(&raw).to_lowercase())
	}
}
