mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Chat, Config, Corpus, Postgres, Retrieval, Service, StopWords, Storage};

use std::{fs, path::Path};

pub const MODE_TOP_K_ABOVE_THRESHOLD: &str = "top_k_above_threshold";
pub const MODE_BEST_SINGLE_MATCH: &str = "best_single_match";
pub const SOURCE_ENCYCLOPEDIA: &str = "encyclopedia";
pub const SOURCE_FILE: &str = "file";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	validate_corpus(&cfg.corpus)?;
	validate_retrieval(&cfg.retrieval)?;

	if cfg.chat.exit_words.iter().any(|word| word.trim().is_empty()) {
		return Err(Error::Validation {
			message: "chat.exit_words must not contain blank entries.".to_string(),
		});
	}

	if let Some(postgres) = cfg.storage.postgres.as_ref() {
		if postgres.dsn.trim().is_empty() {
			return Err(Error::Validation {
				message: "storage.postgres.dsn must be non-empty.".to_string(),
			});
		}
		if postgres.pool_max_conns == 0 {
			return Err(Error::Validation {
				message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
			});
		}
	}

	Ok(())
}

pub fn validate_retrieval(retrieval: &Retrieval) -> Result<()> {
	if !matches!(retrieval.mode.as_str(), MODE_TOP_K_ABOVE_THRESHOLD | MODE_BEST_SINGLE_MATCH) {
		return Err(Error::Validation {
			message:
				"retrieval.mode must be one of top_k_above_threshold or best_single_match."
					.to_string(),
		});
	}
	if !retrieval.threshold.is_finite() {
		return Err(Error::Validation {
			message: "retrieval.threshold must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&retrieval.threshold) {
		return Err(Error::Validation {
			message: "retrieval.threshold must be in the range 0.0-1.0.".to_string(),
		});
	}
	if retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if !retrieval.min_best_score.is_finite() {
		return Err(Error::Validation {
			message: "retrieval.min_best_score must be a finite number.".to_string(),
		});
	}
	if !(0.0..1.0).contains(&retrieval.min_best_score) {
		return Err(Error::Validation {
			message: "retrieval.min_best_score must be zero or greater and less than 1.0."
				.to_string(),
		});
	}
	if let StopWords::Named(name) = &retrieval.stop_words
		&& !matches!(name.as_str(), "english" | "none")
	{
		return Err(Error::Validation {
			message: "retrieval.stop_words must be english, none, or a list of words.".to_string(),
		});
	}
	if retrieval.fallback.trim().is_empty() {
		return Err(Error::Validation {
			message: "retrieval.fallback must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn validate_corpus(corpus: &Corpus) -> Result<()> {
	match corpus.source.as_str() {
		SOURCE_ENCYCLOPEDIA =>
			if corpus.api_base.trim().is_empty() {
				return Err(Error::Validation {
					message: "corpus.api_base must be non-empty for the encyclopedia source."
						.to_string(),
				});
			},
		SOURCE_FILE =>
			if corpus.file_root.is_none() {
				return Err(Error::Validation {
					message: "corpus.file_root must be set for the file source.".to_string(),
				});
			},
		_ => {
			return Err(Error::Validation {
				message: "corpus.source must be one of encyclopedia or file.".to_string(),
			});
		},
	}

	if corpus.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "corpus.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if corpus.default_topic.trim().is_empty() {
		return Err(Error::Validation {
			message: "corpus.default_topic must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.corpus.file_root.as_deref().map(|root| root.trim().is_empty()).unwrap_or(false) {
		cfg.corpus.file_root = None;
	}

	cfg.corpus.api_base = cfg.corpus.api_base.trim_end_matches('/').to_string();
	cfg.chat.exit_words =
		cfg.chat.exit_words.iter().map(|word| word.trim().to_lowercase()).collect();

	if let StopWords::Named(name) = &mut cfg.retrieval.stop_words {
		*name = name.trim().to_ascii_lowercase();
	}
}
