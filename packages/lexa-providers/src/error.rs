pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Failed to read corpus file at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("Invalid HTML selector: {message}")]
	InvalidSelector { message: String },
}
