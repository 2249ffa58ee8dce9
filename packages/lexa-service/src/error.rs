pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<lexa_providers::Error> for Error {
	fn from(err: lexa_providers::Error) -> Self {
		match err {
			lexa_providers::Error::InvalidConfig { message } => Self::Configuration { message },
			other => Self::Provider { message: other.to_string() },
		}
	}
}

impl From<lexa_config::Error> for Error {
	fn from(err: lexa_config::Error) -> Self {
		Self::Configuration { message: err.to_string() }
	}
}
