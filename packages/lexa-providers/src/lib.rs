pub mod encyclopedia;
pub mod file;
pub mod markup;

mod error;

pub use error::{Error, Result};

use reqwest::header::{HeaderMap, HeaderName, USER_AGENT};
use serde_json::{Map, Value};

pub fn request_headers(user_agent: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(USER_AGENT, user_agent.parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "corpus.default_headers values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
