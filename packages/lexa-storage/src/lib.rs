pub mod db;
pub mod memory;
pub mod models;
pub mod schema;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

use crate::models::UserTopic;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Per-user topic preference consulted by chat front ends.
pub trait TopicStore
where
	Self: Send + Sync,
{
	/// Returns the user's record, creating it with the default topic when missing.
	fn get_or_create<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserTopic>>;

	/// Sets the user's topic, creating the user first if needed.
	fn set_topic<'a>(&'a self, user_id: &'a str, topic: &'a str)
	-> BoxFuture<'a, Result<UserTopic>>;
}

pub(crate) fn validate_topic(topic: &str) -> Result<&str> {
	let trimmed = topic.trim();

	if trimmed.is_empty() {
		return Err(Error::InvalidArgument("topic must be non-empty.".to_string()));
	}

	Ok(trimmed)
}

pub(crate) fn validate_user_id(user_id: &str) -> Result<&str> {
	let trimmed = user_id.trim();

	if trimmed.is_empty() {
		return Err(Error::InvalidArgument("user_id must be non-empty.".to_string()));
	}

	Ok(trimmed)
}
