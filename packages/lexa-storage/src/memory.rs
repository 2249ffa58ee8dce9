use std::{collections::HashMap, sync::Mutex};

use time::OffsetDateTime;

use crate::{BoxFuture, Result, TopicStore, models::UserTopic};

/// Process-local topic store used when no database is configured.
pub struct MemoryTopicStore {
	default_topic: String,
	users: Mutex<HashMap<String, UserTopic>>,
}
impl MemoryTopicStore {
	pub fn new(default_topic: &str) -> Self {
		Self { default_topic: default_topic.to_string(), users: Mutex::new(HashMap::new()) }
	}

	fn get_or_create_sync(&self, user_id: &str) -> Result<UserTopic> {
		let user_id = crate::validate_user_id(user_id)?;
		let mut users = self.users.lock().unwrap_or_else(|err| err.into_inner());
		let record = users.entry(user_id.to_string()).or_insert_with(|| {
			let now = OffsetDateTime::now_utc();

			UserTopic {
				user_id: user_id.to_string(),
				current_topic: self.default_topic.clone(),
				created_at: now,
				updated_at: now,
			}
		});

		Ok(record.clone())
	}

	fn set_topic_sync(&self, user_id: &str, topic: &str) -> Result<UserTopic> {
		let topic = crate::validate_topic(topic)?;
		let mut record = self.get_or_create_sync(user_id)?;

		record.current_topic = topic.to_string();
		record.updated_at = OffsetDateTime::now_utc();

		self.users
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.insert(record.user_id.clone(), record.clone());

		Ok(record)
	}
}
impl TopicStore for MemoryTopicStore {
	fn get_or_create<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserTopic>> {
		let result = self.get_or_create_sync(user_id);

		Box::pin(async move { result })
	}

	fn set_topic<'a>(
		&'a self,
		user_id: &'a str,
		topic: &'a str,
	) -> BoxFuture<'a, Result<UserTopic>> {
		let result = self.set_topic_sync(user_id, topic);

		Box::pin(async move { result })
	}
}
