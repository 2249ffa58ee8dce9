use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{BoxFuture, Result, TopicStore, models::UserTopic, schema};

pub struct PgTopicStore {
	pub pool: PgPool,
	default_topic: String,
}
impl PgTopicStore {
	pub async fn connect(cfg: &lexa_config::Postgres, default_topic: &str) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool, default_topic: default_topic.to_string() })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let lock_id: i64 = 5_120_301;
		// Advisory locks are held per connection, so keep the lock inside one transaction.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in schema::statements() {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	async fn get_or_create_inner(&self, user_id: &str) -> Result<UserTopic> {
		let user_id = crate::validate_user_id(user_id)?;
		let row = sqlx::query_as::<_, UserTopic>(
			"\
INSERT INTO user_topics (user_id, current_topic)
VALUES ($1, $2)
ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
RETURNING user_id, current_topic, created_at, updated_at",
		)
		.bind(user_id)
		.bind(self.default_topic.as_str())
		.fetch_one(&self.pool)
		.await?;

		Ok(row)
	}

	async fn set_topic_inner(&self, user_id: &str, topic: &str) -> Result<UserTopic> {
		let user_id = crate::validate_user_id(user_id)?;
		let topic = crate::validate_topic(topic)?;
		let row = sqlx::query_as::<_, UserTopic>(
			"\
INSERT INTO user_topics (user_id, current_topic)
VALUES ($1, $2)
ON CONFLICT (user_id) DO UPDATE
SET current_topic = EXCLUDED.current_topic, updated_at = now()
RETURNING user_id, current_topic, created_at, updated_at",
		)
		.bind(user_id)
		.bind(topic)
		.fetch_one(&self.pool)
		.await?;

		tracing::debug!(user_id, topic, "Updated user topic.");

		Ok(row)
	}
}
impl TopicStore for PgTopicStore {
	fn get_or_create<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserTopic>> {
		Box::pin(self.get_or_create_inner(user_id))
	}

	fn set_topic<'a>(
		&'a self,
		user_id: &'a str,
		topic: &'a str,
	) -> BoxFuture<'a, Result<UserTopic>> {
		Box::pin(self.set_topic_inner(user_id, topic))
	}
}
