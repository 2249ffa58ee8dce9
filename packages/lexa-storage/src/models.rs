use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct UserTopic {
	pub user_id: String,
	pub current_topic: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
