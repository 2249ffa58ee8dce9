//! Throwaway Postgres databases for the ignored storage tests.

mod error;

pub use error::{Error, Result};

use std::{future::Future, str::FromStr};

use sqlx::{
	ConnectOptions, Connection,
	postgres::{PgConnectOptions, PgConnection},
};
use uuid::Uuid;

const DSN_VAR: &str = "LEXA_PG_DSN";

pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
}
impl TestDatabase {
	/// Creates `lexa_test_<uuid>` next to the database named by `base_dsn`.
	pub async fn create(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::InvalidDsn(err.to_string()))?;
		let admin = base.clone().database("postgres");
		let name = format!("lexa_test_{}", Uuid::new_v4().simple());

		admin_query(&admin, &format!(r#"CREATE DATABASE "{name}""#), "create", &name).await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn drop_database(self) -> Result<()> {
		let sql = format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE)"#, self.name);

		admin_query(&self.admin, &sql, "drop", &self.name).await
	}
}

pub fn env_dsn() -> Option<String> {
	std::env::var(DSN_VAR).ok().filter(|dsn| !dsn.trim().is_empty())
}

/// Runs `f` against a fresh database and drops it afterwards, even when `f` fails.
pub async fn with_test_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestDatabase) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let db = TestDatabase::create(base_dsn).await?;
	let result = f(&db).await;
	let dropped = db.drop_database().await;

	match (result, dropped) {
		(Ok(value), Ok(())) => Ok(value),
		(Err(err), _) | (Ok(_), Err(err)) => Err(err),
	}
}

async fn admin_query(
	admin: &PgConnectOptions,
	sql: &str,
	action: &'static str,
	name: &str,
) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin)
		.await
		.map_err(|err| Error::AdminUnavailable(err.to_string()))?;

	sqlx::query(sql)
		.execute(&mut conn)
		.await
		.map_err(|source| Error::Database { action, name: name.to_string(), source })?;

	Ok(())
}
