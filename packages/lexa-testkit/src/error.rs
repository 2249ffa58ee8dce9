pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("LEXA_PG_DSN is not a usable Postgres DSN: {0}.")]
	InvalidDsn(String),
	#[error("The postgres admin database refused a connection: {0}.")]
	AdminUnavailable(String),
	#[error("Failed to {action} test database {name}.")]
	Database {
		action: &'static str,
		name: String,
		#[source]
		source: sqlx::Error,
	},
}
