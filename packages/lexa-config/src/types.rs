use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub retrieval: Retrieval,
	#[serde(default)]
	pub chat: Chat,
	#[serde(default)]
	pub storage: Storage,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Corpus {
	/// Either "encyclopedia" or "file".
	pub source: String,
	#[serde(default = "default_api_base")]
	pub api_base: String,
	/// Directory holding `<topic>.txt` files. Required when `source = "file"`.
	pub file_root: Option<String>,
	pub timeout_ms: u64,
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	pub default_topic: String,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	/// Either "top_k_above_threshold" or "best_single_match".
	pub mode: String,
	pub threshold: f64,
	pub top_k: u32,
	/// Exclusive floor for the best-single-match mode.
	#[serde(default)]
	pub min_best_score: f64,
	#[serde(default)]
	pub stop_words: StopWords,
	#[serde(default = "default_fallback")]
	pub fallback: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StopWords {
	/// "english" or "none".
	Named(String),
	Custom(Vec<String>),
}
impl Default for StopWords {
	fn default() -> Self {
		Self::Named("english".to_string())
	}
}

#[derive(Debug, Deserialize)]
pub struct Chat {
	#[serde(default = "default_exit_words")]
	pub exit_words: Vec<String>,
	#[serde(default = "default_greetings")]
	pub greetings: bool,
}
impl Default for Chat {
	fn default() -> Self {
		Self { exit_words: default_exit_words(), greetings: default_greetings() }
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct Storage {
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

fn default_api_base() -> String {
	"https://en.wikipedia.org/wiki".to_string()
}

fn default_user_agent() -> String {
	concat!("lexa/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_fallback() -> String {
	"I'm sorry, I don't know it.".to_string()
}

fn default_exit_words() -> Vec<String> {
	vec!["stop".to_string(), "bye".to_string()]
}

fn default_greetings() -> bool {
	true
}
