pub mod cli;
pub mod dialogue;

pub use cli::Args;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use lexa_service::{CorpusStatus, DefaultCorpusSource, RetrievalSettings, Session};
use lexa_storage::{TopicStore, db::PgTopicStore, memory::MemoryTopicStore};

use crate::dialogue::{Action, Dialogue};

pub const DEGRADED_CORPUS_WARNING: &str =
	"Warning: the reference text for this topic could not be fetched.";
pub const FAILURE_NOTICE: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit,
}

/// One user's chat over a retrieval session and a topic store.
pub struct Bot {
	session: Session,
	store: Arc<dyn TopicStore>,
	user_id: String,
	dialogue: Dialogue,
}
impl Bot {
	pub fn new(
		session: Session,
		store: Arc<dyn TopicStore>,
		user_id: impl Into<String>,
		dialogue: Dialogue,
	) -> Self {
		Self { session, store, user_id: user_id.into(), dialogue }
	}

	/// Like [`Bot::handle`], but a failed line becomes a notice and the chat goes on.
	pub async fn reply(&mut self, line: &str) -> (Vec<String>, Flow) {
		match self.handle(line).await {
			Ok(outcome) => outcome,
			Err(err) => {
				tracing::warn!(user_id = %self.user_id, error = %err, "Failed to handle chat line.");

				(vec![FAILURE_NOTICE.to_string()], Flow::Continue)
			},
		}
	}

	/// Handles one input line and returns the lines to print.
	pub async fn handle(&mut self, line: &str) -> color_eyre::Result<(Vec<String>, Flow)> {
		let lines = match self.dialogue.step(line) {
			Action::Greet => vec![format!("Hello, {}!", self.user_id)],
			Action::ShowTopic => {
				let record = self.store.get_or_create(&self.user_id).await?;

				vec![format!("We are talking about '{}'", record.current_topic)]
			},
			Action::PromptTopic => vec!["Enter new topic:".to_string()],
			Action::SetTopic(topic) => {
				let record = self.store.set_topic(&self.user_id, &topic).await?;

				tracing::info!(
					user_id = %self.user_id,
					topic = %record.current_topic,
					"Topic changed."
				);

				vec![format!("Topic has been changed to '{}'", record.current_topic)]
			},
			Action::Cancelled => vec!["Good bye".to_string()],
			Action::Reply(reply) => vec![reply.to_string()],
			Action::Answer(query) => self.ask(&query).await?,
			Action::Exit => return Ok((Vec::new(), Flow::Exit)),
			Action::Ignore => Vec::new(),
		};

		Ok((lines, Flow::Continue))
	}

	/// Answers `query` under the user's current topic.
	pub async fn ask(&self, query: &str) -> color_eyre::Result<Vec<String>> {
		let record = self.store.get_or_create(&self.user_id).await?;
		let answer = self.session.respond(query, &record.current_topic).await;
		let mut lines = Vec::with_capacity(2);

		if answer.corpus == CorpusStatus::Unavailable {
			lines.push(DEGRADED_CORPUS_WARNING.to_string());
		}

		lines.push(answer.text);

		Ok(lines)
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = lexa_config::load(&args.config)?;

	init_tracing(&config)?;

	let store: Arc<dyn TopicStore> = match config.storage.postgres.as_ref() {
		Some(postgres) => {
			let store = PgTopicStore::connect(postgres, &config.corpus.default_topic).await?;

			store.ensure_schema().await?;

			Arc::new(store)
		},
		None => Arc::new(MemoryTopicStore::new(&config.corpus.default_topic)),
	};
	let settings = RetrievalSettings::from_config(&config.retrieval, &config.corpus)?;
	let source = DefaultCorpusSource::from_config(&config.corpus)?;
	let session = Session::new(settings, Arc::new(source))?;
	let dialogue = Dialogue::new(config.chat.exit_words.clone(), config.chat.greetings);
	let mut bot = Bot::new(session, store, args.user.clone(), dialogue);
	let mut stdout = tokio::io::stdout();

	if let Some(query) = args.ask.as_deref() {
		for line in bot.ask(query).await? {
			stdout.write_all(format!("{line}\n").as_bytes()).await?;
		}

		stdout.flush().await?;

		return Ok(());
	}

	tracing::info!(user_id = %args.user, source = %config.corpus.source, "Chat session started.");

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	while let Some(line) = lines.next_line().await? {
		let (replies, flow) = bot.reply(&line).await;

		for reply in replies {
			stdout.write_all(format!("{reply}\n").as_bytes()).await?;
		}

		stdout.flush().await?;

		if flow == Flow::Exit {
			break;
		}
	}

	tracing::info!(user_id = %args.user, "Chat session ended.");

	Ok(())
}

fn init_tracing(config: &lexa_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
